//! Pressed-state mediator
//!
//! Republishes the pin reader's edges as a polarity-adjusted "pressed"
//! boolean. The mediator owns its reader and holds a subscription on it
//! exactly while it has subscribers of its own; losing the last one
//! detaches from the reader and resets the published value.

use pinwatch_hal::{EdgeWait, GpioError, PeripheralManager};

use crate::observe::{Activation, ActivationGate, LiveValue, ObserveError, Observer, ObserverId};
use crate::pin::{PinEdge, PinReader};

/// Maps pin edges to `Some(pressed)`
pub struct PressedMediator<'a, M, const N: usize> {
    source: PinReader<'a, M, N>,
    gate: ActivationGate,
    live: LiveValue<'a, bool, N>,
    linked: bool,
}

impl<'a, M: PeripheralManager, const N: usize> PressedMediator<'a, M, N> {
    /// Create an inactive mediator over `source`
    pub fn new(source: PinReader<'a, M, N>) -> Self {
        Self {
            source,
            gate: ActivationGate::new(),
            live: LiveValue::new(),
            linked: false,
        }
    }

    /// Register an observer of the pressed state
    ///
    /// The first observer links the mediator to its reader, which opens
    /// the pin.
    pub fn observe(&mut self, observer: &'a dyn Observer<bool>) -> Result<ObserverId, ObserveError> {
        let id = self.live.observe(observer)?;
        if self.gate.acquire() == Activation::Activated {
            self.on_active();
        }
        Ok(id)
    }

    /// Unregister an observer
    ///
    /// The last observer unlinks from the reader and resets the value.
    pub fn remove_observer(&mut self, id: ObserverId) {
        if !self.live.remove_observer(id) {
            return;
        }
        if self.gate.release() == Activation::Deactivated {
            self.on_inactive();
        }
    }

    fn on_active(&mut self) {
        debug!("mediator: activating");
        if !self.linked {
            self.source.attach();
            self.linked = true;
        }
    }

    fn on_inactive(&mut self) {
        debug!("mediator: deactivating");
        if self.linked {
            self.source.detach();
            self.linked = false;
        }
        self.live.set_value(None);
    }

    /// Handle an edge reported by the host
    ///
    /// Ignored unless linked to the reader.
    pub fn on_edge(&mut self) {
        if !self.linked {
            return;
        }
        let edge = self.source.on_edge();
        self.on_source_changed(edge);
    }

    /// Map one reader value to the pressed state
    ///
    /// An absent value is ignored. A failed read is logged and skipped,
    /// leaving the published value unchanged.
    pub fn on_source_changed(&mut self, edge: Option<PinEdge>) {
        let Some(edge) = edge else {
            return;
        };
        match edge.is_active() {
            Ok(pressed) => self.live.set_value(Some(pressed)),
            Err(e) => warn!("mediator: read failed: {}", e),
        }
    }

    /// Latest pressed state
    pub fn value(&self) -> Option<bool> {
        self.live.value()
    }

    /// Check if any observer is registered
    pub fn is_active(&self) -> bool {
        self.gate.is_active()
    }

    /// Check if the reader currently holds the pin open
    pub fn is_source_open(&self) -> bool {
        self.source.is_open()
    }

    /// Access the reader
    pub fn source(&self) -> &PinReader<'a, M, N> {
        &self.source
    }

    /// Mutable access to the reader
    pub fn source_mut(&mut self) -> &mut PinReader<'a, M, N> {
        &mut self.source
    }
}

impl<'a, M: EdgeWait, const N: usize> PressedMediator<'a, M, N> {
    /// Wait for the next edge on the reader's pin
    pub async fn wait_for_edge(&mut self) -> Result<(), GpioError> {
        self.source.wait_for_edge().await
    }
}
