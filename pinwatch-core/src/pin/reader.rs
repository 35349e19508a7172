//! Pin reader
//!
//! Owns one named input pin and holds it open only while something is
//! subscribed. Every edge delivered through [`PinReader::on_edge`] samples
//! the pin and publishes a [`PinEdge`].
//!
//! Open and configure failures are logged and leave the reader inactive.
//! They are never reported to observers and never retried.

use pinwatch_hal::{
    ActiveType, EdgeWait, GpioError, Level, PeripheralManager, PinId, PinName, PinSettings,
};

use crate::observe::{Activation, ActivationGate, LiveValue, ObserveError, Observer, ObserverId};

/// One edge event: the level sampled at edge time plus the pin's polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinEdge {
    /// Raw level, or the error the read produced
    pub reading: Result<Level, GpioError>,
    /// Configured polarity
    pub active: ActiveType,
}

impl PinEdge {
    /// Polarity-adjusted state (true = active)
    pub fn is_active(&self) -> Result<bool, GpioError> {
        self.reading.map(|level| self.active.is_active(level))
    }
}

/// Subscriber-gated owner of one input pin
pub struct PinReader<'a, M, const N: usize> {
    manager: M,
    name: PinName,
    settings: PinSettings,
    handle: Option<PinId>,
    gate: ActivationGate,
    attached: bool,
    live: LiveValue<'a, PinEdge, N>,
    last_error: Option<GpioError>,
}

impl<'a, M: PeripheralManager, const N: usize> PinReader<'a, M, N> {
    /// Create an inactive reader for `name`
    pub fn new(manager: M, name: PinName, settings: PinSettings) -> Self {
        Self {
            manager,
            name,
            settings,
            handle: None,
            gate: ActivationGate::new(),
            attached: false,
            live: LiveValue::new(),
            last_error: None,
        }
    }

    /// Register an observer of edge events
    ///
    /// The first subscriber opens the pin.
    pub fn observe(
        &mut self,
        observer: &'a dyn Observer<PinEdge>,
    ) -> Result<ObserverId, ObserveError> {
        let id = self.live.observe(observer)?;
        self.subscriber_added();
        Ok(id)
    }

    /// Unregister an observer
    ///
    /// The last subscriber closes the pin.
    pub fn remove_observer(&mut self, id: ObserverId) {
        if self.live.remove_observer(id) {
            self.subscriber_removed();
        }
    }

    /// Subscribe an owner that pulls events from [`on_edge`](Self::on_edge)
    ///
    /// There is at most one owner; attaching twice is a no-op.
    pub fn attach(&mut self) {
        if self.attached {
            return;
        }
        self.attached = true;
        self.subscriber_added();
    }

    /// Drop an owner subscription added with [`attach`](Self::attach)
    ///
    /// No-op when nothing is attached.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        self.subscriber_removed();
    }

    /// Check if an owner is attached
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    fn subscriber_added(&mut self) {
        if self.gate.acquire() == Activation::Activated {
            self.activate();
        }
    }

    fn subscriber_removed(&mut self) {
        if self.gate.release() == Activation::Deactivated {
            self.deactivate();
        }
    }

    /// Open and configure the pin
    ///
    /// No-op if the pin is already open.
    pub fn activate(&mut self) {
        debug!("{}: activating", self.name.as_str());
        if self.handle.is_some() {
            return;
        }

        let pin = match self.manager.open_gpio(self.name.as_str()) {
            Ok(pin) => pin,
            Err(e) => {
                warn!("{}: open failed: {}", self.name.as_str(), e);
                self.last_error = Some(e);
                return;
            }
        };

        if let Err(e) = self.manager.configure(pin, &self.settings) {
            warn!("{}: configure failed: {}", self.name.as_str(), e);
            self.last_error = Some(e);
            if let Err(e) = self.manager.close(pin) {
                warn!("{}: close failed: {}", self.name.as_str(), e);
            }
            return;
        }

        self.last_error = None;
        self.handle = Some(pin);
    }

    /// Close the pin and reset the published value
    ///
    /// No-op if the pin is not open.
    pub fn deactivate(&mut self) {
        debug!("{}: deactivating", self.name.as_str());
        if let Some(pin) = self.handle.take() {
            if let Err(e) = self.manager.close(pin) {
                warn!("{}: close failed: {}", self.name.as_str(), e);
                self.last_error = Some(e);
            }
        }
        self.live.set_value(None);
    }

    /// Handle an edge reported by the host
    ///
    /// Samples the pin and publishes the reading. Returns `None` without
    /// publishing if the pin is not open.
    pub fn on_edge(&mut self) -> Option<PinEdge> {
        let pin = self.handle?;
        let edge = PinEdge {
            reading: self.manager.read_level(pin),
            active: self.settings.active,
        };
        trace!("{}: edge {}", self.name.as_str(), edge);
        self.live.set_value(Some(edge));
        Some(edge)
    }

    /// Check if the pin is held open
    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Check if any subscriber is registered
    pub fn is_active(&self) -> bool {
        self.gate.is_active()
    }

    /// Latest published edge
    pub fn value(&self) -> Option<PinEdge> {
        self.live.value()
    }

    /// Most recent open, configure or close failure
    ///
    /// Cleared by a successful open. Observers never see this; it exists
    /// for diagnostics.
    pub fn last_error(&self) -> Option<GpioError> {
        self.last_error
    }

    /// Pin name
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Pin settings applied on activation
    pub fn settings(&self) -> &PinSettings {
        &self.settings
    }

    /// Access the peripheral manager
    pub fn manager(&self) -> &M {
        &self.manager
    }

    /// Mutable access to the peripheral manager
    pub fn manager_mut(&mut self) -> &mut M {
        &mut self.manager
    }
}

impl<'a, M: EdgeWait, const N: usize> PinReader<'a, M, N> {
    /// Wait for the next edge on the open pin
    ///
    /// Does not dispatch; call [`on_edge`](Self::on_edge) afterwards.
    pub async fn wait_for_edge(&mut self) -> Result<(), GpioError> {
        let pin = self.handle.ok_or(GpioError::Closed)?;
        self.manager.wait_for_edge(pin).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::mock::MockManager;
    use core::cell::RefCell;
    use embassy_futures::block_on;
    use pinwatch_hal::name::pin_name;
    use std::vec::Vec;

    struct Recorder {
        seen: RefCell<Vec<Option<PinEdge>>>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Observer<PinEdge> for Recorder {
        fn on_changed(&self, value: Option<PinEdge>) {
            self.seen.borrow_mut().push(value);
        }
    }

    fn reader<'a>(manager: MockManager) -> PinReader<'a, MockManager, 4> {
        PinReader::new(manager, pin_name("BCM21").unwrap(), PinSettings::button())
    }

    #[test]
    fn test_first_subscriber_opens_last_closes() {
        let a = Recorder::new();
        let b = Recorder::new();
        let mut reader = reader(MockManager::new());
        assert!(!reader.is_open());

        let id_a = reader.observe(&a).unwrap();
        let id_b = reader.observe(&b).unwrap();
        assert!(reader.is_open());
        assert_eq!(reader.manager().opens, 1);
        assert_eq!(reader.manager().configured, Some(PinSettings::button()));

        reader.remove_observer(id_a);
        assert!(reader.is_open());
        assert_eq!(reader.manager().closes, 0);

        reader.remove_observer(id_b);
        assert!(!reader.is_open());
        assert_eq!(reader.manager().closes, 1);
    }

    #[test]
    fn test_repeated_deactivation_closes_once() {
        let obs = Recorder::new();
        let mut reader = reader(MockManager::new());
        let id = reader.observe(&obs).unwrap();
        reader.remove_observer(id);
        reader.remove_observer(id);
        reader.detach();
        reader.deactivate();

        assert_eq!(reader.manager().opens, 1);
        assert_eq!(reader.manager().closes, 1);
    }

    #[test]
    fn test_unmatched_detach_keeps_observer_open() {
        let obs = Recorder::new();
        let mut reader = reader(MockManager::new());
        reader.observe(&obs).unwrap();

        reader.detach();
        assert!(reader.is_active());
        assert!(reader.is_open());
        assert_eq!(reader.manager().closes, 0);

        // A second attach does not take a second subscription
        reader.attach();
        reader.attach();
        assert!(reader.is_attached());
        reader.detach();
        reader.detach();
        assert!(!reader.is_attached());
        assert!(reader.is_open());
    }

    #[test]
    fn test_edge_publishes_reading() {
        let obs = Recorder::new();
        let mut reader = reader(MockManager::new());
        reader.observe(&obs).unwrap();

        reader.manager_mut().level = Level::Low;
        let edge = reader.on_edge().unwrap();
        assert_eq!(edge.reading, Ok(Level::Low));
        assert_eq!(edge.is_active(), Ok(true));

        reader.manager_mut().level = Level::High;
        assert_eq!(reader.on_edge().unwrap().is_active(), Ok(false));

        let seen = obs.seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].unwrap().reading, Ok(Level::Low));
        assert_eq!(seen[1].unwrap().reading, Ok(Level::High));
    }

    #[test]
    fn test_deactivation_resets_value() {
        let obs = Recorder::new();
        let mut reader = reader(MockManager::new());
        reader.attach();
        let id = reader.observe(&obs).unwrap();
        reader.on_edge();
        assert!(reader.value().is_some());

        reader.remove_observer(id);
        reader.detach();
        assert_eq!(reader.value(), None);
    }

    #[test]
    fn test_edge_ignored_while_closed() {
        let mut reader = reader(MockManager::new());
        assert_eq!(reader.on_edge(), None);
        assert_eq!(reader.manager().reads, 0);
    }

    #[test]
    fn test_open_failure_stays_inactive() {
        let obs = Recorder::new();
        let mut manager = MockManager::new();
        manager.open_error = Some(GpioError::Busy);
        let mut reader = reader(manager);

        reader.observe(&obs).unwrap();
        assert!(reader.is_active());
        assert!(!reader.is_open());
        assert_eq!(reader.last_error(), Some(GpioError::Busy));
        assert_eq!(reader.on_edge(), None);
        assert!(obs.seen.borrow().is_empty());
    }

    #[test]
    fn test_configure_failure_closes_handle() {
        let mut manager = MockManager::new();
        manager.configure_error = Some(GpioError::Unsupported);
        let mut reader = reader(manager);

        reader.attach();
        assert!(!reader.is_open());
        assert_eq!(reader.manager().opens, 1);
        assert_eq!(reader.manager().closes, 1);
        assert_eq!(reader.last_error(), Some(GpioError::Unsupported));

        // Leaving does not close a second time
        reader.detach();
        assert_eq!(reader.manager().closes, 1);
    }

    #[test]
    fn test_read_error_is_published_as_reading() {
        let mut reader = reader(MockManager::new());
        reader.attach();
        reader.manager_mut().read_error = Some(GpioError::Io);

        let edge = reader.on_edge().unwrap();
        assert_eq!(edge.reading, Err(GpioError::Io));
        assert_eq!(edge.is_active(), Err(GpioError::Io));
    }

    #[test]
    fn test_wait_for_edge() {
        let mut reader = reader(MockManager::new());
        assert_eq!(block_on(reader.wait_for_edge()), Err(GpioError::Closed));

        reader.attach();
        assert_eq!(block_on(reader.wait_for_edge()), Ok(()));
        assert_eq!(reader.manager().waits, 1);
    }
}
