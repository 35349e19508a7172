//! Single-line peripheral manager
//!
//! Adapts one `embedded-hal` input pin into a [`PeripheralManager`] that
//! knows exactly one pin name. Boards that construct their pins up front
//! (most embedded HALs) use this to expose the button line to the core.
//!
//! The bias resistor is chosen when the board builds the pin, so
//! `configure` records `pull` but cannot change it.

use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

use crate::gpio::{
    Direction, EdgeTrigger, EdgeWait, GpioError, Level, PeripheralManager, PinId, PinSettings,
};
use crate::name::{parse_pin_name, pin_name, PinName};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    Closed,
    Open,
    Configured(PinSettings),
}

/// A manager for exactly one named input line
pub struct InputLine<P> {
    name: PinName,
    line: u8,
    pin: P,
    state: LineState,
}

impl<P> InputLine<P> {
    /// Wrap `pin`, which answers to `name` (e.g. "BCM21")
    pub fn new(name: &str, pin: P) -> Result<Self, GpioError> {
        let spec = parse_pin_name(name)?;
        Ok(Self {
            name: pin_name(name.trim())?,
            line: spec.line,
            pin,
            state: LineState::Closed,
        })
    }

    /// Name the line was created with
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Line number parsed from the name
    pub fn line(&self) -> u8 {
        self.line
    }

    /// Check if the line is currently open
    pub fn is_open(&self) -> bool {
        self.state != LineState::Closed
    }

    /// Settings applied by the last `configure`, while open
    pub fn settings(&self) -> Option<PinSettings> {
        match self.state {
            LineState::Configured(settings) => Some(settings),
            _ => None,
        }
    }

    /// Access the wrapped pin
    pub fn pin(&self) -> &P {
        &self.pin
    }

    /// Mutable access to the wrapped pin
    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    /// Unwrap the pin
    pub fn into_inner(self) -> P {
        self.pin
    }

    fn check_open(&self, pin: PinId) -> Result<(), GpioError> {
        if pin.0 != self.line {
            return Err(GpioError::NotFound);
        }
        if self.state == LineState::Closed {
            return Err(GpioError::Closed);
        }
        Ok(())
    }
}

impl<P: InputPin> PeripheralManager for InputLine<P> {
    fn open_gpio(&mut self, name: &str) -> Result<PinId, GpioError> {
        let spec = parse_pin_name(name)?;
        if spec.line != self.line {
            return Err(GpioError::NotFound);
        }
        if self.is_open() {
            return Err(GpioError::Busy);
        }
        self.state = LineState::Open;
        Ok(PinId(self.line))
    }

    fn configure(&mut self, pin: PinId, settings: &PinSettings) -> Result<(), GpioError> {
        self.check_open(pin)?;
        if settings.direction != Direction::In {
            return Err(GpioError::Unsupported);
        }
        self.state = LineState::Configured(*settings);
        Ok(())
    }

    fn read_level(&mut self, pin: PinId) -> Result<Level, GpioError> {
        self.check_open(pin)?;
        self.pin.is_high().map(Level::from).map_err(|_| GpioError::Io)
    }

    fn close(&mut self, pin: PinId) -> Result<(), GpioError> {
        self.check_open(pin)?;
        self.state = LineState::Closed;
        Ok(())
    }
}

impl<P: InputPin + Wait> EdgeWait for InputLine<P> {
    async fn wait_for_edge(&mut self, pin: PinId) -> Result<(), GpioError> {
        self.check_open(pin)?;
        let edge = self.settings().map_or(EdgeTrigger::None, |s| s.edge);

        let result = match edge {
            EdgeTrigger::Both => self.pin.wait_for_any_edge().await,
            EdgeTrigger::Rising => self.pin.wait_for_rising_edge().await,
            EdgeTrigger::Falling => self.pin.wait_for_falling_edge().await,
            EdgeTrigger::None => {
                // Edge events disabled: nothing will ever arrive
                core::future::pending::<()>().await;
                Ok(())
            }
        };
        result.map_err(|_| GpioError::Io)
    }
}
