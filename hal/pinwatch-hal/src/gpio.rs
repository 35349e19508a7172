//! GPIO pin abstractions
//!
//! Pins are addressed by name through a [`PeripheralManager`], which
//! hands out an opaque [`PinId`] for the lifetime of the open pin.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Electrical level of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Input
    #[default]
    In,
    /// Output, driven low after configuration
    OutInitiallyLow,
    /// Output, driven high after configuration
    OutInitiallyHigh,
}

/// Which electrical level counts as "active"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ActiveType {
    /// High level is active
    High,
    /// Low level is active (button wired to ground)
    #[default]
    Low,
}

impl ActiveType {
    /// Apply the polarity to a raw level
    pub fn is_active(self, level: Level) -> bool {
        match self {
            ActiveType::High => level == Level::High,
            ActiveType::Low => level == Level::Low,
        }
    }
}

/// Edges that produce events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EdgeTrigger {
    /// No edge events
    None,
    /// Low to high transitions
    Rising,
    /// High to low transitions
    Falling,
    /// Any transition
    #[default]
    Both,
}

/// Internal bias resistor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pull {
    /// Floating
    #[default]
    None,
    /// Pull-up
    Up,
    /// Pull-down
    Down,
}

/// Full configuration applied to an open pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinSettings {
    pub direction: Direction,
    pub active: ActiveType,
    pub edge: EdgeTrigger,
    pub pull: Pull,
}

impl PinSettings {
    /// Input, active-low, both edges: a button wired to ground
    pub const fn button() -> Self {
        Self {
            direction: Direction::In,
            active: ActiveType::Low,
            edge: EdgeTrigger::Both,
            pull: Pull::None,
        }
    }
}

/// Errors reported by a peripheral manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// No pin with that name on this board
    NotFound,
    /// Pin is already open
    Busy,
    /// Name could not be parsed
    InvalidName,
    /// Requested configuration is not supported by the pin
    Unsupported,
    /// Operation on a pin that is not open
    Closed,
    /// Underlying driver error
    Io,
}

/// Handle of an open pin
///
/// Only valid between a successful `open_gpio` and the matching `close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(pub u8);

/// Opens, configures, samples and closes named pins
pub trait PeripheralManager {
    /// Open a pin by name
    fn open_gpio(&mut self, name: &str) -> Result<PinId, GpioError>;

    /// Apply direction, polarity, edge mode and bias
    fn configure(&mut self, pin: PinId, settings: &PinSettings) -> Result<(), GpioError>;

    /// Sample the raw electrical level
    fn read_level(&mut self, pin: PinId) -> Result<Level, GpioError>;

    /// Release the pin
    fn close(&mut self, pin: PinId) -> Result<(), GpioError>;
}

/// Edge notification for an open pin
#[allow(async_fn_in_trait)]
pub trait EdgeWait: PeripheralManager {
    /// Wait for the next edge selected by the pin's [`EdgeTrigger`]
    async fn wait_for_edge(&mut self, pin: PinId) -> Result<(), GpioError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_low_polarity() {
        assert!(ActiveType::Low.is_active(Level::Low));
        assert!(!ActiveType::Low.is_active(Level::High));
        assert!(ActiveType::High.is_active(Level::High));
        assert!(!ActiveType::High.is_active(Level::Low));
    }

    #[test]
    fn test_button_settings() {
        let settings = PinSettings::button();
        assert_eq!(settings.direction, Direction::In);
        assert_eq!(settings.active, ActiveType::Low);
        assert_eq!(settings.edge, EdgeTrigger::Both);
        assert_eq!(settings, PinSettings::default());
    }

    #[test]
    fn test_level_from_bool() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
    }
}
