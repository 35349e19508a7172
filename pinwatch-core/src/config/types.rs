//! Configuration type definitions

use pinwatch_hal::name::pin_name;
use pinwatch_hal::{PinName, PinSettings};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration format version
pub const CONFIG_VERSION: u8 = 1;

/// Pin watched when nothing else is configured
pub const DEFAULT_PIN_NAME: &str = "BCM21";

/// Delay between an edge and the sample that follows it
pub const DEFAULT_SETTLE_MS: u16 = 20;

/// Button pin configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    /// Pin name without `!`/`^` prefixes (e.g. "BCM21")
    pub pin: PinName,
    /// Direction, polarity, edge mode and bias
    pub settings: PinSettings,
    /// Settle time after an edge before sampling (ms)
    pub settle_ms: u16,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            pin: pin_name(DEFAULT_PIN_NAME).unwrap_or_default(),
            settings: PinSettings::button(),
            settle_ms: DEFAULT_SETTLE_MS,
        }
    }
}

/// What "restart" means when the button is released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RestartMode {
    /// Tear down and rebuild the application session
    #[default]
    Session,
    /// Reset the whole MCU
    System,
}

/// Application behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AppConfig {
    pub restart: RestartMode,
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WatchConfig {
    /// Configuration version for compatibility checks
    pub version: u8,
    pub button: ButtonConfig,
    pub app: AppConfig,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            button: ButtonConfig::default(),
            app: AppConfig::default(),
        }
    }
}
