//! pinwatch - Button-Gated Restart Firmware
//!
//! Main firmware binary for RP2040 boards. Watches one push button and
//! restarts the button session (or the whole MCU) every time the button
//! is released. The pin is only held open while the session observes it.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull as RpPull};
use embassy_rp::Peripherals;
use {defmt_rtt as _, panic_probe as _};

use pinwatch_core::config::{parse_config, WatchConfig, CONFIG_VERSION};
use pinwatch_hal::{parse_pin_name, InputLine, Pull};

use crate::pins::PinError;
use crate::tasks::ButtonLine;

/// Embedded configuration (compiled into firmware)
/// Edit button.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../button.toml");

mod pins;
mod session;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("pinwatch firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    info!(
        "Button config: pin={}, settings={}, settle={}ms, restart={}",
        config.button.pin.as_str(),
        config.button.settings,
        config.button.settle_ms,
        config.app.restart
    );

    match setup_button(p, &config) {
        Ok(line) => {
            unwrap!(spawner.spawn(tasks::button_task(
                line,
                config.button.clone(),
                config.app.restart
            )));
            info!("Button task spawned, firmware running");
        }
        Err(e) => error!("Button setup failed: {}, nothing to watch", e),
    }

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> WatchConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            if config.version != CONFIG_VERSION {
                warn!(
                    "Config version {} (expected {})",
                    config.version, CONFIG_VERSION
                );
            }
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            // build.rs validates button.toml, so this only happens when the
            // two parsers disagree
            error!("Failed to parse embedded config: {}", e);
            error!("Using default configuration");
            WatchConfig::default()
        }
    }
}

/// Claim the configured pin and wrap it for the core
fn setup_button(p: Peripherals, config: &WatchConfig) -> Result<ButtonLine, PinError> {
    let name = config.button.pin.as_str();
    let spec = parse_pin_name(name).map_err(|_| PinError::InvalidPin)?;
    let pin = pins::take_pin(p, spec.line)?;

    let pull = match config.button.settings.pull {
        Pull::None => RpPull::None,
        Pull::Up => RpPull::Up,
        Pull::Down => RpPull::Down,
    };
    let input = Input::new(pin, pull);
    info!("{} claimed as GPIO{}", name, spec.line);

    InputLine::new(name, input).map_err(|_| PinError::InvalidPin)
}
