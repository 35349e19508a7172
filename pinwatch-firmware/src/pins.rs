//! Pin allocation by number
//!
//! The button pin comes from `button.toml`, so it is picked out of the
//! peripherals at runtime rather than named in code.

use embassy_rp::gpio::AnyPin;
use embassy_rp::{Peri, Peripherals};

/// GPIOs wired to board functions on the Pico
///
/// 23: SMPS power save, 24: VBUS sense, 25: user LED, 29: VSYS/3 ADC.
pub const RESERVED_PINS: [u8; 4] = [23, 24, 25, 29];

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin reserved for a board function
    Reserved,
}

/// Check that `num` names a GPIO the button may use
pub fn check_pin(num: u8) -> Result<(), PinError> {
    if num >= 30 {
        return Err(PinError::InvalidPin);
    }
    if RESERVED_PINS.contains(&num) {
        return Err(PinError::Reserved);
    }
    Ok(())
}

/// Take a pin by number, consuming the peripherals
pub fn take_pin(p: Peripherals, num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
    check_pin(num)?;

    let pin = match num {
        0 => Peri::<AnyPin>::from(p.PIN_0),
        1 => Peri::<AnyPin>::from(p.PIN_1),
        2 => Peri::<AnyPin>::from(p.PIN_2),
        3 => Peri::<AnyPin>::from(p.PIN_3),
        4 => Peri::<AnyPin>::from(p.PIN_4),
        5 => Peri::<AnyPin>::from(p.PIN_5),
        6 => Peri::<AnyPin>::from(p.PIN_6),
        7 => Peri::<AnyPin>::from(p.PIN_7),
        8 => Peri::<AnyPin>::from(p.PIN_8),
        9 => Peri::<AnyPin>::from(p.PIN_9),
        10 => Peri::<AnyPin>::from(p.PIN_10),
        11 => Peri::<AnyPin>::from(p.PIN_11),
        12 => Peri::<AnyPin>::from(p.PIN_12),
        13 => Peri::<AnyPin>::from(p.PIN_13),
        14 => Peri::<AnyPin>::from(p.PIN_14),
        15 => Peri::<AnyPin>::from(p.PIN_15),
        16 => Peri::<AnyPin>::from(p.PIN_16),
        17 => Peri::<AnyPin>::from(p.PIN_17),
        18 => Peri::<AnyPin>::from(p.PIN_18),
        19 => Peri::<AnyPin>::from(p.PIN_19),
        20 => Peri::<AnyPin>::from(p.PIN_20),
        21 => Peri::<AnyPin>::from(p.PIN_21),
        22 => Peri::<AnyPin>::from(p.PIN_22),
        26 => Peri::<AnyPin>::from(p.PIN_26),
        27 => Peri::<AnyPin>::from(p.PIN_27),
        28 => Peri::<AnyPin>::from(p.PIN_28),
        _ => return Err(PinError::InvalidPin),
    };
    Ok(pin)
}
