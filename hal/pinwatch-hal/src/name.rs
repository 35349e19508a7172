//! Pin name parsing
//!
//! Supports formats:
//! - "BCM21" -> line 21 (Broadcom numbering, as printed on Pi headers)
//! - "gpio21" / "GPIO21" -> line 21
//! - "!gpio21" -> line 21, active-low
//! - "^gpio4" -> line 4, pull-up
//! - "!^BCM21" / "^!BCM21" -> both flags

use heapless::String;

use crate::gpio::GpioError;

/// Maximum length of a pin name
pub const MAX_PIN_NAME_LEN: usize = 16;

/// Owned pin name
pub type PinName = String<MAX_PIN_NAME_LEN>;

/// Parsed pin name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSpec {
    /// Line number within the GPIO bank
    pub line: u8,
    /// Name carried a `!` prefix
    pub active_low: bool,
    /// Name carried a `^` prefix
    pub pull_up: bool,
}

/// Parse a pin name
pub fn parse_pin_name(s: &str) -> Result<PinSpec, GpioError> {
    let mut s = s.trim();
    let mut active_low = false;
    let mut pull_up = false;

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            active_low = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let digits = strip_prefix_ignore_case(s, "bcm")
        .or_else(|| strip_prefix_ignore_case(s, "gpio"))
        .ok_or(GpioError::InvalidName)?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GpioError::InvalidName);
    }
    let line: u8 = digits.parse().map_err(|_| GpioError::InvalidName)?;

    Ok(PinSpec {
        line,
        active_low,
        pull_up,
    })
}

/// Copy a name into owned storage
pub fn pin_name(s: &str) -> Result<PinName, GpioError> {
    let mut name = PinName::new();
    name.push_str(s).map_err(|_| GpioError::InvalidName)?;
    Ok(name)
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}
