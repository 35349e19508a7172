//! Simple TOML parser for button configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! pinwatch configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - Basic ("...") and literal ('...') strings
//! - Integers with `_` separators between digits
//! - [section] headers
//! - Comments (# ...), including trailing comments
//!
//! NOT supported:
//! - Escape sequences in basic strings
//! - Arrays and inline tables
//! - Multi-line strings
//! - Dotted keys
//!
//! Unknown keys are ignored so newer files still load on older firmware.

use core::str::FromStr;

use heapless::String;
use pinwatch_hal::name::pin_name;
use pinwatch_hal::{parse_pin_name, ActiveType, EdgeTrigger, Pull};

use super::types::{RestartMode, WatchConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Button,
    App,
}

/// Parse TOML configuration into WatchConfig
pub fn parse_config(input: &str) -> Result<WatchConfig, ParseError> {
    let mut config = WatchConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Check for section header
        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::InvalidLine)?;
        let key = key.trim();
        let value = strip_comment(value);

        match section {
            Section::Root => apply_root(&mut config, key, value)?,
            Section::Button => apply_button(&mut config, key, value)?,
            Section::App => apply_app(&mut config, key, value)?,
        }
    }

    Ok(config)
}

fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let inner = strip_comment(line)
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?;

    match inner.trim() {
        "button" => Ok(Section::Button),
        "app" => Ok(Section::App),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_root(config: &mut WatchConfig, key: &str, value: &str) -> Result<(), ParseError> {
    if key == "version" {
        config.version = parse_int(value)?;
    }
    Ok(())
}

fn apply_button(config: &mut WatchConfig, key: &str, value: &str) -> Result<(), ParseError> {
    let button = &mut config.button;

    match key {
        "pin" => {
            let raw = parse_string(value)?;
            let spec = parse_pin_name(raw).map_err(|_| ParseError::InvalidPin)?;
            let bare = raw.trim().trim_start_matches(['!', '^']);
            button.pin = pin_name(bare).map_err(|_| ParseError::InvalidPin)?;
            if spec.active_low {
                button.settings.active = ActiveType::Low;
            }
            if spec.pull_up {
                button.settings.pull = Pull::Up;
            }
        }
        "active" => {
            button.settings.active = match parse_string(value)? {
                "low" => ActiveType::Low,
                "high" => ActiveType::High,
                _ => return Err(ParseError::InvalidValue),
            };
        }
        "edge" => {
            button.settings.edge = match parse_string(value)? {
                "both" => EdgeTrigger::Both,
                "rising" => EdgeTrigger::Rising,
                "falling" => EdgeTrigger::Falling,
                "none" => EdgeTrigger::None,
                _ => return Err(ParseError::InvalidValue),
            };
        }
        "pull" => {
            button.settings.pull = match parse_string(value)? {
                "up" => Pull::Up,
                "down" => Pull::Down,
                "none" => Pull::None,
                _ => return Err(ParseError::InvalidValue),
            };
        }
        "settle_ms" => {
            button.settle_ms = parse_int(value)?;
        }
        _ => {}
    }
    Ok(())
}

fn apply_app(config: &mut WatchConfig, key: &str, value: &str) -> Result<(), ParseError> {
    if key == "restart" {
        config.app.restart = match parse_string(value)? {
            "session" => RestartMode::Session,
            "system" => RestartMode::System,
            _ => return Err(ParseError::InvalidValue),
        };
    }
    Ok(())
}

/// Remove a trailing `# comment` that is not inside a string
fn strip_comment(value: &str) -> &str {
    let mut quote: Option<char> = None;
    for (i, c) in value.char_indices() {
        match c {
            '"' | '\'' if quote.is_none() => quote = Some(c),
            c if Some(c) == quote => quote = None,
            '#' if quote.is_none() => return value[..i].trim(),
            _ => {}
        }
    }
    value.trim()
}

/// Parse a quoted string value
///
/// Basic strings may not contain escapes; literal strings are taken
/// verbatim.
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if let Some(inner) = value.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
        if !inner.contains('\'') {
            return Ok(inner);
        }
    } else if let Some(inner) = value.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        if !inner.contains(['"', '\\']) {
            return Ok(inner);
        }
    }
    Err(ParseError::InvalidValue)
}

/// Parse a decimal integer, allowing `_` between digits
fn parse_int<T: FromStr>(value: &str) -> Result<T, ParseError> {
    let bytes = value.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'_' {
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| bytes.get(j));
        let after = bytes.get(i + 1);
        if !matches!((before, after), (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit())
        {
            return Err(ParseError::InvalidValue);
        }
    }

    let mut digits: String<24> = String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}
