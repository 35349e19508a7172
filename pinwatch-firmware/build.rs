//! Build script for pinwatch-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates button.toml at compile time, with both the `toml` crate and
//!   the firmware's own parser

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// GPIOs wired to board functions on the Pico
const RESERVED_PINS: [u32; 4] = [23, 24, 25, 29];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate button.toml configuration at compile time
fn validate_config() {
    // Re-run if button.toml changes
    println!("cargo:rerun-if-changed=button.toml");

    let config_path = Path::new("button.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: button.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a button.toml configuration file.         ║\n\
            ║  Please create one in the pinwatch-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read button.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in button.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_firmware_parser(&config_content, &mut errors);
    validate_sections(&config, &mut errors);
    validate_button(&config, &mut errors);
    validate_app(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in button.toml                     ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=button.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The firmware reads button.toml with its own minimal parser at boot;
/// anything it rejects would silently fall back to defaults
fn validate_firmware_parser(content: &str, errors: &mut Vec<String>) {
    if let Err(e) = pinwatch_core::config::parse_config(content) {
        errors.push(format!(
            "firmware parser rejects this file: {:?}",
            e
        ));
    }
}

/// Only [button] and [app] are understood by the firmware parser
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (key, value) in root {
        match (key.as_str(), value) {
            ("button" | "app", toml::Value::Table(_)) => {}
            ("button" | "app", _) => errors.push(format!("[{}] must be a table", key)),
            ("version", toml::Value::Integer(v)) if *v == 1 => {}
            ("version", _) => errors.push("version must be 1".to_string()),
            (_, toml::Value::Table(_)) => errors.push(format!("unknown section [{}]", key)),
            _ => {}
        }
    }
}

/// Validate the [button] section
fn validate_button(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(button) = config.get("button").and_then(|b| b.as_table()) else {
        return;
    };

    match button.get("pin") {
        Some(toml::Value::String(pin)) => {
            if let Err(e) = validate_pin(pin) {
                errors.push(format!("[button] pin '{}': {}", pin, e));
            }
        }
        Some(_) => errors.push("[button] pin must be a string".to_string()),
        None => {}
    }

    check_choice(button, "active", &["low", "high"], errors);
    check_choice(button, "edge", &["both", "rising", "falling", "none"], errors);
    check_choice(button, "pull", &["none", "up", "down"], errors);

    match button.get("settle_ms") {
        Some(toml::Value::Integer(ms)) if (0..=1000).contains(ms) => {}
        Some(_) => errors.push("[button] settle_ms must be 0-1000".to_string()),
        None => {}
    }
}

/// Validate the [app] section
fn validate_app(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(app) = config.get("app").and_then(|a| a.as_table()) else {
        return;
    };

    check_choice(app, "restart", &["session", "system"], errors);
}

/// Check that a pin name is a usable RP2040 GPIO
fn validate_pin(pin: &str) -> Result<(), String> {
    let bare = pin.trim().trim_start_matches(['!', '^']);
    let lower = bare.to_ascii_lowercase();
    let digits = lower
        .strip_prefix("bcm")
        .or_else(|| lower.strip_prefix("gpio"))
        .ok_or_else(|| "expected BCM<n> or gpio<n>".to_string())?;

    if bare.len() > 16 {
        return Err("name longer than 16 characters".to_string());
    }
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err("expected a pin number".to_string());
    }

    let num: u32 = digits.parse().map_err(|_| "pin number out of range".to_string())?;
    if num >= 30 {
        return Err("pin number must be 0-29".to_string());
    }
    if RESERVED_PINS.contains(&num) {
        return Err(format!("GPIO{} is reserved on the Pico", num));
    }
    Ok(())
}

/// Check an optional string key against its allowed values
fn check_choice(
    table: &toml::map::Map<String, toml::Value>,
    key: &str,
    allowed: &[&str],
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        Some(toml::Value::String(v)) if allowed.contains(&v.as_str()) => {}
        Some(_) => errors.push(format!("'{}' must be one of: {}", key, allowed.join(", "))),
        None => {}
    }
}
