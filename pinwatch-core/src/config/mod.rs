//! Configuration
//!
//! Typed button configuration and the minimal TOML reader that fills it
//! from `button.toml`.

pub mod toml;
pub mod types;

pub use toml::{parse_config, ParseError};
pub use types::*;
