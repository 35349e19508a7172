//! pinwatch Hardware Abstraction Layer
//!
//! This crate defines the peripheral traits the button logic is written
//! against. A board provides a [`PeripheralManager`] that can open a pin
//! by name, configure it, sample it and close it again, plus an
//! [`EdgeWait`] implementation that parks until the configured edge.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (pinwatch-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pinwatch-core (reader, mediator, ...)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pinwatch-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  InputLine<P: embedded-hal InputPin>    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Contents
//!
//! - [`gpio`] - pin settings, errors, and the manager traits
//! - [`name`] - pin name parsing (`BCM21`, `!^gpio4`, ...)
//! - [`line`] - single-line manager over any `embedded-hal` input pin

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod gpio;
pub mod line;
pub mod name;

// Re-export key types at crate root for convenience
pub use gpio::{
    ActiveType, Direction, EdgeTrigger, EdgeWait, GpioError, Level, PeripheralManager, PinId,
    PinSettings, Pull,
};
pub use line::InputLine;
pub use name::{parse_pin_name, pin_name, PinName, PinSpec, MAX_PIN_NAME_LEN};
