//! Board-agnostic core logic for the pinwatch firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Observable values gated by subscriber count
//! - Pin reader that owns the hardware line while observed
//! - Pressed-state mediator (polarity mapping)
//! - Restart controller and its button state machine
//! - Configuration types and TOML parsing
//!
//! # Data flow
//!
//! ```text
//! edge ──► PinReader ──PinEdge──► PressedMediator ──bool──► RestartController
//!             ▲                         │                          │
//!             └──── attach / detach ────┘                 request_restart()
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod mediator;
pub mod observe;
pub mod pin;
pub mod state;

pub use controller::{RestartContext, RestartController};
pub use mediator::PressedMediator;
pub use pin::{PinEdge, PinReader};
