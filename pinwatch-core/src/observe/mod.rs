//! Observable values
//!
//! The building blocks for subscriber-gated resources: an
//! [`ActivationGate`] that reports the first and last subscriber, and a
//! [`LiveValue`] that holds the latest value and notifies observers.

pub mod gate;
pub mod live;

pub use gate::{Activation, ActivationGate};
pub use live::{LiveValue, ObserveError, Observer, ObserverId};
