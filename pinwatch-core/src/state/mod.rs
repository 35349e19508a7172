//! Button state machine
//!
//! {Inactive, Pressed, Released}, driven purely by published readings.

pub mod events;
pub mod machine;

pub use events::ButtonEvent;
pub use machine::ButtonState;
