//! Button state machine
//!
//! The button is a function of the latest published reading. Inactive
//! is both the initial state and the state entered whenever the value is
//! reset.

use super::events::ButtonEvent;

/// Button states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// No reading available
    #[default]
    Inactive,
    /// Button held down
    Pressed,
    /// Button let go
    Released,
}

impl ButtonState {
    /// Process an event and return the next state
    pub fn transition(self, event: ButtonEvent) -> Self {
        match event {
            ButtonEvent::Level(true) => ButtonState::Pressed,
            ButtonEvent::Level(false) => ButtonState::Released,
            ButtonEvent::Cleared => ButtonState::Inactive,
        }
    }

    /// Check if moving from `self` to `next` enters Released
    pub fn enters_released(self, next: ButtonState) -> bool {
        self != ButtonState::Released && next == ButtonState::Released
    }
}
