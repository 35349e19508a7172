//! Restart controller
//!
//! Observes the pressed state for the lifetime of its owning context and
//! asks that context to restart every time the button enters Released.
//! Absent values are ignored and presses are only logged.

use core::cell::Cell;

use crate::observe::Observer;
use crate::state::{ButtonEvent, ButtonState};

/// The context a controller belongs to
pub trait RestartContext {
    /// Ask for a full restart of the context
    ///
    /// Called from inside a dispatch; implementations should record the
    /// request and act on it once the dispatch has returned.
    fn request_restart(&self);
}

/// Turns button releases into restart requests
pub struct RestartController<C> {
    context: C,
    state: Cell<ButtonState>,
    restarts: Cell<u32>,
}

impl<C: RestartContext> RestartController<C> {
    /// Create a controller in the Inactive state
    pub fn new(context: C) -> Self {
        Self {
            context,
            state: Cell::new(ButtonState::Inactive),
            restarts: Cell::new(0),
        }
    }

    /// Current button state
    pub fn state(&self) -> ButtonState {
        self.state.get()
    }

    /// Number of restarts requested so far
    pub fn restarts(&self) -> u32 {
        self.restarts.get()
    }

    /// Return to Inactive at the start of a new context
    pub fn reset(&self) {
        self.state.set(ButtonState::Inactive);
    }

    /// Access the owning context
    pub fn context(&self) -> &C {
        &self.context
    }
}

impl<C: RestartContext> Observer<bool> for RestartController<C> {
    fn on_changed(&self, value: Option<bool>) {
        let event = ButtonEvent::from(value);
        let prev = self.state.get();
        let next = prev.transition(event);
        self.state.set(next);

        match event {
            ButtonEvent::Cleared => {}
            ButtonEvent::Level(true) => info!("Pressed"),
            ButtonEvent::Level(false) => {
                info!("Released");
                if prev.enters_released(next) {
                    self.restarts.set(self.restarts.get().wrapping_add(1));
                    self.context.request_restart();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mediator::PressedMediator;
    use crate::pin::mock::MockManager;
    use crate::pin::PinReader;
    use pinwatch_hal::name::pin_name;
    use pinwatch_hal::{GpioError, Level, PinSettings};

    /// Counts restart requests
    struct Counter {
        requests: Cell<u32>,
    }

    impl Counter {
        fn new() -> Self {
            Self {
                requests: Cell::new(0),
            }
        }
    }

    impl RestartContext for Counter {
        fn request_restart(&self) {
            self.requests.set(self.requests.get() + 1);
        }
    }

    fn mediator<'a>(manager: MockManager) -> PressedMediator<'a, MockManager, 2> {
        PressedMediator::new(PinReader::new(
            manager,
            pin_name("BCM21").unwrap(),
            PinSettings::button(),
        ))
    }

    #[test]
    fn test_absent_value_ignored() {
        let ctrl = RestartController::new(Counter::new());
        ctrl.on_changed(None);
        assert_eq!(ctrl.state(), ButtonState::Inactive);
        assert_eq!(ctrl.context().requests.get(), 0);
    }

    #[test]
    fn test_press_does_not_restart() {
        let ctrl = RestartController::new(Counter::new());
        ctrl.on_changed(Some(true));
        ctrl.on_changed(Some(true));
        assert_eq!(ctrl.state(), ButtonState::Pressed);
        assert_eq!(ctrl.context().requests.get(), 0);
    }

    #[test]
    fn test_one_restart_per_release() {
        let ctrl = RestartController::new(Counter::new());

        ctrl.on_changed(Some(true));
        ctrl.on_changed(Some(false));
        ctrl.on_changed(Some(false));
        assert_eq!(ctrl.context().requests.get(), 1);

        ctrl.on_changed(Some(true));
        ctrl.on_changed(Some(false));
        assert_eq!(ctrl.context().requests.get(), 2);
        assert_eq!(ctrl.restarts(), 2);
    }

    #[test]
    fn test_reset_allows_next_release() {
        let ctrl = RestartController::new(Counter::new());
        ctrl.on_changed(Some(false));
        assert_eq!(ctrl.context().requests.get(), 1);

        ctrl.reset();
        ctrl.on_changed(Some(false));
        assert_eq!(ctrl.context().requests.get(), 2);
    }

    #[test]
    fn test_press_then_release_scenario() {
        let ctrl = RestartController::new(Counter::new());
        let mut m = mediator(MockManager::new());
        m.observe(&ctrl).unwrap();

        // LOW on an active-low pin: pressed, no restart
        m.source_mut().manager_mut().level = Level::Low;
        m.on_edge();
        assert_eq!(ctrl.state(), ButtonState::Pressed);
        assert_eq!(ctrl.context().requests.get(), 0);

        // HIGH: released, exactly one restart
        m.source_mut().manager_mut().level = Level::High;
        m.on_edge();
        assert_eq!(ctrl.state(), ButtonState::Released);
        assert_eq!(ctrl.context().requests.get(), 1);
    }

    #[test]
    fn test_open_failure_never_restarts() {
        let ctrl = RestartController::new(Counter::new());
        let mut manager = MockManager::new();
        manager.open_error = Some(GpioError::Io);
        let mut m = mediator(manager);
        m.observe(&ctrl).unwrap();

        for level in [Level::Low, Level::High] {
            m.source_mut().manager_mut().level = level;
            m.on_edge();
        }

        assert_eq!(ctrl.state(), ButtonState::Inactive);
        assert_eq!(ctrl.context().requests.get(), 0);
    }

    #[test]
    fn test_restart_cycle() {
        let ctrl = RestartController::new(Counter::new());
        let mut m = mediator(MockManager::new());

        for cycle in 1..=3u32 {
            ctrl.reset();
            let id = m.observe(&ctrl).unwrap();
            assert!(m.is_source_open());

            m.source_mut().manager_mut().level = Level::Low;
            m.on_edge();
            m.source_mut().manager_mut().level = Level::High;
            m.on_edge();
            assert_eq!(ctrl.context().requests.get(), cycle);

            m.remove_observer(id);
            assert!(!m.is_source_open());
        }

        assert_eq!(m.source().manager().opens, 3);
        assert_eq!(m.source().manager().closes, 3);
    }
}
