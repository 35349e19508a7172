//! Button watch task
//!
//! Owns the whole reader → mediator → controller pipeline. Each session
//! observes the pressed state (opening the pin), dispatches edges until
//! the button is released, then drops its observer (closing the pin) and
//! restarts according to `[app] restart`.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Timer;

use pinwatch_core::config::{ButtonConfig, RestartMode};
use pinwatch_core::{PinReader, PressedMediator, RestartController};
use pinwatch_hal::InputLine;

use crate::session::SessionRestart;

/// The single button line, as handed to the core
pub type ButtonLine = InputLine<Input<'static>>;

/// Observers per published value; the controller is the only one
const MAX_OBSERVERS: usize = 1;

/// Button task
///
/// Never returns. With `RestartMode::System` the first release resets
/// the MCU.
#[embassy_executor::task]
pub async fn button_task(line: ButtonLine, config: ButtonConfig, restart: RestartMode) {
    info!("Button task started on {}", config.pin.as_str());

    let controller = RestartController::new(SessionRestart::new());
    let reader: PinReader<'_, ButtonLine, MAX_OBSERVERS> =
        PinReader::new(line, config.pin.clone(), config.settings);
    let mut mediator = PressedMediator::new(reader);

    let mut session: u32 = 0;
    loop {
        session = session.wrapping_add(1);
        controller.reset();
        controller.context().clear();

        let id = match mediator.observe(&controller) {
            Ok(id) => id,
            Err(e) => {
                error!("Session {}: cannot observe button: {}", session, e);
                idle().await;
            }
        };

        if !mediator.is_source_open() {
            error!(
                "Session {}: {} unavailable ({}), staying idle",
                session,
                config.pin.as_str(),
                mediator.source().last_error()
            );
            idle().await;
        }
        info!("Session {} started", session);

        while !controller.context().is_pending() {
            if let Err(e) = mediator.wait_for_edge().await {
                error!("Session {}: edge wait failed: {}, staying idle", session, e);
                idle().await;
            }
            // Let contact bounce die down before sampling
            Timer::after_millis(u64::from(config.settle_ms)).await;
            mediator.on_edge();
        }

        mediator.remove_observer(id);
        info!(
            "Session {} ended after release ({} restarts)",
            session,
            controller.restarts()
        );

        match restart {
            RestartMode::Session => continue,
            RestartMode::System => {
                info!("Resetting MCU");
                Timer::after_millis(10).await;
                cortex_m::peripheral::SCB::sys_reset();
            }
        }
    }
}

/// Park the task for good
async fn idle() -> ! {
    loop {
        Timer::after_secs(60).await;
    }
}
