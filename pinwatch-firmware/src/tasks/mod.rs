//! Embassy async tasks

pub mod button;

pub use button::{button_task, ButtonLine};
