//! Pin reader
//!
//! The hardware-facing end of the pipeline.

#[cfg(test)]
pub(crate) mod mock;
pub mod reader;

pub use reader::{PinEdge, PinReader};
