//! Helpers shared across the crate.

pub mod errors;
pub mod fs;
pub mod script;
pub mod telemetry;
