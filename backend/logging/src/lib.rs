//! Structured logging for the Quarry client.

pub mod logger;

pub use logger::{init_logger, LogOptions};
