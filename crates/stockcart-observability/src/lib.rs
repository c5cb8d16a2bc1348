//! Logging setup for StockCart.
//!
//! This crate provides:
//! - `LogConfig` - Level and output format, deserializable from config files
//! - `init_logging` - Installs the global `tracing` subscriber

mod logging;

pub use logging::*;
