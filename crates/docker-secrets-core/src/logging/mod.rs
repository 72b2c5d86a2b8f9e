//! Logging abstractions for runtime-agnostic logging
//!
//! The resolver never logs secret values, only names, paths and which
//! source answered.

mod traits;
mod console;

pub use traits::{Logger, LoggerExt, LogLevel, NoOpLogger, SharedLogger};
pub use console::ConsoleLogger;
