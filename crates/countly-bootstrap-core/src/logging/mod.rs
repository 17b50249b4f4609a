//! Logging abstractions

mod traits;
mod level;
mod noop;
mod console;
mod memory;

pub use traits::{Logger, SharedLogger};
pub use level::{LogLevel, ParseLogLevelError};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use memory::MemoryLogger;
