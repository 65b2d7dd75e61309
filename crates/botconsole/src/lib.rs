//! # botconsole
//!
//! Leveled, colorized, timestamped console output for long-running
//! processes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use botconsole::prelude::*;
//!
//! fn main() -> ConsoleResult<()> {
//!     let console = Console::new(ConsoleOptions::from_env())?;
//!
//!     console.log(["connected", "ready"])?;
//!     botconsole::warn!(console, "ping", 412, "ms")?;
//!     Ok(())
//! }
//! ```
//!
//! Each line of output is `[<timestamp>] <message>`, with the timestamp and
//! message segments styled per level. Values of any shape are flattened to
//! text first: strings as-is, string lists one per line, errors through
//! their stack, everything else through a readable inspection.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
pub mod color;
pub mod config;
mod console;
pub mod core;
pub mod layer;
mod level;
mod macros;
pub mod sink;
pub mod timestamp;
pub mod value;

// Public API
pub use builder::ConsoleBuilder;
pub use color::{ColorContext, ColorFormatter, FormatSpec};
pub use config::{ConsoleConfig, ConsoleOptions, merge_default};
pub use console::Console;
pub use crate::core::{ConsoleError, ConsoleResult};
pub use layer::ConsoleLayer;
pub use level::{Channel, Level};
pub use sink::{MemorySink, Sink, StderrSink, StdoutSink, WriterSink};
pub use timestamp::{Clock, FixedClock, SystemClock, TimestampFormatter};
pub use value::{ErrorValue, LogValue, flatten};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Channel, Console, ConsoleError, ConsoleOptions, ConsoleResult, Level, LogValue, Sink,
    };
}
