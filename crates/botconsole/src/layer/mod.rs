//! `tracing` integration
//!
//! [`ConsoleLayer`] forwards `tracing` events into a [`Console`](crate::Console)
//! so libraries instrumented with `tracing` print through the same
//! colorized, timestamped lines as direct console calls.

mod bridge;

pub use bridge::ConsoleLayer;
