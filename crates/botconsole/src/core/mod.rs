//! Core types shared by every component.
//!
//! ### [`error`] - Error handling
//! [`ConsoleError`] and the [`ConsoleResult`] alias.

pub mod error;

pub use error::{ConsoleError, ConsoleResult};
