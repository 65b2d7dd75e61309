//! Error handling for botconsole
//!
//! Construction problems are fatal and surface immediately; an unknown level
//! tag is recoverable; a failed sink write is handed back to the caller
//! untouched. Rendering a value never produces an error.

use std::io;

use crate::level::Channel;

/// Result alias used across the crate
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Errors produced by the console facility
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Invalid options or a sink that cannot be written to
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Unrecognised severity tag
    #[error("invalid level: '{0}'")]
    InvalidLevel(String),

    /// The sink bound to a channel failed to accept a write
    #[error("{channel} sink write failed: {source}")]
    Sink {
        /// Channel whose sink failed
        channel: Channel,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },
}

impl ConsoleError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Whether the error happened while building the console
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}
