//! Severity levels and the channels they route to

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::ConsoleError;

/// Logging severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// General output
    Log,
    /// Something looks off
    Warn,
    /// Something failed
    Error,
    /// Developer detail
    Debug,
    /// Noisy detail
    Verbose,
    /// Something that should never happen
    Wtf,
}

impl Level {
    /// Number of levels
    pub const COUNT: usize = 6;

    /// Every level in table order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Log,
        Self::Warn,
        Self::Error,
        Self::Debug,
        Self::Verbose,
        Self::Wtf,
    ];

    /// Lowercase name used in configuration tables
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Debug => "debug",
            Self::Verbose => "verbose",
            Self::Wtf => "wtf",
        }
    }

    /// Position in per-level tables
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Channel the level uses when the routing table has no entry for it
    pub const fn default_channel(self) -> Channel {
        match self {
            Self::Error | Self::Wtf => Channel::Error,
            _ => Channel::Normal,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ConsoleError;

    /// Case-insensitive; unknown tags are rejected rather than mapped to a
    /// fallback level.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| ConsoleError::InvalidLevel(s.to_owned()))
    }
}

/// Output routing target of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// The output sink (stdout by default)
    #[default]
    #[serde(alias = "stdout", alias = "log")]
    Normal,
    /// The error sink (stderr by default)
    #[serde(alias = "stderr")]
    Error,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("normal"),
            Self::Error => f.write_str("error"),
        }
    }
}
