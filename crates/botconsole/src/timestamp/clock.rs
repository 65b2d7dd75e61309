//! Time sources

use std::fmt;

use time::{OffsetDateTime, UtcOffset};

/// Source of the current instant
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current instant in UTC
    fn now_utc(&self) -> OffsetDateTime;

    /// Current instant in the local zone; UTC when the local offset cannot be
    /// determined.
    fn now_local(&self) -> OffsetDateTime {
        let now = self.now_utc();
        match UtcOffset::current_local_offset() {
            Ok(offset) => now.to_offset(offset),
            Err(_) => now,
        }
    }
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// A clock pinned to one instant.
///
/// The instant's own offset is treated as the local zone.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: OffsetDateTime,
}

impl FixedClock {
    /// Pin the clock at `at`
    pub fn new(at: OffsetDateTime) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> OffsetDateTime {
        self.at.to_offset(UtcOffset::UTC)
    }

    fn now_local(&self) -> OffsetDateTime {
        self.at
    }
}
