//! Wall clock used to stamp `createdAt`/`updatedAt`.
//!
//! The engine never reads the system time directly. A [`Clock`] is injected
//! into the [`DataProvider`](crate::DataProvider) so tests can pin and advance
//! time deterministically.

use crate::Timestamp;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::sync::{Mutex, PoisonError};

/// Source of the current time.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// The current instant formatted as a record timestamp.
    fn timestamp(&self) -> Timestamp {
        format_timestamp(self.now())
    }
}

/// Format an instant as an ISO-8601 UTC timestamp with millisecond precision,
/// e.g. `2024-01-31T12:00:00.000Z`.
///
/// The fixed width keeps lexicographic order equal to chronological order, so
/// timestamps can be compared with `lt`/`gt` filters and sorted as strings.
pub fn format_timestamp(instant: DateTime<Utc>) -> Timestamp {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Create a clock frozen at the given milliseconds since the epoch.
    ///
    /// Out-of-range values fall back to the epoch.
    pub fn from_millis(millis: i64) -> Self {
        Self::new(DateTime::from_timestamp_millis(millis).unwrap_or_default())
    }

    /// Move the clock to `instant`.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *current += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
