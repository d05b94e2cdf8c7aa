//! # Temporal Types
//!
//! [`Timestamp`] is unix seconds, the analogue of a block timestamp: every
//! event and donation record carries one. Zero is the "absent" sentinel.
//!
//! Components read time through the [`Clock`] trait so tests can pin it.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// UTC unix time in whole seconds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The zero sentinel.
    pub const ZERO: Timestamp = Timestamp(0);

    /// Wrap unix seconds.
    pub const fn from_unix(secs: u64) -> Self {
        Self(secs)
    }

    /// The current wall-clock time. Pre-epoch clocks read as zero.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Truncate a chrono datetime to whole seconds.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(u64::try_from(dt.timestamp()).unwrap_or(0))
    }

    /// Unix seconds.
    pub const fn as_unix(&self) -> u64 {
        self.0
    }

    /// Whether this is the zero sentinel.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Convert to a chrono datetime, if in chrono's range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.0)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }

    /// ISO 8601 with `Z` suffix, seconds precision.
    pub fn to_canonical_string(&self) -> String {
        match self.to_datetime() {
            Some(dt) => dt.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            None => self.0.to_string(),
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}

/// Source of the current time for event and record timestamps.
pub trait Clock: Send + Sync {
    /// The current time.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time via `chrono::Utc::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    secs: AtomicU64,
}

impl ManualClock {
    /// Start at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            secs: AtomicU64::new(start.as_unix()),
        }
    }

    /// Jump to `t`.
    pub fn set(&self, t: Timestamp) {
        self.secs.store(t.as_unix(), Ordering::SeqCst);
    }

    /// Move forward by `secs`.
    pub fn advance(&self, secs: u64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.secs.load(Ordering::SeqCst))
    }
}
