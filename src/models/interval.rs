//! Time interval model.
//!
//! Jobs occupy a contiguous, half-open interval `[start, end)`.
//! Touching intervals (one ends exactly when the other starts) do
//! not overlap, so back-to-back jobs can share a resource.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A time interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeInterval {
    /// Interval start (inclusive).
    pub start: DateTime<Utc>,
    /// Interval end (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    /// Creates a new interval.
    ///
    /// Validity (`start < end`) is not checked here; the allocation
    /// service rejects empty or inverted intervals on write paths.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Duration of this interval.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether `start < end` holds.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Whether a timestamp falls within this interval.
    #[inline]
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether two intervals overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}
