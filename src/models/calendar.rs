//! Teaching intervals.
//!
//! # Time Model
//! Times are whole hours of the day. An interval is half-open:
//! `(8, 10)` covers 8:00 up to, but excluding, 10:00.
//!
//! Intervals order by start, then end, which is the chronological order
//! used for per-professor history and pause accounting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A teaching interval [start, end).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Interval {
    /// Interval start (hour, inclusive).
    pub start: u32,
    /// Interval end (hour, exclusive).
    pub end: u32,
}

impl Interval {
    /// Creates a new interval.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Whether this interval is empty (end <= start).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether two intervals overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether this interval lies entirely within `[start, end]`.
    pub fn within(&self, start: u32, end: u32) -> bool {
        start <= self.start && self.start <= self.end && self.end <= end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}
