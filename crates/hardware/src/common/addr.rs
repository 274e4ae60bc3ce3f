//! Address range types.
//!
//! This module defines the interval type used by the global address map. It provides the following:
//! 1. **Half-open ranges:** `[start, end)` intervals with size, containment, and overlap helpers.
//! 2. **Parsing:** Construction of a zero-based range from a size string such as `"512MB"`.
//! 3. **Coverage:** Coalescing of range sets so the validator can compare declared and serviced maps.

use std::fmt;

use serde::Serialize;

use super::error::ConfigError;
use super::units;

/// A half-open interval `[start, end)` of the global physical address space.
///
/// Construction does not validate the width; callers that need a usable range
/// check [`AddrRange::is_empty`] and reject empty or negative-width intervals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AddrRange {
    /// First address covered by the range.
    pub start: u64,
    /// One past the last address covered by the range.
    pub end: u64,
}

impl AddrRange {
    /// Creates a range from raw bounds.
    ///
    /// # Arguments
    ///
    /// * `start` - The first address in the range.
    /// * `end` - One past the last address in the range.
    ///
    /// # Returns
    ///
    /// A new `AddrRange`; `end <= start` yields an empty range.
    #[inline]
    pub const fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Creates a zero-based range of `size` bytes.
    #[inline]
    pub const fn with_size(size: u64) -> Self {
        Self {
            start: 0,
            end: size,
        }
    }

    /// Parses a size string (e.g. `"512MB"`) into a zero-based range.
    ///
    /// # Arguments
    ///
    /// * `size` - A memory size using simulator units (`kB`, `MB`, `GB`, ...).
    ///
    /// # Returns
    ///
    /// The range `[0, size)`, or `ConfigError::InvalidSize` if the string is malformed.
    pub fn parse(size: &str) -> Result<Self, ConfigError> {
        units::parse_size(size).map(Self::with_size)
    }

    /// Number of bytes covered; zero for empty or negative-width ranges.
    #[inline]
    pub const fn size(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the range covers no addresses (`end <= start`).
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Returns `true` if `addr` lies inside the range.
    #[inline]
    pub const fn contains(&self, addr: u64) -> bool {
        addr >= self.start && addr < self.end
    }

    /// Returns `true` if the two ranges share at least one address.
    #[inline]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for AddrRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:#x}, {:#x})", self.start, self.end)
    }
}

/// Merges a set of ranges into sorted, disjoint, non-adjacent intervals.
///
/// Empty ranges are dropped. Two ranges that touch (`a.end == b.start`) are
/// merged, so a map split across several controllers coalesces to the same
/// coverage as a single controller servicing the whole interval.
pub fn coalesce(ranges: &[AddrRange]) -> Vec<AddrRange> {
    let mut sorted: Vec<AddrRange> = ranges.iter().copied().filter(|r| !r.is_empty()).collect();
    sorted.sort();

    let mut merged: Vec<AddrRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}

/// Formats a range list as `[a, b) + [c, d)`; `<none>` when empty.
pub fn describe(ranges: &[AddrRange]) -> String {
    if ranges.is_empty() {
        return "<none>".to_string();
    }
    ranges
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" + ")
}
