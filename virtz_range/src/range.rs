// Copyright 2025 the Virtz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inclusive item-index spans and their contract errors.

use core::fmt;
use core::ops::RangeInclusive;

/// Error produced when a range contract is violated.
///
/// Malformed ranges indicate a caller bug in the visibility scan, so they are
/// surfaced immediately rather than clamped or reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// The end index precedes the start index, so the span would be empty or
    /// inverted.
    Inverted {
        /// Requested start index.
        start: usize,
        /// Requested end index.
        end: usize,
    },
    /// A range was appended whose start precedes the previous range's end.
    OrderViolation {
        /// Start index of the offending range.
        start: usize,
        /// End index of the range appended before it.
        last_end: usize,
    },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Inverted { start, end } => {
                write!(f, "range end {end} precedes start {start}")
            }
            Self::OrderViolation { start, last_end } => {
                write!(
                    f,
                    "range starting at {start} precedes previous range end {last_end}"
                )
            }
        }
    }
}

impl core::error::Error for RangeError {}

/// A contiguous span of item indices, both endpoints inclusive.
///
/// `count` is always at least one: a span that would contain no items cannot be
/// constructed (see [`RangeError::Inverted`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRange {
    start: usize,
    end: usize,
}

impl ItemRange {
    /// Creates a span covering `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::Inverted`] when `end < start`.
    pub const fn new(start: usize, end: usize) -> Result<Self, RangeError> {
        if end < start {
            Err(RangeError::Inverted { start, end })
        } else {
            Ok(Self { start, end })
        }
    }

    /// Creates a span covering exactly one index.
    #[must_use]
    pub const fn single(index: usize) -> Self {
        Self {
            start: index,
            end: index,
        }
    }

    /// Constructs a span from an accumulated run without validation.
    ///
    /// Callers must guarantee `start <= end`.
    pub(crate) const fn from_run(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "run start must not exceed its end");
        Self { start, end }
    }

    /// First index in the span (inclusive).
    #[must_use]
    pub const fn start(self) -> usize {
        self.start
    }

    /// Last index in the span (inclusive).
    #[must_use]
    pub const fn end(self) -> usize {
        self.end
    }

    /// Number of indices in the span.
    #[must_use]
    pub const fn count(self) -> usize {
        self.end - self.start + 1
    }

    /// Returns `true` if `index` falls within the span.
    #[must_use]
    pub const fn contains(self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }

    /// Iterates the indices of the span in ascending order.
    #[must_use]
    pub const fn indices(self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl fmt::Display for ItemRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
