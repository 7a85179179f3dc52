// Copyright 2025 the Virtz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Append-only ascending range sets and the run accumulator that feeds them.

use smallvec::SmallVec;

use crate::{ItemRange, RangeError};

/// An ordered set of non-overlapping [`ItemRange`]s.
///
/// Ranges must be appended in ascending order: each new range's start must be
/// at or past the previous range's end (touching is allowed, preceding is not).
/// This keeps the set sorted by construction — no sorting is ever performed —
/// and makes [`ItemRangeSet::contains`] a linear scan over ranges, which is
/// cheap because virtualization collapses thousands of items into tens of
/// ranges.
///
/// There is no removal operation. A layout pass builds a fresh set, consults
/// it, and drops it.
#[derive(Debug, Clone, Default)]
pub struct ItemRangeSet {
    ranges: SmallVec<[ItemRange; 8]>,
}

impl ItemRangeSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `range`, which must start at or past the previous range's end.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::OrderViolation`] when `range.start()` precedes the
    /// last appended range's end. The set is left unchanged.
    pub fn push(&mut self, range: ItemRange) -> Result<(), RangeError> {
        if let Some(last) = self.ranges.last()
            && range.start() < last.end()
        {
            return Err(RangeError::OrderViolation {
                start: range.start(),
                last_end: last.end(),
            });
        }
        self.ranges.push(range);
        Ok(())
    }

    /// Returns `true` if any member range contains `index`.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.ranges.iter().any(|range| range.contains(index))
    }

    /// Total number of item indices covered by the set.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.ranges.iter().map(|range| range.count()).sum()
    }

    /// Number of member ranges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns `true` if the set has no member ranges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Member ranges in ascending order.
    #[must_use]
    pub fn as_slice(&self) -> &[ItemRange] {
        &self.ranges
    }

    /// Iterates member ranges in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ItemRange> + '_ {
        self.ranges.iter().copied()
    }
}

impl<'a> IntoIterator for &'a ItemRangeSet {
    type Item = &'a ItemRange;
    type IntoIter = core::slice::Iter<'a, ItemRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

/// Folds an ascending visibility scan into maximal runs of consecutive
/// arrangeable indices.
///
/// Feed every index of the collection, in ascending order, to
/// [`RunBuilder::observe`] together with the visibility policy's answer for
/// that index. A `false` answer (or [`RunBuilder::finish`]) closes the current
/// run; empty runs are skipped. Because indices arrive in ascending order the
/// produced set cannot violate the ascending contract.
#[derive(Debug, Default)]
pub struct RunBuilder {
    run: Option<(usize, usize)>,
    last_index: Option<usize>,
    set: ItemRangeSet,
}

impl RunBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the visibility answer for `index`.
    ///
    /// Indices must be observed in strictly ascending order.
    pub fn observe(&mut self, index: usize, arrangeable: bool) {
        debug_assert!(
            self.last_index.is_none_or(|last| index > last),
            "scan indices must be strictly ascending"
        );
        self.last_index = Some(index);
        if arrangeable {
            match &mut self.run {
                Some((_, end)) => *end = index,
                None => self.run = Some((index, index)),
            }
        } else {
            self.flush();
        }
    }

    /// Closes any open run and returns the accumulated set.
    #[must_use]
    pub fn finish(mut self) -> ItemRangeSet {
        self.flush();
        self.set
    }

    fn flush(&mut self) {
        if let Some((start, end)) = self.run.take() {
            // Ascending observation makes this push infallible.
            self.set.ranges.push(ItemRange::from_run(start, end));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemRangeSet, RunBuilder};
    use crate::{ItemRange, RangeError};

    #[test]
    fn count_sums_member_counts_and_contains_matches() {
        let mut set = ItemRangeSet::new();
        set.push(ItemRange::new(2, 4).unwrap()).unwrap();
        set.push(ItemRange::new(7, 8).unwrap()).unwrap();
        set.push(ItemRange::single(20)).unwrap();

        assert_eq!(set.item_count(), 3 + 2 + 1);
        assert_eq!(set.len(), 3);
        for index in 0..=25 {
            let expected = (2..=4).contains(&index)
                || (7..=8).contains(&index)
                || index == 20;
            assert_eq!(set.contains(index), expected, "index {index}");
        }
    }

    #[test]
    fn out_of_order_push_is_rejected() {
        let mut set = ItemRangeSet::new();
        set.push(ItemRange::new(3, 6).unwrap()).unwrap();

        assert_eq!(
            set.push(ItemRange::new(5, 9).unwrap()),
            Err(RangeError::OrderViolation {
                start: 5,
                last_end: 6
            })
        );
        // The failed push leaves the set untouched.
        assert_eq!(set.len(), 1);
        assert_eq!(set.item_count(), 4);
    }

    #[test]
    fn touching_ranges_are_allowed() {
        let mut set = ItemRangeSet::new();
        set.push(ItemRange::new(0, 3).unwrap()).unwrap();
        // A start equal to the previous end touches but does not precede.
        set.push(ItemRange::new(3, 5).unwrap()).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn zero_length_ranges_cannot_exist() {
        assert!(ItemRange::new(4, 3).is_err());
    }

    #[test]
    fn run_builder_produces_maximal_runs() {
        let visible = [2_usize, 3, 4, 7, 8, 20];
        let mut builder = RunBuilder::new();
        for index in 0..=20 {
            builder.observe(index, visible.contains(&index));
        }
        let set = builder.finish();

        let ranges: [(usize, usize); 3] = [(2, 4), (7, 8), (20, 20)];
        assert_eq!(set.len(), 3);
        for (range, (start, end)) in set.iter().zip(ranges) {
            assert_eq!(range.start(), start);
            assert_eq!(range.end(), end);
        }
        assert_eq!(set.item_count(), 6);
    }

    #[test]
    fn run_builder_with_no_true_answers_is_empty() {
        let mut builder = RunBuilder::new();
        for index in 0..10 {
            builder.observe(index, false);
        }
        let set = builder.finish();
        assert!(set.is_empty());
        assert_eq!(set.item_count(), 0);
    }

    #[test]
    fn run_open_at_end_of_collection_is_closed_by_finish() {
        let mut builder = RunBuilder::new();
        for index in 0..5 {
            builder.observe(index, index >= 3);
        }
        let set = builder.finish();
        assert_eq!(set.len(), 1);
        assert!(set.contains(3));
        assert!(set.contains(4));
        assert!(!set.contains(2));
    }
}
