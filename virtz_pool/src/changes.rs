// Copyright 2025 the Virtz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrete collection-change events.

/// A discrete mutation of the externally owned item collection.
///
/// Changes must be applied to the pool (and the panel's child slots) before
/// the next measure pass runs, otherwise the index-to-container mapping goes
/// stale and arrangement would target the wrong items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemsChange {
    /// `count` items were inserted starting at `position`.
    Insert {
        /// Index of the first inserted item.
        position: usize,
        /// Number of inserted items.
        count: usize,
    },
    /// `count` items were removed starting at `position`.
    Remove {
        /// Index of the first removed item.
        position: usize,
        /// Number of removed items.
        count: usize,
    },
    /// `count` items were replaced in place starting at `position`.
    Replace {
        /// Index of the first replaced item.
        position: usize,
        /// Number of replaced items.
        count: usize,
    },
    /// `count` items moved from `old_position` to `new_position`.
    Move {
        /// Index the items moved from.
        old_position: usize,
        /// Index the items moved to.
        new_position: usize,
        /// Number of moved items.
        count: usize,
    },
    /// The collection changed wholesale; all bookkeeping is discarded.
    Reset,
}
