// Copyright 2025 the Virtz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtz Range: contiguous item-index spans for UI virtualization.
//!
//! A virtualizing panel collapses a large item collection into the handful of
//! index spans that currently need realized containers. This crate provides the
//! value types for that bookkeeping:
//!
//! - [`ItemRange`]: an immutable inclusive span `{start, end}` with `start <= end`.
//! - [`ItemRangeSet`]: an append-only sequence of ranges maintained in strictly
//!   ascending, non-overlapping order. Appending out of order is a contract
//!   violation surfaced as a [`RangeError`], never silently corrected — the
//!   caller is expected to discover ranges via a single ascending index scan.
//! - [`RunBuilder`]: folds that ascending scan (one boolean answer per index)
//!   into maximal runs of consecutive `true` answers.
//!
//! Range sets are rebuilt fresh every layout pass, so there is no removal
//! operation: the collection is read-mostly and written once per pass.
//!
//! ## Example
//!
//! ```rust
//! use virtz_range::RunBuilder;
//!
//! // Indices 2..=4 and 7..=8 are arrangeable, everything else is not.
//! let visible = [2_usize, 3, 4, 7, 8];
//! let mut builder = RunBuilder::new();
//! for index in 0..10 {
//!     builder.observe(index, visible.contains(&index));
//! }
//! let ranges = builder.finish();
//!
//! assert_eq!(ranges.len(), 2);
//! assert_eq!(ranges.item_count(), 5);
//! assert!(ranges.contains(3));
//! assert!(!ranges.contains(5));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod range;
mod set;

pub use range::{ItemRange, RangeError};
pub use set::{ItemRangeSet, RunBuilder};
