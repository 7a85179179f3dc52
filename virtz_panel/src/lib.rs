// Copyright 2025 the Virtz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtz Panel: the orchestrating core of a virtualizing layout container.
//!
//! Given a large, possibly unbounded ordered collection of data items, a
//! [`VirtzPanel`] realizes visual containers only for the items currently
//! needed and recycles container instances as the visible range scrolls. Each
//! layout pass:
//!
//! 1. selects its scroll-metrics source — the panel's own
//!    [`ScrollState`](virtz_scroll::ScrollState) on a flat pass, or verbatim
//!    [`HierarchicalConstraints`] when nested under a grouping owner;
//! 2. asks the [`PanelOwner`] visibility policy, for every item index in
//!    ascending order, whether that item is currently arrangeable, and folds
//!    the answers into maximal contiguous
//!    [`ItemRange`](virtz_range::ItemRange)s;
//! 3. *realizes* containers for those ranges through scoped
//!    [`GenerationSession`](virtz_pool::GenerationSession)s over the
//!    [`ContainerPool`](virtz_pool::ContainerPool), reusing recycled
//!    instances before allocating;
//! 4. *virtualizes* every active child whose item index fell outside the
//!    ranges (recycling or discarding per the pass's
//!    [`VirtualizationMode`]); and
//! 5. arranges the survivors at the rectangles the policy reports.
//!
//! The host toolkit's layout primitives stay black boxes: container types
//! implement [`LayoutNode`] ("measure against an available size, arrange into
//! a rectangle"), and nothing else about the toolkit leaks in. A panel
//! constructed before its owning context attaches simply lays out nothing: an
//! absent policy degrades to an empty range set, never a failed pass.
//!
//! Everything runs single-threaded in direct response to measure/arrange
//! callbacks and scroll events. The one piece of asynchrony is the deferred
//! action queue ([`VirtzPanel::defer`] / [`VirtzPanel::run_deferred`]), which
//! hosts use for fire-and-forget work such as restoring focus selection once
//! the current event finishes.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod layout;
mod owner;
mod panel;

pub use layout::{HierarchicalHost, LayoutNode};
pub use owner::{PanelInfo, PanelOwner};
pub use panel::{VirtualizationMode, VirtzPanel};

pub use virtz_pool::{ContainerFactory, ContainerKey, ItemsChange};
pub use virtz_scroll::{
    CacheUnit, DefaultScrollAmounts, HierarchicalConstraints, ScrollAmounts, ScrollConfig,
    ScrollOwner, ScrollRequest, ScrollUnit,
};
