// Copyright 2025 the Virtz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtz Scroll: scroll-metric bookkeeping for virtualizing panels.
//!
//! A virtualizing panel owns three pieces of scroll state per axis: the offset
//! (distance already scrolled), the extent (total logical size of content), and
//! the viewport (visible window size). This crate keeps them consistent across
//! layout passes and drives the scroll-owner collaborator contract:
//!
//! - [`ScrollState`]: offset/extent/viewport storage with change detection.
//!   Mutators report whether the change is *observable*, i.e. whether the
//!   registered [`ScrollOwner`] must be told. Extent growth that stays entirely
//!   out of view is suppressed to avoid redundant UI refresh churn.
//! - [`ScrollState::compute_viewport`]: the per-pass viewport update for flat
//!   (non-hierarchical) passes, including the anti-overscroll clamp that pulls
//!   the offset back when the viewport shrinks past the end of the content.
//! - [`HierarchicalConstraints`]: externally supplied viewport/cache values
//!   that fully override local computation when the panel is nested under a
//!   grouping owner ([`ScrollState::apply_constraints`] takes them verbatim,
//!   with no clamping and no notification).
//! - [`ScrollRequest`] / [`ScrollState::apply`]: the line/wheel/page navigation
//!   surface, with pixel-based increments from a construction-time
//!   [`ScrollConfig`] and item-based increments deferred to the overridable
//!   [`ScrollAmounts`] hooks.
//! - [`ScrollState::make_visible`]: the minimal per-axis offset change that
//!   brings a target rectangle into the viewport.
//!
//! ## Anti-overscroll clamp
//!
//! The clamp in [`ScrollState::compute_viewport`] fires only when the offset
//! and the stored viewport on that axis are both nonzero and
//! `offset + viewport + 1 >= extent`. In particular it does *not* re-clamp
//! when the extent shrinks below the viewport while the offset is already
//! zero. The trigger condition is part of the observable scrolling contract.
//!
//! This crate is `no_std`.

#![no_std]

mod constraints;
mod nav;
mod state;

pub use constraints::{CacheUnit, HierarchicalConstraints};
pub use nav::{DefaultScrollAmounts, ScrollAmounts, ScrollConfig, ScrollRequest, ScrollUnit};
pub use state::{ScrollOwner, ScrollState};
