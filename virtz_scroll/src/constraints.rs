// Copyright 2025 the Virtz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constraints supplied by a hierarchical grouping owner.

use kurbo::Rect;

/// Unit in which a cache length is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheUnit {
    /// Cache length counts items.
    Item,
    /// Cache length is a pixel distance.
    Pixel,
    /// Cache length is a multiple of the viewport.
    Page,
}

/// Viewport and cache values handed down by a grouping owner.
///
/// When a panel is nested under a grouping owner, the owner — not the panel —
/// owns the scrolling contract. These constraints then fully override the
/// panel's own offset/viewport computation for the layout pass: the values are
/// taken verbatim, with no clamping and no scroll-owner notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HierarchicalConstraints {
    /// Viewport rectangle in the owner's coordinate space. The origin supplies
    /// the scroll offset, the size supplies the viewport.
    pub viewport: Rect,
    /// Length of the realization cache kept around the viewport.
    pub cache_length: f64,
    /// Unit of `cache_length`.
    pub cache_unit: CacheUnit,
}

impl HierarchicalConstraints {
    /// Creates constraints from a viewport rectangle and a cache length.
    #[must_use]
    pub const fn new(viewport: Rect, cache_length: f64, cache_unit: CacheUnit) -> Self {
        Self {
            viewport,
            cache_length,
            cache_unit,
        }
    }
}
