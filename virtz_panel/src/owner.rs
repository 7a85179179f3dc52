// Copyright 2025 the Virtz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visibility-policy collaborator contract.

use kurbo::{Rect, Size, Vec2};

/// Read-only snapshot of the panel a [`PanelOwner`] sees during a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelInfo {
    /// Number of items in the collection this pass.
    pub item_count: usize,
    /// Desired size of the first child, cached for callers that need a
    /// uniform item metric.
    pub first_child_desired_size: Size,
    /// Current scroll offset.
    pub offset: Vec2,
    /// Total logical content size.
    pub extent: Size,
    /// Currently visible window size.
    pub viewport: Size,
}

/// Visibility policy: decides, per item, whether it is currently arrangeable
/// and where its container goes.
///
/// The panel calls these hooks; it never assumes a default implementation.
/// When no policy is bound the panel lays out nothing rather than failing the
/// pass, since a panel can legitimately exist before its owning context
/// attaches.
pub trait PanelOwner<T, C> {
    /// Pre-pass measurement work, called once per measure pass before the
    /// visibility scan.
    fn measure(&mut self, panel: &PanelInfo, available: Size);

    /// Whether `item` should currently be laid out. Called for every item in
    /// ascending index order; maximal runs of `true` answers become the
    /// pass's realized ranges.
    fn can_arrange_item(&mut self, panel: &PanelInfo, item: &T) -> bool;

    /// Placement rectangle for a realized container. Returning `None` places
    /// the container at an empty rectangle.
    fn arrange_item(&mut self, panel: &PanelInfo, container: &mut C, item: &T) -> Option<Rect>;
}
