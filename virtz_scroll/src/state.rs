// Copyright 2025 the Virtz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offset/extent/viewport state with observable-change detection.

use kurbo::{Point, Rect, Size, Vec2};

use crate::constraints::HierarchicalConstraints;

/// Collaborator notified when an observable scroll metric changes.
///
/// The panel delivers at most one notification per observable metric change
/// per pass; unobservable changes (extent growth wholly out of view) are
/// suppressed.
pub trait ScrollOwner {
    /// The panel's scroll metrics changed in a way the owner can observe.
    fn invalidate_scroll_info(&mut self);
}

/// Scroll-metric storage for one panel.
///
/// All mutators return `true` when the change is observable and the scroll
/// owner must be invalidated. The caller (normally the panel) is responsible
/// for forwarding that to its [`ScrollOwner`], which keeps this type free of
/// callback plumbing and directly testable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    offset: Vec2,
    extent: Size,
    viewport: Size,
}

impl ScrollState {
    /// Creates a zeroed state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scroll offset.
    #[must_use]
    pub const fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Total logical content size.
    #[must_use]
    pub const fn extent(&self) -> Size {
        self.extent
    }

    /// Currently visible window size.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Sets the horizontal offset. Returns `true` if the value changed.
    pub fn set_horizontal_offset(&mut self, offset: f64) -> bool {
        if offset == self.offset.x {
            return false;
        }
        self.offset.x = offset;
        true
    }

    /// Sets the vertical offset. Returns `true` if the value changed.
    pub fn set_vertical_offset(&mut self, offset: f64) -> bool {
        if offset == self.offset.y {
            return false;
        }
        self.offset.y = offset;
        true
    }

    /// Adjusts the horizontal offset by `delta`. Returns `true` if it changed.
    pub fn scroll_horizontal_by(&mut self, delta: f64) -> bool {
        self.set_horizontal_offset(self.offset.x + delta)
    }

    /// Adjusts the vertical offset by `delta`. Returns `true` if it changed.
    pub fn scroll_vertical_by(&mut self, delta: f64) -> bool {
        self.set_vertical_offset(self.offset.y + delta)
    }

    /// Sets the extent width.
    ///
    /// Returns `true` only when the change is observable: growth that stays
    /// entirely past `offset + viewport` is suppressed, since content growing
    /// out of view needs no owner refresh.
    pub fn set_extent_width(&mut self, width: f64) -> bool {
        if width == self.extent.width {
            return false;
        }
        self.extent.width = width;
        width < self.viewport.width + self.offset.x
    }

    /// Sets the extent height. Same observability rule as
    /// [`ScrollState::set_extent_width`].
    pub fn set_extent_height(&mut self, height: f64) -> bool {
        if height == self.extent.height {
            return false;
        }
        self.extent.height = height;
        height < self.viewport.height + self.offset.y
    }

    /// Per-pass viewport update for a flat (non-hierarchical) layout pass.
    ///
    /// Applies the anti-overscroll clamp first, using the viewport stored from
    /// the previous pass, then adopts `available` as the new viewport if it
    /// differs. Returns `true` when the owner must be invalidated.
    ///
    /// The clamp triggers only when the offset and stored viewport on an axis
    /// are both nonzero; see the crate docs for the full contract.
    pub fn compute_viewport(&mut self, available: Size) -> bool {
        let mut invalidate = false;

        if self.viewport.height != 0.0
            && self.offset.y != 0.0
            && self.offset.y + self.viewport.height + 1.0 >= self.extent.height
        {
            invalidate |= self.set_vertical_offset(self.extent.height - available.height);
        }
        if self.viewport.width != 0.0
            && self.offset.x != 0.0
            && self.offset.x + self.viewport.width + 1.0 >= self.extent.width
        {
            invalidate |= self.set_horizontal_offset(self.extent.width - available.width);
        }

        if available != self.viewport {
            self.viewport = available;
            invalidate = true;
        }
        invalidate
    }

    /// Adopts offset and viewport verbatim from a grouping owner's
    /// constraints. No clamping, no notification: the owner already owns that
    /// contract.
    pub fn apply_constraints(&mut self, constraints: &HierarchicalConstraints) {
        self.offset = constraints.viewport.origin().to_vec2();
        self.viewport = constraints.viewport.size();
    }

    /// Scrolls the minimal amount, per axis, to bring `target` (a rectangle in
    /// the panel's content coordinate space) into the viewport.
    ///
    /// If the target's leading edge is before the current offset, scrolls
    /// backward by the deficit; if its trailing edge exceeds
    /// `offset + viewport`, scrolls forward by the excess; otherwise that axis
    /// is left alone. Returns the visible portion of the rectangle after
    /// adjustment, positioned at the applied scroll amounts and clipped to at
    /// most the viewport size.
    pub fn make_visible(&mut self, target: Rect) -> Rect {
        let offset = self.offset;

        let mut amount_x = 0.0;
        if target.x0 < offset.x {
            amount_x = -(offset.x - target.x0);
        } else if target.x0 + target.width() > offset.x + self.viewport.width {
            amount_x = (target.x0 + target.width()) - (offset.x + self.viewport.width);
        }

        let mut amount_y = 0.0;
        if target.y0 < offset.y {
            amount_y = -(offset.y - target.y0);
        } else if target.y0 + target.height() > offset.y + self.viewport.height {
            amount_y = (target.y0 + target.height()) - (offset.y + self.viewport.height);
        }

        self.offset.x = offset.x + amount_x;
        self.offset.y = offset.y + amount_y;

        let visible = Size::new(
            target.width().min(self.viewport.width),
            target.height().min(self.viewport.height),
        );
        Rect::from_origin_size(Point::new(amount_x, amount_y), visible)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Size, Vec2};

    use super::ScrollState;
    use crate::constraints::{CacheUnit, HierarchicalConstraints};

    fn state(offset: Vec2, extent: Size, viewport: Size) -> ScrollState {
        let mut state = ScrollState::new();
        state.set_horizontal_offset(offset.x);
        state.set_vertical_offset(offset.y);
        state.set_extent_width(extent.width);
        state.set_extent_height(extent.height);
        state.compute_viewport(viewport);
        state
    }

    #[test]
    fn offset_setters_detect_change() {
        let mut state = ScrollState::new();
        assert!(state.set_vertical_offset(10.0));
        assert!(!state.set_vertical_offset(10.0));
        assert!(state.scroll_vertical_by(-4.0));
        assert_eq!(state.offset().y, 6.0);
    }

    #[test]
    fn extent_growth_out_of_view_is_suppressed() {
        let mut state = ScrollState::new();
        state.compute_viewport(Size::new(100.0, 100.0));

        // Growth beyond offset + viewport stays invisible: suppressed.
        assert!(!state.set_extent_height(500.0));
        // Shrinking back into view must notify.
        assert!(state.set_extent_height(80.0));
        // No change, no notification.
        assert!(!state.set_extent_height(80.0));
    }

    #[test]
    fn anti_overscroll_clamps_on_viewport_shrink() {
        // extent 1000, viewport 300, offset 750: shrinking the viewport to 200
        // must pull the offset back to extent - available = 800.
        let mut state = state(
            Vec2::new(0.0, 750.0),
            Size::new(0.0, 1000.0),
            Size::new(0.0, 300.0),
        );
        assert!(state.compute_viewport(Size::new(0.0, 200.0)));
        assert_eq!(state.offset().y, 800.0);
        assert_eq!(state.viewport().height, 200.0);
    }

    #[test]
    fn clamp_does_not_fire_at_zero_offset() {
        // Extent shrinks below the viewport while the offset is already zero:
        // the clamp's trigger condition leaves the offset alone.
        let mut state = state(
            Vec2::ZERO,
            Size::new(0.0, 50.0),
            Size::new(0.0, 300.0),
        );
        state.compute_viewport(Size::new(0.0, 300.0));
        assert_eq!(state.offset().y, 0.0);
    }

    #[test]
    fn clamp_does_not_fire_on_first_pass() {
        // The stored viewport is still zero on the first pass, so only the
        // viewport itself is adopted.
        let mut state = ScrollState::new();
        state.set_vertical_offset(40.0);
        state.set_extent_height(100.0);
        assert!(state.compute_viewport(Size::new(10.0, 60.0)));
        assert_eq!(state.offset().y, 40.0);
    }

    #[test]
    fn unchanged_viewport_does_not_invalidate() {
        let mut state = ScrollState::new();
        assert!(state.compute_viewport(Size::new(100.0, 100.0)));
        assert!(!state.compute_viewport(Size::new(100.0, 100.0)));
    }

    #[test]
    fn constraints_are_taken_verbatim() {
        let mut state = state(
            Vec2::new(5.0, 5.0),
            Size::new(100.0, 100.0),
            Size::new(50.0, 50.0),
        );
        let constraints = HierarchicalConstraints::new(
            Rect::new(30.0, 40.0, 230.0, 190.0),
            0.0,
            CacheUnit::Item,
        );
        state.apply_constraints(&constraints);
        assert_eq!(state.offset(), Vec2::new(30.0, 40.0));
        assert_eq!(state.viewport(), Size::new(200.0, 150.0));
    }

    #[test]
    fn make_visible_scrolls_forward_by_the_excess() {
        // offset 0, viewport 100, target at x=150 width 20: scroll amount must
        // be exactly 70 so the trailing edge lands on the viewport boundary.
        let mut state = state(Vec2::ZERO, Size::new(1000.0, 1000.0), Size::new(100.0, 100.0));
        let visible = state.make_visible(Rect::new(150.0, 0.0, 170.0, 10.0));
        assert_eq!(state.offset().x, 70.0);
        assert_eq!(visible.x0, 70.0);
        assert_eq!(visible.width(), 20.0);
    }

    #[test]
    fn make_visible_scrolls_backward_by_the_deficit() {
        let mut state = state(
            Vec2::new(100.0, 0.0),
            Size::new(1000.0, 1000.0),
            Size::new(100.0, 100.0),
        );
        let visible = state.make_visible(Rect::new(40.0, 0.0, 60.0, 10.0));
        // -(offset - x0) = -(100 - 40) = -60.
        assert_eq!(visible.x0, -60.0);
        assert_eq!(state.offset().x, 40.0);
    }

    #[test]
    fn make_visible_leaves_visible_targets_alone() {
        let mut state = state(
            Vec2::new(50.0, 50.0),
            Size::new(1000.0, 1000.0),
            Size::new(100.0, 100.0),
        );
        let visible = state.make_visible(Rect::new(60.0, 60.0, 80.0, 80.0));
        assert_eq!(state.offset(), Vec2::new(50.0, 50.0));
        assert_eq!(visible.x0, 0.0);
        assert_eq!(visible.y0, 0.0);
    }

    #[test]
    fn make_visible_clips_oversized_targets_to_the_viewport() {
        let mut state = state(Vec2::ZERO, Size::new(1000.0, 1000.0), Size::new(100.0, 100.0));
        let visible = state.make_visible(Rect::new(0.0, 0.0, 400.0, 400.0));
        assert_eq!(visible.size(), Size::new(100.0, 100.0));
    }
}
