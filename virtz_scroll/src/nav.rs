// Copyright 2025 the Virtz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line/wheel/page scroll navigation.

use kurbo::Size;

use crate::state::ScrollState;

/// Unit governing how line and wheel increments are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollUnit {
    /// Increments are fixed pixel deltas from [`ScrollConfig`].
    Pixel,
    /// Increments are per-item amounts from a [`ScrollAmounts`] provider.
    Item,
}

/// Construction-time navigation step sizes. Immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollConfig {
    /// Pixel delta for one line scroll.
    pub line_delta: f64,
    /// Pixel delta for one wheel notch.
    pub wheel_delta: f64,
    /// Number of items one wheel notch covers in item mode.
    pub wheel_delta_items: usize,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            line_delta: 16.0,
            wheel_delta: 48.0,
            wheel_delta_items: 3,
        }
    }
}

/// Per-axis scroll amounts used in [`ScrollUnit::Item`] mode.
///
/// Every method has a default in terms of [`ScrollAmounts::unit_scroll_size`],
/// so a provider that knows its per-item pixel sizes only needs to override
/// that one hook. Providers with asymmetric behavior can override individual
/// amounts instead.
pub trait ScrollAmounts {
    /// Generic unit scroll size used by the default amount implementations.
    fn unit_scroll_size(&self) -> Size {
        Size::new(10.0, 10.0)
    }

    /// Amount for one line up (negative).
    fn line_up_amount(&self) -> f64 {
        -self.unit_scroll_size().height
    }

    /// Amount for one line down.
    fn line_down_amount(&self) -> f64 {
        self.unit_scroll_size().height
    }

    /// Amount for one line left (negative).
    fn line_left_amount(&self) -> f64 {
        -self.unit_scroll_size().width
    }

    /// Amount for one line right.
    fn line_right_amount(&self) -> f64 {
        self.unit_scroll_size().width
    }

    /// Amount for one wheel notch up (negative), capped at the viewport.
    fn wheel_up_amount(&self, viewport: Size, delta_items: usize) -> f64 {
        -(self.unit_scroll_size().height * delta_items as f64).min(viewport.height)
    }

    /// Amount for one wheel notch down, capped at the viewport.
    fn wheel_down_amount(&self, viewport: Size, delta_items: usize) -> f64 {
        (self.unit_scroll_size().height * delta_items as f64).min(viewport.height)
    }

    /// Amount for one wheel notch left (negative), capped at the viewport.
    fn wheel_left_amount(&self, viewport: Size, delta_items: usize) -> f64 {
        -(self.unit_scroll_size().width * delta_items as f64).min(viewport.width)
    }

    /// Amount for one wheel notch right, capped at the viewport.
    fn wheel_right_amount(&self, viewport: Size, delta_items: usize) -> f64 {
        (self.unit_scroll_size().width * delta_items as f64).min(viewport.width)
    }

    /// Amount for one page up (negative).
    fn page_up_amount(&self, viewport: Size) -> f64 {
        -viewport.height
    }

    /// Amount for one page down.
    fn page_down_amount(&self, viewport: Size) -> f64 {
        viewport.height
    }

    /// Amount for one page left (negative).
    fn page_left_amount(&self, viewport: Size) -> f64 {
        -viewport.width
    }

    /// Amount for one page right.
    fn page_right_amount(&self, viewport: Size) -> f64 {
        viewport.width
    }
}

/// [`ScrollAmounts`] with all defaults: a 10×10 unit scroll size.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultScrollAmounts;

impl ScrollAmounts for DefaultScrollAmounts {}

/// One navigation operation on the scroll surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollRequest {
    /// Scroll one line up.
    LineUp,
    /// Scroll one line down.
    LineDown,
    /// Scroll one line left.
    LineLeft,
    /// Scroll one line right.
    LineRight,
    /// Scroll one wheel notch up.
    WheelUp,
    /// Scroll one wheel notch down.
    WheelDown,
    /// Scroll one wheel notch left.
    WheelLeft,
    /// Scroll one wheel notch right.
    WheelRight,
    /// Scroll one viewport up.
    PageUp,
    /// Scroll one viewport down.
    PageDown,
    /// Scroll one viewport left.
    PageLeft,
    /// Scroll one viewport right.
    PageRight,
    /// Set the horizontal offset directly.
    SetHorizontalOffset(f64),
    /// Set the vertical offset directly.
    SetVerticalOffset(f64),
}

impl ScrollState {
    /// Applies a navigation request.
    ///
    /// Pixel-unit line and wheel increments use the fixed deltas from
    /// `config`; item-unit increments defer to `amounts`. Page increments
    /// always move by one viewport on the requested axis. Returns `true` when
    /// the offset changed and the scroll owner must be invalidated.
    pub fn apply<A: ScrollAmounts>(
        &mut self,
        request: ScrollRequest,
        unit: ScrollUnit,
        config: &ScrollConfig,
        amounts: &A,
    ) -> bool {
        let viewport = self.viewport();
        let items = config.wheel_delta_items;
        match request {
            ScrollRequest::LineUp => self.scroll_vertical_by(match unit {
                ScrollUnit::Pixel => -config.line_delta,
                ScrollUnit::Item => amounts.line_up_amount(),
            }),
            ScrollRequest::LineDown => self.scroll_vertical_by(match unit {
                ScrollUnit::Pixel => config.line_delta,
                ScrollUnit::Item => amounts.line_down_amount(),
            }),
            ScrollRequest::LineLeft => self.scroll_horizontal_by(match unit {
                ScrollUnit::Pixel => -config.line_delta,
                ScrollUnit::Item => amounts.line_left_amount(),
            }),
            ScrollRequest::LineRight => self.scroll_horizontal_by(match unit {
                ScrollUnit::Pixel => config.line_delta,
                ScrollUnit::Item => amounts.line_right_amount(),
            }),
            ScrollRequest::WheelUp => self.scroll_vertical_by(match unit {
                ScrollUnit::Pixel => -config.wheel_delta,
                ScrollUnit::Item => amounts.wheel_up_amount(viewport, items),
            }),
            ScrollRequest::WheelDown => self.scroll_vertical_by(match unit {
                ScrollUnit::Pixel => config.wheel_delta,
                ScrollUnit::Item => amounts.wheel_down_amount(viewport, items),
            }),
            ScrollRequest::WheelLeft => self.scroll_horizontal_by(match unit {
                ScrollUnit::Pixel => -config.wheel_delta,
                ScrollUnit::Item => amounts.wheel_left_amount(viewport, items),
            }),
            ScrollRequest::WheelRight => self.scroll_horizontal_by(match unit {
                ScrollUnit::Pixel => config.wheel_delta,
                ScrollUnit::Item => amounts.wheel_right_amount(viewport, items),
            }),
            ScrollRequest::PageUp => self.scroll_vertical_by(match unit {
                ScrollUnit::Pixel => -viewport.height,
                ScrollUnit::Item => amounts.page_up_amount(viewport),
            }),
            ScrollRequest::PageDown => self.scroll_vertical_by(match unit {
                ScrollUnit::Pixel => viewport.height,
                ScrollUnit::Item => amounts.page_down_amount(viewport),
            }),
            ScrollRequest::PageLeft => self.scroll_horizontal_by(match unit {
                ScrollUnit::Pixel => -viewport.width,
                ScrollUnit::Item => amounts.page_left_amount(viewport),
            }),
            ScrollRequest::PageRight => self.scroll_horizontal_by(match unit {
                ScrollUnit::Pixel => viewport.width,
                ScrollUnit::Item => amounts.page_right_amount(viewport),
            }),
            ScrollRequest::SetHorizontalOffset(offset) => self.set_horizontal_offset(offset),
            ScrollRequest::SetVerticalOffset(offset) => self.set_vertical_offset(offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::{DefaultScrollAmounts, ScrollAmounts, ScrollConfig, ScrollRequest, ScrollUnit};
    use crate::state::ScrollState;

    fn state_with_viewport(size: Size) -> ScrollState {
        let mut state = ScrollState::new();
        state.compute_viewport(size);
        state
    }

    #[test]
    fn pixel_line_scrolls_use_the_configured_delta() {
        let mut state = state_with_viewport(Size::new(100.0, 100.0));
        let config = ScrollConfig::default();
        let amounts = DefaultScrollAmounts;

        assert!(state.apply(ScrollRequest::LineDown, ScrollUnit::Pixel, &config, &amounts));
        assert_eq!(state.offset().y, 16.0);
        state.apply(ScrollRequest::LineUp, ScrollUnit::Pixel, &config, &amounts);
        assert_eq!(state.offset().y, 0.0);
        state.apply(ScrollRequest::LineRight, ScrollUnit::Pixel, &config, &amounts);
        assert_eq!(state.offset().x, 16.0);
    }

    #[test]
    fn item_line_scrolls_use_the_unit_scroll_size() {
        let mut state = state_with_viewport(Size::new(100.0, 100.0));
        let config = ScrollConfig::default();
        let amounts = DefaultScrollAmounts;

        state.apply(ScrollRequest::LineDown, ScrollUnit::Item, &config, &amounts);
        assert_eq!(state.offset().y, 10.0);
        state.apply(ScrollRequest::LineLeft, ScrollUnit::Item, &config, &amounts);
        assert_eq!(state.offset().x, -10.0);
    }

    #[test]
    fn item_wheel_scrolls_cap_at_the_viewport() {
        // Unit height 10 * 3 items = 30, but the viewport is only 25 tall.
        let mut state = state_with_viewport(Size::new(100.0, 25.0));
        let config = ScrollConfig::default();
        let amounts = DefaultScrollAmounts;

        state.apply(ScrollRequest::WheelDown, ScrollUnit::Item, &config, &amounts);
        assert_eq!(state.offset().y, 25.0);
    }

    #[test]
    fn pixel_wheel_scrolls_use_the_configured_delta() {
        let mut state = state_with_viewport(Size::new(100.0, 100.0));
        let config = ScrollConfig::default();
        let amounts = DefaultScrollAmounts;

        state.apply(ScrollRequest::WheelDown, ScrollUnit::Pixel, &config, &amounts);
        assert_eq!(state.offset().y, 48.0);
        state.apply(ScrollRequest::WheelLeft, ScrollUnit::Pixel, &config, &amounts);
        assert_eq!(state.offset().x, -48.0);
    }

    #[test]
    fn page_scrolls_move_by_one_viewport() {
        let mut state = state_with_viewport(Size::new(80.0, 60.0));
        let config = ScrollConfig::default();
        let amounts = DefaultScrollAmounts;

        state.apply(ScrollRequest::PageDown, ScrollUnit::Pixel, &config, &amounts);
        assert_eq!(state.offset().y, 60.0);
        state.apply(ScrollRequest::PageRight, ScrollUnit::Pixel, &config, &amounts);
        assert_eq!(state.offset().x, 80.0);
        state.apply(ScrollRequest::PageLeft, ScrollUnit::Pixel, &config, &amounts);
        assert_eq!(state.offset().x, 0.0);
    }

    #[test]
    fn set_offset_requests_are_direct() {
        let mut state = state_with_viewport(Size::new(100.0, 100.0));
        let config = ScrollConfig::default();
        let amounts = DefaultScrollAmounts;

        assert!(state.apply(
            ScrollRequest::SetVerticalOffset(42.0),
            ScrollUnit::Pixel,
            &config,
            &amounts,
        ));
        assert_eq!(state.offset().y, 42.0);
        // Re-applying the same offset is not an observable change.
        assert!(!state.apply(
            ScrollRequest::SetVerticalOffset(42.0),
            ScrollUnit::Pixel,
            &config,
            &amounts,
        ));
    }

    #[test]
    fn overridden_unit_scroll_size_feeds_all_defaults() {
        struct RowAmounts;
        impl ScrollAmounts for RowAmounts {
            fn unit_scroll_size(&self) -> Size {
                Size::new(40.0, 24.0)
            }
        }

        let mut state = state_with_viewport(Size::new(400.0, 300.0));
        let config = ScrollConfig::default();

        state.apply(ScrollRequest::LineDown, ScrollUnit::Item, &config, &RowAmounts);
        assert_eq!(state.offset().y, 24.0);
        state.apply(ScrollRequest::WheelDown, ScrollUnit::Item, &config, &RowAmounts);
        // 24 * 3 = 72, under the 300 viewport cap.
        assert_eq!(state.offset().y, 96.0);
        state.apply(ScrollRequest::LineRight, ScrollUnit::Item, &config, &RowAmounts);
        assert_eq!(state.offset().x, 40.0);
    }
}
