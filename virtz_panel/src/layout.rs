// Copyright 2025 the Virtz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-toolkit layout surface the panel consumes.

use kurbo::{Rect, Size};
use virtz_scroll::HierarchicalConstraints;

/// Layout operations a container type must expose to the panel.
///
/// These mirror the two primitives every retained-mode toolkit provides:
/// measure a node given an available size (populating its desired size) and
/// arrange it into a rectangle. The panel treats both as black boxes.
pub trait LayoutNode {
    /// Measures the node against `available`, updating its desired size.
    fn measure(&mut self, available: Size);

    /// Desired size produced by the most recent measure.
    fn desired_size(&self) -> Size;

    /// Arranges the node into `bounds`.
    fn arrange(&mut self, bounds: Rect);

    /// Returns the node's hierarchical-scrolling surface when the node is
    /// itself a nested grouping host, `None` otherwise (the default).
    fn hierarchical_host(&mut self) -> Option<&mut dyn HierarchicalHost> {
        None
    }
}

/// Surface of a container that hosts its own nested virtualizing layout.
///
/// During realization the panel hands such containers explicit constraints
/// derived from its current viewport instead of measuring them unconstrained.
pub trait HierarchicalHost {
    /// Installs the constraints the nested layout must use on its next pass.
    fn set_constraints(&mut self, constraints: HierarchicalConstraints);
}
