// Copyright 2025 the Virtz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The virtualizing panel: measure/arrange orchestration.

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashSet;
use kurbo::{Point, Rect, Size};

use virtz_pool::{
    ContainerFactory, ContainerKey, ContainerPool, GenerationDirection, ItemsChange, PoolPosition,
};
use virtz_range::{ItemRangeSet, RunBuilder};
use virtz_scroll::{
    CacheUnit, HierarchicalConstraints, ScrollAmounts, ScrollConfig, ScrollOwner, ScrollRequest,
    ScrollState, ScrollUnit,
};

use crate::layout::LayoutNode;
use crate::owner::{PanelInfo, PanelOwner};

/// What happens to a container whose item leaves the visible ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtualizationMode {
    /// Containers are discarded and rebuilt on demand.
    Standard,
    /// Containers are kept on the recycle stack for reuse.
    Recycling,
}

/// Measure-pass state, tracked for debug assertions and tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelPhase {
    Idle,
    Measuring,
    Realizing,
    Virtualizing,
}

type DeferredAction = Box<dyn FnOnce()>;

/// A virtualizing layout container core.
///
/// The panel owns the container pool, the ordered active-child slot list, and
/// the scroll metrics. The item collection stays externally owned and is
/// passed into each pass; collection mutations must be reported through
/// [`VirtzPanel::on_items_changed`] before the next measure pass so the
/// index-to-slot mapping never goes stale.
pub struct VirtzPanel<F: ContainerFactory>
where
    F::Container: LayoutNode,
{
    pool: ContainerPool<F>,
    /// active child slots, in ascending item order
    children: Vec<ContainerKey>,
    /// membership mirror of `children`
    active: HashSet<ContainerKey>,
    scroll: ScrollState,
    scroll_config: ScrollConfig,
    scroll_unit: ScrollUnit,
    mode: VirtualizationMode,
    virtualizing: bool,
    cache_length: f64,
    cache_unit: CacheUnit,
    first_child_desired_size: Size,
    phase: PanelPhase,
    deferred: Vec<DeferredAction>,
}

impl<F: ContainerFactory> core::fmt::Debug for VirtzPanel<F>
where
    F::Container: LayoutNode,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtzPanel")
            .field("pool", &self.pool)
            .field("children", &self.children.len())
            .field("scroll", &self.scroll)
            .field("mode", &self.mode)
            .field("phase", &self.phase)
            .field("deferred", &self.deferred.len())
            .finish_non_exhaustive()
    }
}

impl<F: ContainerFactory> VirtzPanel<F>
where
    F::Container: LayoutNode,
{
    /// Creates a panel with the default [`ScrollConfig`].
    pub fn new(factory: F) -> Self {
        Self::with_config(factory, ScrollConfig::default())
    }

    /// Creates a panel with explicit navigation step sizes.
    pub fn with_config(factory: F, scroll_config: ScrollConfig) -> Self {
        Self {
            pool: ContainerPool::new(factory),
            children: Vec::new(),
            active: HashSet::new(),
            scroll: ScrollState::new(),
            scroll_config,
            scroll_unit: ScrollUnit::Pixel,
            mode: VirtualizationMode::Standard,
            virtualizing: true,
            cache_length: 0.0,
            cache_unit: CacheUnit::Item,
            first_child_desired_size: Size::ZERO,
            phase: PanelPhase::Idle,
            deferred: Vec::new(),
        }
    }

    /// Sets the recycle-vs-discard policy for virtualized containers.
    pub fn set_virtualization_mode(&mut self, mode: VirtualizationMode) {
        self.mode = mode;
    }

    /// Enables or disables the virtualize step. When disabled, containers
    /// realized in earlier passes stay active even outside the visible
    /// ranges.
    pub fn set_virtualizing(&mut self, virtualizing: bool) {
        self.virtualizing = virtualizing;
    }

    /// Sets the unit used by line and wheel navigation.
    pub fn set_scroll_unit(&mut self, unit: ScrollUnit) {
        self.scroll_unit = unit;
    }

    /// Sets the cache length used on flat passes. Hierarchical passes
    /// override both values from their constraints.
    pub fn set_cache(&mut self, length: f64, unit: CacheUnit) {
        self.cache_length = length;
        self.cache_unit = unit;
    }

    /// Current scroll metrics.
    #[must_use]
    pub const fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    /// Cache length in effect for the current pass.
    #[must_use]
    pub const fn cache(&self) -> (f64, CacheUnit) {
        (self.cache_length, self.cache_unit)
    }

    /// Active child slots in ascending item order.
    #[must_use]
    pub fn children(&self) -> &[ContainerKey] {
        &self.children
    }

    /// Item index the child at `slot` is bound to.
    #[must_use]
    pub fn item_index_of_child(&self, slot: usize) -> Option<usize> {
        self.pool.index_from_position(PoolPosition::at_slot(slot))
    }

    /// Shared access to a live container.
    #[must_use]
    pub fn container(&self, key: ContainerKey) -> Option<&F::Container> {
        self.pool.container(key)
    }

    /// Exclusive access to a live container.
    pub fn container_mut(&mut self, key: ContainerKey) -> Option<&mut F::Container> {
        self.pool.container_mut(key)
    }

    /// Desired size of the first child, as cached by the last measure pass.
    #[must_use]
    pub const fn first_child_desired_size(&self) -> Size {
        self.first_child_desired_size
    }

    /// The underlying pool, mostly useful for inspection.
    #[must_use]
    pub const fn pool(&self) -> &ContainerPool<F> {
        &self.pool
    }

    /// Sets the extent width, notifying `owner` when the change is
    /// observable.
    pub fn set_extent_width(&mut self, width: f64, owner: Option<&mut dyn ScrollOwner>) {
        if self.scroll.set_extent_width(width)
            && let Some(owner) = owner
        {
            owner.invalidate_scroll_info();
        }
    }

    /// Sets the extent height, notifying `owner` when the change is
    /// observable.
    pub fn set_extent_height(&mut self, height: f64, owner: Option<&mut dyn ScrollOwner>) {
        if self.scroll.set_extent_height(height)
            && let Some(owner) = owner
        {
            owner.invalidate_scroll_info();
        }
    }

    /// Applies a navigation request, notifying `owner` when the offset
    /// changed. Returns whether it changed.
    pub fn scroll<A: ScrollAmounts>(
        &mut self,
        request: ScrollRequest,
        amounts: &A,
        owner: Option<&mut dyn ScrollOwner>,
    ) -> bool {
        let changed = self
            .scroll
            .apply(request, self.scroll_unit, &self.scroll_config, amounts);
        if changed && let Some(owner) = owner {
            owner.invalidate_scroll_info();
        }
        changed
    }

    /// Scrolls the minimal amount to bring `target` (in the panel's content
    /// coordinate space) into the viewport and returns its visible portion.
    pub fn make_visible(&mut self, target: Rect, owner: Option<&mut dyn ScrollOwner>) -> Rect {
        let before = self.scroll.offset();
        let visible = self.scroll.make_visible(target);
        if self.scroll.offset() != before
            && let Some(owner) = owner
        {
            owner.invalidate_scroll_info();
        }
        visible
    }

    /// Queues a fire-and-forget action to run after the current event.
    ///
    /// Hosts drain the queue with [`VirtzPanel::run_deferred`] once the
    /// triggering event finishes; there is no ordering guarantee relative to
    /// later input beyond "before the next idle-priority work".
    pub fn defer(&mut self, action: impl FnOnce() + 'static) {
        self.deferred.push(Box::new(action));
    }

    /// Runs and clears all queued deferred actions, in queue order.
    pub fn run_deferred(&mut self) {
        let actions: Vec<DeferredAction> = self.deferred.drain(..).collect();
        for action in actions {
            action();
        }
    }

    /// Applies a collection-change event.
    ///
    /// Child slots bound to removed, replaced, or moved-away items are
    /// detached and their containers released by the pool, so the next
    /// measure pass never arranges against a stale index-to-slot mapping.
    pub fn on_items_changed(&mut self, change: &ItemsChange) {
        debug_assert_eq!(
            self.phase,
            PanelPhase::Idle,
            "collection changes must land between passes"
        );
        match *change {
            ItemsChange::Remove { position, count }
            | ItemsChange::Replace { position, count } => {
                self.detach_children_for(position, count);
            }
            ItemsChange::Move {
                old_position,
                count,
                ..
            } => {
                self.detach_children_for(old_position, count);
            }
            ItemsChange::Insert { .. } => {}
            ItemsChange::Reset => {
                self.children.clear();
                self.active.clear();
            }
        }
        self.pool.on_items_changed(change);
    }

    /// Runs a measure pass.
    ///
    /// `constraints` being present makes this a hierarchical pass: viewport
    /// and offset are taken verbatim from the grouping owner, no clamping,
    /// no scroll-owner notification, and the desired size is the full
    /// extent. On a flat pass the desired size is `min(available, extent)`
    /// per axis.
    pub fn measure<O>(
        &mut self,
        items: &[F::Item],
        mut owner: Option<&mut O>,
        mut scroll_owner: Option<&mut dyn ScrollOwner>,
        constraints: Option<&HierarchicalConstraints>,
        available: Size,
    ) -> Size
    where
        O: PanelOwner<F::Item, F::Container> + ?Sized,
    {
        debug_assert_eq!(self.phase, PanelPhase::Idle, "measure passes must not overlap");
        self.phase = PanelPhase::Measuring;

        let extent = self.scroll.extent();
        let (available, desired) = if let Some(constraints) = constraints {
            // The grouping owner already constrained the available size (it is
            // typically infinite here), so its viewport stands in for it.
            self.scroll.apply_constraints(constraints);
            self.cache_length = constraints.cache_length;
            self.cache_unit = constraints.cache_unit;
            (constraints.viewport.size(), extent)
        } else {
            let desired = Size::new(
                available.width.min(extent.width),
                available.height.min(extent.height),
            );
            if self.scroll.compute_viewport(available)
                && let Some(owner) = scroll_owner.as_deref_mut()
            {
                owner.invalidate_scroll_info();
            }
            (available, desired)
        };

        let mut ranges = ItemRangeSet::new();
        if let Some(owner) = owner.as_deref_mut() {
            self.first_child_desired_size = self.first_child_size(items);
            let info = self.info(items.len());
            owner.measure(&info, available);

            let mut builder = RunBuilder::new();
            for (index, item) in items.iter().enumerate() {
                builder.observe(index, owner.can_arrange_item(&info, item));
            }
            ranges = builder.finish();
        }

        self.phase = PanelPhase::Realizing;
        let realized = self.realize_children(items, &ranges);
        self.phase = PanelPhase::Virtualizing;
        let virtualized = self.virtualize_children(&ranges);
        self.phase = PanelPhase::Idle;

        log::trace!(
            "measure pass: {} ranges over {} items, realized {realized}, virtualized {virtualized}, {} active",
            ranges.len(),
            items.len(),
            self.children.len(),
        );
        desired
    }

    /// Runs an arrange pass: positions every active container at the
    /// rectangle the policy reports, or an empty rectangle without one.
    pub fn arrange<O>(
        &mut self,
        items: &[F::Item],
        mut owner: Option<&mut O>,
        final_size: Size,
    ) -> Size
    where
        O: PanelOwner<F::Item, F::Container> + ?Sized,
    {
        debug_assert_eq!(self.phase, PanelPhase::Idle, "arrange must follow measure");
        let info = self.info(items.len());
        for child_slot in 0..self.children.len() {
            let key = self.children[child_slot];
            let Some(item_index) = self.pool.index_from_position(PoolPosition::at_slot(child_slot))
            else {
                continue;
            };
            let Some(item) = items.get(item_index) else {
                continue;
            };
            let Some(container) = self.pool.container_mut(key) else {
                continue;
            };
            let bounds = owner
                .as_deref_mut()
                .and_then(|owner| owner.arrange_item(&info, &mut *container, item))
                .unwrap_or(Rect::ZERO);
            container.arrange(bounds);
        }
        final_size
    }

    fn info(&self, item_count: usize) -> PanelInfo {
        PanelInfo {
            item_count,
            first_child_desired_size: self.first_child_desired_size,
            offset: self.scroll.offset(),
            extent: self.scroll.extent(),
            viewport: self.scroll.viewport(),
        }
    }

    /// Realizes containers for every range, inserting new or reattached
    /// children at their correct slots. Returns how many were inserted.
    fn realize_children(&mut self, items: &[F::Item], ranges: &ItemRangeSet) -> usize {
        let viewport = self.scroll.viewport();
        let mut inserted = 0_usize;
        for range in ranges.iter() {
            let start = self.pool.position_from_index(range.start());
            let mut child_slot = start.child_slot_hint();
            let mut session =
                self.pool
                    .start_at(start, GenerationDirection::Forward, items.len(), true);
            for index in range.indices() {
                let Some(generated) = session.generate_next() else {
                    break;
                };
                let key = generated.key;
                if generated.newly_realized || !self.active.contains(&key) {
                    if child_slot >= self.children.len() {
                        self.children.push(key);
                    } else {
                        self.children.insert(child_slot, key);
                    }
                    self.active.insert(key);
                    session.prepare(key, &items[index]);
                    if let Some(container) = session.container_mut(key) {
                        container.measure(Size::new(f64::INFINITY, f64::INFINITY));
                    }
                    inserted += 1;
                }

                // Nested grouping hosts are measured against the viewport
                // under explicit constraints instead of unconstrained.
                let hierarchical = match session.container_mut(key) {
                    Some(container) => match container.hierarchical_host() {
                        Some(host) => {
                            host.set_constraints(HierarchicalConstraints::new(
                                Rect::from_origin_size(Point::ZERO, viewport),
                                0.0,
                                CacheUnit::Item,
                            ));
                            true
                        }
                        None => false,
                    },
                    None => false,
                };
                if hierarchical && let Some(container) = session.container_mut(key) {
                    container.measure(viewport);
                }

                child_slot += 1;
            }
        }
        inserted
    }

    /// Virtualizes every active child outside `ranges`. Scans child slots in
    /// reverse so slot indices stay valid as slots are removed. Returns how
    /// many were transitioned out.
    fn virtualize_children(&mut self, ranges: &ItemRangeSet) -> usize {
        if !self.virtualizing {
            return 0;
        }
        // Resolved once per pass, not per container.
        let recycle = self.mode == VirtualizationMode::Recycling;
        let mut transitioned = 0_usize;
        for child_slot in (0..self.children.len()).rev() {
            let position = PoolPosition::at_slot(child_slot);
            let Some(item_index) = self.pool.index_from_position(position) else {
                continue;
            };
            if !ranges.contains(item_index) {
                if recycle {
                    self.pool.recycle(position, 1);
                } else {
                    self.pool.remove(position, 1);
                }
                let key = self.children.remove(child_slot);
                self.active.remove(&key);
                transitioned += 1;
            }
        }
        transitioned
    }

    /// Desired size of the first item's container, generating one if no
    /// child exists yet.
    fn first_child_size(&mut self, items: &[F::Item]) -> Size {
        if let Some(&key) = self.children.first() {
            return self
                .pool
                .container(key)
                .map_or(Size::ZERO, LayoutNode::desired_size);
        }
        let position = self.pool.position_from_index(0);
        let mut session = self
            .pool
            .start_at(position, GenerationDirection::Forward, items.len(), true);
        let Some(generated) = session.generate_next() else {
            return Size::ZERO;
        };
        let key = generated.key;
        if let Some(item) = items.first() {
            session.prepare(key, item);
        }
        let desired = match session.container_mut(key) {
            Some(container) => {
                container.measure(Size::new(f64::INFINITY, f64::INFINITY));
                container.desired_size()
            }
            None => Size::ZERO,
        };
        drop(session);
        self.children.push(key);
        self.active.insert(key);
        desired
    }

    fn detach_children_for(&mut self, position: usize, count: usize) {
        for child_slot in (0..self.children.len()).rev() {
            let Some(item_index) = self
                .pool
                .index_from_position(PoolPosition::at_slot(child_slot))
            else {
                continue;
            };
            if item_index >= position && item_index < position + count {
                let key = self.children.remove(child_slot);
                self.active.remove(&key);
            }
        }
    }
}
