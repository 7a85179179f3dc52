// Copyright 2025 the Virtz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The container pool: generational arena, realized list, recycle stack.

use alloc::vec::Vec;

use crate::changes::ItemsChange;
use crate::factory::ContainerFactory;
use crate::session::{GenerationDirection, GenerationSession};

/// Generational handle to a container owned by a [`ContainerPool`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ContainerKey(pub(crate) u32, pub(crate) u32);

impl ContainerKey {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Opaque generator position: a bookmark for resuming generation near an item
/// index without rescanning from zero.
///
/// `anchor` is the realized-slot index the bookmark hangs off (`None` when no
/// realized container precedes the item), and `offset` is the distance in item
/// indices from that anchor. A position with `offset == 0` sits exactly at a
/// realized slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolPosition {
    /// Realized-slot index anchoring the bookmark, if any.
    pub anchor: Option<usize>,
    /// Item-index distance from the anchor (or from the collection start when
    /// unanchored).
    pub offset: usize,
}

impl PoolPosition {
    /// A position exactly at realized slot `slot`.
    #[must_use]
    pub const fn at_slot(slot: usize) -> Self {
        Self {
            anchor: Some(slot),
            offset: 0,
        }
    }

    /// Child-slot index at which a container generated from this position
    /// should be inserted: the anchored slot itself when exactly on it, one
    /// past the anchor otherwise, and the front when unanchored.
    #[must_use]
    pub const fn child_slot_hint(&self) -> usize {
        match self.anchor {
            Some(slot) if self.offset == 0 => slot,
            Some(slot) => slot + 1,
            None => 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct RealizedEntry {
    pub(crate) item_index: usize,
    pub(crate) key: ContainerKey,
}

/// Pool of containers backing a virtualizing panel.
///
/// The pool exclusively owns every container it creates. Panels interact with
/// it through [`ContainerKey`]s and the recycle/remove operations — they never
/// destroy a container directly. The realized list is kept sorted by item
/// index; the arena reuses freed slots through a free list and bumps a
/// per-slot generation so stale keys die rather than aliasing a new container.
pub struct ContainerPool<F: ContainerFactory> {
    factory: F,
    /// slots
    slots: Vec<Option<F::Container>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    /// realized containers, sorted by item index
    pub(crate) realized: Vec<RealizedEntry>,
    /// detached containers held for reuse
    pub(crate) recycled: Vec<ContainerKey>,
}

impl<F: ContainerFactory> core::fmt::Debug for ContainerPool<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ContainerPool")
            .field("slots_total", &self.slots.len())
            .field("realized", &self.realized.len())
            .field("recycled", &self.recycled.len())
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl<F: ContainerFactory> ContainerPool<F> {
    /// Creates an empty pool around `factory`.
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            realized: Vec::new(),
            recycled: Vec::new(),
        }
    }

    /// Returns `true` if `key` refers to a live (realized or recycled)
    /// container.
    #[must_use]
    pub fn is_alive(&self, key: ContainerKey) -> bool {
        let idx = key.idx();
        idx < self.slots.len() && self.generations[idx] == key.1 && self.slots[idx].is_some()
    }

    /// Shared access to a live container.
    #[must_use]
    pub fn container(&self, key: ContainerKey) -> Option<&F::Container> {
        if !self.is_alive(key) {
            return None;
        }
        self.slots[key.idx()].as_ref()
    }

    /// Exclusive access to a live container.
    pub fn container_mut(&mut self, key: ContainerKey) -> Option<&mut F::Container> {
        if !self.is_alive(key) {
            return None;
        }
        self.slots[key.idx()].as_mut()
    }

    /// Number of realized containers.
    #[must_use]
    pub fn realized_count(&self) -> usize {
        self.realized.len()
    }

    /// Number of containers held on the recycle stack.
    #[must_use]
    pub fn recycled_count(&self) -> usize {
        self.recycled.len()
    }

    /// Item indices with realized containers, ascending.
    pub fn realized_item_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.realized.iter().map(|entry| entry.item_index)
    }

    /// Item index the realized container `key` is bound to.
    #[must_use]
    pub fn item_index_of(&self, key: ContainerKey) -> Option<usize> {
        self.realized
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.item_index)
    }

    /// Maps an item index to a generator position for resuming generation.
    #[must_use]
    pub fn position_from_index(&self, item_index: usize) -> PoolPosition {
        match self
            .realized
            .binary_search_by_key(&item_index, |entry| entry.item_index)
        {
            Ok(slot) => PoolPosition::at_slot(slot),
            Err(0) => PoolPosition {
                anchor: None,
                offset: item_index,
            },
            Err(insert) => {
                let anchor = insert - 1;
                PoolPosition {
                    anchor: Some(anchor),
                    offset: item_index - self.realized[anchor].item_index,
                }
            }
        }
    }

    /// Resolves a generator position back to an item index.
    ///
    /// Returns `None` when the position's anchor no longer exists.
    #[must_use]
    pub fn index_from_position(&self, position: PoolPosition) -> Option<usize> {
        match position.anchor {
            Some(slot) => self
                .realized
                .get(slot)
                .map(|entry| entry.item_index + position.offset),
            None => Some(position.offset),
        }
    }

    /// Opens a scoped generation session at `position`.
    ///
    /// `item_count` bounds the session: generating past the end of the
    /// collection yields `None` rather than a container. When
    /// `allow_start_at_realized` is `false` and the position sits exactly on a
    /// realized slot, generation starts one index past it instead.
    ///
    /// The session exclusively borrows the pool for its whole scope, so its
    /// cursor is released on every exit path.
    pub fn start_at(
        &mut self,
        position: PoolPosition,
        direction: GenerationDirection,
        item_count: usize,
        allow_start_at_realized: bool,
    ) -> GenerationSession<'_, F> {
        let mut next_index = self.index_from_position(position);
        if !allow_start_at_realized
            && position.offset == 0
            && position.anchor.is_some()
            && let Some(index) = next_index
        {
            next_index = match direction {
                GenerationDirection::Forward => Some(index + 1),
                GenerationDirection::Backward => index.checked_sub(1),
            };
        }
        GenerationSession::new(self, next_index, direction, item_count)
    }

    /// Binds the container behind `key` to `item` via the factory.
    ///
    /// Returns `false` if the key is stale.
    pub fn prepare(&mut self, key: ContainerKey, item: &F::Item) -> bool {
        if !self.is_alive(key) {
            return false;
        }
        let Some(container) = self.slots[key.idx()].as_mut() else {
            return false;
        };
        self.factory.prepare_container(container, item);
        true
    }

    /// Transitions `count` realized containers starting at `position` to the
    /// recycle stack, retaining them for reuse. Returns how many were
    /// transitioned.
    pub fn recycle(&mut self, position: PoolPosition, count: usize) -> usize {
        self.transition_out(position, count, true)
    }

    /// Discards `count` realized containers starting at `position` entirely.
    /// Returns how many were discarded.
    pub fn remove(&mut self, position: PoolPosition, count: usize) -> usize {
        self.transition_out(position, count, false)
    }

    fn transition_out(&mut self, position: PoolPosition, count: usize, keep: bool) -> usize {
        debug_assert!(
            position.offset == 0,
            "recycle/remove positions must sit exactly on a realized slot"
        );
        let Some(start) = position.anchor else {
            return 0;
        };
        let end = (start + count).min(self.realized.len());
        if start >= end {
            return 0;
        }
        for entry in self.realized.drain(start..end).collect::<Vec<_>>() {
            if keep {
                self.recycled.push(entry.key);
            } else {
                self.free(entry.key);
            }
        }
        end - start
    }

    /// Applies a collection-change event to the pool's bookkeeping.
    ///
    /// Containers bound to removed, replaced, or moved items are discarded;
    /// surviving realized entries are shifted so their item indices stay
    /// accurate. [`ItemsChange::Reset`] discards everything, recycled
    /// containers included.
    pub fn on_items_changed(&mut self, change: &ItemsChange) {
        match *change {
            ItemsChange::Insert { position, count } => {
                for entry in &mut self.realized {
                    if entry.item_index >= position {
                        entry.item_index += count;
                    }
                }
            }
            ItemsChange::Remove { position, count } => {
                self.drop_realized_in(position, count);
                for entry in &mut self.realized {
                    if entry.item_index >= position + count {
                        entry.item_index -= count;
                    }
                }
            }
            ItemsChange::Replace { position, count } => {
                // Indices are unaffected; only the bindings die.
                self.drop_realized_in(position, count);
            }
            ItemsChange::Move {
                old_position,
                new_position,
                count,
            } => {
                self.drop_realized_in(old_position, count);
                for entry in &mut self.realized {
                    if entry.item_index >= old_position + count {
                        entry.item_index -= count;
                    }
                    if entry.item_index >= new_position {
                        entry.item_index += count;
                    }
                }
            }
            ItemsChange::Reset => {
                for entry in core::mem::take(&mut self.realized) {
                    self.free(entry.key);
                }
                for key in core::mem::take(&mut self.recycled) {
                    self.free(key);
                }
            }
        }
        debug_assert!(
            self.realized
                .windows(2)
                .all(|pair| pair[0].item_index < pair[1].item_index),
            "realized list must stay strictly ascending"
        );
    }

    pub(crate) fn alloc_container(&mut self) -> ContainerKey {
        let container = self.factory.create_container();
        if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(container);
            #[expect(clippy::cast_possible_truncation, reason = "slot indices fit u32")]
            let key = ContainerKey::new(idx as u32, self.generations[idx]);
            key
        } else {
            let idx = self.slots.len();
            self.slots.push(Some(container));
            self.generations.push(0);
            #[expect(clippy::cast_possible_truncation, reason = "slot indices fit u32")]
            let key = ContainerKey::new(idx as u32, 0);
            key
        }
    }

    fn drop_realized_in(&mut self, position: usize, count: usize) {
        let mut slot = 0;
        while slot < self.realized.len() {
            let item_index = self.realized[slot].item_index;
            if item_index >= position && item_index < position + count {
                let entry = self.realized.remove(slot);
                self.free(entry.key);
            } else {
                slot += 1;
            }
        }
    }

    fn free(&mut self, key: ContainerKey) {
        let idx = key.idx();
        if idx >= self.slots.len() || self.generations[idx] != key.1 {
            return;
        }
        self.slots[idx] = None;
        self.generations[idx] = self.generations[idx].wrapping_add(1);
        self.free_list.push(idx);
    }
}
