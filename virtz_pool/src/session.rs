// Copyright 2025 the Virtz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped generation sessions over the pool.

use crate::factory::ContainerFactory;
use crate::pool::{ContainerKey, ContainerPool, RealizedEntry};

/// Direction a generation session walks through item indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationDirection {
    /// Ascending item indices.
    Forward,
    /// Descending item indices.
    Backward,
}

/// One container produced by [`GenerationSession::generate_next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generated {
    /// Handle to the generated container.
    pub key: ContainerKey,
    /// `true` when the container was created for this call. Containers pulled
    /// from the recycle stack report `false`, the same as already-realized
    /// ones: callers detect reuse by checking their own active set.
    pub newly_realized: bool,
}

/// A scoped cursor-bound interaction with the pool.
///
/// The session exclusively borrows the pool, which is the cleanup guarantee:
/// whether the scope ends by completion, early return, or unwinding, the
/// cursor state lives in the session and dies with it, so the pool can never
/// be observed in a half-finished scan position.
pub struct GenerationSession<'a, F: ContainerFactory> {
    pool: &'a mut ContainerPool<F>,
    next_index: Option<usize>,
    direction: GenerationDirection,
    item_count: usize,
}

impl<F: ContainerFactory> core::fmt::Debug for GenerationSession<'_, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GenerationSession")
            .field("next_index", &self.next_index)
            .field("direction", &self.direction)
            .field("item_count", &self.item_count)
            .finish_non_exhaustive()
    }
}

impl<'a, F: ContainerFactory> GenerationSession<'a, F> {
    pub(crate) fn new(
        pool: &'a mut ContainerPool<F>,
        next_index: Option<usize>,
        direction: GenerationDirection,
        item_count: usize,
    ) -> Self {
        Self {
            pool,
            next_index,
            direction,
            item_count,
        }
    }

    /// Generates the container for the next item index in the session's
    /// direction.
    ///
    /// Already-realized indices yield their existing container; otherwise the
    /// recycle stack is consulted before the factory allocates. Returns `None`
    /// once the cursor leaves `0..item_count` — a collection shorter than the
    /// caller expected is "nothing to realize here", not an error.
    pub fn generate_next(&mut self) -> Option<Generated> {
        let index = self.next_index?;
        if index >= self.item_count {
            self.next_index = None;
            return None;
        }

        let generated = match self
            .pool
            .realized
            .binary_search_by_key(&index, |entry| entry.item_index)
        {
            Ok(slot) => Generated {
                key: self.pool.realized[slot].key,
                newly_realized: false,
            },
            Err(insert) => {
                let (key, newly_realized) = match self.pool.recycled.pop() {
                    Some(key) => (key, false),
                    None => (self.pool.alloc_container(), true),
                };
                self.pool.realized.insert(
                    insert,
                    RealizedEntry {
                        item_index: index,
                        key,
                    },
                );
                Generated {
                    key,
                    newly_realized,
                }
            }
        };

        self.next_index = match self.direction {
            GenerationDirection::Forward => Some(index + 1),
            GenerationDirection::Backward => index.checked_sub(1),
        };
        Some(generated)
    }

    /// Binds a generated container to its item. See [`ContainerPool::prepare`].
    pub fn prepare(&mut self, key: ContainerKey, item: &F::Item) -> bool {
        self.pool.prepare(key, item)
    }

    /// Exclusive access to a generated container, for measurement inside the
    /// session scope.
    pub fn container_mut(&mut self, key: ContainerKey) -> Option<&mut F::Container> {
        self.pool.container_mut(key)
    }
}
