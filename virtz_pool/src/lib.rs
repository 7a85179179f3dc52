// Copyright 2025 the Virtz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtz Pool: the container pool behind a virtualizing panel.
//!
//! A virtualizing panel never materializes one container per item. Instead it
//! asks a pool to *realize* containers for the item indices that currently
//! need them and to *virtualize* (recycle or discard) the rest. This crate
//! makes that generator protocol explicit:
//!
//! - [`ContainerFactory`]: how containers are created and bound to items.
//!   The pool owns the factory and every container it creates; callers only
//!   ever hold [`ContainerKey`]s.
//! - [`ContainerKey`]: generational handle into the pool's container arena.
//!   Stale keys (for removed containers) simply resolve to nothing.
//! - [`PoolPosition`]: an opaque bookmark — "at a realized slot" or "offset
//!   from a realized slot" — that lets generation resume near an arbitrary
//!   item index instead of rescanning from zero.
//! - [`GenerationSession`]: a scoped cursor over the pool. Each
//!   [`GenerationSession::generate_next`] call yields the container for the
//!   next index in the session's direction, reusing recycled containers
//!   before allocating. The session exclusively borrows the pool, so the
//!   cursor is released on every exit path — normal completion, early return,
//!   or unwinding — and the pool can never be observed mid-scan.
//!
//! Each container is in one of three logical states: *unrealized* (no arena
//! entry), *realized* (bound to an item index, in the realized list), or
//! *recycled* (allocated but detached, held for reuse at a future index).
//! [`ContainerPool::recycle`] and [`ContainerPool::remove`] transition
//! realized containers out; a later session transitions recycled ones back in.
//!
//! Collection mutations are reported through [`ItemsChange`] and applied with
//! [`ContainerPool::on_items_changed`], which keeps the index-to-container
//! bookkeeping from going stale between layout passes.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod changes;
mod factory;
mod pool;
mod session;

pub use changes::ItemsChange;
pub use factory::ContainerFactory;
pub use pool::{ContainerKey, ContainerPool, PoolPosition};
pub use session::{Generated, GenerationDirection, GenerationSession};
