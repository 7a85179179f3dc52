// Copyright 2025 the Virtz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container creation and item binding.

/// Creates container instances and binds them to data items.
///
/// The hosting toolkit integration layer implements this once; the pool owns
/// the factory and calls it as generation sessions demand. A recycled
/// container is *not* re-created — it is handed back to
/// [`ContainerFactory::prepare_container`] so its presentation can be rebound
/// to the (possibly different) item it now represents.
pub trait ContainerFactory {
    /// Data item type the containers present.
    type Item;
    /// Visual container type.
    type Container;

    /// Creates a fresh, unbound container instance.
    fn create_container(&mut self) -> Self::Container;

    /// Binds `container`'s presentation to `item`.
    fn prepare_container(&mut self, container: &mut Self::Container, item: &Self::Item);
}
