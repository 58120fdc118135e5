// Copyright 2025 the Unfold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item registry: registration order plus per-item metadata.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Ref, RefCell};
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::{Direction, WrapMode, navigate};

/// Per-item metadata held by an [`ItemRegistry`].
///
/// `H` is an opaque host focus handle (for example a DOM element reference or
/// a widget id). It defaults to `()` for hosts that focus by id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemMeta<H = ()> {
    /// Disabled items are skipped by navigation.
    pub disabled: bool,
    /// Handle the host uses to move focus to this item.
    pub focus_handle: Option<H>,
}

impl<H> Default for ItemMeta<H> {
    fn default() -> Self {
        Self {
            disabled: false,
            focus_handle: None,
        }
    }
}

impl<H> ItemMeta<H> {
    /// Enabled metadata without a focus handle.
    pub fn enabled() -> Self {
        Self::default()
    }

    /// Metadata with the given disabled flag.
    pub fn with_disabled(disabled: bool) -> Self {
        Self {
            disabled,
            focus_handle: None,
        }
    }
}

/// Ordered mapping from item id to [`ItemMeta`].
///
/// Registration order is the visual/tab order. Each id appears at most once:
/// re-registering an id keeps its position and replaces its metadata.
#[derive(Clone, Debug)]
pub struct ItemRegistry<K, H = ()> {
    order: Vec<K>,
    items: HashMap<K, ItemMeta<H>>,
}

impl<K, H> Default for ItemRegistry<K, H> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            items: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash, H> ItemRegistry<K, H> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id`, or update its metadata if already present.
    ///
    /// Returns `true` if `id` was newly added.
    pub fn register(&mut self, id: K, meta: ItemMeta<H>) -> bool {
        if let Some(existing) = self.items.get_mut(&id) {
            *existing = meta;
            return false;
        }
        self.order.push(id.clone());
        self.items.insert(id, meta);
        true
    }

    /// Remove `id`, returning its metadata if it was registered.
    pub fn unregister(&mut self, id: &K) -> Option<ItemMeta<H>> {
        let meta = self.items.remove(id)?;
        self.order.retain(|k| k != id);
        Some(meta)
    }

    /// Returns `true` if `id` is registered.
    pub fn contains(&self, id: &K) -> bool {
        self.items.contains_key(id)
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registered ids in registration order.
    pub fn order(&self) -> &[K] {
        &self.order
    }

    /// Metadata for `id`.
    pub fn meta(&self, id: &K) -> Option<&ItemMeta<H>> {
        self.items.get(id)
    }

    /// Returns `true` if `id` is registered and disabled.
    pub fn is_disabled(&self, id: &K) -> bool {
        self.items.get(id).is_some_and(|m| m.disabled)
    }

    /// Update the disabled flag of a registered item.
    ///
    /// Returns `false` if `id` is not registered.
    pub fn set_disabled(&mut self, id: &K, disabled: bool) -> bool {
        match self.items.get_mut(id) {
            Some(meta) => {
                meta.disabled = disabled;
                true
            }
            None => false,
        }
    }

    /// Update the focus handle of a registered item.
    ///
    /// Returns `false` if `id` is not registered.
    pub fn set_focus_handle(&mut self, id: &K, handle: Option<H>) -> bool {
        match self.items.get_mut(id) {
            Some(meta) => {
                meta.focus_handle = handle;
                true
            }
            None => false,
        }
    }

    /// The host focus handle of `id`, if any.
    pub fn focus_handle(&self, id: &K) -> Option<&H> {
        self.items.get(id).and_then(|m| m.focus_handle.as_ref())
    }

    /// Run the navigation cursor over every registered item.
    pub fn navigate(
        &self,
        current: Option<&K>,
        direction: Direction,
        wrap: WrapMode,
    ) -> Option<&K> {
        navigate(&self.order, |id| self.is_disabled(id), current, direction, wrap)
    }
}

struct Shared<K, H> {
    registry: ItemRegistry<K, H>,
    // Live registrations per id; an entry is removed when its last guard drops.
    mounts: HashMap<K, usize>,
}

/// A registry owned by a composite root and shared with its items.
///
/// Items never touch the registry directly; they hold a [`Registration`] that
/// can update or remove only their own entry.
pub struct SharedRegistry<K, H = ()> {
    inner: Rc<RefCell<Shared<K, H>>>,
}

impl<K, H> Clone for SharedRegistry<K, H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K, H> Default for SharedRegistry<K, H> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Shared {
                registry: ItemRegistry::default(),
                mounts: HashMap::new(),
            })),
        }
    }
}

impl<K: fmt::Debug, H: fmt::Debug> fmt::Debug for SharedRegistry<K, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(shared) => f
                .debug_struct("SharedRegistry")
                .field("registry", &shared.registry)
                .finish(),
            Err(_) => f.debug_struct("SharedRegistry").finish_non_exhaustive(),
        }
    }
}

impl<K: Clone + Eq + Hash, H> SharedRegistry<K, H> {
    /// Create an empty shared registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` and return the guard that releases it.
    pub fn register(&self, id: K, meta: ItemMeta<H>) -> Registration<K, H> {
        let mut shared = self.inner.borrow_mut();
        shared.registry.register(id.clone(), meta);
        *shared.mounts.entry(id.clone()).or_insert(0) += 1;
        Registration {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Read access to the underlying registry.
    ///
    /// # Panics
    ///
    /// Panics if called while a registration is being updated.
    pub fn borrow(&self) -> Ref<'_, ItemRegistry<K, H>> {
        Ref::map(self.inner.borrow(), |s| &s.registry)
    }

    /// Snapshot of the registration order.
    pub fn order(&self) -> Vec<K> {
        self.borrow().order().to_vec()
    }

    /// Returns `true` if `id` is registered and disabled.
    pub fn is_disabled(&self, id: &K) -> bool {
        self.borrow().is_disabled(id)
    }

    /// Run the navigation cursor over every registered item.
    pub fn navigate(&self, current: Option<&K>, direction: Direction, wrap: WrapMode) -> Option<K> {
        self.borrow().navigate(current, direction, wrap).cloned()
    }
}

/// Guard for one item's entry in a [`SharedRegistry`].
///
/// Dropping the guard removes the entry, unless another live registration for
/// the same id still exists. A guard that outlives its registry is inert.
pub struct Registration<K: Clone + Eq + Hash, H = ()> {
    id: K,
    registry: Weak<RefCell<Shared<K, H>>>,
}

impl<K: Clone + Eq + Hash + fmt::Debug, H> fmt::Debug for Registration<K, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("live", &(self.registry.strong_count() > 0))
            .finish()
    }
}

impl<K: Clone + Eq + Hash, H> Registration<K, H> {
    /// The registered id.
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Update this item's disabled flag.
    pub fn set_disabled(&self, disabled: bool) {
        if let Some(inner) = self.registry.upgrade() {
            inner.borrow_mut().registry.set_disabled(&self.id, disabled);
        }
    }

    /// Update this item's focus handle.
    pub fn set_focus_handle(&self, handle: Option<H>) {
        if let Some(inner) = self.registry.upgrade() {
            inner.borrow_mut().registry.set_focus_handle(&self.id, handle);
        }
    }
}

impl<K: Clone + Eq + Hash, H> Drop for Registration<K, H> {
    fn drop(&mut self) {
        let Some(inner) = self.registry.upgrade() else {
            return;
        };
        let mut shared = inner.borrow_mut();
        let remaining = match shared.mounts.get_mut(&self.id) {
            Some(count) => {
                *count = count.saturating_sub(1);
                *count
            }
            None => 0,
        };
        if remaining == 0 {
            shared.mounts.remove(&self.id);
            shared.registry.unregister(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reregister_keeps_order_and_updates_meta() {
        let mut reg: ItemRegistry<&str> = ItemRegistry::new();
        assert!(reg.register("a", ItemMeta::enabled()));
        assert!(reg.register("b", ItemMeta::enabled()));
        assert!(!reg.register("a", ItemMeta::with_disabled(true)));
        assert_eq!(reg.order(), ["a", "b"]);
        assert!(reg.is_disabled(&"a"));
    }

    #[test]
    fn unregister_removes_from_order() {
        let mut reg: ItemRegistry<u8> = ItemRegistry::new();
        reg.register(1, ItemMeta::enabled());
        reg.register(2, ItemMeta::enabled());
        reg.register(3, ItemMeta::enabled());
        assert!(reg.unregister(&2).is_some());
        assert!(reg.unregister(&2).is_none());
        assert_eq!(reg.order(), [1, 3]);
        assert_eq!(reg.navigate(Some(&1), Direction::Next, WrapMode::Never), Some(&3));
    }

    #[test]
    fn focus_handles() {
        let mut reg: ItemRegistry<u8, &str> = ItemRegistry::new();
        reg.register(
            1,
            ItemMeta {
                disabled: false,
                focus_handle: Some("#one"),
            },
        );
        assert_eq!(reg.focus_handle(&1), Some(&"#one"));
        assert!(reg.set_focus_handle(&1, None));
        assert_eq!(reg.focus_handle(&1), None);
        assert!(!reg.set_focus_handle(&9, Some("#nine")));
    }

    #[test]
    fn registration_guard_releases_its_entry() {
        let shared: SharedRegistry<u8> = SharedRegistry::new();
        let a = shared.register(1, ItemMeta::enabled());
        let b = shared.register(2, ItemMeta::enabled());
        b.set_disabled(true);
        assert!(shared.is_disabled(&2));

        drop(a);
        assert_eq!(shared.order(), [2]);
        drop(b);
        assert!(shared.borrow().is_empty());
    }

    #[test]
    fn duplicate_registrations_are_counted() {
        let shared: SharedRegistry<u8> = SharedRegistry::new();
        let first = shared.register(1, ItemMeta::enabled());
        let second = shared.register(1, ItemMeta::with_disabled(true));
        assert_eq!(shared.order(), [1]);
        assert!(shared.is_disabled(&1));

        drop(first);
        assert_eq!(shared.order(), [1]);
        drop(second);
        assert!(shared.order().is_empty());
    }

    #[test]
    fn guard_outliving_registry_is_inert() {
        let shared: SharedRegistry<u8> = SharedRegistry::new();
        let guard = shared.register(1, ItemMeta::enabled());
        drop(shared);
        guard.set_disabled(true);
        assert_eq!(*guard.id(), 1);
        drop(guard);
    }
}
