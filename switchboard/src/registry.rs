//! Ordered registry of child item ids.
//!
//! Parents own the registry; children call [`ItemRegistry::attach`] when they are
//! set up and [`ItemRegistry::detach`] when they are torn down. Insertion order
//! drives default selection and keyboard navigation.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A registered child item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredItem<K> {
    pub id: K,
    pub disabled: bool,
}

/// Shared, ordered list of item ids.
///
/// Every mutation happens under one write lock, so a reader sees the list either
/// before or after an attach/detach, never halfway.
#[derive(Debug)]
pub struct ItemRegistry<K> {
    items: Arc<RwLock<Vec<RegisteredItem<K>>>>,
}

impl<K> ItemRegistry<K> {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Number of registered items, disabled ones included.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Run `f` against a consistent snapshot of the list.
    pub fn with_items<R>(&self, f: impl FnOnce(&[RegisteredItem<K>]) -> R) -> R {
        f(&self.read())
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<RegisteredItem<K>>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<RegisteredItem<K>>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K: Clone + PartialEq> ItemRegistry<K> {
    /// Register an enabled item at the end of the list.
    pub fn attach(&self, id: K) {
        self.attach_with(id, false);
    }

    /// Register a disabled item at the end of the list.
    pub fn attach_disabled(&self, id: K) {
        self.attach_with(id, true);
    }

    /// Register an item. An id that is already registered keeps its slot and
    /// only has its disabled flag updated.
    pub fn attach_with(&self, id: K, disabled: bool) {
        let mut items = self.write();
        match items.iter_mut().find(|item| item.id == id) {
            Some(existing) => existing.disabled = disabled,
            None => items.push(RegisteredItem { id, disabled }),
        }
    }

    /// Remove an item. Returns true if it was registered.
    pub fn detach(&self, id: &K) -> bool {
        let mut items = self.write();
        let before = items.len();
        items.retain(|item| &item.id != id);
        items.len() != before
    }

    /// Change the disabled flag of a registered item.
    pub fn set_disabled(&self, id: &K, disabled: bool) -> bool {
        let mut items = self.write();
        match items.iter_mut().find(|item| &item.id == id) {
            Some(item) => {
                item.disabled = disabled;
                true
            }
            None => false,
        }
    }

    /// Check if an item is registered.
    pub fn contains(&self, id: &K) -> bool {
        self.read().iter().any(|item| &item.id == id)
    }

    /// Check if an item is registered and disabled.
    pub fn is_disabled(&self, id: &K) -> bool {
        self.read().iter().any(|item| &item.id == id && item.disabled)
    }

    /// Get the item at `index`.
    pub fn get(&self, index: usize) -> Option<RegisteredItem<K>> {
        self.read().get(index).cloned()
    }

    /// Index of `id` in registration order.
    pub fn position(&self, id: &K) -> Option<usize> {
        self.read().iter().position(|item| &item.id == id)
    }

    /// First registered item that is not disabled.
    pub fn first_enabled(&self) -> Option<K> {
        self.read()
            .iter()
            .find(|item| !item.disabled)
            .map(|item| item.id.clone())
    }

    /// All ids in registration order.
    pub fn ids(&self) -> Vec<K> {
        self.read().iter().map(|item| item.id.clone()).collect()
    }
}

impl<K> Clone for ItemRegistry<K> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<K> Default for ItemRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}
