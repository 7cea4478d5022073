//! Value store shared by every control.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

/// Unique identifier for a value store instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreId(usize);

impl StoreId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for StoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__store_{}", self.0)
    }
}

/// Who owns the source of truth for a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    /// The caller owns the value; the store only mirrors what it is given.
    Controlled,
    /// The store owns the value and notifies the caller of changes.
    Uncontrolled,
}

/// Callback invoked with every committed value.
pub type ChangeListener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// The mode is part of the slot, so a controlled value has no internal copy to
/// drift away from the caller's.
enum Slot<T> {
    Controlled(T),
    Uncontrolled(T),
}

impl<T> Slot<T> {
    fn get(&self) -> &T {
        match self {
            Slot::Controlled(value) | Slot::Uncontrolled(value) => value,
        }
    }
}

struct StoreInner<T> {
    slot: Slot<T>,
    listeners: Vec<ChangeListener<T>>,
}

/// A value that is either owned by the caller (controlled) or by the control
/// itself (uncontrolled).
///
/// The mode is fixed at construction: passing `Some(external)` to [`ValueStore::new`]
/// makes the store controlled for its whole lifetime. In controlled mode
/// [`commit`](ValueStore::commit) only notifies listeners; the caller is expected to
/// hand the new value back through [`supply`](ValueStore::supply).
///
/// Cloning a store shares the same underlying state, so a parent control can hand
/// the handle to its children.
///
/// # Example
///
/// ```
/// use switchboard::value::{ControlMode, ValueStore};
///
/// let store = ValueStore::new(None, 1usize);
/// assert_eq!(store.mode(), ControlMode::Uncontrolled);
/// store.commit(2);
/// assert_eq!(store.value(), 2);
///
/// let controlled = ValueStore::new(Some(5usize), 1);
/// controlled.commit(6);
/// assert_eq!(controlled.value(), 5);
/// ```
pub struct ValueStore<T> {
    id: StoreId,
    inner: Arc<RwLock<StoreInner<T>>>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
}

impl<T> ValueStore<T> {
    /// Create a store, controlled when `external` is supplied and seeded with
    /// `fallback` otherwise.
    pub fn new(external: Option<T>, fallback: T) -> Self {
        match external {
            Some(value) => Self::controlled(value),
            None => Self::uncontrolled(fallback),
        }
    }

    /// Create a controlled store mirroring `value`.
    pub fn controlled(value: T) -> Self {
        Self::from_slot(Slot::Controlled(value))
    }

    /// Create an uncontrolled store seeded with `value`.
    pub fn uncontrolled(value: T) -> Self {
        Self::from_slot(Slot::Uncontrolled(value))
    }

    fn from_slot(slot: Slot<T>) -> Self {
        Self {
            id: StoreId::new(),
            inner: Arc::new(RwLock::new(StoreInner {
                slot,
                listeners: Vec::new(),
            })),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the unique ID for this store
    pub fn id(&self) -> StoreId {
        self.id
    }

    /// The ownership mode decided at construction.
    pub fn mode(&self) -> ControlMode {
        match self.read().slot {
            Slot::Controlled(_) => ControlMode::Controlled,
            Slot::Uncontrolled(_) => ControlMode::Uncontrolled,
        }
    }

    pub fn is_controlled(&self) -> bool {
        self.mode() == ControlMode::Controlled
    }

    /// Borrow the current value without cloning it.
    pub fn with_value<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(self.read().slot.get())
    }

    /// Register a listener called with every committed value.
    pub fn on_change(&self, listener: impl Fn(&T) + Send + Sync + 'static) {
        self.write().listeners.push(Arc::new(listener));
    }

    /// Re-supply the caller-owned value of a controlled store.
    ///
    /// Returns false (and changes nothing) for uncontrolled stores.
    pub fn supply(&self, value: T) -> bool {
        let mut guard = self.write();
        match &mut guard.slot {
            Slot::Controlled(current) => {
                *current = value;
                self.dirty.store(true, Ordering::SeqCst);
                true
            }
            Slot::Uncontrolled(_) => {
                log::warn!("{}: external value supplied to an uncontrolled store", self.id);
                false
            }
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the stored value has been written since the last clear
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, StoreInner<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, StoreInner<T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> ValueStore<T> {
    /// Get the current value: the caller's in controlled mode, the store's own
    /// otherwise.
    pub fn value(&self) -> T {
        self.read().slot.get().clone()
    }

    /// Commit a new value.
    ///
    /// Uncontrolled stores replace their value first; controlled stores leave it
    /// untouched. Listeners are notified in both modes, after the lock is released.
    pub fn commit(&self, value: T) {
        let listeners = {
            let mut guard = self.write();
            if let Slot::Uncontrolled(current) = &mut guard.slot {
                *current = value.clone();
                self.dirty.store(true, Ordering::SeqCst);
                log::trace!("{}: committed uncontrolled value", self.id);
            } else {
                log::trace!("{}: commit forwarded to controlling caller", self.id);
            }
            guard.listeners.clone()
        };
        for listener in &listeners {
            listener(&value);
        }
    }
}

impl<T: Clone + PartialEq> ValueStore<T> {
    /// Apply a pure transition to the current value and commit the result.
    ///
    /// Nothing is committed when the transition returns the current value.
    /// Returns true if a new value was committed.
    pub fn transition(&self, f: impl FnOnce(&T) -> T) -> bool {
        let next = {
            let guard = self.read();
            let current = guard.slot.get();
            let next = f(current);
            if &next == current {
                return false;
            }
            next
        };
        self.commit(next);
        true
    }
}

impl<T> Clone for ValueStore<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: Default> Default for ValueStore<T> {
    fn default() -> Self {
        Self::uncontrolled(T::default())
    }
}

impl<T> std::fmt::Debug for ValueStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueStore")
            .field("id", &self.id)
            .field("mode", &self.mode())
            .finish_non_exhaustive()
    }
}
