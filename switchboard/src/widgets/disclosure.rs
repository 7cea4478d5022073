//! Disclosure (accordion) state.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::selection::{Expanded, SelectionMode};
use crate::value::ValueStore;

/// Unique identifier for a Disclosure instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisclosureId(usize);

impl DisclosureId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for DisclosureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__disclosure_{}", self.0)
    }
}

/// Disclosure configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisclosureConfig {
    pub mode: SelectionMode,
}

impl DisclosureConfig {
    /// One panel open at a time; `collapsible` allows closing it again.
    pub fn single(collapsible: bool) -> Self {
        Self {
            mode: SelectionMode::Single { collapsible },
        }
    }

    /// Any number of panels open.
    pub fn multiple() -> Self {
        Self {
            mode: SelectionMode::Multiple,
        }
    }
}

/// A group of panels that open and close by id.
///
/// Panels are addressed by caller-chosen ids; nothing has to be registered up
/// front. Disabled panels reject activation without touching state.
///
/// # Example
///
/// ```
/// use switchboard::widgets::{Disclosure, DisclosureConfig};
///
/// let faq = Disclosure::new(DisclosureConfig::single(true));
/// faq.activate(&"shipping");
/// assert!(faq.is_expanded(&"shipping"));
/// faq.activate(&"returns");
/// assert!(!faq.is_expanded(&"shipping"));
/// ```
#[derive(Debug)]
pub struct Disclosure<K: Eq + Hash> {
    id: DisclosureId,
    config: DisclosureConfig,
    value: ValueStore<Expanded<K>>,
    disabled: Arc<RwLock<HashSet<K>>>,
}

impl<K: Clone + Eq + Hash> Disclosure<K> {
    /// Uncontrolled, nothing open.
    pub fn new(config: DisclosureConfig) -> Self {
        Self::build(config, ValueStore::uncontrolled(Expanded::empty(config.mode)))
    }

    /// Uncontrolled, starting with `ids` open. In single mode only the first id
    /// is used.
    pub fn with_default(config: DisclosureConfig, ids: impl IntoIterator<Item = K>) -> Self {
        let value = expanded_from(config.mode, ids);
        Self::build(config, ValueStore::uncontrolled(value))
    }

    /// Controlled by the caller, currently showing `ids` open.
    pub fn controlled(config: DisclosureConfig, ids: impl IntoIterator<Item = K>) -> Self {
        let value = expanded_from(config.mode, ids);
        Self::build(config, ValueStore::controlled(value))
    }

    fn build(config: DisclosureConfig, value: ValueStore<Expanded<K>>) -> Self {
        Self {
            id: DisclosureId::new(),
            config,
            value,
            disabled: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Get the unique ID for this disclosure
    pub fn id(&self) -> DisclosureId {
        self.id
    }

    pub fn mode(&self) -> SelectionMode {
        self.config.mode
    }

    /// The store holding the open panels.
    pub fn store(&self) -> &ValueStore<Expanded<K>> {
        &self.value
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// The open panels.
    pub fn value(&self) -> Expanded<K> {
        self.value.value()
    }

    pub fn is_expanded(&self, id: &K) -> bool {
        self.value.with_value(|value| value.contains(id))
    }

    pub fn is_disabled(&self, id: &K) -> bool {
        self.disabled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(id)
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Activate a panel's trigger. Returns true if a new value was committed.
    pub fn activate(&self, id: &K) -> bool {
        if self.is_disabled(id) {
            log::debug!("{}: activation of disabled panel ignored", self.id);
            return false;
        }
        let mode = self.config.mode;
        self.value.transition(|value| value.activate(id, mode))
    }

    /// Hand back the caller-owned value of a controlled disclosure.
    pub fn supply(&self, ids: impl IntoIterator<Item = K>) -> bool {
        self.value.supply(expanded_from(self.config.mode, ids))
    }

    pub fn set_disabled(&self, id: K, disabled: bool) {
        let mut guard = self.disabled.write().unwrap_or_else(PoisonError::into_inner);
        if disabled {
            guard.insert(id);
        } else {
            guard.remove(&id);
        }
    }

    /// Listen for committed values.
    pub fn on_change(&self, listener: impl Fn(&Expanded<K>) + Send + Sync + 'static) {
        self.value.on_change(listener);
    }
}

impl<K: Eq + Hash> Clone for Disclosure<K> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            config: self.config,
            value: self.value.clone(),
            disabled: Arc::clone(&self.disabled),
        }
    }
}

fn expanded_from<K: Clone + Eq + Hash>(
    mode: SelectionMode,
    ids: impl IntoIterator<Item = K>,
) -> Expanded<K> {
    match mode {
        SelectionMode::Single { .. } => Expanded::Single(ids.into_iter().next()),
        SelectionMode::Multiple => Expanded::Multiple(ids.into_iter().collect()),
    }
}
