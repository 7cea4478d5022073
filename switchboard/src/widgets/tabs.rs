//! Tab set state.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::registry::ItemRegistry;
use crate::selection::toggle_single;
use crate::value::ValueStore;

/// Unique identifier for a TabSet instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabSetId(usize);

impl TabSetId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TabSetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__tabs_{}", self.0)
    }
}

/// A set of tabs with exactly one selected once any tab is attached.
///
/// Selection is never collapsible: re-selecting the current tab keeps it.
/// While nothing is selected, attaching a tab selects the first enabled tab in
/// registration order.
#[derive(Debug)]
pub struct TabSet<K> {
    id: TabSetId,
    tabs: ItemRegistry<K>,
    selected: ValueStore<Option<K>>,
}

impl<K: Clone + PartialEq> TabSet<K> {
    /// Uncontrolled, nothing selected yet.
    pub fn new() -> Self {
        Self::build(ValueStore::uncontrolled(None))
    }

    /// Uncontrolled, starting on `id`.
    pub fn with_default(id: K) -> Self {
        Self::build(ValueStore::uncontrolled(Some(id)))
    }

    /// Controlled by the caller, currently on `selected`.
    pub fn controlled(selected: Option<K>) -> Self {
        Self::build(ValueStore::controlled(selected))
    }

    fn build(selected: ValueStore<Option<K>>) -> Self {
        Self {
            id: TabSetId::new(),
            tabs: ItemRegistry::new(),
            selected,
        }
    }

    /// Get the unique ID for this tab set
    pub fn id(&self) -> TabSetId {
        self.id
    }

    /// Registered tabs.
    pub fn tabs(&self) -> &ItemRegistry<K> {
        &self.tabs
    }

    /// The store holding the selected tab.
    pub fn store(&self) -> &ValueStore<Option<K>> {
        &self.selected
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    pub fn selected(&self) -> Option<K> {
        self.selected.value()
    }

    pub fn is_selected(&self, id: &K) -> bool {
        self.selected.with_value(|selected| selected.as_ref() == Some(id))
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    pub fn attach(&self, id: K) {
        self.tabs.attach(id);
        self.select_default();
    }

    pub fn attach_disabled(&self, id: K) {
        self.tabs.attach_disabled(id);
        self.select_default();
    }

    /// Remove a tab. The selection is left alone, even if it pointed at `id`.
    pub fn detach(&self, id: &K) -> bool {
        self.tabs.detach(id)
    }

    pub fn set_disabled(&self, id: &K, disabled: bool) -> bool {
        self.tabs.set_disabled(id, disabled)
    }

    /// Select a tab. Returns true if a new value was committed.
    pub fn select(&self, id: &K) -> bool {
        if self.tabs.is_disabled(id) {
            log::debug!("{}: selection of disabled tab ignored", self.id);
            return false;
        }
        self.selected
            .transition(|current| toggle_single(current.as_ref(), id, false))
    }

    /// Hand back the caller-owned value of a controlled tab set.
    pub fn supply(&self, selected: Option<K>) -> bool {
        self.selected.supply(selected)
    }

    pub fn on_change(&self, listener: impl Fn(&Option<K>) + Send + Sync + 'static) {
        self.selected.on_change(listener);
    }

    fn select_default(&self) {
        if self.selected.with_value(Option::is_some) {
            return;
        }
        if let Some(first) = self.tabs.first_enabled() {
            log::debug!("{}: selecting first tab by default", self.id);
            self.selected.commit(Some(first));
        }
    }
}

impl<K> Clone for TabSet<K> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            tabs: self.tabs.clone(),
            selected: self.selected.clone(),
        }
    }
}

impl<K: Clone + PartialEq> Default for TabSet<K> {
    fn default() -> Self {
        Self::new()
    }
}
