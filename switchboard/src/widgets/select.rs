//! Dropdown select state.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::nav::{EventResult, NavKey, RovingFocus};
use crate::registry::ItemRegistry;
use crate::value::ValueStore;

/// Unique identifier for a Select instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectId(usize);

impl SelectId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for SelectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__select_{}", self.0)
    }
}

/// A dropdown choosing one value out of a list of options.
///
/// Options are attached in display order. The highlight indexes the enabled
/// options only, so disabled ones are skipped by the arrow keys. Unlike
/// [`Menu`](crate::nav::Menu), movement stops at either end instead of wrapping.
///
/// Keys, when the select is enabled:
/// - Enter/Space while closed opens; while open it commits the highlighted
///   option, if any, and closes.
/// - ArrowDown/ArrowUp while closed opens; while open they move the highlight.
/// - Escape closes.
///
/// # Example
///
/// ```
/// use switchboard::nav::NavKey;
/// use switchboard::widgets::Select;
///
/// let select = Select::new();
/// select.attach("low");
/// select.attach("high");
///
/// select.on_key(NavKey::ArrowDown);
/// select.on_key(NavKey::ArrowDown);
/// select.on_key(NavKey::Enter);
/// assert_eq!(select.selected(), Some("low"));
/// ```
#[derive(Debug)]
pub struct Select<K> {
    id: SelectId,
    options: ItemRegistry<K>,
    selected: ValueStore<Option<K>>,
    focus: Arc<RwLock<RovingFocus>>,
    disabled: Arc<AtomicBool>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
}

impl<K: Clone + PartialEq> Select<K> {
    /// Uncontrolled, nothing chosen.
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
            id: SelectId::new(),
            options: ItemRegistry::new(),
            selected,
            focus: Arc::new(RwLock::new(RovingFocus::new())),
            disabled: Arc::new(AtomicBool::new(false)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the unique ID for this select
    pub fn id(&self) -> SelectId {
        self.id
    }

    pub fn options(&self) -> &ItemRegistry<K> {
        &self.options
    }

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

    pub fn is_open(&self) -> bool {
        self.read_focus().is_expanded()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    /// Highlight position among the enabled options.
    pub fn highlighted_index(&self) -> Option<usize> {
        self.read_focus().active()
    }

    /// The highlighted option, if the index still points at an enabled one.
    pub fn highlighted(&self) -> Option<K> {
        let index = self.highlighted_index()?;
        self.enabled_options().into_iter().nth(index)
    }

    // -------------------------------------------------------------------------
    // Options
    // -------------------------------------------------------------------------

    pub fn attach(&self, id: K) {
        self.options.attach(id);
        self.mark_dirty();
    }

    pub fn attach_disabled(&self, id: K) {
        self.options.attach_disabled(id);
        self.mark_dirty();
    }

    /// Remove an option. A chosen value is kept even if it pointed at `id`.
    pub fn detach(&self, id: &K) -> bool {
        let removed = self.options.detach(id);
        if removed {
            self.mark_dirty();
        }
        removed
    }

    pub fn set_option_disabled(&self, id: &K, disabled: bool) -> bool {
        self.options.set_disabled(id, disabled)
    }

    /// Disable the whole control. Closes it when open.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
        if disabled {
            self.close();
        }
    }

    // -------------------------------------------------------------------------
    // Open/close
    // -------------------------------------------------------------------------

    /// Open the dropdown, highlighting the chosen option when it is enabled.
    pub fn open(&self) -> bool {
        if self.is_disabled() || self.is_open() {
            return false;
        }
        let enabled = self.enabled_options();
        let current = self.selected.with_value(|selected| {
            selected
                .as_ref()
                .and_then(|id| enabled.iter().position(|option| option == id))
        });
        {
            let mut focus = self.write_focus();
            focus.open();
            if let Some(index) = current {
                focus.set_active(index, enabled.len());
            }
        }
        self.mark_dirty();
        true
    }

    pub fn close(&self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.write_focus().collapse();
        self.mark_dirty();
        true
    }

    /// Trigger click.
    pub fn toggle(&self) -> bool {
        if self.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Handle a key while the trigger has focus.
    pub fn on_key(&self, key: NavKey) -> EventResult {
        if self.is_disabled() {
            return EventResult::Ignored;
        }

        match key {
            NavKey::Enter | NavKey::Space => {
                if !self.is_open() {
                    self.open();
                    return EventResult::Consumed;
                }
                if let Some(id) = self.highlighted() {
                    self.commit(id);
                }
                self.close();
                EventResult::Consumed
            }
            NavKey::ArrowDown | NavKey::ArrowUp => {
                if !self.is_open() {
                    self.open();
                    return EventResult::Consumed;
                }
                let len = self.enabled_options().len();
                let moved = {
                    let mut focus = self.write_focus();
                    if key == NavKey::ArrowDown {
                        focus.move_next_clamped(len)
                    } else {
                        focus.move_previous_clamped(len)
                    }
                };
                if moved {
                    self.mark_dirty();
                }
                log::trace!("{}: {:?} -> {:?}", self.id, key, self.highlighted_index());
                EventResult::Consumed
            }
            NavKey::Escape => {
                if self.close() {
                    EventResult::Consumed
                } else {
                    EventResult::Ignored
                }
            }
        }
    }

    /// Pointer click on an option: choose it and close. Disabled or unknown
    /// options are ignored.
    pub fn choose(&self, id: &K) -> EventResult {
        if self.is_disabled() || !self.options.contains(id) || self.options.is_disabled(id) {
            log::debug!("{}: choice ignored", self.id);
            return EventResult::Ignored;
        }
        self.commit(id.clone());
        self.close();
        EventResult::Consumed
    }

    /// Hand back the caller-owned value of a controlled select.
    pub fn supply(&self, selected: Option<K>) -> bool {
        self.selected.supply(selected)
    }

    pub fn on_change(&self, listener: impl Fn(&Option<K>) + Send + Sync + 'static) {
        self.selected.on_change(listener);
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the open state or highlight has changed
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    fn commit(&self, id: K) {
        if self.selected.transition(|_| Some(id)) {
            log::debug!("{}: option chosen", self.id);
        }
    }

    fn enabled_options(&self) -> Vec<K> {
        self.options.with_items(|items| {
            items
                .iter()
                .filter(|item| !item.disabled)
                .map(|item| item.id.clone())
                .collect()
        })
    }

    fn read_focus(&self) -> RwLockReadGuard<'_, RovingFocus> {
        self.focus.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_focus(&self) -> RwLockWriteGuard<'_, RovingFocus> {
        self.focus.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K> Clone for Select<K> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            options: self.options.clone(),
            selected: self.selected.clone(),
            focus: Arc::clone(&self.focus),
            disabled: Arc::clone(&self.disabled),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<K: Clone + PartialEq> Default for Select<K> {
    fn default() -> Self {
        Self::new()
    }
}
