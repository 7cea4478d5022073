//! Dropdown menu state.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::ControlError;
use crate::lifecycle::Lifecycle;
use crate::registry::{ItemRegistry, RegisteredItem};

use super::key::{EventResult, NavKey};
use super::roving::RovingFocus;

/// Unique identifier for a Menu instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuId(usize);

impl MenuId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for MenuId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__menu_{}", self.0)
    }
}

/// Callback run when a menu item is activated.
pub type MenuAction = Arc<dyn Fn() + Send + Sync>;

/// A dropdown menu with roving keyboard focus.
///
/// Items are attached in display order. While the menu is open, arrow keys move
/// the active index with wrap-around, Enter/Space runs the active item's action and
/// closes the menu, Escape closes it without running anything. Disabled items keep
/// their slot in the index arithmetic but cannot be activated.
///
/// Cloning shares state, so item handles can hold the same `Menu` as the trigger.
///
/// # Example
///
/// ```
/// use switchboard::nav::{Menu, NavKey};
///
/// let menu = Menu::new();
/// menu.attach("copy", || println!("copy")).unwrap();
/// menu.attach("paste", || println!("paste")).unwrap();
///
/// menu.open().unwrap();
/// menu.on_key(NavKey::ArrowDown).unwrap();
/// assert_eq!(menu.active_index().unwrap(), Some(0));
/// menu.on_key(NavKey::Enter).unwrap();
/// assert!(!menu.is_open());
/// ```
pub struct Menu<K> {
    id: MenuId,
    items: ItemRegistry<K>,
    actions: Arc<RwLock<HashMap<K, MenuAction>>>,
    focus: Arc<RwLock<RovingFocus>>,
    lifecycle: Lifecycle,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
}

impl<K: Clone + Eq + Hash> Menu<K> {
    pub fn new() -> Self {
        Self {
            id: MenuId::new(),
            items: ItemRegistry::new(),
            actions: Arc::new(RwLock::new(HashMap::new())),
            focus: Arc::new(RwLock::new(RovingFocus::new())),
            lifecycle: Lifecycle::new("Menu"),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the unique ID for this menu
    pub fn id(&self) -> MenuId {
        self.id
    }

    /// The registry holding the menu's items in display order.
    pub fn items(&self) -> &ItemRegistry<K> {
        &self.items
    }

    // -------------------------------------------------------------------------
    // Item registration
    // -------------------------------------------------------------------------

    /// Attach an enabled item with an action.
    pub fn attach(
        &self,
        id: K,
        action: impl Fn() + Send + Sync + 'static,
    ) -> Result<(), ControlError> {
        self.attach_item(id, false, Some(Arc::new(action)))
    }

    /// Attach a disabled item. It occupies a navigation slot but never activates.
    pub fn attach_disabled(&self, id: K) -> Result<(), ControlError> {
        self.attach_item(id, true, None)
    }

    /// Attach an item with an optional action.
    pub fn attach_item(
        &self,
        id: K,
        disabled: bool,
        action: Option<MenuAction>,
    ) -> Result<(), ControlError> {
        self.lifecycle.ensure_mounted()?;
        {
            let mut actions = self.actions.write().unwrap_or_else(PoisonError::into_inner);
            match action {
                Some(action) => {
                    actions.insert(id.clone(), action);
                }
                None => {
                    actions.remove(&id);
                }
            }
        }
        self.items.attach_with(id, disabled);
        self.mark_dirty();
        Ok(())
    }

    /// Detach an item.
    pub fn detach(&self, id: &K) -> Result<bool, ControlError> {
        self.lifecycle.ensure_mounted()?;
        self.actions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        let removed = self.items.detach(id);
        if removed {
            self.mark_dirty();
        }
        Ok(removed)
    }

    /// Enable or disable an attached item.
    pub fn set_disabled(&self, id: &K, disabled: bool) -> Result<bool, ControlError> {
        self.lifecycle.ensure_mounted()?;
        Ok(self.items.set_disabled(id, disabled))
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Whether the menu is open. Always false once unmounted.
    pub fn is_open(&self) -> bool {
        self.lifecycle.is_mounted() && self.read_focus().is_expanded()
    }

    /// Index of the active item, `None` when nothing is active.
    pub fn active_index(&self) -> Result<Option<usize>, ControlError> {
        self.lifecycle.ensure_mounted()?;
        Ok(self.read_focus().active())
    }

    /// The active item, if the index points at one.
    pub fn active_item(&self) -> Result<Option<RegisteredItem<K>>, ControlError> {
        let index = self.active_index()?;
        Ok(index.and_then(|i| self.items.get(i)))
    }

    // -------------------------------------------------------------------------
    // Trigger
    // -------------------------------------------------------------------------

    /// Trigger click: flip open/closed. The active index always starts over.
    pub fn toggle(&self) -> Result<(), ControlError> {
        self.lifecycle.ensure_mounted()?;
        self.write_focus().toggle();
        self.mark_dirty();
        Ok(())
    }

    pub fn open(&self) -> Result<(), ControlError> {
        self.lifecycle.ensure_mounted()?;
        self.write_focus().open();
        self.mark_dirty();
        Ok(())
    }

    pub fn close(&self) -> Result<(), ControlError> {
        self.lifecycle.ensure_mounted()?;
        self.collapse();
        Ok(())
    }

    /// Pointer press outside the menu.
    pub fn dismiss(&self) -> Result<(), ControlError> {
        self.close()
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Handle a navigation key. Keys are ignored while the menu is closed.
    pub fn on_key(&self, key: NavKey) -> Result<EventResult, ControlError> {
        self.lifecycle.ensure_mounted()?;
        if !self.read_focus().is_expanded() {
            return Ok(EventResult::Ignored);
        }

        match key {
            NavKey::ArrowDown | NavKey::ArrowUp => {
                let moved = {
                    let mut focus = self.write_focus();
                    let len = self.items.len();
                    if key == NavKey::ArrowDown {
                        focus.move_next(len)
                    } else {
                        focus.move_previous(len)
                    }
                };
                if moved {
                    self.mark_dirty();
                }
                log::trace!("{}: {:?} -> {:?}", self.id, key, self.read_focus().active());
                Ok(EventResult::Consumed)
            }
            NavKey::Enter | NavKey::Space => {
                let target = {
                    let focus = self.read_focus();
                    let active = focus.active();
                    self.items
                        .with_items(|items| active.and_then(|i| items.get(i).cloned()))
                };
                match target {
                    Some(item) if item.disabled => {
                        log::debug!("{}: activation of disabled item ignored", self.id);
                        Ok(EventResult::Ignored)
                    }
                    Some(item) => {
                        self.run_action(&item.id);
                        self.collapse();
                        Ok(EventResult::Consumed)
                    }
                    None => {
                        self.collapse();
                        Ok(EventResult::Consumed)
                    }
                }
            }
            NavKey::Escape => {
                self.collapse();
                Ok(EventResult::Consumed)
            }
        }
    }

    /// Pointer hover over the item at `index`.
    pub fn hover(&self, index: usize) -> Result<(), ControlError> {
        self.lifecycle.ensure_mounted()?;
        let len = self.items.len();
        if self.write_focus().set_active(index, len) {
            self.mark_dirty();
        }
        Ok(())
    }

    /// Pointer click on an item: run its action and close. Disabled or unknown
    /// items are ignored.
    pub fn select(&self, id: &K) -> Result<EventResult, ControlError> {
        self.lifecycle.ensure_mounted()?;
        if !self.items.contains(id) || self.items.is_disabled(id) {
            return Ok(EventResult::Ignored);
        }
        self.run_action(id);
        self.collapse();
        Ok(EventResult::Consumed)
    }

    /// Tear down the menu. Every later operation fails with
    /// [`ControlError::Unmounted`].
    pub fn unmount(&self) {
        if self.lifecycle.unmount() {
            self.write_focus().collapse();
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the menu state has changed
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

    fn collapse(&self) {
        self.write_focus().collapse();
        self.mark_dirty();
    }

    /// Actions run with no lock held so they may call back into the menu.
    fn run_action(&self, id: &K) {
        let action = self
            .actions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned();
        if let Some(action) = action {
            log::debug!("{}: activating item", self.id);
            action();
        }
    }

    fn read_focus(&self) -> std::sync::RwLockReadGuard<'_, RovingFocus> {
        self.focus.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_focus(&self) -> std::sync::RwLockWriteGuard<'_, RovingFocus> {
        self.focus.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K> Clone for Menu<K> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            items: self.items.clone(),
            actions: Arc::clone(&self.actions),
            focus: Arc::clone(&self.focus),
            lifecycle: self.lifecycle.clone(),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<K: Clone + Eq + Hash> Default for Menu<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> std::fmt::Debug for Menu<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Menu")
            .field("id", &self.id)
            .field("focus", &*self.focus.read().unwrap_or_else(PoisonError::into_inner))
            .finish_non_exhaustive()
    }
}
