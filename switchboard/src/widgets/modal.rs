//! Modal dialog state.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use crate::nav::{EventResult, NavKey, next_index, previous_index};
use crate::value::ValueStore;

/// Unique identifier for a Modal instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModalId(usize);

impl ModalId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ModalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__modal_{}", self.0)
    }
}

/// Modal configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    pub close_on_escape: bool,
    pub close_on_overlay_click: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            close_on_escape: true,
            close_on_overlay_click: true,
        }
    }
}

impl ModalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close_on_escape(mut self, enabled: bool) -> Self {
        self.close_on_escape = enabled;
        self
    }

    pub fn close_on_overlay_click(mut self, enabled: bool) -> Self {
        self.close_on_overlay_click = enabled;
        self
    }
}

/// Open/closed state of a modal dialog plus its focus trap.
#[derive(Debug)]
pub struct Modal {
    id: ModalId,
    config: ModalConfig,
    open: ValueStore<bool>,
}

impl Modal {
    /// Uncontrolled, closed.
    pub fn new(config: ModalConfig) -> Self {
        Self::build(config, ValueStore::uncontrolled(false))
    }

    /// Controlled by the caller, currently `open`.
    pub fn controlled(config: ModalConfig, open: bool) -> Self {
        Self::build(config, ValueStore::controlled(open))
    }

    fn build(config: ModalConfig, open: ValueStore<bool>) -> Self {
        Self {
            id: ModalId::new(),
            config,
            open,
        }
    }

    /// Get the unique ID for this modal
    pub fn id(&self) -> ModalId {
        self.id
    }

    pub fn config(&self) -> ModalConfig {
        self.config
    }

    pub fn store(&self) -> &ValueStore<bool> {
        &self.open
    }

    pub fn is_open(&self) -> bool {
        self.open.value()
    }

    pub fn open(&self) -> bool {
        self.open.transition(|_| true)
    }

    pub fn close(&self) -> bool {
        let closed = self.open.transition(|_| false);
        if closed {
            log::debug!("{} closed", self.id);
        }
        closed
    }

    /// Handle a key while the modal is on screen.
    pub fn on_key(&self, key: NavKey) -> EventResult {
        if key == NavKey::Escape && self.config.close_on_escape && self.is_open() {
            self.close();
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }

    /// Handle a click on the backdrop.
    pub fn overlay_click(&self) -> EventResult {
        if self.config.close_on_overlay_click && self.is_open() {
            self.close();
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }

    /// Hand back the caller-owned value of a controlled modal.
    pub fn supply(&self, open: bool) -> bool {
        self.open.supply(open)
    }

    pub fn on_open_change(&self, listener: impl Fn(&bool) + Send + Sync + 'static) {
        self.open.on_change(listener);
    }

    /// Next focus target for Tab (or Shift+Tab when `backwards`) among `count`
    /// focusable elements inside the dialog.
    ///
    /// Focus wraps at both ends so it never leaves the dialog. Returns `None`
    /// when the dialog has nothing focusable.
    pub fn trap_focus(current: Option<usize>, count: usize, backwards: bool) -> Option<usize> {
        if backwards {
            previous_index(current, count)
        } else {
            next_index(current, count)
        }
    }
}

impl Clone for Modal {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            config: self.config,
            open: self.open.clone(),
        }
    }
}
