//! Checkbox and switch state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::value::ValueStore;

/// Unique identifier for a Toggle instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToggleId(usize);

impl ToggleId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ToggleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__toggle_{}", self.0)
    }
}

/// A boolean control: checkbox or switch.
///
/// `indeterminate` is display-only (a "mixed" checkbox); the next toggle clears it.
#[derive(Debug)]
pub struct Toggle {
    id: ToggleId,
    checked: ValueStore<bool>,
    disabled: Arc<AtomicBool>,
    indeterminate: Arc<AtomicBool>,
}

impl Toggle {
    /// Uncontrolled, starting at `checked`.
    pub fn new(checked: bool) -> Self {
        Self::build(ValueStore::uncontrolled(checked))
    }

    /// Controlled by the caller, currently `checked`.
    pub fn controlled(checked: bool) -> Self {
        Self::build(ValueStore::controlled(checked))
    }

    fn build(checked: ValueStore<bool>) -> Self {
        Self {
            id: ToggleId::new(),
            checked,
            disabled: Arc::new(AtomicBool::new(false)),
            indeterminate: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the unique ID for this toggle
    pub fn id(&self) -> ToggleId {
        self.id
    }

    pub fn store(&self) -> &ValueStore<bool> {
        &self.checked
    }

    pub fn is_checked(&self) -> bool {
        self.checked.value()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    pub fn is_indeterminate(&self) -> bool {
        self.indeterminate.load(Ordering::SeqCst)
    }

    /// Flip the value. Returns false when disabled.
    pub fn toggle(&self) -> bool {
        if self.is_disabled() {
            return false;
        }
        self.indeterminate.store(false, Ordering::SeqCst);
        self.checked.transition(|checked| !checked)
    }

    /// Set the value as if the user had clicked until it matched.
    pub fn set_checked(&self, checked: bool) -> bool {
        if self.is_disabled() {
            return false;
        }
        self.indeterminate.store(false, Ordering::SeqCst);
        self.checked.transition(|_| checked)
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    pub fn set_indeterminate(&self, indeterminate: bool) {
        self.indeterminate.store(indeterminate, Ordering::SeqCst);
    }

    /// Hand back the caller-owned value of a controlled toggle.
    pub fn supply(&self, checked: bool) -> bool {
        self.checked.supply(checked)
    }

    pub fn on_change(&self, listener: impl Fn(&bool) + Send + Sync + 'static) {
        self.checked.on_change(listener);
    }
}

impl Clone for Toggle {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            checked: self.checked.clone(),
            disabled: Arc::clone(&self.disabled),
            indeterminate: Arc::clone(&self.indeterminate),
        }
    }
}

impl Default for Toggle {
    fn default() -> Self {
        Self::new(false)
    }
}
