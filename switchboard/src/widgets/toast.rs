//! Toast notification queue with timed auto-dismiss.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ControlError;
use crate::lifecycle::Lifecycle;
use crate::timer::{self, PendingTimer};
use crate::value::ValueStore;

/// Unique identifier for a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(usize);

impl ToastId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ToastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__toast_{}", self.0)
    }
}

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub title: Option<String>,
    pub message: String,
    pub level: ToastLevel,
    /// Time on screen; `None` uses the toaster default and `Duration::ZERO`
    /// keeps the toast until dismissed.
    pub duration: Option<Duration>,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: ToastId::new(),
            title: None,
            message: message.into(),
            level: ToastLevel::default(),
            duration: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn level(mut self, level: ToastLevel) -> Self {
        self.level = level;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Stay on screen until dismissed.
    pub fn sticky(self) -> Self {
        self.duration(Duration::ZERO)
    }
}

/// Toaster configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    #[serde(with = "crate::timer::serde_millis")]
    pub default_duration: Duration,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            default_duration: Duration::from_millis(5000),
        }
    }
}

impl ToastConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }
}

#[derive(Debug, Default)]
struct ExpiryTimers {
    pending: HashMap<ToastId, PendingTimer>,
    next_seq: u64,
}

struct Shared {
    config: ToastConfig,
    toasts: ValueStore<Vec<Toast>>,
    timers: RwLock<ExpiryTimers>,
    lifecycle: Lifecycle,
}

/// Ordered queue of on-screen toasts.
///
/// Each pushed toast gets its own expiry timer on the current Tokio runtime.
/// Unmounting cancels every pending expiry.
pub struct Toaster {
    shared: Arc<Shared>,
}

impl Toaster {
    pub fn new(config: ToastConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                toasts: ValueStore::uncontrolled(Vec::new()),
                timers: RwLock::new(ExpiryTimers::default()),
                lifecycle: Lifecycle::new("Toaster"),
            }),
        }
    }

    pub fn config(&self) -> ToastConfig {
        self.shared.config
    }

    /// Toasts in the order they were pushed.
    pub fn toasts(&self) -> Vec<Toast> {
        self.shared.toasts.value()
    }

    pub fn len(&self) -> usize {
        self.shared.toasts.with_value(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn on_change(&self, listener: impl Fn(&Vec<Toast>) + Send + Sync + 'static) {
        self.shared.toasts.on_change(listener);
    }

    /// Show a toast and schedule its dismissal.
    ///
    /// Pushing a toast whose id is already on screen replaces it and restarts
    /// its timer.
    pub fn push(&self, toast: Toast) -> Result<ToastId, ControlError> {
        self.shared.lifecycle.ensure_mounted()?;
        let id = toast.id;
        let duration = toast.duration.unwrap_or(self.shared.config.default_duration);

        {
            let mut timers = self.write_timers();
            let pending = if duration.is_zero() {
                None
            } else {
                let seq = timers.next_seq;
                timers.next_seq += 1;
                let weak = Arc::downgrade(&self.shared);
                Some(timer::schedule(&self.shared.lifecycle, duration, seq, move || {
                    if let Some(shared) = weak.upgrade() {
                        Toaster { shared }.expire(id, seq);
                    }
                })?)
            };
            let previous = match pending {
                Some(pending) => timers.pending.insert(id, pending),
                None => timers.pending.remove(&id),
            };
            if let Some(previous) = previous {
                previous.cancel();
            }
        }

        self.shared.toasts.transition(|toasts| {
            let mut next: Vec<Toast> = toasts.iter().filter(|t| t.id != id).cloned().collect();
            next.push(toast);
            next
        });
        log::debug!("{id} pushed, expires in {duration:?}");
        Ok(id)
    }

    /// Remove a toast before it expires. Returns false if it was not on screen.
    pub fn dismiss(&self, id: ToastId) -> Result<bool, ControlError> {
        self.shared.lifecycle.ensure_mounted()?;
        if let Some(pending) = self.write_timers().pending.remove(&id) {
            pending.cancel();
        }
        Ok(self.remove(id))
    }

    /// Remove every toast.
    pub fn clear(&self) -> Result<(), ControlError> {
        self.shared.lifecycle.ensure_mounted()?;
        self.cancel_all();
        self.shared.toasts.transition(|_| Vec::new());
        Ok(())
    }

    /// Tear down, cancelling every expiry timer.
    pub fn unmount(&self) {
        if self.shared.lifecycle.unmount() {
            self.cancel_all();
        }
    }

    fn expire(&self, id: ToastId, seq: u64) {
        if !self.shared.lifecycle.is_mounted() {
            return;
        }
        {
            let mut timers = self.write_timers();
            let current = timers.pending.get(&id).map(PendingTimer::seq);
            if current != Some(seq) {
                return;
            }
            timers.pending.remove(&id);
        }
        log::debug!("{id} expired");
        self.remove(id);
    }

    fn remove(&self, id: ToastId) -> bool {
        self.shared
            .toasts
            .transition(|toasts| toasts.iter().filter(|t| t.id != id).cloned().collect())
    }

    fn cancel_all(&self) {
        let pending: Vec<PendingTimer> = self.write_timers().pending.drain().map(|(_, t)| t).collect();
        for timer in pending {
            timer.cancel();
        }
    }

    fn write_timers(&self) -> RwLockWriteGuard<'_, ExpiryTimers> {
        self.shared.timers.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clone for Toaster {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new(ToastConfig::default())
    }
}

impl std::fmt::Debug for Toaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toaster")
            .field("config", &self.shared.config)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
