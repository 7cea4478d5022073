//! Tooltip visibility, debouncing and placement.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ControlError;
use crate::lifecycle::Lifecycle;
use crate::timer::{self, PendingTimer, serde_millis};
use crate::value::ValueStore;

use super::placement::{Placement, compute_position};
use super::rect::Rect;
use super::surface::{Surface, WatchId};

/// Unique identifier for a Tooltip instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TooltipId(usize);

impl TooltipId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TooltipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__tooltip_{}", self.0)
    }
}

/// Tooltip configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Side of the trigger the tooltip appears on.
    pub placement: Placement,
    /// Delay before showing, serialized as milliseconds.
    #[serde(with = "serde_millis")]
    pub show_delay: Duration,
    /// Delay before hiding, serialized as milliseconds.
    #[serde(with = "serde_millis")]
    pub hide_delay: Duration,
    /// Gap between trigger and tooltip.
    pub offset: f64,
    /// Whether focus/blur show and hide the tooltip like pointer enter/leave.
    pub show_on_focus: bool,
    /// A disabled tooltip ignores show requests.
    pub disabled: bool,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            placement: Placement::Top,
            show_delay: Duration::from_millis(200),
            hide_delay: Duration::from_millis(150),
            offset: 8.0,
            show_on_focus: true,
            disabled: false,
        }
    }
}

impl TooltipConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn show_delay(mut self, delay: Duration) -> Self {
        self.show_delay = delay;
        self
    }

    pub fn hide_delay(mut self, delay: Duration) -> Self {
        self.hide_delay = delay;
        self
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn show_on_focus(mut self, enabled: bool) -> Self {
        self.show_on_focus = enabled;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Show,
    Hide,
}

impl TimerKind {
    fn opposite(self) -> Self {
        match self {
            TimerKind::Show => TimerKind::Hide,
            TimerKind::Hide => TimerKind::Show,
        }
    }
}

#[derive(Debug, Default)]
struct TooltipState {
    show_timer: Option<PendingTimer>,
    hide_timer: Option<PendingTimer>,
    next_seq: u64,
    /// Visibility the position/listener bookkeeping was last synced to
    shown: bool,
    position: Option<Rect>,
    watch: Option<WatchId>,
}

impl TooltipState {
    fn timer(&mut self, kind: TimerKind) -> &mut Option<PendingTimer> {
        match kind {
            TimerKind::Show => &mut self.show_timer,
            TimerKind::Hide => &mut self.hide_timer,
        }
    }
}

struct Shared<S> {
    id: TooltipId,
    surface: S,
    config: TooltipConfig,
    visible: ValueStore<bool>,
    lifecycle: Lifecycle,
    state: RwLock<TooltipState>,
}

/// A tooltip anchored to a trigger element.
///
/// Show and hide requests are debounced by the configured delays. A new request
/// cancels only a pending timer of the same kind. If a show and a hide are both
/// pending, the later request decides: a timer that fires while a newer
/// opposite request is still pending is dropped, and one that fires ahead of an
/// older opposite request cancels it.
///
/// While visible, the tooltip listens for scroll/resize on its [`Surface`] and
/// recomputes its position; the listener is removed on hide and on unmount.
///
/// Visibility lives in a [`ValueStore`]: a controlled tooltip only reports the
/// visibility it wants through [`on_visible_change`](Tooltip::on_visible_change)
/// and waits for the caller to hand it back with [`set_visible`](Tooltip::set_visible).
///
/// Timers run on the current Tokio runtime.
pub struct Tooltip<S> {
    shared: Arc<Shared<S>>,
}

impl<S: Surface + 'static> Tooltip<S> {
    /// Create an uncontrolled tooltip, initially hidden.
    pub fn new(surface: S, config: TooltipConfig) -> Self {
        Self::build(surface, config, ValueStore::uncontrolled(false))
    }

    /// Create a tooltip whose visibility is owned by the caller.
    pub fn controlled(surface: S, config: TooltipConfig, visible: bool) -> Self {
        let tooltip = Self::build(surface, config, ValueStore::controlled(visible));
        tooltip.sync();
        tooltip
    }

    fn build(surface: S, config: TooltipConfig, visible: ValueStore<bool>) -> Self {
        Self {
            shared: Arc::new(Shared {
                id: TooltipId::new(),
                surface,
                config,
                visible,
                lifecycle: Lifecycle::new("Tooltip"),
                state: RwLock::new(TooltipState::default()),
            }),
        }
    }

    /// Get the unique ID for this tooltip
    pub fn id(&self) -> TooltipId {
        self.shared.id
    }

    pub fn config(&self) -> &TooltipConfig {
        &self.shared.config
    }

    pub fn surface(&self) -> &S {
        &self.shared.surface
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Whether the tooltip is currently shown.
    pub fn is_visible(&self) -> bool {
        self.shared.lifecycle.is_mounted() && self.shared.visible.value()
    }

    /// Overlay position in document coordinates, `None` while hidden or before
    /// the overlay could be measured.
    pub fn position(&self) -> Result<Option<Rect>, ControlError> {
        self.shared.lifecycle.ensure_mounted()?;
        Ok(self.write_state().position)
    }

    pub fn has_pending_show(&self) -> bool {
        self.write_state().show_timer.is_some()
    }

    pub fn has_pending_hide(&self) -> bool {
        self.write_state().hide_timer.is_some()
    }

    // -------------------------------------------------------------------------
    // Host events
    // -------------------------------------------------------------------------

    pub fn pointer_enter(&self) -> Result<(), ControlError> {
        self.show()
    }

    pub fn pointer_leave(&self) -> Result<(), ControlError> {
        self.hide()
    }

    /// Trigger focused. Ignored unless `show_on_focus` is set.
    pub fn focus(&self) -> Result<(), ControlError> {
        if self.shared.config.show_on_focus {
            self.show()
        } else {
            self.shared.lifecycle.ensure_mounted()
        }
    }

    /// Trigger blurred. Ignored unless `show_on_focus` is set.
    pub fn blur(&self) -> Result<(), ControlError> {
        if self.shared.config.show_on_focus {
            self.hide()
        } else {
            self.shared.lifecycle.ensure_mounted()
        }
    }

    /// Request the tooltip to show after the show delay.
    pub fn show(&self) -> Result<(), ControlError> {
        self.shared.lifecycle.ensure_mounted()?;
        if self.shared.config.disabled {
            log::trace!("{}: show ignored, tooltip disabled", self.shared.id);
            return Ok(());
        }
        self.schedule(TimerKind::Show)
    }

    /// Request the tooltip to hide after the hide delay.
    pub fn hide(&self) -> Result<(), ControlError> {
        self.shared.lifecycle.ensure_mounted()?;
        self.schedule(TimerKind::Hide)
    }

    /// Hand back the caller-owned visibility of a controlled tooltip.
    ///
    /// Returns false for uncontrolled tooltips, which own their visibility.
    pub fn set_visible(&self, visible: bool) -> Result<bool, ControlError> {
        self.shared.lifecycle.ensure_mounted()?;
        let accepted = self.shared.visible.supply(visible);
        if accepted {
            self.sync();
        }
        Ok(accepted)
    }

    /// Listen for visibility changes requested by the tooltip's timers.
    pub fn on_visible_change(&self, listener: impl Fn(&bool) + Send + Sync + 'static) {
        self.shared.visible.on_change(listener);
    }

    /// Recompute the position from the current layout. No-op while hidden.
    pub fn reposition(&self) {
        if !self.shared.lifecycle.is_mounted() || !self.write_state().shown {
            return;
        }
        let Some(position) = self.measure() else {
            log::trace!("{}: anchor or overlay not measurable", self.shared.id);
            return;
        };
        let mut state = self.write_state();
        if state.shown {
            state.position = Some(position);
        }
    }

    /// Tear down: cancel pending timers and remove the layout listener. Timers
    /// that already elapsed become no-ops.
    pub fn unmount(&self) {
        if !self.shared.lifecycle.unmount() {
            return;
        }
        let watch = {
            let mut state = self.write_state();
            if let Some(timer) = state.show_timer.take() {
                timer.cancel();
            }
            if let Some(timer) = state.hide_timer.take() {
                timer.cancel();
            }
            state.shown = false;
            state.position = None;
            state.watch.take()
        };
        if let Some(id) = watch {
            self.shared.surface.unwatch_layout(id);
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn schedule(&self, kind: TimerKind) -> Result<(), ControlError> {
        let delay = match kind {
            TimerKind::Show => self.shared.config.show_delay,
            TimerKind::Hide => self.shared.config.hide_delay,
        };

        let mut state = self.write_state();
        let seq = state.next_seq;
        state.next_seq += 1;

        let weak = Arc::downgrade(&self.shared);
        let pending = timer::schedule(&self.shared.lifecycle, delay, seq, move || {
            if let Some(shared) = weak.upgrade() {
                Tooltip { shared }.fire(kind, seq);
            }
        })?;
        if let Some(previous) = state.timer(kind).replace(pending) {
            previous.cancel();
        }
        log::trace!("{}: {:?} scheduled in {:?}", self.shared.id, kind, delay);
        Ok(())
    }

    fn fire(&self, kind: TimerKind, seq: u64) {
        if !self.shared.lifecycle.is_mounted() {
            return;
        }
        {
            let mut state = self.write_state();
            let current = state.timer(kind).as_ref().map(PendingTimer::seq);
            if current != Some(seq) {
                return;
            }
            state.timer(kind).take();
            let newer = state
                .timer(kind.opposite())
                .as_ref()
                .is_some_and(|other| other.seq() > seq);
            if newer {
                log::trace!("{}: {:?} superseded by a later request", self.shared.id, kind);
                return;
            }
            if let Some(other) = state.timer(kind.opposite()).take() {
                other.cancel();
            }
        }
        log::debug!("{}: {:?} fired", self.shared.id, kind);
        self.shared.visible.commit(kind == TimerKind::Show);
        self.sync();
    }

    /// Bring position and layout listener in line with the visibility value.
    fn sync(&self) {
        let visible = self.shared.lifecycle.is_mounted() && self.shared.visible.value();
        let stale_watch = {
            let mut state = self.write_state();
            if state.shown == visible {
                return;
            }
            state.shown = visible;
            if visible {
                None
            } else {
                state.position = None;
                state.watch.take()
            }
        };

        if let Some(id) = stale_watch {
            self.shared.surface.unwatch_layout(id);
            log::trace!("{}: layout listener removed", self.shared.id);
        }

        if visible {
            self.reposition();
            let weak = Arc::downgrade(&self.shared);
            let id = self.shared.surface.watch_layout(Arc::new(move || {
                if let Some(shared) = weak.upgrade() {
                    Tooltip { shared }.reposition();
                }
            }));
            let mut state = self.write_state();
            if state.shown {
                state.watch = Some(id);
            } else {
                drop(state);
                self.shared.surface.unwatch_layout(id);
            }
            log::trace!("{}: layout listener installed", self.shared.id);
        }
    }

    fn measure(&self) -> Option<Rect> {
        let surface = &self.shared.surface;
        let anchor = surface.anchor_rect()?;
        let overlay = surface.overlay_size()?;
        let (scroll_x, scroll_y) = surface.scroll_offset();
        Some(compute_position(
            anchor.offset(scroll_x, scroll_y),
            overlay,
            self.shared.config.placement,
            self.shared.config.offset,
        ))
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, TooltipState> {
        self.shared.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> Clone for Tooltip<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S> std::fmt::Debug for Tooltip<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tooltip")
            .field("id", &self.shared.id)
            .field("config", &self.shared.config)
            .finish_non_exhaustive()
    }
}
