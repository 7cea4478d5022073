//! Tests for tooltip debouncing, placement and teardown.
//!
//! Timer tests run on a paused clock; `sleep` auto-advances it to each pending
//! deadline in turn.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::sleep;

use switchboard::error::ControlError;
use switchboard::floating::{
    LayoutListener, Placement, Rect, Size, Surface, Tooltip, TooltipConfig, WatchId,
};

#[derive(Default)]
struct Layout {
    anchor: Option<Rect>,
    overlay: Option<Size>,
    scroll: (f64, f64),
    listeners: HashMap<u64, LayoutListener>,
    next_watch: u64,
}

#[derive(Clone, Default)]
struct FakeSurface(Arc<Mutex<Layout>>);

impl FakeSurface {
    fn laid_out() -> Self {
        let surface = Self::default();
        {
            let mut layout = surface.0.lock().unwrap();
            layout.anchor = Some(Rect::new(100.0, 200.0, 80.0, 20.0));
            layout.overlay = Some(Size::new(40.0, 10.0));
        }
        surface
    }

    fn listener_count(&self) -> usize {
        self.0.lock().unwrap().listeners.len()
    }

    fn scroll_to(&self, x: f64, y: f64) {
        let listeners: Vec<LayoutListener> = {
            let mut layout = self.0.lock().unwrap();
            layout.scroll = (x, y);
            layout.listeners.values().cloned().collect()
        };
        for listener in listeners {
            listener();
        }
    }
}

impl Surface for FakeSurface {
    fn anchor_rect(&self) -> Option<Rect> {
        self.0.lock().unwrap().anchor
    }

    fn overlay_size(&self) -> Option<Size> {
        self.0.lock().unwrap().overlay
    }

    fn scroll_offset(&self) -> (f64, f64) {
        self.0.lock().unwrap().scroll
    }

    fn watch_layout(&self, listener: LayoutListener) -> WatchId {
        let mut layout = self.0.lock().unwrap();
        let id = layout.next_watch;
        layout.next_watch += 1;
        layout.listeners.insert(id, listener);
        WatchId(id)
    }

    fn unwatch_layout(&self, id: WatchId) {
        self.0.lock().unwrap().listeners.remove(&id.0);
    }
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn bottom_config() -> TooltipConfig {
    TooltipConfig::new()
        .placement(Placement::Bottom)
        .show_delay(ms(200))
        .hide_delay(ms(150))
        .offset(8.0)
}

fn recorder(tooltip: &Tooltip<FakeSurface>) -> Arc<Mutex<Vec<bool>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    tooltip.on_visible_change(move |visible| sink.lock().unwrap().push(*visible));
    seen
}

#[tokio::test(start_paused = true)]
async fn test_shows_after_delay() {
    let tooltip = Tooltip::new(FakeSurface::laid_out(), bottom_config());
    tooltip.pointer_enter().unwrap();
    assert!(tooltip.has_pending_show());

    sleep(ms(150)).await;
    assert!(!tooltip.is_visible());

    sleep(ms(100)).await;
    assert!(tooltip.is_visible());
    assert!(!tooltip.has_pending_show());
}

#[tokio::test(start_paused = true)]
async fn test_bottom_placement_is_centered() {
    let tooltip = Tooltip::new(FakeSurface::laid_out(), bottom_config());
    tooltip.show().unwrap();
    sleep(ms(250)).await;

    let position = tooltip.position().unwrap().unwrap();
    assert_eq!(position.top, 128.0);
    assert_eq!(position.left, 220.0);
    assert_eq!(position.size(), Size::new(40.0, 10.0));
}

#[tokio::test(start_paused = true)]
async fn test_repeated_show_restarts_delay() {
    let tooltip = Tooltip::new(FakeSurface::laid_out(), bottom_config());
    tooltip.show().unwrap();
    sleep(ms(150)).await;
    tooltip.show().unwrap();

    sleep(ms(100)).await;
    assert!(!tooltip.is_visible());

    sleep(ms(150)).await;
    assert!(tooltip.is_visible());
}

#[tokio::test(start_paused = true)]
async fn test_earlier_hide_discards_pending_show() {
    let config = bottom_config().hide_delay(ms(50));
    let tooltip = Tooltip::new(FakeSurface::laid_out(), config);
    let seen = recorder(&tooltip);

    tooltip.pointer_enter().unwrap();
    sleep(ms(10)).await;
    tooltip.pointer_leave().unwrap();
    assert!(tooltip.has_pending_show());
    assert!(tooltip.has_pending_hide());

    sleep(ms(300)).await;
    assert!(!tooltip.is_visible());
    assert!(!tooltip.has_pending_show());
    assert_eq!(*seen.lock().unwrap(), vec![false]);
}

#[tokio::test(start_paused = true)]
async fn test_leave_before_show_fires_ends_hidden() {
    let tooltip = Tooltip::new(FakeSurface::laid_out(), TooltipConfig::default());
    let seen = recorder(&tooltip);

    tooltip.pointer_enter().unwrap();
    sleep(ms(100)).await;
    tooltip.pointer_leave().unwrap();

    sleep(ms(120)).await;
    assert!(!tooltip.is_visible());
    assert!(!tooltip.has_pending_show());
    assert!(tooltip.has_pending_hide());

    sleep(ms(2000)).await;
    assert!(!tooltip.is_visible());
    assert_eq!(*seen.lock().unwrap(), vec![false]);
}

#[tokio::test(start_paused = true)]
async fn test_reenter_before_hide_fires_stays_visible() {
    let surface = FakeSurface::laid_out();
    let tooltip = Tooltip::new(surface.clone(), bottom_config().hide_delay(ms(300)));
    tooltip.show().unwrap();
    sleep(ms(250)).await;

    tooltip.hide().unwrap();
    sleep(ms(50)).await;
    tooltip.show().unwrap();

    sleep(ms(1000)).await;
    assert!(tooltip.is_visible());
    assert_eq!(surface.listener_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_hide_after_show() {
    let surface = FakeSurface::laid_out();
    let tooltip = Tooltip::new(surface.clone(), bottom_config());
    tooltip.show().unwrap();
    sleep(ms(250)).await;
    assert_eq!(surface.listener_count(), 1);

    tooltip.hide().unwrap();
    sleep(ms(200)).await;
    assert!(!tooltip.is_visible());
    assert_eq!(tooltip.position().unwrap(), None);
    assert_eq!(surface.listener_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_scroll_repositions_while_visible() {
    let surface = FakeSurface::laid_out();
    let tooltip = Tooltip::new(surface.clone(), bottom_config());
    tooltip.show().unwrap();
    sleep(ms(250)).await;

    surface.scroll_to(0.0, 500.0);
    let position = tooltip.position().unwrap().unwrap();
    assert_eq!(position.top, 628.0);
}

#[tokio::test(start_paused = true)]
async fn test_unmeasurable_overlay_has_no_position() {
    let surface = FakeSurface::default();
    let tooltip = Tooltip::new(surface.clone(), bottom_config());
    tooltip.show().unwrap();
    sleep(ms(250)).await;
    assert!(tooltip.is_visible());
    assert_eq!(tooltip.position().unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_unmount_cancels_pending_show() {
    let surface = FakeSurface::laid_out();
    let tooltip = Tooltip::new(surface.clone(), bottom_config());
    let seen = recorder(&tooltip);
    tooltip.show().unwrap();
    sleep(ms(100)).await;

    tooltip.unmount();
    sleep(ms(500)).await;
    assert!(!tooltip.is_visible());
    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(surface.listener_count(), 0);
    assert_eq!(
        tooltip.show(),
        Err(ControlError::Unmounted { control: "Tooltip" })
    );
}

#[tokio::test(start_paused = true)]
async fn test_unmount_removes_layout_listener() {
    let surface = FakeSurface::laid_out();
    let tooltip = Tooltip::new(surface.clone(), bottom_config());
    tooltip.show().unwrap();
    sleep(ms(250)).await;
    assert_eq!(surface.listener_count(), 1);

    tooltip.unmount();
    assert_eq!(surface.listener_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_controlled_visibility() {
    let surface = FakeSurface::laid_out();
    let tooltip = Tooltip::controlled(surface.clone(), bottom_config(), false);
    let seen = recorder(&tooltip);

    tooltip.show().unwrap();
    sleep(ms(250)).await;
    assert!(!tooltip.is_visible());
    assert_eq!(*seen.lock().unwrap(), vec![true]);

    assert!(tooltip.set_visible(true).unwrap());
    assert!(tooltip.is_visible());
    assert!(tooltip.position().unwrap().is_some());
    assert_eq!(surface.listener_count(), 1);

    tooltip.set_visible(false).unwrap();
    assert_eq!(surface.listener_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_set_visible_rejected_when_uncontrolled() {
    let tooltip = Tooltip::new(FakeSurface::laid_out(), bottom_config());
    assert!(!tooltip.set_visible(true).unwrap());
    assert!(!tooltip.is_visible());
}

#[tokio::test(start_paused = true)]
async fn test_disabled_tooltip_ignores_show() {
    let tooltip = Tooltip::new(FakeSurface::laid_out(), bottom_config().disabled(true));
    tooltip.show().unwrap();
    assert!(!tooltip.has_pending_show());
    sleep(ms(300)).await;
    assert!(!tooltip.is_visible());
}

#[tokio::test(start_paused = true)]
async fn test_focus_ignored_without_show_on_focus() {
    let tooltip = Tooltip::new(
        FakeSurface::laid_out(),
        bottom_config().show_on_focus(false),
    );
    tooltip.focus().unwrap();
    assert!(!tooltip.has_pending_show());
    tooltip.pointer_enter().unwrap();
    assert!(tooltip.has_pending_show());
}

#[test]
fn test_show_requires_runtime() {
    let tooltip = Tooltip::new(FakeSurface::laid_out(), bottom_config());
    assert_eq!(tooltip.show(), Err(ControlError::NoRuntime));
}

#[test]
fn test_failed_request_keeps_nothing_pending() {
    let tooltip = Tooltip::new(FakeSurface::laid_out(), bottom_config());
    assert!(tooltip.hide().is_err());
    assert!(!tooltip.has_pending_hide());
}

#[tokio::test(start_paused = true)]
async fn test_request_outside_runtime_keeps_pending_timer() {
    let tooltip = Tooltip::new(FakeSurface::laid_out(), bottom_config());
    tooltip.show().unwrap();

    let other = tooltip.clone();
    let result = std::thread::spawn(move || other.show()).join().unwrap();
    assert_eq!(result, Err(ControlError::NoRuntime));
    assert!(tooltip.has_pending_show());

    sleep(ms(250)).await;
    assert!(tooltip.is_visible());
}
