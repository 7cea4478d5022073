//! Host layout access for floating overlays.

use std::sync::Arc;

use super::rect::{Rect, Size};

/// Identifier of a registered layout listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(pub u64);

/// Callback the host runs on every scroll or resize.
pub type LayoutListener = Arc<dyn Fn() + Send + Sync>;

/// What a floating overlay needs from the host environment.
///
/// Rects are reported in viewport coordinates, the way a bounding-client-rect
/// query returns them; the scroll offset converts them to document coordinates.
pub trait Surface: Send + Sync {
    /// Bounding box of the trigger element, if it is laid out.
    fn anchor_rect(&self) -> Option<Rect>;

    /// Measured size of the overlay, if it is laid out.
    fn overlay_size(&self) -> Option<Size>;

    /// Current `(x, y)` scroll offset of the document.
    fn scroll_offset(&self) -> (f64, f64);

    /// Start calling `listener` on every scroll and resize.
    fn watch_layout(&self, listener: LayoutListener) -> WatchId;

    /// Stop calling the listener registered as `id`.
    fn unwatch_layout(&self, id: WatchId);
}
