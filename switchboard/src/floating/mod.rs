//! Floating overlay positioning.

mod placement;
mod rect;
mod surface;
mod tooltip;

pub use placement::{Placement, compute_position};
pub use rect::{Rect, Size};
pub use surface::{LayoutListener, Surface, WatchId};
pub use tooltip::{Tooltip, TooltipConfig, TooltipId};
