//! Paged navigation and breadcrumb trails.

mod state;
mod trail;
mod window;

pub use state::{Pager, PagerConfig};
pub use trail::{TrailItem, collapse_trail};
pub use window::{PageItem, generate_window};
