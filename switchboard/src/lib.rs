//! Headless interaction state for UI controls.
//!
//! `switchboard` owns the parts of a control that are not drawing: who owns a
//! value, which panels are open, where keyboard focus sits, which page links to
//! show, and when and where a floating overlay appears. Hosts feed it input
//! events and render from its state.

pub mod error;
pub mod floating;
pub mod lifecycle;
pub mod nav;
pub mod pager;
pub mod registry;
pub mod selection;
pub mod value;
pub mod widgets;

mod timer;

pub use error::ControlError;

pub mod prelude {
    pub use crate::error::ControlError;
    pub use crate::floating::{Placement, Rect, Size, Surface, Tooltip, TooltipConfig, WatchId};
    pub use crate::nav::{EventResult, Menu, NavKey};
    pub use crate::pager::{PageItem, Pager, PagerConfig};
    pub use crate::registry::ItemRegistry;
    pub use crate::selection::{Expanded, SelectionMode, SortDirection, SortState};
    pub use crate::value::{ControlMode, ValueStore};
    pub use crate::widgets::{
        Disclosure, DisclosureConfig, Modal, ModalConfig, Select, TabSet, Table, TableConfig,
        Toast, ToastConfig, ToastLevel, Toaster, Toggle,
    };
}
