//! Stateful control handles.
//!
//! Each widget wraps one or more [`ValueStore`](crate::value::ValueStore)s and
//! feeds them transitions from [`selection`](crate::selection). Widgets never
//! render; hosts read state back through the read methods and the change
//! listeners.

pub mod disclosure;
pub mod modal;
pub mod select;
pub mod table;
pub mod tabs;
pub mod toast;
pub mod toggle;

pub use disclosure::{Disclosure, DisclosureConfig, DisclosureId};
pub use modal::{Modal, ModalConfig, ModalId};
pub use select::{Select, SelectId};
pub use table::{Table, TableConfig, TableId};
pub use tabs::{TabSet, TabSetId};
pub use toast::{Toast, ToastConfig, ToastId, ToastLevel, Toaster};
pub use toggle::{Toggle, ToggleId};
