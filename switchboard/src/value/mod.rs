//! Dual-mode (controlled / uncontrolled) value ownership.

mod store;

pub use store::{ChangeListener, ControlMode, StoreId, ValueStore};
