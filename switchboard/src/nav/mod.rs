//! Keyboard-driven roving focus.

mod key;
mod menu;
mod roving;

pub use key::{EventResult, NavKey};
pub use menu::{Menu, MenuAction, MenuId};
pub use roving::{
    RovingFocus, next_index, next_index_clamped, previous_index, previous_index_clamped,
};
