//! Expansion, selection and sort state machines.
//!
//! Every transition here is a pure function of `(current, target) -> next`.
//! Controls feed the result into their [`ValueStore`](crate::value::ValueStore),
//! which stays the single place state is written.

mod expanded;
mod sort;
mod transitions;

pub use expanded::{Expanded, SelectionMode};
pub use sort::{SortDirection, SortState};
pub use transitions::{is_complete, toggle_all, toggle_member, toggle_single};
