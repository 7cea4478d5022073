//! Three-state column sort cycle.

use serde::{Deserialize, Serialize};

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
    #[default]
    None,
}

/// Which column is sorted, and how. At most one column is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState<C> {
    pub column: Option<C>,
    pub direction: SortDirection,
}

impl<C> Default for SortState<C> {
    fn default() -> Self {
        Self::unsorted()
    }
}

impl<C> SortState<C> {
    /// No active sort.
    pub fn unsorted() -> Self {
        Self {
            column: None,
            direction: SortDirection::None,
        }
    }

    /// Sort `column` in `direction`. `SortDirection::None` yields [`unsorted`](Self::unsorted).
    pub fn new(column: C, direction: SortDirection) -> Self {
        match direction {
            SortDirection::None => Self::unsorted(),
            direction => Self {
                column: Some(column),
                direction,
            },
        }
    }

    pub fn ascending(column: C) -> Self {
        Self::new(column, SortDirection::Ascending)
    }

    pub fn descending(column: C) -> Self {
        Self::new(column, SortDirection::Descending)
    }

    pub fn is_sorted(&self) -> bool {
        self.column.is_some() && self.direction != SortDirection::None
    }
}

impl<C: PartialEq> SortState<C> {
    /// Direction applied to `column`, `SortDirection::None` when it is not the
    /// active column.
    pub fn direction_of(&self, column: &C) -> SortDirection {
        match &self.column {
            Some(active) if active == column => self.direction,
            _ => SortDirection::None,
        }
    }
}

impl<C: Clone + PartialEq> SortState<C> {
    /// Next state after activating `column`.
    ///
    /// asc → desc → unsorted on the active column; any other column restarts at
    /// ascending and drops the previous column's state.
    pub fn cycle(&self, column: &C) -> Self {
        match self.direction_of(column) {
            SortDirection::None => Self::ascending(column.clone()),
            SortDirection::Ascending => Self::descending(column.clone()),
            SortDirection::Descending => Self::unsorted(),
        }
    }
}
