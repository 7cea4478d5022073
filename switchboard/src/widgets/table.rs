//! Table sort and row selection state.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::selection::{SortState, is_complete, toggle_all, toggle_member};
use crate::value::ValueStore;

/// Unique identifier for a Table instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// Table configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Whether header activation changes the sort.
    pub sortable: bool,
    /// Whether rows can be selected.
    pub selectable: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            sortable: true,
            selectable: false,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }
}

#[derive(Debug)]
struct TableRows<R, C> {
    rows: Vec<R>,
    disabled_rows: HashSet<R>,
    unsortable_columns: HashSet<C>,
}

/// Sort and selection state of a data table, keyed by row id `R` and column
/// key `C`.
///
/// The table does not hold row data; hosts report the visible row ids through
/// [`Table::set_rows`] and sort their own data from [`Table::sort`].
///
/// # Example
///
/// ```
/// use switchboard::selection::SortDirection;
/// use switchboard::widgets::{Table, TableConfig};
///
/// let table: Table<u32, &str> = Table::new(TableConfig::new().selectable(true));
/// table.set_rows([1, 2, 3]);
/// table.sort_by(&"name");
/// assert_eq!(table.sort().direction_of(&"name"), SortDirection::Ascending);
/// table.toggle_all();
/// assert!(table.all_selected());
/// ```
pub struct Table<R, C> {
    id: TableId,
    config: TableConfig,
    sort: ValueStore<SortState<C>>,
    selection: ValueStore<HashSet<R>>,
    rows: Arc<RwLock<TableRows<R, C>>>,
}

impl<R, C> Table<R, C>
where
    R: Clone + Eq + Hash,
    C: Clone + Eq + Hash,
{
    /// Unsorted, nothing selected, both uncontrolled.
    pub fn new(config: TableConfig) -> Self {
        Self {
            id: TableId::new(),
            config,
            sort: ValueStore::uncontrolled(SortState::unsorted()),
            selection: ValueStore::uncontrolled(HashSet::new()),
            rows: Arc::new(RwLock::new(TableRows {
                rows: Vec::new(),
                disabled_rows: HashSet::new(),
                unsortable_columns: HashSet::new(),
            })),
        }
    }

    /// Start sorted by `sort`.
    pub fn default_sort(mut self, sort: SortState<C>) -> Self {
        self.sort = ValueStore::uncontrolled(sort);
        self
    }

    /// Let the caller own the selection, currently `selected`.
    pub fn controlled_selection(mut self, selected: impl IntoIterator<Item = R>) -> Self {
        self.selection = ValueStore::controlled(selected.into_iter().collect());
        self
    }

    /// Get the unique ID for this table
    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn config(&self) -> TableConfig {
        self.config
    }

    /// The store holding the sort state.
    pub fn sort_store(&self) -> &ValueStore<SortState<C>> {
        &self.sort
    }

    /// The store holding the selected row ids.
    pub fn selection_store(&self) -> &ValueStore<HashSet<R>> {
        &self.selection
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    pub fn sort(&self) -> SortState<C> {
        self.sort.value()
    }

    pub fn selected_rows(&self) -> HashSet<R> {
        self.selection.value()
    }

    pub fn is_row_selected(&self, id: &R) -> bool {
        self.selection.with_value(|selected| selected.contains(id))
    }

    /// Row ids in display order.
    pub fn rows(&self) -> Vec<R> {
        self.read_rows().rows.clone()
    }

    /// Whether every selectable row is selected. False for a table with no rows.
    pub fn all_selected(&self) -> bool {
        let all = self.selectable_rows();
        !all.is_empty() && self.selection.with_value(|selected| is_complete(selected, &all))
    }

    /// Whether some, but not all, selectable rows are selected.
    pub fn some_selected(&self) -> bool {
        let any = self.selection.with_value(|selected| !selected.is_empty());
        any && !self.all_selected()
    }

    /// Whether activating `column`'s header would change the sort.
    pub fn is_column_sortable(&self, column: &C) -> bool {
        self.config.sortable && !self.read_rows().unsortable_columns.contains(column)
    }

    pub fn is_row_disabled(&self, id: &R) -> bool {
        self.read_rows().disabled_rows.contains(id)
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Activate a column header: asc, then desc, then unsorted.
    pub fn sort_by(&self, column: &C) -> bool {
        if !self.is_column_sortable(column) {
            return false;
        }
        self.sort.transition(|sort| sort.cycle(column))
    }

    /// Flip selection of one row.
    pub fn toggle_row(&self, id: &R) -> bool {
        if !self.config.selectable || self.is_row_disabled(id) {
            return false;
        }
        self.selection.transition(|selected| toggle_member(selected, id))
    }

    /// Select every enabled row, or clear the selection when they are all
    /// selected already.
    pub fn toggle_all(&self) -> bool {
        if !self.config.selectable {
            return false;
        }
        let all = self.selectable_rows();
        self.selection.transition(|selected| toggle_all(selected, &all))
    }

    /// Replace the displayed row ids. The selection is not pruned.
    pub fn set_rows(&self, rows: impl IntoIterator<Item = R>) {
        let mut guard = self.write_rows();
        guard.rows = rows.into_iter().collect();
        log::trace!("{}: {} rows", self.id, guard.rows.len());
    }

    pub fn set_row_disabled(&self, id: R, disabled: bool) {
        let mut guard = self.write_rows();
        if disabled {
            guard.disabled_rows.insert(id);
        } else {
            guard.disabled_rows.remove(&id);
        }
    }

    /// Opt a single column out of (or back into) sorting.
    pub fn set_column_sortable(&self, column: C, sortable: bool) {
        let mut guard = self.write_rows();
        if sortable {
            guard.unsortable_columns.remove(&column);
        } else {
            guard.unsortable_columns.insert(column);
        }
    }

    /// Hand back the caller-owned selection of a controlled table.
    pub fn supply_selection(&self, selected: impl IntoIterator<Item = R>) -> bool {
        self.selection.supply(selected.into_iter().collect())
    }

    pub fn on_sort_change(&self, listener: impl Fn(&SortState<C>) + Send + Sync + 'static) {
        self.sort.on_change(listener);
    }

    pub fn on_selection_change(&self, listener: impl Fn(&HashSet<R>) + Send + Sync + 'static) {
        self.selection.on_change(listener);
    }

    fn selectable_rows(&self) -> Vec<R> {
        let guard = self.read_rows();
        guard
            .rows
            .iter()
            .filter(|row| !guard.disabled_rows.contains(row))
            .cloned()
            .collect()
    }

    fn read_rows(&self) -> RwLockReadGuard<'_, TableRows<R, C>> {
        self.rows.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_rows(&self) -> RwLockWriteGuard<'_, TableRows<R, C>> {
        self.rows.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R, C> Clone for Table<R, C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            config: self.config,
            sort: self.sort.clone(),
            selection: self.selection.clone(),
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<R, C> std::fmt::Debug for Table<R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("id", &self.id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
