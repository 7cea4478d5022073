//! Tests for the stateful control handles.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use switchboard::nav::{EventResult, NavKey};
use switchboard::selection::{Expanded, SortDirection, SortState};
use switchboard::widgets::{
    Disclosure, DisclosureConfig, Modal, ModalConfig, Select, TabSet, Table, TableConfig,
    Toggle,
};

// ---- Disclosure ----

#[test]
fn test_single_collapsible_reactivation_closes() {
    let disclosure = Disclosure::new(DisclosureConfig::single(true));
    assert!(disclosure.activate(&"a"));
    assert!(disclosure.activate(&"a"));
    assert_eq!(disclosure.value(), Expanded::Single(None));
}

#[test]
fn test_single_non_collapsible_keeps_open_item() {
    let disclosure = Disclosure::new(DisclosureConfig::single(false));
    disclosure.activate(&"a");
    assert!(!disclosure.activate(&"a"));
    assert!(disclosure.is_expanded(&"a"));
}

#[test]
fn test_single_switches_item() {
    let disclosure = Disclosure::with_default(DisclosureConfig::single(true), ["a"]);
    disclosure.activate(&"b");
    assert!(!disclosure.is_expanded(&"a"));
    assert!(disclosure.is_expanded(&"b"));
}

#[test]
fn test_multiple_flips_membership() {
    let disclosure = Disclosure::with_default(DisclosureConfig::multiple(), ["a", "b"]);
    disclosure.activate(&"a");
    assert_eq!(disclosure.value(), Expanded::Multiple(HashSet::from(["b"])));
    disclosure.activate(&"c");
    assert_eq!(disclosure.value().len(), 2);
}

#[test]
fn test_disabled_panel_ignored() {
    let disclosure = Disclosure::new(DisclosureConfig::multiple());
    disclosure.set_disabled("a", true);
    assert!(!disclosure.activate(&"a"));
    assert!(disclosure.value().is_empty());
    disclosure.set_disabled("a", false);
    assert!(disclosure.activate(&"a"));
}

#[test]
fn test_controlled_disclosure_waits_for_supply() {
    let disclosure = Disclosure::controlled(DisclosureConfig::single(true), ["a"]);
    let requested = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&requested);
    disclosure.on_change(move |value| *sink.lock().unwrap() = Some(value.clone()));

    disclosure.activate(&"b");
    assert!(disclosure.is_expanded(&"a"));
    assert_eq!(
        *requested.lock().unwrap(),
        Some(Expanded::Single(Some("b")))
    );

    disclosure.supply(["b"]);
    assert!(disclosure.is_expanded(&"b"));
}

// ---- Tabs ----

#[test]
fn test_first_attached_tab_selected_by_default() {
    let tabs = TabSet::new();
    assert_eq!(tabs.selected(), None);
    tabs.attach("one");
    tabs.attach("two");
    assert_eq!(tabs.selected(), Some("one"));
}

#[test]
fn test_default_skips_disabled_tabs() {
    let tabs = TabSet::new();
    tabs.attach_disabled("one");
    assert_eq!(tabs.selected(), None);
    tabs.attach("two");
    assert_eq!(tabs.selected(), Some("two"));
}

#[test]
fn test_tab_reselect_is_not_collapsible() {
    let tabs = TabSet::with_default("one");
    tabs.attach("one");
    tabs.attach("two");
    assert!(!tabs.select(&"one"));
    assert!(tabs.is_selected(&"one"));
    assert!(tabs.select(&"two"));
    assert_eq!(tabs.selected(), Some("two"));
}

#[test]
fn test_disabled_tab_not_selectable() {
    let tabs = TabSet::new();
    tabs.attach("one");
    tabs.attach_disabled("two");
    assert!(!tabs.select(&"two"));
    assert_eq!(tabs.selected(), Some("one"));
}

// ---- Select ----

fn select() -> Select<&'static str> {
    let select = Select::new();
    select.attach("low");
    select.attach_disabled("medium");
    select.attach("high");
    select.attach("urgent");
    select
}

#[test]
fn test_select_enter_toggles_open() {
    let select = select();
    assert_eq!(select.on_key(NavKey::Enter), EventResult::Consumed);
    assert!(select.is_open());
    assert_eq!(select.on_key(NavKey::Space), EventResult::Consumed);
    assert!(!select.is_open());
    assert_eq!(select.selected(), None);
}

#[test]
fn test_select_arrow_opens_closed_select() {
    let select = select();
    assert_eq!(select.on_key(NavKey::ArrowUp), EventResult::Consumed);
    assert!(select.is_open());
    assert_eq!(select.highlighted_index(), None);
}

#[test]
fn test_select_highlight_clamps_and_skips_disabled() {
    let select = select();
    select.open();
    select.on_key(NavKey::ArrowDown);
    assert_eq!(select.highlighted(), Some("low"));
    select.on_key(NavKey::ArrowDown);
    assert_eq!(select.highlighted(), Some("high"));
    select.on_key(NavKey::ArrowDown);
    select.on_key(NavKey::ArrowDown);
    assert_eq!(select.highlighted(), Some("urgent"));
    assert_eq!(select.highlighted_index(), Some(2));
    for _ in 0..4 {
        select.on_key(NavKey::ArrowUp);
    }
    assert_eq!(select.highlighted(), Some("low"));
}

#[test]
fn test_select_enter_commits_highlight() {
    let select = select();
    select.open();
    select.on_key(NavKey::ArrowDown);
    select.on_key(NavKey::ArrowDown);
    assert_eq!(select.on_key(NavKey::Enter), EventResult::Consumed);
    assert_eq!(select.selected(), Some("high"));
    assert!(!select.is_open());

    select.open();
    assert_eq!(select.highlighted(), Some("high"));
}

#[test]
fn test_select_escape_closes() {
    let select = select();
    assert_eq!(select.on_key(NavKey::Escape), EventResult::Ignored);
    select.open();
    select.on_key(NavKey::ArrowDown);
    assert_eq!(select.on_key(NavKey::Escape), EventResult::Consumed);
    assert!(!select.is_open());
    assert_eq!(select.selected(), None);
}

#[test]
fn test_select_choose_skips_disabled_options() {
    let select = select();
    select.open();
    assert_eq!(select.choose(&"medium"), EventResult::Ignored);
    assert_eq!(select.choose(&"missing"), EventResult::Ignored);
    assert!(select.is_open());
    assert_eq!(select.choose(&"urgent"), EventResult::Consumed);
    assert!(select.is_selected(&"urgent"));
    assert!(!select.is_open());
}

#[test]
fn test_disabled_select_ignores_input() {
    let select = select();
    select.open();
    select.set_disabled(true);
    assert!(!select.is_open());
    assert_eq!(select.on_key(NavKey::Enter), EventResult::Ignored);
    assert_eq!(select.choose(&"low"), EventResult::Ignored);
    assert!(!select.open());
    assert_eq!(select.selected(), None);
}

#[test]
fn test_controlled_select_waits_for_supply() {
    let select = Select::controlled(Some("low"));
    select.attach("low");
    select.attach("high");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    select.on_change(move |value| sink.lock().unwrap().push(*value));

    select.choose(&"high");
    assert_eq!(select.selected(), Some("low"));
    assert_eq!(*seen.lock().unwrap(), vec![Some("high")]);

    assert!(select.supply(Some("high")));
    assert!(select.is_selected(&"high"));
}

// ---- Table ----

fn table() -> Table<u32, &'static str> {
    let table = Table::new(TableConfig::new().selectable(true));
    table.set_rows([1, 2, 3]);
    table
}

#[test]
fn test_sort_cycle() {
    let table = table();
    table.sort_by(&"name");
    assert_eq!(table.sort(), SortState::ascending("name"));
    table.sort_by(&"name");
    assert_eq!(table.sort(), SortState::descending("name"));
    table.sort_by(&"name");
    assert_eq!(table.sort(), SortState::unsorted());
    table.sort_by(&"name");
    assert_eq!(table.sort(), SortState::ascending("name"));
}

#[test]
fn test_sorting_other_column_restarts() {
    let table = table().default_sort(SortState::descending("name"));
    table.sort_by(&"age");
    assert_eq!(table.sort().direction_of(&"age"), SortDirection::Ascending);
    assert_eq!(table.sort().direction_of(&"name"), SortDirection::None);
}

#[test]
fn test_sort_disabled() {
    let fixed: Table<u32, &str> = Table::new(TableConfig::new().sortable(false));
    assert!(!fixed.sort_by(&"name"));
    assert!(!fixed.sort().is_sorted());

    let partial = table();
    partial.set_column_sortable("actions", false);
    assert!(!partial.sort_by(&"actions"));
    assert!(partial.sort_by(&"name"));
}

#[test]
fn test_row_selection() {
    let table = table();
    table.toggle_row(&2);
    assert!(table.is_row_selected(&2));
    assert!(table.some_selected());
    assert!(!table.all_selected());
    table.toggle_row(&2);
    assert!(table.selected_rows().is_empty());
}

#[test]
fn test_toggle_all_selects_then_clears() {
    let table = table();
    table.toggle_row(&1);
    table.toggle_all();
    assert_eq!(table.selected_rows(), HashSet::from([1, 2, 3]));
    assert!(table.all_selected());
    assert!(!table.some_selected());
    table.toggle_all();
    assert!(table.selected_rows().is_empty());
}

#[test]
fn test_toggle_all_with_stale_selection() {
    let table = table().controlled_selection([1, 2, 3, 99]);
    let requested = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&requested);
    table.on_selection_change(move |rows| *sink.lock().unwrap() = Some(rows.clone()));
    table.toggle_all();
    assert_eq!(*requested.lock().unwrap(), Some(HashSet::new()));
    assert_eq!(table.selected_rows().len(), 4);
}

#[test]
fn test_disabled_rows() {
    let table = table();
    table.set_row_disabled(3, true);
    assert!(!table.toggle_row(&3));
    table.toggle_all();
    assert_eq!(table.selected_rows(), HashSet::from([1, 2]));
    assert!(table.all_selected());
}

#[test]
fn test_selection_requires_selectable() {
    let table: Table<u32, &str> = Table::new(TableConfig::default());
    table.set_rows([1, 2]);
    assert!(!table.toggle_row(&1));
    assert!(!table.toggle_all());
    assert!(!table.all_selected());
}

// ---- Toggle ----

#[test]
fn test_toggle_flips_and_clears_indeterminate() {
    let toggle = Toggle::new(false);
    toggle.set_indeterminate(true);
    assert!(toggle.toggle());
    assert!(toggle.is_checked());
    assert!(!toggle.is_indeterminate());
}

#[test]
fn test_disabled_toggle_is_inert() {
    let toggle = Toggle::new(true);
    toggle.set_disabled(true);
    assert!(!toggle.toggle());
    assert!(!toggle.set_checked(false));
    assert!(toggle.is_checked());
}

#[test]
fn test_controlled_toggle() {
    let toggle = Toggle::controlled(false);
    let requested = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&requested);
    toggle.on_change(move |checked| sink.lock().unwrap().push(*checked));
    toggle.toggle();
    assert!(!toggle.is_checked());
    assert_eq!(*requested.lock().unwrap(), vec![true]);
}

// ---- Modal ----

#[test]
fn test_escape_closes_modal() {
    let modal = Modal::new(ModalConfig::default());
    modal.open();
    assert_eq!(modal.on_key(NavKey::Escape), EventResult::Consumed);
    assert!(!modal.is_open());
    assert_eq!(modal.on_key(NavKey::Escape), EventResult::Ignored);
}

#[test]
fn test_modal_close_options() {
    let modal = Modal::new(
        ModalConfig::new()
            .close_on_escape(false)
            .close_on_overlay_click(false),
    );
    modal.open();
    assert_eq!(modal.on_key(NavKey::Escape), EventResult::Ignored);
    assert_eq!(modal.overlay_click(), EventResult::Ignored);
    assert!(modal.is_open());
    assert!(modal.close());
}

#[test]
fn test_overlay_click_closes_modal() {
    let modal = Modal::new(ModalConfig::default());
    modal.open();
    assert_eq!(modal.overlay_click(), EventResult::Consumed);
    assert!(!modal.is_open());
}

#[test]
fn test_focus_trap_wraps() {
    assert_eq!(Modal::trap_focus(Some(2), 3, false), Some(0));
    assert_eq!(Modal::trap_focus(Some(0), 3, true), Some(2));
    assert_eq!(Modal::trap_focus(Some(1), 3, false), Some(2));
    assert_eq!(Modal::trap_focus(None, 3, true), Some(2));
    assert_eq!(Modal::trap_focus(None, 0, false), None);
}
