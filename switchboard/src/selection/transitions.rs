//! Pure selection transitions.

use std::collections::HashSet;
use std::hash::Hash;

/// Single-expand transition.
///
/// Activating the open id clears the value when `collapsible`, and leaves it alone
/// otherwise. Any other id replaces the value outright.
pub fn toggle_single<K: Clone + PartialEq>(
    current: Option<&K>,
    target: &K,
    collapsible: bool,
) -> Option<K> {
    match current {
        Some(open) if open == target => {
            if collapsible {
                None
            } else {
                Some(open.clone())
            }
        }
        _ => Some(target.clone()),
    }
}

/// Multi-expand / row selection transition: flips membership of `target`.
pub fn toggle_member<K: Clone + Eq + Hash>(current: &HashSet<K>, target: &K) -> HashSet<K> {
    let mut next = current.clone();
    if !next.remove(target) {
        next.insert(target.clone());
    }
    next
}

/// Whether `selected` already contains every id in `all`.
pub fn is_complete<K: Eq + Hash>(selected: &HashSet<K>, all: &[K]) -> bool {
    all.iter().all(|id| selected.contains(id))
}

/// Select-all transition.
///
/// Selects every id in `all` unless they are all selected already, in which case
/// the selection is cleared. Never merges with a partial selection.
pub fn toggle_all<K: Clone + Eq + Hash>(current: &HashSet<K>, all: &[K]) -> HashSet<K> {
    if is_complete(current, all) {
        HashSet::new()
    } else {
        all.iter().cloned().collect()
    }
}
