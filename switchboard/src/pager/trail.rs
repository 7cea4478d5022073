//! Breadcrumb trail collapsing.

use serde::{Deserialize, Serialize};

/// One slot in a collapsed breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailItem<T> {
    Item(T),
    /// Placeholder for the `hidden` items between the first and the last two.
    Collapsed { hidden: usize },
}

impl<T> TrailItem<T> {
    pub fn item(&self) -> Option<&T> {
        match self {
            TrailItem::Item(item) => Some(item),
            TrailItem::Collapsed { .. } => None,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        matches!(self, TrailItem::Collapsed { .. })
    }
}

/// Shorten a breadcrumb trail to its first item, a placeholder, and its last two
/// items once it holds more than `max_items`.
///
/// `max_items == 0` never collapses. Trails of three items or fewer are kept
/// whole since the placeholder would hide nothing.
///
/// ```
/// use switchboard::pager::{TrailItem, collapse_trail};
///
/// let trail = collapse_trail(&["home", "docs", "api", "v2", "pager"], 4);
/// assert_eq!(
///     trail,
///     vec![
///         TrailItem::Item("home"),
///         TrailItem::Collapsed { hidden: 2 },
///         TrailItem::Item("v2"),
///         TrailItem::Item("pager"),
///     ]
/// );
/// ```
pub fn collapse_trail<T: Clone>(items: &[T], max_items: usize) -> Vec<TrailItem<T>> {
    let len = items.len();
    if max_items == 0 || len <= max_items || len <= 3 {
        return items.iter().cloned().map(TrailItem::Item).collect();
    }

    let mut trail = Vec::with_capacity(4);
    trail.push(TrailItem::Item(items[0].clone()));
    trail.push(TrailItem::Collapsed { hidden: len - 3 });
    trail.extend(items[len - 2..].iter().cloned().map(TrailItem::Item));
    trail
}
