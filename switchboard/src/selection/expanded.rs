//! Shared expansion value for disclosure-style controls.

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::transitions::{toggle_member, toggle_single};

/// Expansion mode for disclosure-style controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum SelectionMode {
    /// At most one item open at a time.
    Single {
        /// Whether the open item can be closed again, leaving nothing open.
        collapsible: bool,
    },
    /// Any number of items open.
    Multiple,
}

impl Default for SelectionMode {
    fn default() -> Self {
        SelectionMode::Single { collapsible: true }
    }
}

/// Which items are open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expanded<K: Eq + Hash> {
    Single(Option<K>),
    Multiple(HashSet<K>),
}

impl<K: Clone + Eq + Hash> Expanded<K> {
    /// Nothing open, shaped for `mode`.
    pub fn empty(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Single { .. } => Expanded::Single(None),
            SelectionMode::Multiple => Expanded::Multiple(HashSet::new()),
        }
    }

    /// Check if `id` is open.
    pub fn contains(&self, id: &K) -> bool {
        match self {
            Expanded::Single(open) => open.as_ref() == Some(id),
            Expanded::Multiple(open) => open.contains(id),
        }
    }

    /// Number of open items.
    pub fn len(&self) -> usize {
        match self {
            Expanded::Single(open) => usize::from(open.is_some()),
            Expanded::Multiple(open) => open.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get all open ids.
    pub fn ids(&self) -> Vec<K> {
        match self {
            Expanded::Single(open) => open.iter().cloned().collect(),
            Expanded::Multiple(open) => open.iter().cloned().collect(),
        }
    }

    /// Next value after activating `target`.
    ///
    /// A value whose shape does not match `mode` is first reshaped, keeping what
    /// it had open. Reshaping a multi-value into single mode keeps one of its
    /// open ids, and which one is unspecified since sets carry no order; supply
    /// a single-shaped value when that matters.
    pub fn activate(&self, target: &K, mode: SelectionMode) -> Self {
        match (mode, self) {
            (SelectionMode::Single { collapsible }, Expanded::Single(open)) => {
                Expanded::Single(toggle_single(open.as_ref(), target, collapsible))
            }
            (SelectionMode::Single { collapsible }, Expanded::Multiple(open)) => {
                // Unordered: keeps an arbitrary member.
                let first = open.iter().next();
                Expanded::Single(toggle_single(first, target, collapsible))
            }
            (SelectionMode::Multiple, Expanded::Multiple(open)) => {
                Expanded::Multiple(toggle_member(open, target))
            }
            (SelectionMode::Multiple, Expanded::Single(open)) => {
                let current: HashSet<K> = open.iter().cloned().collect();
                Expanded::Multiple(toggle_member(&current, target))
            }
        }
    }
}
