//! Index arithmetic for roving focus.

/// Index after moving forward, wrapping from the last item to the first.
///
/// With no active index the first item is chosen. An index past the end of a
/// shrunken list counts as no active index. Returns `None` for an empty list.
pub fn next_index(active: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match active.filter(|&i| i < len) {
        Some(i) => Some((i + 1) % len),
        None => Some(0),
    }
}

/// Index after moving backward, wrapping from the first item to the last.
///
/// With no active index the last item is chosen.
pub fn previous_index(active: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match active.filter(|&i| i < len) {
        Some(i) => Some((i + len - 1) % len),
        None => Some(len - 1),
    }
}

/// Index after moving forward, stopping at the last item.
///
/// With no active index the first item is chosen. A stale index is pulled back
/// onto the last item.
pub fn next_index_clamped(active: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match active {
        Some(i) => Some((i + 1).min(len - 1)),
        None => Some(0),
    }
}

/// Index after moving backward, stopping at the first item.
///
/// With no active index the first item is chosen.
pub fn previous_index_clamped(active: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match active {
        Some(i) => Some(i.min(len - 1).saturating_sub(1)),
        None => Some(0),
    }
}

/// Expanded flag plus the active index of a roving-focus list.
///
/// The item list itself lives elsewhere; every movement takes the current length
/// so it always works on a consistent snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RovingFocus {
    expanded: bool,
    active: Option<usize>,
}

impl RovingFocus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Expand. The active index always starts over.
    pub fn open(&mut self) {
        self.expanded = true;
        self.active = None;
    }

    /// Collapse and forget the active index.
    pub fn collapse(&mut self) {
        self.expanded = false;
        self.active = None;
    }

    /// Flip the expanded flag, resetting the active index either way.
    pub fn toggle(&mut self) {
        if self.expanded {
            self.collapse();
        } else {
            self.open();
        }
    }

    /// Move forward. Returns false when collapsed or the list is empty.
    pub fn move_next(&mut self, len: usize) -> bool {
        self.step(next_index(self.active, len))
    }

    /// Move backward. Returns false when collapsed or the list is empty.
    pub fn move_previous(&mut self, len: usize) -> bool {
        self.step(previous_index(self.active, len))
    }

    /// Move forward without wrapping.
    pub fn move_next_clamped(&mut self, len: usize) -> bool {
        self.step(next_index_clamped(self.active, len))
    }

    /// Move backward without wrapping.
    pub fn move_previous_clamped(&mut self, len: usize) -> bool {
        self.step(previous_index_clamped(self.active, len))
    }

    /// Point at `index` directly (pointer hover). Ignored when out of range or
    /// collapsed.
    pub fn set_active(&mut self, index: usize, len: usize) -> bool {
        if !self.expanded || index >= len {
            return false;
        }
        self.active = Some(index);
        true
    }

    fn step(&mut self, next: Option<usize>) -> bool {
        if !self.expanded || next.is_none() {
            return false;
        }
        self.active = next;
        true
    }
}
