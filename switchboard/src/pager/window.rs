//! Page-window generation.

use serde::{Deserialize, Serialize};

/// One slot in a pager's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageItem {
    /// A 1-based page number.
    Page(usize),
    /// A gap standing in for one or more hidden pages.
    Ellipsis,
}

impl PageItem {
    pub fn page(self) -> Option<usize> {
        match self {
            PageItem::Page(page) => Some(page),
            PageItem::Ellipsis => None,
        }
    }

    pub fn is_ellipsis(self) -> bool {
        self == PageItem::Ellipsis
    }
}

/// Compute which page numbers and ellipses a pager shows.
///
/// `current` is 1-based and must already be within `1..=total`; it is not clamped
/// here. Up to `2 * sibling_count + 3` pages are listed verbatim. Past that, the
/// first and last pages are always shown and the pages around `current` are
/// separated from them by ellipses.
///
/// ```
/// use switchboard::pager::{PageItem::*, generate_window};
///
/// assert_eq!(
///     generate_window(5, 10, 1),
///     vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
/// );
/// ```
pub fn generate_window(current: usize, total: usize, sibling_count: usize) -> Vec<PageItem> {
    let span = sibling_count * 2 + 3;
    if total <= span {
        return (1..=total).map(PageItem::Page).collect();
    }

    let left_edge = current.saturating_sub(sibling_count).max(1);
    let right_edge = (current + sibling_count).min(total);

    let need_left = left_edge > 2;
    let need_right = right_edge < total - 1;

    let mut window = Vec::with_capacity(span + 2);
    match (need_left, need_right) {
        (false, true) => {
            window.extend((1..=span).map(PageItem::Page));
            window.push(PageItem::Ellipsis);
            window.push(PageItem::Page(total));
        }
        (true, false) => {
            window.push(PageItem::Page(1));
            window.push(PageItem::Ellipsis);
            window.extend((total - span + 1..=total).map(PageItem::Page));
        }
        _ => {
            window.push(PageItem::Page(1));
            window.push(PageItem::Ellipsis);
            window.extend((left_edge..=right_edge).map(PageItem::Page));
            window.push(PageItem::Ellipsis);
            window.push(PageItem::Page(total));
        }
    }
    window
}
