//! Pager state.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::value::ValueStore;

use super::window::{PageItem, generate_window};

/// Pager configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    /// Pages shown on each side of the current page.
    pub sibling_count: usize,
    /// Initial page size.
    pub page_size: usize,
    /// Page sizes offered to the user.
    pub page_size_options: Vec<usize>,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            sibling_count: 1,
            page_size: 10,
            page_size_options: vec![10, 20, 50, 100],
        }
    }
}

impl PagerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of siblings around the current page.
    pub fn sibling_count(mut self, count: usize) -> Self {
        self.sibling_count = count;
        self
    }

    /// Set the initial page size.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Set the page sizes offered to the user.
    pub fn page_size_options(mut self, options: impl Into<Vec<usize>>) -> Self {
        self.page_size_options = options.into();
        self
    }
}

/// Paged navigation state.
///
/// The current page lives in a [`ValueStore`], so a pager is controlled when the
/// caller owns the page number (see [`Pager::controlled`]) and uncontrolled
/// otherwise. Page numbers are 1-based.
#[derive(Debug, Clone)]
pub struct Pager {
    page: ValueStore<usize>,
    page_size: ValueStore<usize>,
    total_pages: Arc<AtomicUsize>,
    config: PagerConfig,
}

impl Pager {
    /// An uncontrolled pager starting on page 1.
    pub fn new(total_pages: usize) -> Self {
        Self::build(None, total_pages, PagerConfig::default())
    }

    /// A pager whose page number is owned by the caller.
    pub fn controlled(page: usize, total_pages: usize) -> Self {
        Self::build(Some(page), total_pages, PagerConfig::default())
    }

    /// Replace the configuration. Resets the page size to the configured one.
    pub fn with_config(self, config: PagerConfig) -> Self {
        let page = self.page;
        Self {
            page_size: ValueStore::uncontrolled(config.page_size),
            page,
            total_pages: self.total_pages,
            config,
        }
    }

    fn build(page: Option<usize>, total_pages: usize, config: PagerConfig) -> Self {
        Self {
            page: ValueStore::new(page, 1),
            page_size: ValueStore::uncontrolled(config.page_size),
            total_pages: Arc::new(AtomicUsize::new(total_pages)),
            config,
        }
    }

    /// The store holding the current page.
    pub fn store(&self) -> &ValueStore<usize> {
        &self.page
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    pub fn page(&self) -> usize {
        self.page.value()
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages.load(Ordering::SeqCst)
    }

    pub fn sibling_count(&self) -> usize {
        self.config.sibling_count
    }

    pub fn has_previous(&self) -> bool {
        self.page() > 1
    }

    pub fn has_next(&self) -> bool {
        self.page() < self.total_pages()
    }

    /// The page window for the current page.
    pub fn window(&self) -> Vec<PageItem> {
        let total = self.total_pages();
        let current = self.page().clamp(1, total.max(1));
        generate_window(current, total, self.config.sibling_count)
    }

    pub fn page_size(&self) -> usize {
        self.page_size.value()
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.config.page_size_options
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Go to `page`, clamped to the valid range. Returns false when there are no
    /// pages at all.
    pub fn go_to(&self, page: usize) -> bool {
        let total = self.total_pages();
        if total == 0 {
            return false;
        }
        let page = page.clamp(1, total);
        log::debug!("pager: go to page {page} of {total}");
        self.page.commit(page);
        true
    }

    pub fn first(&self) -> bool {
        self.has_previous() && self.go_to(1)
    }

    pub fn previous(&self) -> bool {
        self.has_previous() && self.go_to(self.page() - 1)
    }

    pub fn next(&self) -> bool {
        self.has_next() && self.go_to(self.page() + 1)
    }

    pub fn last(&self) -> bool {
        self.has_next() && self.go_to(self.total_pages())
    }

    /// Re-supply the caller-owned page of a controlled pager.
    pub fn set_page(&self, page: usize) -> bool {
        self.page.supply(page)
    }

    /// Update the page count. The current page is left as is.
    pub fn set_total_pages(&self, total_pages: usize) {
        self.total_pages.store(total_pages, Ordering::SeqCst);
    }

    /// Change the page size. Zero is rejected.
    pub fn set_page_size(&self, size: usize) -> bool {
        if size == 0 {
            return false;
        }
        self.page_size.commit(size);
        true
    }

    /// Listen for page changes.
    pub fn on_page_change(&self, listener: impl Fn(&usize) + Send + Sync + 'static) {
        self.page.on_change(listener);
    }

    /// Listen for page size changes.
    pub fn on_page_size_change(&self, listener: impl Fn(&usize) + Send + Sync + 'static) {
        self.page_size.on_change(listener);
    }
}
