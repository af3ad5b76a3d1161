//! Collection state for the product list
//!
//! The state holds everything the display list depends on. Products are only
//! ever appended; the display list is recomputed from scratch on demand.

use std::collections::BTreeSet;

use crate::catalog::{self, SortKey};
use crate::product::Product;

/// Accumulated products plus the active view options
#[derive(Debug, Clone)]
pub struct CollectionState {
    products: Vec<Product>,
    filters: BTreeSet<String>,
    search: String,
    sort: SortKey,
    page: u32,
    loaded: bool,
}

impl Default for CollectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionState {
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            filters: BTreeSet::new(),
            search: String::new(),
            sort: SortKey::None,
            page: 1,
            loaded: false,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn filters(&self) -> &BTreeSet<String> {
        &self.filters
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// The highest page merged so far (1 before anything is loaded)
    pub fn page(&self) -> u32 {
        self.page
    }

    /// The page a "load more" request should ask for
    pub fn next_page(&self) -> u32 {
        if !self.loaded {
            1
        } else {
            self.page + 1
        }
    }

    /// Append a successfully fetched page and record it as the current page
    pub fn merge_page(&mut self, page: u32, products: Vec<Product>) {
        self.products.extend(products);
        self.page = if self.loaded { self.page.max(page) } else { page.max(1) };
        self.loaded = true;
    }

    /// Add or remove a category filter
    ///
    /// Returns `true` when the filter set changed.
    pub fn toggle_filter(&mut self, category: &str, checked: bool) -> bool {
        if checked {
            self.filters.insert(category.to_string())
        } else {
            self.filters.remove(category)
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Whether the "load more" trigger should be offered
    ///
    /// Narrowed views hide it: any applied category or a non-blank search.
    pub fn can_load_more(&self) -> bool {
        self.filters.is_empty() && self.search.trim().is_empty()
    }

    /// The current display list
    pub fn display_list(&self) -> Vec<&Product> {
        catalog::compute(&self.products, &self.filters, &self.search, self.sort)
    }

    /// Distinct categories across everything fetched so far
    pub fn categories(&self) -> Vec<String> {
        catalog::categories(&self.products)
    }
}
