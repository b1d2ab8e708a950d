//! The catalog store: loaded products, their facets, and the query state.

use serde::Serialize;
use storefront_core::{
    run_query, FacetSet, FilterPatch, Product, QueryState, SortOrder, ViewMode,
};

/// Everything the renderer needs for one paint, computed fresh on every
/// [`CatalogStore::view`] call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResult {
    /// The visible page, filtered and sorted.
    pub products: Vec<Product>,
    pub total_pages: usize,
    pub range_start: usize,
    pub range_end: usize,
    /// Matches across all pages.
    pub total: usize,
    pub facets: FacetSet,
    pub state: QueryState,
}

/// Owns the loaded collection and the [`QueryState`].
///
/// Mutations enforce the page rules: changing filters or sort returns to
/// page 1, changing page or view leaves filters and sort alone.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    products: Vec<Product>,
    facets: FacetSet,
    state: QueryState,
}

impl CatalogStore {
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self::with_state(QueryState::new(page_size))
    }

    /// An empty store starting from `state`, e.g. one restored from the
    /// page URL.
    #[must_use]
    pub fn with_state(state: QueryState) -> Self {
        Self {
            products: Vec::new(),
            facets: FacetSet::default(),
            state,
        }
    }

    /// Replaces the collection and recomputes facets. Filters, sort and view
    /// are kept; the page returns to 1.
    pub fn load(&mut self, products: Vec<Product>) {
        self.facets = FacetSet::from_products(&products);
        self.products = products;
        self.state.page = 1;
    }

    pub fn set_filter(&mut self, patch: FilterPatch) {
        self.state.filters.apply(patch);
        self.state.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.state.sort = sort;
        self.state.page = 1;
    }

    /// Pages are 1-based; zero is treated as 1.
    pub fn set_page(&mut self, page: u32) {
        self.state.page = page.max(1);
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.state.view = view;
    }

    /// Clears filters and sort and returns to page 1. The view mode is kept.
    pub fn reset(&mut self) {
        self.state.filters = storefront_core::Filters::default();
        self.state.sort = SortOrder::None;
        self.state.page = 1;
    }

    #[must_use]
    pub fn view(&self) -> ViewResult {
        let page = run_query(&self.products, &self.state);
        ViewResult {
            products: page.items,
            total_pages: page.total_pages,
            range_start: page.range_start,
            range_end: page.range_end,
            total: page.total,
            facets: self.facets.clone(),
            state: self.state.clone(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn facets(&self) -> &FacetSet {
        &self.facets
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
