//! The page surface the renderer writes into.
//!
//! A page is a set of independently addressed regions, each behind a stable
//! element id. The renderer only ever replaces a region's content wholesale,
//! so repeated renders never stack markup.

use std::collections::HashMap;
use std::fmt::Write as _;

use thiserror::Error;

/// Stable element ids for every region the renderer writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Product cards/rows and the loading, empty and error states.
    ProductsContainer,
    /// Search box, sort select and grid/list toggle.
    Toolbar,
    FacetSidebar,
    ResultCount,
    Pagination,
    FallbackNotice,
    /// Single-product view on the detail page.
    DetailContainer,
}

impl Hook {
    /// Document order used when serialising a [`MemoryDocument`].
    pub const ALL: [Hook; 7] = [
        Hook::FallbackNotice,
        Hook::Toolbar,
        Hook::FacetSidebar,
        Hook::ResultCount,
        Hook::ProductsContainer,
        Hook::Pagination,
        Hook::DetailContainer,
    ];

    /// The regions a listing page carries.
    pub const LISTING: [Hook; 6] = [
        Hook::FallbackNotice,
        Hook::Toolbar,
        Hook::FacetSidebar,
        Hook::ResultCount,
        Hook::ProductsContainer,
        Hook::Pagination,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Hook::ProductsContainer => "products-container",
            Hook::Toolbar => "catalog-toolbar",
            Hook::FacetSidebar => "facet-sidebar",
            Hook::ResultCount => "result-count",
            Hook::Pagination => "pagination",
            Hook::FallbackNotice => "fallback-notice",
            Hook::DetailContainer => "product-detail",
        }
    }
}

/// Element ids of the interactive controls rendered inside the toolbar and
/// facet sidebar. Hosts map DOM events on these elements to
/// [`UiEvent`](crate::UiEvent)s.
pub mod control {
    pub const SEARCH_INPUT: &str = "search-input";
    pub const SORT_SELECT: &str = "sort-select";
    pub const VIEW_GRID: &str = "view-grid";
    pub const VIEW_LIST: &str = "view-list";
    /// Shared `name` of the brand checkboxes.
    pub const BRAND_FILTER: &str = "brand-filter";
    pub const CATEGORY_SELECT: &str = "category-select";
    pub const PRICE_MIN: &str = "price-min";
    pub const PRICE_MAX: &str = "price-max";
    pub const IN_STOCK_ONLY: &str = "in-stock-only";
    pub const CLEAR_FILTERS: &str = "clear-filters";
}

/// Attribute carrying a product id on every rendered card, row and detail
/// view. Click delegation reads it back instead of holding product objects.
pub const PRODUCT_ID_ATTR: &str = "data-product-id";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("render target #{0} is missing from the page")]
    TargetMissing(&'static str),
}

/// Something that owns addressable page regions.
pub trait Document {
    fn has_region(&self, hook: Hook) -> bool;

    /// Replaces the entire content of `hook`'s region.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TargetMissing`] when the page has no such region.
    fn replace_region(&mut self, hook: Hook, html: String) -> Result<(), RenderError>;
}

/// In-memory page used by the CLI and by tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    regions: HashMap<Hook, String>,
}

impl MemoryDocument {
    /// A page carrying exactly `hooks`, each initially empty.
    #[must_use]
    pub fn with_regions(hooks: impl IntoIterator<Item = Hook>) -> Self {
        Self {
            regions: hooks.into_iter().map(|h| (h, String::new())).collect(),
        }
    }

    #[must_use]
    pub fn listing_page() -> Self {
        Self::with_regions(Hook::LISTING)
    }

    #[must_use]
    pub fn detail_page() -> Self {
        Self::with_regions([Hook::FallbackNotice, Hook::DetailContainer])
    }

    #[must_use]
    pub fn region(&self, hook: Hook) -> Option<&str> {
        self.regions.get(&hook).map(String::as_str)
    }

    /// Serialises the page as a standalone HTML document.
    #[must_use]
    pub fn to_html(&self, title: &str) -> String {
        let mut out = String::from("<!doctype html>\n<html lang=\"en\">\n<head>\n");
        let _ = writeln!(out, "<meta charset=\"utf-8\">");
        let _ = writeln!(out, "<title>{}</title>", crate::render::escape(title));
        out.push_str("</head>\n<body>\n<main class=\"catalog\">\n");
        for hook in Hook::ALL {
            if let Some(content) = self.regions.get(&hook) {
                let _ = writeln!(out, "<div id=\"{}\">{content}</div>", hook.id());
            }
        }
        out.push_str("</main>\n</body>\n</html>\n");
        out
    }
}

impl Document for MemoryDocument {
    fn has_region(&self, hook: Hook) -> bool {
        self.regions.contains_key(&hook)
    }

    fn replace_region(&mut self, hook: Hook, html: String) -> Result<(), RenderError> {
        let slot = self
            .regions
            .get_mut(&hook)
            .ok_or(RenderError::TargetMissing(hook.id()))?;
        *slot = html;
        Ok(())
    }
}
