use std::fmt;

use futures::future::BoxFuture;
use rust_decimal::Decimal;
use storefront_client::{FetchError, RawPayload};
use storefront_core::{Filters, SortOrder, ViewMode};

/// A discrete input from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Raw search-box text; applied after the debounce delay.
    SearchInput(String),
    SortChanged(SortOrder),
    ViewChanged(ViewMode),
    PageSelected(u32),
    BrandToggled { brand: String, checked: bool },
    CategorySelected(Option<String>),
    PriceMinChanged(Option<Decimal>),
    PriceMaxChanged(Option<Decimal>),
    InStockToggled(bool),
    ClearFilters,
    /// Re-fetch the collection.
    Refresh,
    /// Re-fetch with the server pre-filtering by `Filters`.
    RefreshWith(Filters),
    /// The error panel's retry button.
    Retry,
    /// The error panel's sample-data button.
    ShowSamples,
    /// A click anywhere inside a rendered product; carries the id read off
    /// the `data-product-id` attribute.
    ProductClicked(String),
}

/// Why a fetch was started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadTrigger {
    Initial,
    Refresh,
    Retry,
    Query(Filters),
}

impl LoadTrigger {
    /// Filters sent to the server with the request.
    #[must_use]
    pub fn server_filters(&self) -> Option<&Filters> {
        match self {
            LoadTrigger::Query(filters) => Some(filters),
            LoadTrigger::Initial | LoadTrigger::Refresh | LoadTrigger::Retry => None,
        }
    }
}

/// A started fetch. Drive `request` to completion and hand the result back
/// with [`CatalogController::finish_load`](super::CatalogController::finish_load).
pub struct LoadTicket {
    pub token: u64,
    pub request: BoxFuture<'static, Result<RawPayload, FetchError>>,
}

impl fmt::Debug for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadTicket")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

/// Work the controller hands back to its host.
#[derive(Debug)]
pub enum Effect {
    Fetch(LoadTicket),
    /// Leave the page for a product's detail page.
    Navigate { url: String },
}
