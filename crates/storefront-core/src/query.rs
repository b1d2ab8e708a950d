//! View state driving the query pipeline, plus its URL query-string form.
//!
//! Recognised query-string keys: `q`, `brand` (repeatable), `category`,
//! `min`, `max`, `stock`, `sort`, `view`, `page`. Unknown keys are ignored so
//! host pages can carry their own parameters alongside.

use std::fmt;
use std::str::FromStr;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Characters left unescaped in query values: RFC 3986 unreserved set.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized value for `{param}`: {value:?}")]
pub struct QueryParamError {
    pub param: String,
    pub value: String,
}

impl QueryParamError {
    fn new(param: &str, value: &str) -> Self {
        Self {
            param: param.to_owned(),
            value: value.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    None,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 5] = [
        SortOrder::None,
        SortOrder::PriceAsc,
        SortOrder::PriceDesc,
        SortOrder::NameAsc,
        SortOrder::NameDesc,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::None => "none",
            SortOrder::PriceAsc => "price-asc",
            SortOrder::PriceDesc => "price-desc",
            SortOrder::NameAsc => "name-asc",
            SortOrder::NameDesc => "name-desc",
        }
    }

    /// Label shown in the sort select.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::None => "Featured",
            SortOrder::PriceAsc => "Price: low to high",
            SortOrder::PriceDesc => "Price: high to low",
            SortOrder::NameAsc => "Name: A to Z",
            SortOrder::NameDesc => "Name: Z to A",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = QueryParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The empty string is what an unselected `<select>` reports.
        match s {
            "" | "none" | "default" => Ok(SortOrder::None),
            "price-asc" => Ok(SortOrder::PriceAsc),
            "price-desc" => Ok(SortOrder::PriceDesc),
            "name-asc" => Ok(SortOrder::NameAsc),
            "name-desc" => Ok(SortOrder::NameDesc),
            other => Err(QueryParamError::new("sort", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = QueryParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            other => Err(QueryParamError::new("view", other)),
        }
    }
}

/// Active filter predicates. Unset fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    /// Empty means "any brand".
    pub brands: Vec<String>,
    pub category: Option<String>,
    pub in_stock_only: bool,
    /// Trimmed search text; never `Some("")`.
    pub search: Option<String>,
}

impl Filters {
    /// Returns `true` when at least one predicate would exclude products.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.price_min.is_some()
            || self.price_max.is_some()
            || !self.brands.is_empty()
            || self.category.is_some()
            || self.in_stock_only
            || self.search.is_some()
    }

    /// Shallow-merges `patch` into `self`. Fields the patch leaves `None` are
    /// kept as they are.
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(price_min) = patch.price_min {
            self.price_min = price_min;
        }
        if let Some(price_max) = patch.price_max {
            self.price_max = price_max;
        }
        if let Some(brands) = patch.brands {
            self.brands = brands;
        }
        if let Some(category) = patch.category {
            self.category = category.filter(|c| !c.trim().is_empty());
        }
        if let Some(in_stock_only) = patch.in_stock_only {
            self.in_stock_only = in_stock_only;
        }
        if let Some(search) = patch.search {
            self.search = search
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty());
        }
    }
}

/// A partial update for [`Filters`].
///
/// The outer `Option` says whether the field is touched at all; for nullable
/// fields the inner `Option` is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub price_min: Option<Option<Decimal>>,
    pub price_max: Option<Option<Decimal>>,
    pub brands: Option<Vec<String>>,
    pub category: Option<Option<String>>,
    pub in_stock_only: Option<bool>,
    pub search: Option<Option<String>>,
}

impl FilterPatch {
    #[must_use]
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(Some(text.into())),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brands = Some(brands.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_price_min(mut self, min: Option<Decimal>) -> Self {
        self.price_min = Some(min);
        self
    }

    #[must_use]
    pub fn with_price_max(mut self, max: Option<Decimal>) -> Self {
        self.price_max = Some(max);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn with_in_stock_only(mut self, in_stock_only: bool) -> Self {
        self.in_stock_only = Some(in_stock_only);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Filters, sort, view mode and the current page.
///
/// `page` is 1-based and `page_size` is fixed for the lifetime of the state.
/// Mutation goes through the catalog store so that the page-reset rules hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    pub filters: Filters,
    pub sort: SortOrder,
    pub view: ViewMode,
    pub page: u32,
    pub page_size: u32,
}

impl QueryState {
    /// Fresh state on page 1. A zero `page_size` is bumped to 1.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            filters: Filters::default(),
            sort: SortOrder::None,
            view: ViewMode::Grid,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Builds a state from decoded query-string pairs.
    ///
    /// # Errors
    ///
    /// Returns [`QueryParamError`] for an unparseable `sort`, `view`, `page`,
    /// `min` or `max` value.
    pub fn from_query_pairs<I, K, V>(pairs: I, page_size: u32) -> Result<Self, QueryParamError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut state = Self::new(page_size);
        let mut patch = FilterPatch::default();
        let mut brands = Vec::new();

        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "q" | "search" => patch.search = Some(Some(value.to_owned())),
                "brand" => {
                    if !value.is_empty() {
                        brands.push(value.to_owned());
                    }
                }
                "category" => patch.category = Some(Some(value.to_owned())),
                "min" => patch.price_min = Some(parse_price("min", value)?),
                "max" => patch.price_max = Some(parse_price("max", value)?),
                "stock" => patch.in_stock_only = Some(matches!(value, "1" | "true" | "on")),
                "sort" => state.sort = value.parse()?,
                "view" => state.view = value.parse()?,
                "page" => {
                    state.page = value
                        .parse::<u32>()
                        .ok()
                        .filter(|p| *p > 0)
                        .ok_or_else(|| QueryParamError::new("page", value))?;
                }
                _ => {}
            }
        }

        if !brands.is_empty() {
            patch.brands = Some(brands);
        }
        state.filters.apply(patch);
        Ok(state)
    }

    /// Encodes the state as a query string (without the leading `?`). Default
    /// values are omitted, so a fresh state encodes to `""`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        let f = &self.filters;
        if let Some(search) = &f.search {
            pairs.push(("q", search.clone()));
        }
        for brand in &f.brands {
            pairs.push(("brand", brand.clone()));
        }
        if let Some(category) = &f.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(min) = f.price_min {
            pairs.push(("min", min.to_string()));
        }
        if let Some(max) = f.price_max {
            pairs.push(("max", max.to_string()));
        }
        if f.in_stock_only {
            pairs.push(("stock", "1".to_owned()));
        }
        if self.sort != SortOrder::None {
            pairs.push(("sort", self.sort.as_str().to_owned()));
        }
        if self.view != ViewMode::Grid {
            pairs.push(("view", self.view.as_str().to_owned()));
        }
        if self.page > 1 {
            pairs.push(("page", self.page.to_string()));
        }

        pairs
            .into_iter()
            .map(|(k, v)| format!("{k}={}", utf8_percent_encode(&v, QUERY_VALUE)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn parse_price(param: &str, value: &str) -> Result<Option<Decimal>, QueryParamError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<Decimal>()
        .ok()
        .filter(|d| !d.is_sign_negative())
        .map(Some)
        .ok_or_else(|| QueryParamError::new(param, value))
}

/// Splits a raw query string (with or without a leading `?`) into decoded
/// key/value pairs. `+` decodes to a space.
#[must_use]
pub fn parse_query_string(raw: &str) -> Vec<(String, String)> {
    raw.trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
