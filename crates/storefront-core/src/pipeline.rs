//! The filter → sort → paginate query pipeline.
//!
//! Every stage is a pure function over borrowed products. None of them fail:
//! an out-of-range page simply yields an empty slice.

use std::cmp::Reverse;

use serde::Serialize;

use crate::products::Product;
use crate::query::{Filters, QueryState, SortOrder};

/// One page of results plus the counters the pagination controls need.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    /// Items across all pages.
    pub total: usize,
    /// `ceil(total / page_size)`; zero when `total` is zero.
    pub total_pages: usize,
    /// 1-based index of the first item on this page, clamped to `total`.
    pub range_start: usize,
    /// 1-based index of the last item on this page, clamped to `total`.
    pub range_end: usize,
}

/// Keeps the products that pass every active predicate in `filters`.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], filters: &Filters) -> Vec<&'a Product> {
    let needle = filters.search.as_deref().map(str::to_lowercase);

    products
        .iter()
        .filter(|p| filters.price_min.is_none_or(|min| p.price >= min))
        .filter(|p| filters.price_max.is_none_or(|max| p.price <= max))
        .filter(|p| filters.brands.is_empty() || filters.brands.contains(&p.brand))
        .filter(|p| filters.category.as_ref().is_none_or(|c| &p.category == c))
        .filter(|p| !filters.in_stock_only || p.in_stock)
        .filter(|p| needle.as_deref().is_none_or(|n| p.matches_search(n)))
        .collect()
}

/// Sorts in place. The sort is stable, so ties keep their input order and
/// [`SortOrder::None`] leaves the slice untouched.
pub fn sort_products(products: &mut [&Product], order: SortOrder) {
    match order {
        SortOrder::None => {}
        SortOrder::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        // One lowercased key per product.
        SortOrder::NameAsc => products.sort_by_cached_key(|p| p.name.to_lowercase()),
        SortOrder::NameDesc => products.sort_by_cached_key(|p| Reverse(p.name.to_lowercase())),
    }
}

/// Slices out 1-based `page` of `page_size` items.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: u32, page_size: u32) -> PageSlice<T> {
    let total = items.len();
    let page_size = page_size.max(1) as usize;
    let page = page.max(1) as usize;

    let total_pages = total.div_ceil(page_size);
    let offset = (page - 1).saturating_mul(page_size);
    let end = offset.saturating_add(page_size).min(total);

    let page_items = if offset < total {
        items[offset..end].to_vec()
    } else {
        Vec::new()
    };

    PageSlice {
        items: page_items,
        total,
        total_pages,
        range_start: offset.saturating_add(1).min(total),
        range_end: end,
    }
}

/// Runs the whole pipeline for `state` and clones out the visible page.
#[must_use]
pub fn run_query(products: &[Product], state: &QueryState) -> PageSlice<Product> {
    let mut matched = filter_products(products, &state.filters);
    sort_products(&mut matched, state.sort);
    let page = paginate(&matched, state.page, state.page_size);

    PageSlice {
        items: page.items.into_iter().cloned().collect(),
        total: page.total,
        total_pages: page.total_pages,
        range_start: page.range_start,
        range_end: page.range_end,
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
