//! URL assembly for catalog API requests.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use storefront_core::Filters;

/// Everything but RFC 3986 unreserved characters is escaped in a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Joins an endpoint path onto the API base with exactly one `/` between
/// them. An endpoint that is already an absolute URL is returned as-is.
#[must_use]
pub fn join_endpoint(base: &str, endpoint: &str) -> String {
    if endpoint.contains("://") {
        return endpoint.to_owned();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

#[must_use]
pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Appends active filters as query parameters. Parameter names match the
/// storefront's own page URLs.
pub(super) fn append_filters(url: &mut reqwest::Url, filters: &Filters) {
    if !filters.is_active() {
        return;
    }
    let mut pairs = url.query_pairs_mut();
    if let Some(search) = &filters.search {
        pairs.append_pair("q", search);
    }
    for brand in &filters.brands {
        pairs.append_pair("brand", brand);
    }
    if let Some(category) = &filters.category {
        pairs.append_pair("category", category);
    }
    if let Some(min) = filters.price_min {
        pairs.append_pair("min", &min.to_string());
    }
    if let Some(max) = filters.price_max {
        pairs.append_pair("max", &max.to_string());
    }
    if filters.in_stock_only {
        pairs.append_pair("stock", "1");
    }
}
