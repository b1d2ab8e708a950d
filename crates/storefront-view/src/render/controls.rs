//! Regions outside the products container that mirror the query state.

use std::fmt::Write as _;

use storefront_core::{QueryState, SortOrder, ViewMode};

use super::html::{checked, escape, money, selected};
use crate::dom::control;
use crate::store::ViewResult;

pub(super) fn result_count(view: &ViewResult) -> String {
    match view.total {
        0 => "<p class=\"result-count\">0 products</p>".to_owned(),
        1 => "<p class=\"result-count\">1 product</p>".to_owned(),
        total => format!(
            "<p class=\"result-count\">Showing {}–{} of {total} products</p>",
            view.range_start, view.range_end
        ),
    }
}

/// Pages linked on each side of the current one.
const PAGE_WINDOW: usize = 2;

/// Page links, with previous/next. The first and last pages are always
/// linked; the rest are limited to a window around the current page, with a
/// gap marker where pages are skipped. Empty when everything fits on one page.
pub(super) fn pagination(view: &ViewResult) -> String {
    if view.total_pages <= 1 {
        return String::new();
    }
    let current = view.state.page as usize;
    let last = view.total_pages;
    let mut out = String::from("<nav class=\"pagination\" aria-label=\"Pagination\"><ul>");

    if current > 1 {
        out.push_str(&page_link(&view.state, current - 1, "Previous", "pagination__prev"));
    }
    let near = current.saturating_sub(PAGE_WINDOW).max(1)..=(current + PAGE_WINDOW).min(last);
    let mut previous = 0;
    for page in std::iter::once(1).chain(near).chain(std::iter::once(last)) {
        if page <= previous {
            continue;
        }
        if page > previous + 1 {
            out.push_str("<li><span class=\"pagination__gap\" aria-hidden=\"true\">&hellip;</span></li>");
        }
        previous = page;
        if page == current {
            let _ = write!(
                out,
                "<li><span class=\"pagination__page is-current\" aria-current=\"page\">{page}</span></li>"
            );
        } else {
            out.push_str(&page_link(&view.state, page, &page.to_string(), "pagination__page"));
        }
    }
    if current < last {
        out.push_str(&page_link(&view.state, current + 1, "Next", "pagination__next"));
    }

    out.push_str("</ul></nav>");
    out
}

fn page_link(state: &QueryState, page: usize, label: &str, class: &str) -> String {
    let mut target = state.clone();
    target.page = u32::try_from(page).unwrap_or(u32::MAX);
    format!(
        "<li><a class=\"{class}\" href=\"?{href}\" data-page=\"{page}\">{label}</a></li>",
        href = escape(&target.to_query_string()),
        label = escape(label),
    )
}

pub(super) fn toolbar(state: &QueryState) -> String {
    let mut out = format!(
        "<form class=\"catalog-toolbar\" role=\"search\">\
         <input type=\"search\" id=\"{search}\" name=\"q\" placeholder=\"Search products\" value=\"{value}\">\
         <select id=\"{sort}\" name=\"sort\">",
        search = control::SEARCH_INPUT,
        sort = control::SORT_SELECT,
        value = escape(state.filters.search.as_deref().unwrap_or_default()),
    );
    for order in SortOrder::ALL {
        let _ = write!(
            out,
            "<option value=\"{}\"{}>{}</option>",
            order.as_str(),
            selected(order == state.sort),
            order.label()
        );
    }
    out.push_str("</select><div class=\"view-toggle\">");
    for (mode, id, label) in [
        (ViewMode::Grid, control::VIEW_GRID, "Grid"),
        (ViewMode::List, control::VIEW_LIST, "List"),
    ] {
        let _ = write!(
            out,
            "<button type=\"button\" id=\"{id}\" data-view=\"{}\" aria-pressed=\"{}\">{label}</button>",
            mode.as_str(),
            mode == state.view
        );
    }
    out.push_str("</div></form>");
    out
}

pub(super) fn facet_sidebar(view: &ViewResult, currency: &str) -> String {
    let filters = &view.state.filters;
    let facets = &view.facets;
    let mut out = String::from("<aside class=\"facets\">");

    if !facets.brands.is_empty() {
        out.push_str("<fieldset class=\"facets__brands\"><legend>Brand</legend>");
        for brand in &facets.brands {
            let _ = write!(
                out,
                "<label><input type=\"checkbox\" name=\"{name}\" value=\"{value}\"{on}> {value}</label>",
                name = control::BRAND_FILTER,
                value = escape(brand),
                on = checked(filters.brands.contains(brand)),
            );
        }
        out.push_str("</fieldset>");
    }

    if !facets.categories.is_empty() {
        let _ = write!(
            out,
            "<label class=\"facets__category\">Category <select id=\"{}\" name=\"category\">\
             <option value=\"\"{}>All</option>",
            control::CATEGORY_SELECT,
            selected(filters.category.is_none())
        );
        for category in &facets.categories {
            let _ = write!(
                out,
                "<option value=\"{value}\"{on}>{value}</option>",
                value = escape(category),
                on = selected(filters.category.as_ref() == Some(category)),
            );
        }
        out.push_str("</select></label>");
    }

    let range = &facets.price_range;
    let _ = write!(
        out,
        "<fieldset class=\"facets__price\"><legend>Price</legend>\
         <input type=\"number\" id=\"{min_id}\" name=\"min\" min=\"0\" placeholder=\"{min_hint}\" value=\"{min}\">\
         <input type=\"number\" id=\"{max_id}\" name=\"max\" min=\"0\" placeholder=\"{max_hint}\" value=\"{max}\">\
         </fieldset>",
        min_id = control::PRICE_MIN,
        max_id = control::PRICE_MAX,
        min_hint = money(currency, range.min),
        max_hint = money(currency, range.max),
        min = filters.price_min.map(|d| d.to_string()).unwrap_or_default(),
        max = filters.price_max.map(|d| d.to_string()).unwrap_or_default(),
    );

    let _ = write!(
        out,
        "<label class=\"facets__stock\"><input type=\"checkbox\" id=\"{}\" name=\"stock\" value=\"1\"{}> In stock only</label>",
        control::IN_STOCK_ONLY,
        checked(filters.in_stock_only)
    );

    if filters.is_active() {
        let _ = write!(
            out,
            "<button type=\"button\" id=\"{}\">Clear filters</button>",
            control::CLEAR_FILTERS
        );
    }
    out.push_str("</aside>");
    out
}
