use rust_decimal::Decimal;
use storefront_core::{FilterPatch, SortOrder, ViewMode};

use super::*;

fn product(id: &str, brand: &str, name: &str, price: i64, category: &str) -> Product {
    Product {
        id: id.to_string(),
        brand: brand.to_string(),
        model: name.to_string(),
        name: name.to_string(),
        price: Decimal::new(price, 0),
        old_price: None,
        image_url: String::new(),
        images: Vec::new(),
        category: category.to_string(),
        in_stock: true,
        rating: 0,
        sku: String::new(),
        description: String::new(),
        url: String::new(),
    }
}

fn loaded_store(count: usize, page_size: u32) -> CatalogStore {
    let mut store = CatalogStore::new(page_size);
    store.load(
        (1..=count)
            .map(|i| product(&i.to_string(), "A", &format!("Item {i}"), 1, "general"))
            .collect(),
    );
    store
}

#[test]
fn load_recomputes_facets() {
    let mut store = CatalogStore::new(12);
    store.load(vec![
        product("1", "Sony", "XM5", 349, "headphones"),
        product("2", "Bose", "QC", 279, "headphones"),
        product("3", "JBL", "Flip", 129, "speakers"),
    ]);
    let facets = store.facets();
    assert_eq!(facets.brands, vec!["Bose", "JBL", "Sony"]);
    assert_eq!(facets.categories, vec!["headphones", "speakers"]);
    assert_eq!(facets.price_range.min, Decimal::new(129, 0));
    assert_eq!(facets.price_range.max, Decimal::new(349, 0));
}

#[test]
fn load_resets_page_but_keeps_filters_sort_and_view() {
    let mut store = loaded_store(30, 10);
    store.set_filter(FilterPatch::search("item"));
    store.set_sort(SortOrder::NameDesc);
    store.set_view(ViewMode::List);
    store.set_page(3);

    store.load(Vec::new());

    let state = store.state();
    assert_eq!(state.page, 1);
    assert_eq!(state.filters.search.as_deref(), Some("item"));
    assert_eq!(state.sort, SortOrder::NameDesc);
    assert_eq!(state.view, ViewMode::List);
}

#[test]
fn set_filter_and_set_sort_reset_page() {
    let mut store = loaded_store(30, 10);

    store.set_page(3);
    store.set_filter(FilterPatch::default().with_in_stock_only(true));
    assert_eq!(store.state().page, 1);

    store.set_page(3);
    store.set_sort(SortOrder::PriceAsc);
    assert_eq!(store.state().page, 1);
}

#[test]
fn set_page_and_set_view_leave_filters_and_sort() {
    let mut store = loaded_store(30, 10);
    store.set_filter(FilterPatch::default().with_brands(["A"]));
    store.set_sort(SortOrder::PriceDesc);
    let before = store.state().clone();

    store.set_page(2);
    store.set_view(ViewMode::List);

    let after = store.state();
    assert_eq!(after.filters, before.filters);
    assert_eq!(after.sort, before.sort);
    assert_eq!(after.page, 2);
    assert_eq!(after.view, ViewMode::List);
}

#[test]
fn set_page_zero_is_page_one() {
    let mut store = loaded_store(5, 2);
    store.set_page(0);
    assert_eq!(store.state().page, 1);
}

#[test]
fn reset_clears_filters_and_sort_but_keeps_view() {
    let mut store = loaded_store(30, 10);
    store.set_filter(FilterPatch::search("x").with_brands(["A"]));
    store.set_sort(SortOrder::NameAsc);
    store.set_view(ViewMode::List);
    store.set_page(2);

    store.reset();

    let state = store.state();
    assert!(!state.filters.is_active());
    assert_eq!(state.sort, SortOrder::None);
    assert_eq!(state.page, 1);
    assert_eq!(state.view, ViewMode::List);
}

#[test]
fn view_reflects_latest_mutation() {
    let mut store = CatalogStore::new(12);
    store.load(vec![
        product("1", "A", "Foo", 10, "general"),
        product("2", "B", "Bar", 200, "general"),
    ]);

    store.set_filter(
        FilterPatch::default()
            .with_brands(["A"])
            .with_price_max(Some(Decimal::new(50, 0))),
    );
    let view = store.view();
    assert_eq!(view.total, 1);
    assert_eq!(view.products[0].id, "1");

    store.set_filter(
        FilterPatch::search("foo")
            .with_brands(Vec::<String>::new())
            .with_price_max(None),
    );
    let view = store.view();
    assert_eq!(view.total, 1);
    assert_eq!(view.products[0].id, "1");
    assert_eq!(view.state, *store.state());
}

#[test]
fn view_paginates_current_state() {
    let mut store = loaded_store(25, 12);
    store.set_page(3);
    let view = store.view();
    assert_eq!(view.products.len(), 1);
    assert_eq!(view.total_pages, 3);
    assert_eq!((view.range_start, view.range_end), (25, 25));
}

#[test]
fn find_looks_up_by_id() {
    let store = loaded_store(3, 12);
    assert_eq!(store.find("2").map(|p| p.name.as_str()), Some("Item 2"));
    assert!(store.find("9").is_none());
}
