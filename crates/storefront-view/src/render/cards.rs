//! Product cards (grid) and rows (list).

use std::fmt::Write as _;

use storefront_core::Product;

use super::html::{escape, money, stars};
use crate::dom::PRODUCT_ID_ATTR;

pub(super) fn grid_card(product: &Product, currency: &str) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<article class=\"product-card\" {PRODUCT_ID_ATTR}=\"{id}\">\
         <a class=\"product-card__link\" href=\"{url}\">\
         <img class=\"product-card__image\" src=\"{img}\" alt=\"{name}\" loading=\"lazy\">",
        id = escape(&product.id),
        url = escape(&product.url),
        img = escape(&product.image_url),
        name = escape(&product.name),
    );
    out.push_str(&badges(product));
    let _ = write!(
        out,
        "<p class=\"product-card__brand\">{brand}</p>\
         <h3 class=\"product-card__name\">{name}</h3></a>{rating}{price}</article>",
        brand = escape(&product.brand),
        name = escape(&product.name),
        rating = stars(product.rating),
        price = price_block(product, currency),
    );
    out
}

pub(super) fn list_row(product: &Product, currency: &str) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<li class=\"product-row\" {PRODUCT_ID_ATTR}=\"{id}\">\
         <img class=\"product-row__image\" src=\"{img}\" alt=\"{name}\" loading=\"lazy\">\
         <div class=\"product-row__body\">\
         <h3 class=\"product-row__name\"><a href=\"{url}\">{name}</a></h3>\
         <p class=\"product-row__meta\">{brand} · {category} · SKU {sku}</p>\
         <p class=\"product-row__description\">{description}</p>{rating}</div>",
        id = escape(&product.id),
        img = escape(&product.image_url),
        url = escape(&product.url),
        name = escape(&product.name),
        brand = escape(&product.brand),
        category = escape(&product.category),
        sku = escape(&product.sku),
        description = escape(&product.description),
        rating = stars(product.rating),
    );
    let _ = write!(
        out,
        "<div class=\"product-row__aside\">{}{}</div></li>",
        badges(product),
        price_block(product, currency)
    );
    out
}

/// Discount and stock badges. The discount badge needs an old price strictly
/// above the current one.
pub(super) fn badges(product: &Product) -> String {
    let mut out = String::new();
    if let Some(percent) = product.discount_percent() {
        let _ = write!(out, "<span class=\"badge badge--discount\">-{percent}%</span>");
    }
    if !product.in_stock {
        out.push_str("<span class=\"badge badge--stock\">Out of stock</span>");
    }
    out
}

pub(super) fn price_block(product: &Product, currency: &str) -> String {
    let mut out = format!(
        "<p class=\"price\"><span class=\"price__current\">{}</span>",
        money(currency, product.price)
    );
    if product.has_discount() {
        if let Some(old) = product.old_price {
            let _ = write!(out, "<s class=\"price__old\">{}</s>", money(currency, old));
        }
    }
    out.push_str("</p>");
    out
}
