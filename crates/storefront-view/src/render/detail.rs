use std::fmt::Write as _;

use storefront_core::Product;

use super::cards::{badges, price_block};
use super::html::{escape, stars};
use crate::dom::PRODUCT_ID_ATTR;

/// Detail view. The gallery list is plain markup; carousel behaviour is left
/// to whichever widget the host page attaches to `.product-gallery`.
pub(super) fn product_detail(product: &Product, currency: &str) -> String {
    let mut out = format!(
        "<article class=\"product-detail\" {PRODUCT_ID_ATTR}=\"{}\"><ul class=\"product-gallery\">",
        escape(&product.id)
    );
    for (i, image) in product.images.iter().enumerate() {
        let _ = write!(
            out,
            "<li><img src=\"{}\" alt=\"{} image {}\"></li>",
            escape(image),
            escape(&product.name),
            i + 1
        );
    }
    let _ = write!(
        out,
        "</ul><div class=\"product-detail__info\">\
         <p class=\"product-detail__brand\">{brand}</p>\
         <h1 class=\"product-detail__name\">{name}</h1>{rating}{badges}{price}\
         <dl class=\"product-detail__specs\">\
         <dt>Model</dt><dd>{model}</dd><dt>SKU</dt><dd>{sku}</dd>\
         <dt>Category</dt><dd>{category}</dd><dt>Availability</dt><dd>{stock}</dd></dl>\
         <p class=\"product-detail__description\">{description}</p></div></article>",
        brand = escape(&product.brand),
        name = escape(&product.name),
        rating = stars(product.rating),
        badges = badges(product),
        price = price_block(product, currency),
        model = escape(&product.model),
        sku = escape(&product.sku),
        category = escape(&product.category),
        stock = if product.in_stock { "In stock" } else { "Out of stock" },
        description = escape(&product.description),
    );
    out
}
