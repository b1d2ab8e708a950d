//! Normalization from raw catalog records to [`storefront_core::Product`].
//!
//! Field resolution chains, first usable key wins:
//!
//! | Field | Keys | Fallback |
//! |---|---|---|
//! | id | `id`, `_id`, `productId`, `product_id` | slug of brand + model |
//! | brand | `brand`, `manufacturer`, `vendor` | record dropped |
//! | model | `model`, `title`, `name` | empty |
//! | name | `name` | `"{brand} {model}"` |
//! | price | `price`, `currentPrice`, `current_price` | `0` |
//! | oldPrice | `oldPrice`, `old_price`, `originalPrice`, `original_price` | none |
//! | rating | `rating`, `stars` | configured default |
//! | sku | `sku`, `article` | `BRAND-MODEL` |
//! | category | `category`, `categoryName`, `category_name` | configured default |
//! | inStock | `in_stock`, `inStock`, `available` | `true` |
//! | description | `description`, `desc` | configured placeholder |
//! | url | `url`, `link` | `{detailPagePath}?id={id}` |
//! | images | `image_url`, `imageUrl`, `image`, `img`, `thumbnail`, `images`, `gallery` | configured default image |

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use storefront_core::{CatalogConfig, Product};

use crate::client::encode_path_segment;
use crate::envelope::has_identifying_field;
use crate::fields::{decimal, flag, image_refs, text, Record};

/// `scheme:` prefix per RFC 3986, e.g. `https:` or `data:`.
static URL_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("valid scheme regex"));

const ID_KEYS: &[&str] = &["id", "_id", "productId", "product_id"];
const BRAND_KEYS: &[&str] = &["brand", "manufacturer", "vendor"];
const MODEL_KEYS: &[&str] = &["model", "title", "name"];

static NON_SKU_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("valid sku regex"));


/// Products that survived normalization plus a count of records dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    pub products: Vec<Product>,
    pub dropped: usize,
}

/// Normalizes one raw record, or returns `None` when it cannot yield a
/// product with a non-empty `id` and `brand`.
#[must_use]
pub fn normalize_product(raw: &Value, config: &CatalogConfig) -> Option<Product> {
    match try_normalize(raw, config) {
        Ok(product) => Some(product),
        Err(reason) => {
            tracing::debug!(reason, record = %abbreviate(raw), "dropping catalog record");
            None
        }
    }
}

/// Normalizes every record, dropping unusable ones and any record whose `id`
/// repeats an earlier one.
#[must_use]
pub fn normalize_products(raw: &[Value], config: &CatalogConfig) -> NormalizedBatch {
    let mut seen = HashSet::new();
    let mut batch = NormalizedBatch::default();

    for record in raw {
        match normalize_product(record, config) {
            Some(product) if seen.insert(product.id.clone()) => batch.products.push(product),
            Some(product) => {
                tracing::debug!(id = %product.id, "dropping duplicate catalog record");
                batch.dropped += 1;
            }
            None => batch.dropped += 1,
        }
    }

    if batch.dropped > 0 {
        tracing::warn!(
            dropped = batch.dropped,
            kept = batch.products.len(),
            "some catalog records could not be normalized"
        );
    }
    batch
}

fn try_normalize(raw: &Value, config: &CatalogConfig) -> Result<Product, &'static str> {
    let record = raw.as_object().ok_or("record is not an object")?;
    if !has_identifying_field(record) {
        return Err("record has no id, name or title");
    }

    let brand = text(record, BRAND_KEYS).ok_or("record has no brand")?;
    let model = text(record, MODEL_KEYS).unwrap_or_default();
    let name = text(record, &["name"]).unwrap_or_else(|| join_title(&brand, &model));

    let id = resolve_id(record, &brand, &model).ok_or("record has no usable id")?;

    let price = decimal(record, &["price", "currentPrice", "current_price"])
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO);
    let old_price = decimal(
        record,
        &["oldPrice", "old_price", "originalPrice", "original_price"],
    );

    let rating = decimal(record, &["rating", "stars"])
        .and_then(|r| r.round().to_i64())
        .map_or(config.default_rating, |r| {
            u8::try_from(r.clamp(0, 5)).unwrap_or(config.default_rating)
        });

    let sku = text(record, &["sku", "article"]).unwrap_or_else(|| derive_sku(&brand, &model));
    let category = text(record, &["category", "categoryName", "category_name"])
        .unwrap_or_else(|| config.default_category.clone());
    // Only an explicit "no" marks a product unavailable.
    let in_stock = flag(record, &["in_stock", "inStock", "available"]).unwrap_or(true);
    let description = text(record, &["description", "desc"])
        .unwrap_or_else(|| config.placeholder_description.clone());
    let url = text(record, &["url", "link"]).unwrap_or_else(|| detail_url(config, &id));

    let images = resolve_images(record, config);
    let image_url = images
        .first()
        .cloned()
        .unwrap_or_else(|| config.default_image.clone());

    Ok(Product {
        id,
        brand,
        model,
        name,
        price,
        old_price,
        image_url,
        images,
        category,
        in_stock,
        rating,
        sku,
        description,
        url,
    })
}

/// The id [`normalize_product`] gives `raw`: an explicit id field, else the
/// brand and model slug. Lets lookups by a listed id find the raw record.
pub(crate) fn record_id(raw: &Value) -> Option<String> {
    let record = raw.as_object()?;
    let brand = text(record, BRAND_KEYS).unwrap_or_default();
    let model = text(record, MODEL_KEYS).unwrap_or_default();
    resolve_id(record, &brand, &model)
}

fn resolve_id(record: &Record, brand: &str, model: &str) -> Option<String> {
    text(record, ID_KEYS)
        .or_else(|| Some(derive_sku(brand, model).to_lowercase()).filter(|s| !s.is_empty()))
}

fn join_title(brand: &str, model: &str) -> String {
    format!("{brand} {model}").trim().to_owned()
}

fn derive_sku(brand: &str, model: &str) -> String {
    let joined = format!("{brand} {model}");
    NON_SKU_CHARS
        .replace_all(&joined, "-")
        .trim_matches('-')
        .to_uppercase()
}

fn detail_url(config: &CatalogConfig, id: &str) -> String {
    format!("{}?id={}", config.detail_page_path, encode_path_segment(id))
}

fn resolve_images(record: &Record, config: &CatalogConfig) -> Vec<String> {
    let mut refs = image_refs(
        record,
        &["image_url", "imageUrl", "image", "img", "thumbnail"],
    );
    refs.extend(image_refs(record, &["images", "gallery"]));

    let mut seen = HashSet::new();
    let resolved: Vec<String> = refs
        .iter()
        .map(|r| resolve_image_url(Some(r), config))
        .filter(|url| seen.insert(url.clone()))
        .collect();

    if resolved.is_empty() {
        vec![config.default_image.clone()]
    } else {
        resolved
    }
}

/// Resolves an image reference from a product record.
///
/// - absolute URLs (`https://…`, `data:…`, protocol-relative `//…`) are kept
///   verbatim;
/// - other non-empty values are storage paths joined onto `baseImageUrl`;
/// - missing or blank values become `defaultImage`.
#[must_use]
pub fn resolve_image_url(raw: Option<&str>, config: &CatalogConfig) -> String {
    let Some(path) = raw.map(str::trim).filter(|p| !p.is_empty()) else {
        return config.default_image.clone();
    };

    if path.starts_with("//") || URL_SCHEME.is_match(path) {
        return path.to_owned();
    }

    format!(
        "{}/{}",
        config.base_image_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Short single-line rendering of a record for log output.
fn abbreviate(raw: &Value) -> String {
    let mut rendered = raw.to_string();
    if rendered.len() > 120 {
        let cut = (0..=120)
            .rev()
            .find(|&i| rendered.is_char_boundary(i))
            .unwrap_or(0);
        rendered.truncate(cut);
        rendered.push('…');
    }
    rendered
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
