use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product after normalization, independent of whichever upstream
/// payload shape it arrived in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identifier, unique within one loaded collection.
    pub id: String,
    pub brand: String,
    /// Model line without the brand, e.g. `"WH-1000XM5"`.
    pub model: String,
    /// Display title. Derived as `"{brand} {model}"` when upstream omits it.
    pub name: String,
    /// Current price, never negative. Currency is applied only at render time.
    pub price: Decimal,
    /// Pre-discount price. Kept even when it is not above `price`.
    pub old_price: Option<Decimal>,
    /// Primary image, already resolved against the configured image base.
    pub image_url: String,
    /// Every resolved image for the gallery widget; `image_url` is the first.
    pub images: Vec<String>,
    pub category: String,
    pub in_stock: bool,
    /// Star rating clamped to `0..=5`.
    pub rating: u8,
    pub sku: String,
    pub description: String,
    /// Detail-page link.
    pub url: String,
}

impl Product {
    /// Returns `true` when `old_price` is set and strictly above `price`.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.old_price.is_some_and(|old| old > self.price)
    }

    /// Whole-number discount percentage, or `None` when there is no discount.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        if !self.has_discount() {
            return None;
        }
        let old = self.old_price?;
        let ratio = (old - self.price) / old * Decimal::ONE_HUNDRED;
        ratio.round().to_u32()
    }

    /// Case-insensitive substring match against `name`, `brand` or `model`.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        [&self.name, &self.brand, &self.model]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}
