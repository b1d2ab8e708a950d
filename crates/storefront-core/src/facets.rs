use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::products::Product;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

/// Filterable dimensions derived from the loaded collection.
///
/// Read-only: rebuild with [`FacetSet::from_products`] whenever the collection
/// changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetSet {
    /// Sorted, distinct brand names.
    pub brands: Vec<String>,
    /// Sorted, distinct categories.
    pub categories: Vec<String>,
    /// Price bounds over the whole collection; both zero when it is empty.
    pub price_range: PriceRange,
}

impl FacetSet {
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        let brands: BTreeSet<&str> = products.iter().map(|p| p.brand.as_str()).collect();
        let categories: BTreeSet<&str> = products.iter().map(|p| p.category.as_str()).collect();

        let price_range = products
            .iter()
            .map(|p| p.price)
            .fold(None, |acc: Option<PriceRange>, price| {
                Some(match acc {
                    None => PriceRange {
                        min: price,
                        max: price,
                    },
                    Some(r) => PriceRange {
                        min: r.min.min(price),
                        max: r.max.max(price),
                    },
                })
            })
            .unwrap_or_default();

        Self {
            brands: brands.into_iter().map(str::to_owned).collect(),
            categories: categories.into_iter().map(str::to_owned).collect(),
            price_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_products;

    #[test]
    fn empty_collection_has_zero_price_range() {
        let facets = FacetSet::from_products(&[]);
        assert!(facets.brands.is_empty());
        assert!(facets.categories.is_empty());
        assert_eq!(facets.price_range.min, Decimal::ZERO);
        assert_eq!(facets.price_range.max, Decimal::ZERO);
    }

    #[test]
    fn brands_are_sorted_and_distinct() {
        let mut products = sample_products();
        products[0].brand = "Zeta".to_string();
        products[1].brand = "Alpha".to_string();
        products[2].brand = "Alpha".to_string();
        let facets = FacetSet::from_products(&products);

        let mut expected = facets.brands.clone();
        expected.sort();
        expected.dedup();
        assert_eq!(facets.brands, expected);
        assert_eq!(facets.brands.first().map(String::as_str), Some("Alpha"));
        assert_eq!(facets.brands.last().map(String::as_str), Some("Zeta"));
    }

    #[test]
    fn price_range_spans_collection() {
        let products = sample_products();
        let facets = FacetSet::from_products(&products);
        let min = products.iter().map(|p| p.price).min().unwrap();
        let max = products.iter().map(|p| p.price).max().unwrap();
        assert_eq!(facets.price_range, PriceRange { min, max });
    }
}
