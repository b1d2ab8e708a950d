//! Fixed local dataset rendered when the remote catalog is unreachable.

use rust_decimal::Decimal;

use crate::products::Product;

struct SampleRow {
    id: &'static str,
    brand: &'static str,
    model: &'static str,
    category: &'static str,
    price_cents: i64,
    old_price_cents: Option<i64>,
    in_stock: bool,
    rating: u8,
    description: &'static str,
}

const SAMPLE_ROWS: &[SampleRow] = &[
    SampleRow {
        id: "sample-1",
        brand: "Sony",
        model: "WH-1000XM5",
        category: "headphones",
        price_cents: 34_900,
        old_price_cents: Some(39_900),
        in_stock: true,
        rating: 5,
        description: "Over-ear wireless headphones with adaptive noise cancelling.",
    },
    SampleRow {
        id: "sample-2",
        brand: "Bose",
        model: "QuietComfort Ultra",
        category: "headphones",
        price_cents: 42_900,
        old_price_cents: None,
        in_stock: true,
        rating: 4,
        description: "Immersive spatial audio with all-day comfort.",
    },
    SampleRow {
        id: "sample-3",
        brand: "Apple",
        model: "AirPods Pro 2",
        category: "earbuds",
        price_cents: 24_900,
        old_price_cents: Some(24_900),
        in_stock: true,
        rating: 5,
        description: "In-ear buds with active noise cancellation and USB-C case.",
    },
    SampleRow {
        id: "sample-4",
        brand: "Sennheiser",
        model: "Momentum 4",
        category: "headphones",
        price_cents: 29_995,
        old_price_cents: Some(37_995),
        in_stock: false,
        rating: 4,
        description: "Sixty hours of battery life and a tuned dynamic driver.",
    },
    SampleRow {
        id: "sample-5",
        brand: "JBL",
        model: "Flip 6",
        category: "speakers",
        price_cents: 12_995,
        old_price_cents: None,
        in_stock: true,
        rating: 4,
        description: "Portable waterproof speaker with punchy bass.",
    },
    SampleRow {
        id: "sample-6",
        brand: "Sony",
        model: "SRS-XB100",
        category: "speakers",
        price_cents: 5_999,
        old_price_cents: Some(6_999),
        in_stock: true,
        rating: 3,
        description: "Compact speaker with a strap, sized for a backpack.",
    },
    SampleRow {
        id: "sample-7",
        brand: "Samsung",
        model: "Galaxy Buds3 Pro",
        category: "earbuds",
        price_cents: 24_999,
        old_price_cents: None,
        in_stock: false,
        rating: 4,
        description: "Blade design earbuds with intelligent ANC.",
    },
    SampleRow {
        id: "sample-8",
        brand: "Marshall",
        model: "Emberton III",
        category: "speakers",
        price_cents: 16_999,
        old_price_cents: None,
        in_stock: true,
        rating: 5,
        description: "Stereo sound in a rugged, iconic body.",
    },
];

/// Returns the fixed sample catalog in a stable order.
#[must_use]
pub fn sample_products() -> Vec<Product> {
    SAMPLE_ROWS
        .iter()
        .map(|row| {
            let image = format!("images/samples/{}.jpg", row.id);
            Product {
                id: row.id.to_owned(),
                brand: row.brand.to_owned(),
                model: row.model.to_owned(),
                name: format!("{} {}", row.brand, row.model),
                price: Decimal::new(row.price_cents, 2),
                old_price: row.old_price_cents.map(|c| Decimal::new(c, 2)),
                image_url: image.clone(),
                images: vec![image],
                category: row.category.to_owned(),
                in_stock: row.in_stock,
                rating: row.rating,
                sku: format!("{}-{}", row.brand, row.model)
                    .to_uppercase()
                    .replace(' ', "-"),
                description: row.description.to_owned(),
                url: format!("product.html?id={}", row.id),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn sample_ids_are_unique_and_non_empty() {
        let products = sample_products();
        let ids: HashSet<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), products.len());
        assert!(products.iter().all(|p| !p.id.is_empty() && !p.brand.is_empty()));
    }

    #[test]
    fn sample_set_is_deterministic() {
        assert_eq!(sample_products(), sample_products());
    }

    #[test]
    fn sample_set_covers_discount_and_stock_cases() {
        let products = sample_products();
        assert!(products.iter().any(Product::has_discount));
        assert!(products.iter().any(|p| p.old_price.is_some() && !p.has_discount()));
        assert!(products.iter().any(|p| !p.in_stock));
    }
}
