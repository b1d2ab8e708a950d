//! Lenient field lookups over untyped JSON records.
//!
//! Each helper takes an ordered list of candidate keys and returns the first
//! one holding a usable value. `null`, empty strings and values of the wrong
//! kind count as absent, so the chain moves on to the next key.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

pub(crate) type Record = Map<String, Value>;

/// First non-empty string under `keys`. Numbers are stringified, and objects
/// contribute their `name` field (e.g. `{"brand": {"name": "Sony"}}`).
pub(crate) fn text(record: &Record, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find_map(as_text)
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_owned()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(obj) => obj.get("name").and_then(as_text),
        _ => None,
    }
}

/// First value under `keys` that reads as a number, either a JSON number or
/// a numeric string such as `"12.99"`, `"$1,299.00"` or `"12,50"`.
pub(crate) fn decimal(record: &Record, keys: &[&str]) -> Option<Decimal> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find_map(as_decimal)
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(Decimal::from)
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => parse_price_text(s),
        _ => None,
    }
}

fn parse_price_text(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    // Without a '.', a comma is the decimal separator only when one or two
    // digits follow the last one ("12,50"); "1,299" is a thousands group.
    let decimal_comma = !cleaned.contains('.')
        && cleaned
            .rsplit_once(',')
            .is_some_and(|(_, tail)| (1..=2).contains(&tail.len()));
    let cleaned = if decimal_comma {
        cleaned.replace(',', ".")
    } else {
        cleaned.replace(',', "")
    };
    cleaned.parse::<Decimal>().ok()
}

/// First value under `keys` that reads as a boolean. Accepts JSON booleans,
/// `0`/`1`, and common string spellings.
pub(crate) fn flag(record: &Record, keys: &[&str]) -> Option<bool> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find_map(as_flag)
}

fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "in_stock" | "instock" => Some(true),
            "false" | "0" | "no" | "out_of_stock" | "outofstock" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Image references under `keys`, flattened: a string, an `{url|src}`
/// object, or an array of either.
pub(crate) fn image_refs(record: &Record, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .flat_map(|value| match value {
            Value::Array(items) => items.iter().filter_map(as_image_ref).collect(),
            other => as_image_ref(other).into_iter().collect::<Vec<_>>(),
        })
        .collect()
}

fn as_image_ref(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_owned()).filter(|s| !s.is_empty()),
        Value::Object(obj) => ["url", "src", "path"]
            .iter()
            .filter_map(|key| obj.get(*key))
            .find_map(as_image_ref),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn text_skips_null_and_empty_candidates() {
        let r = record(json!({"brand": null, "manufacturer": "  ", "vendor": "Sony"}));
        assert_eq!(
            text(&r, &["brand", "manufacturer", "vendor"]).as_deref(),
            Some("Sony")
        );
    }

    #[test]
    fn text_reads_numbers_and_named_objects() {
        let r = record(json!({"id": 42, "brand": {"name": "Bose"}}));
        assert_eq!(text(&r, &["id"]).as_deref(), Some("42"));
        assert_eq!(text(&r, &["brand"]).as_deref(), Some("Bose"));
    }

    #[test]
    fn decimal_reads_numbers_and_strings() {
        let r = record(json!({"a": 12, "b": 12.5, "c": "$1,299.00", "d": "12,50", "e": "n/a"}));
        assert_eq!(decimal(&r, &["a"]), Some(Decimal::new(12, 0)));
        assert_eq!(decimal(&r, &["b"]), Some(Decimal::new(125, 1)));
        assert_eq!(decimal(&r, &["c"]), Some(Decimal::new(129_900, 2)));
        assert_eq!(decimal(&r, &["d"]), Some(Decimal::new(1250, 2)));
        assert_eq!(decimal(&r, &["e"]), None);
    }

    #[test]
    fn decimal_tells_thousands_groups_from_decimal_comma() {
        let r = record(json!({
            "a": "$1,299",
            "b": "1,299",
            "c": "12,345,678",
            "d": "12,50",
            "e": "9,5"
        }));
        assert_eq!(decimal(&r, &["a"]), Some(Decimal::new(1299, 0)));
        assert_eq!(decimal(&r, &["b"]), Some(Decimal::new(1299, 0)));
        assert_eq!(decimal(&r, &["c"]), Some(Decimal::new(12_345_678, 0)));
        assert_eq!(decimal(&r, &["d"]), Some(Decimal::new(1250, 2)));
        assert_eq!(decimal(&r, &["e"]), Some(Decimal::new(95, 1)));
    }

    #[test]
    fn decimal_falls_through_unparseable_candidates() {
        let r = record(json!({"price": "call us", "currentPrice": 9}));
        assert_eq!(
            decimal(&r, &["price", "currentPrice"]),
            Some(Decimal::new(9, 0))
        );
    }

    #[test]
    fn flag_accepts_common_spellings() {
        let r = record(json!({"a": false, "b": 0, "c": "out_of_stock", "d": "maybe", "e": 1}));
        assert_eq!(flag(&r, &["a"]), Some(false));
        assert_eq!(flag(&r, &["b"]), Some(false));
        assert_eq!(flag(&r, &["c"]), Some(false));
        assert_eq!(flag(&r, &["d"]), None);
        assert_eq!(flag(&r, &["e"]), Some(true));
    }

    #[test]
    fn image_refs_flattens_strings_objects_and_arrays() {
        let r = record(json!({
            "image": "a.jpg",
            "images": ["b.jpg", {"url": "c.jpg"}, {"src": "d.jpg"}, 7, ""]
        }));
        assert_eq!(
            image_refs(&r, &["image", "images"]),
            vec!["a.jpg", "b.jpg", "c.jpg", "d.jpg"]
        );
    }
}
