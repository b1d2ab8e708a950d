//! Unwrapping of catalog API response envelopes.
//!
//! The upstream response shape is not contractually fixed. Observed shapes:
//!
//! - a bare array of products: `[{...}, {...}]`
//! - an envelope object holding the array under one of `data`, `products`,
//!   `items`, `results` (probed in that order)
//! - a single product object (detail endpoints): `{"id": 7, "name": ...}`
//!
//! Anything else is [`Envelope::Unrecognized`] and contributes no records.

use serde_json::Value;

/// Keys probed, in order, for the product array inside an envelope object.
pub const ENVELOPE_KEYS: [&str; 4] = ["data", "products", "items", "results"];

/// Fields whose presence marks an object as a single product record.
const IDENTIFYING_KEYS: [&str; 3] = ["id", "name", "title"];

#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Array(Vec<Value>),
    Wrapped { key: &'static str, items: Vec<Value> },
    Single(Value),
    Unrecognized,
}

impl Envelope {
    #[must_use]
    pub fn classify(raw: Value) -> Self {
        match raw {
            Value::Array(items) => Envelope::Array(items),
            Value::Object(mut map) => {
                for key in ENVELOPE_KEYS {
                    if matches!(map.get(key), Some(Value::Array(_))) {
                        if let Some(Value::Array(items)) = map.remove(key) {
                            return Envelope::Wrapped { key, items };
                        }
                    }
                }
                if has_identifying_field(&map) {
                    Envelope::Single(Value::Object(map))
                } else {
                    Envelope::Unrecognized
                }
            }
            _ => Envelope::Unrecognized,
        }
    }

    /// `false` only for [`Envelope::Unrecognized`]. A recognized envelope
    /// may still hold zero records.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Envelope::Unrecognized)
    }

    #[must_use]
    pub fn into_items(self) -> Vec<Value> {
        match self {
            Envelope::Array(items) | Envelope::Wrapped { items, .. } => items,
            Envelope::Single(item) => vec![item],
            Envelope::Unrecognized => Vec::new(),
        }
    }
}

pub(crate) fn has_identifying_field(map: &serde_json::Map<String, Value>) -> bool {
    IDENTIFYING_KEYS
        .iter()
        .any(|key| map.get(*key).is_some_and(|v| !v.is_null()))
}

/// Flattens any recognized envelope into its product records.
#[must_use]
pub fn normalize_api_response(raw: Value) -> Vec<Value> {
    Envelope::classify(raw).into_items()
}
