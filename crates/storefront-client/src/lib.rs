//! Remote catalog access: the HTTP collaborator, its error taxonomy, and the
//! normalizer that turns arbitrary upstream payloads into [`Product`]s.
//!
//! [`Product`]: storefront_core::Product

pub mod client;
pub mod envelope;
pub mod error;
mod fields;
pub mod normalize;
pub mod source;

pub use client::CatalogClient;
pub use envelope::{normalize_api_response, Envelope};
pub use error::{ErrorClass, FetchError};
pub use normalize::{normalize_product, normalize_products, resolve_image_url, NormalizedBatch};
pub use source::{FixtureSource, ProductSource, RawPayload};
