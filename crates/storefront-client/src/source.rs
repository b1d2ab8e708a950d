//! The narrow interface the catalog controller fetches through.

use std::path::Path;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use serde_json::Value;
use storefront_core::Filters;

use crate::envelope::normalize_api_response;
use crate::error::FetchError;
use crate::normalize::record_id;

/// Untyped response body; shape is resolved by [`crate::Envelope`].
pub type RawPayload = Value;

/// Remote product data provider.
///
/// Futures are `'static` so a caller can hold an in-flight request while it
/// keeps handling other events. Implementations reject with
/// [`FetchError::Status`] for non-2xx responses and with a status-less error
/// for transport failures.
pub trait ProductSource: Send + Sync {
    fn fetch_products(&self, filters: Option<&Filters>)
        -> BoxFuture<'static, Result<RawPayload, FetchError>>;

    fn fetch_product_by_id(&self, id: &str) -> BoxFuture<'static, Result<RawPayload, FetchError>>;
}

impl<T: ProductSource + ?Sized> ProductSource for Arc<T> {
    fn fetch_products(
        &self,
        filters: Option<&Filters>,
    ) -> BoxFuture<'static, Result<RawPayload, FetchError>> {
        (**self).fetch_products(filters)
    }

    fn fetch_product_by_id(&self, id: &str) -> BoxFuture<'static, Result<RawPayload, FetchError>> {
        (**self).fetch_product_by_id(id)
    }
}

/// Serves a fixed payload, e.g. a JSON dump of the catalog API saved to disk.
///
/// `fetch_products` ignores filters and returns the payload unchanged;
/// `fetch_product_by_id` finds the record that normalizes to the requested
/// id and otherwise rejects with a 404.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    payload: Arc<Value>,
}

impl FixtureSource {
    #[must_use]
    pub fn new(payload: Value) -> Self {
        Self {
            payload: Arc::new(payload),
        }
    }

    /// Reads a JSON fixture file.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Fixture`] if the file cannot be read and
    /// [`FetchError::Deserialize`] if it is not JSON.
    pub fn from_file(path: &Path) -> Result<Self, FetchError> {
        let body = std::fs::read_to_string(path).map_err(|e| FetchError::Fixture {
            path: path.display().to_string(),
            source: e,
        })?;
        let payload = serde_json::from_str(&body).map_err(|e| FetchError::Deserialize {
            context: format!("fixture {}", path.display()),
            source: e,
        })?;
        Ok(Self::new(payload))
    }
}

impl ProductSource for FixtureSource {
    fn fetch_products(
        &self,
        _filters: Option<&Filters>,
    ) -> BoxFuture<'static, Result<RawPayload, FetchError>> {
        future::ready(Ok((*self.payload).clone())).boxed()
    }

    fn fetch_product_by_id(&self, id: &str) -> BoxFuture<'static, Result<RawPayload, FetchError>> {
        let found = normalize_api_response((*self.payload).clone())
            .into_iter()
            .find(|record| record_id(record).as_deref() == Some(id));

        let result = found.ok_or_else(|| FetchError::Status {
            status: 404,
            url: format!("fixture://products/{id}"),
        });
        future::ready(result).boxed()
    }
}
