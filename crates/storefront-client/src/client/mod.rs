//! HTTP client for the catalog content API.

mod urls;

use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use reqwest::Client;
use storefront_core::catalog_config::ID_PLACEHOLDER;
use storefront_core::{CatalogConfig, Endpoints, Filters};

use crate::error::FetchError;
use crate::source::{ProductSource, RawPayload};

pub use urls::{encode_path_segment, join_endpoint};

/// reqwest-backed [`ProductSource`].
///
/// Makes exactly one request per call. Non-2xx responses become
/// [`FetchError::Status`]; failures before a response arrives become
/// [`FetchError::Unreachable`]. Retrying is left to the user via the error
/// panel.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_api_url: String,
    endpoints: Endpoints,
}

impl CatalogClient {
    /// Creates a `CatalogClient` using the configured base URL, endpoints and
    /// request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(config: &CatalogConfig, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(Duration::from_secs(10).min(config.request_timeout()))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_api_url: config.base_api_url.clone(),
            endpoints: config.endpoints.clone(),
        })
    }

    /// Builds the collection URL, carrying any active filters as query
    /// parameters so the server may pre-filter.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if the joined URL does not parse.
    pub fn products_url(&self, filters: Option<&Filters>) -> Result<String, FetchError> {
        let raw = join_endpoint(&self.base_api_url, &self.endpoints.products);
        let mut url = parse_url(&raw)?;
        if let Some(filters) = filters {
            urls::append_filters(&mut url, filters);
        }
        Ok(url.to_string())
    }

    /// Builds the single-product URL with `id` percent-encoded into the
    /// `{id}` placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if the joined URL does not parse.
    pub fn product_url(&self, id: &str) -> Result<String, FetchError> {
        let path = self
            .endpoints
            .product_by_id
            .replace(ID_PLACEHOLDER, &encode_path_segment(id));
        let raw = join_endpoint(&self.base_api_url, &path);
        Ok(parse_url(&raw)?.to_string())
    }
}

impl ProductSource for CatalogClient {
    fn fetch_products(
        &self,
        filters: Option<&Filters>,
    ) -> BoxFuture<'static, Result<RawPayload, FetchError>> {
        let url = self.products_url(filters);
        let client = self.client.clone();
        async move { get_json(client, url?, "product list".to_owned()).await }.boxed()
    }

    fn fetch_product_by_id(&self, id: &str) -> BoxFuture<'static, Result<RawPayload, FetchError>> {
        let url = self.product_url(id);
        let client = self.client.clone();
        let context = format!("product {id}");
        async move { get_json(client, url?, context).await }.boxed()
    }
}

fn parse_url(raw: &str) -> Result<reqwest::Url, FetchError> {
    reqwest::Url::parse(raw).map_err(|e| FetchError::InvalidUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}

async fn get_json(client: Client, url: String, context: String) -> Result<RawPayload, FetchError> {
    tracing::debug!(url, "requesting catalog data");

    let response = client
        .get(&url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| {
            if e.is_builder() {
                FetchError::Http(e)
            } else {
                FetchError::Unreachable {
                    url: url.clone(),
                    reason: e.to_string(),
                }
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url,
        });
    }

    let body = response.text().await?;
    serde_json::from_str::<RawPayload>(&body).map_err(|e| FetchError::Deserialize { context, source: e })
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
