use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Placeholder token in [`Endpoints::product_by_id`].
pub const ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Endpoints {
    /// Collection endpoint path, relative to `baseApiUrl`.
    pub products: String,
    /// Single-product endpoint path; must contain `{id}`.
    pub product_by_id: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            products: "/products".to_string(),
            product_by_id: format!("/products/{ID_PLACEHOLDER}"),
        }
    }
}

/// Catalog options, normally loaded from `config/storefront.yaml`.
///
/// Every key is optional; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogConfig {
    pub base_api_url: String,
    /// Joined with relative image paths found in product records.
    pub base_image_url: String,
    /// Used when a record carries no image at all.
    pub default_image: String,
    pub endpoints: Endpoints,
    pub request_timeout_ms: u64,
    pub page_size: u32,
    pub debounce_ms: u64,
    /// When `false`, network and server failures show the error panel
    /// instead of the sample catalog.
    pub fallback_enabled: bool,
    pub default_category: String,
    pub default_rating: u8,
    pub placeholder_description: String,
    /// Detail page that product links point at, e.g. `product.html?id=...`.
    pub detail_page_path: String,
    pub currency_symbol: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_api_url: "http://localhost:8080/api".to_string(),
            base_image_url: "http://localhost:8080/storage/".to_string(),
            default_image: "images/placeholder.png".to_string(),
            endpoints: Endpoints::default(),
            request_timeout_ms: 10_000,
            page_size: 12,
            debounce_ms: 300,
            fallback_enabled: true,
            default_category: "general".to_string(),
            default_rating: 0,
            placeholder_description: "Description coming soon.".to_string(),
            detail_page_path: "product.html".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl CatalogConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Validation(
                "pageSize must be greater than zero".to_string(),
            ));
        }
        if self.default_rating > 5 {
            return Err(ConfigError::Validation(format!(
                "defaultRating {} is out of range; must be 0 to 5",
                self.default_rating
            )));
        }
        let has_scheme = self
            .base_api_url
            .split_once("://")
            .is_some_and(|(scheme, rest)| !scheme.is_empty() && !rest.is_empty());
        if !has_scheme {
            return Err(ConfigError::Validation(format!(
                "baseApiUrl '{}' must be an absolute URL",
                self.base_api_url
            )));
        }
        if !self.endpoints.product_by_id.contains(ID_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "endpoints.productById '{}' must contain {ID_PLACEHOLDER}",
                self.endpoints.product_by_id
            )));
        }
        Ok(())
    }
}

/// Load and validate the catalog configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog_config(path: &Path) -> Result<CatalogConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: CatalogConfig = serde_yaml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
