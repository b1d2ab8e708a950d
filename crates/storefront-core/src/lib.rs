//! Canonical catalog model and the client-side query pipeline.
//!
//! Everything in this crate is synchronous and free of network I/O; the only
//! filesystem access is loading the optional YAML catalog config.

pub mod app_config;
pub mod catalog_config;
pub mod config;
pub mod facets;
pub mod pipeline;
pub mod products;
pub mod query;
pub mod sample;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalog_config::{load_catalog_config, CatalogConfig, Endpoints};
pub use config::{load_app_config, load_app_config_from_env, resolve_catalog_config};
pub use facets::{FacetSet, PriceRange};
pub use pipeline::{filter_products, paginate, run_query, sort_products, PageSlice};
pub use products::Product;
pub use query::{
    parse_query_string, FilterPatch, Filters, QueryParamError, QueryState, SortOrder, ViewMode,
};
pub use sample::sample_products;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog config {path}: {source}")]
    ConfigFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog config: {0}")]
    ConfigFileParse(#[from] serde_yaml::Error),

    #[error("invalid catalog config: {0}")]
    Validation(String),
}
