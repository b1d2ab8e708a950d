use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::catalog_config::{load_catalog_config, CatalogConfig};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so parsing can be tested with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        lookup(var)
            .ok()
            .map(|raw| raw.parse::<u64>().map_err(|e| invalid(var, e.to_string())))
            .transpose()
    };

    let parse_u32 = |var: &str| -> Result<Option<u32>, ConfigError> {
        lookup(var)
            .ok()
            .map(|raw| raw.parse::<u32>().map_err(|e| invalid(var, e.to_string())))
            .transpose()
    };

    let parse_bool = |var: &str| -> Result<Option<bool>, ConfigError> {
        lookup(var)
            .ok()
            .map(|raw| match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                other => Err(invalid(var, format!("expected a boolean, got '{other}'"))),
            })
            .transpose()
    };

    let env = parse_environment(&or_default("STOREFRONT_ENV", "development"))?;
    let log_level = or_default("STOREFRONT_LOG_LEVEL", "info");
    let config_path = PathBuf::from(or_default(
        "STOREFRONT_CONFIG_PATH",
        "./config/storefront.yaml",
    ));

    Ok(AppConfig {
        env,
        log_level,
        config_path,
        base_api_url_override: lookup("STOREFRONT_BASE_API_URL").ok(),
        request_timeout_ms_override: parse_u64("STOREFRONT_REQUEST_TIMEOUT_MS")?,
        page_size_override: parse_u32("STOREFRONT_PAGE_SIZE")?,
        debounce_ms_override: parse_u64("STOREFRONT_DEBOUNCE_MS")?,
        fallback_enabled_override: parse_bool("STOREFRONT_FALLBACK_ENABLED")?,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Produces the effective catalog config: the YAML file at
/// `app.config_path` (or built-in defaults when the file does not exist),
/// with env overrides applied on top, then validated.
///
/// # Errors
///
/// Returns `ConfigError` if an existing file cannot be read or parsed, or the
/// merged result fails validation.
pub fn resolve_catalog_config(app: &AppConfig) -> Result<CatalogConfig, ConfigError> {
    let mut config = if app.config_path.exists() {
        load_catalog_config(&app.config_path)?
    } else {
        tracing::debug!(
            path = %app.config_path.display(),
            "catalog config file not found; using defaults"
        );
        CatalogConfig::default()
    };

    if let Some(url) = &app.base_api_url_override {
        config.base_api_url.clone_from(url);
    }
    if let Some(ms) = app.request_timeout_ms_override {
        config.request_timeout_ms = ms;
    }
    if let Some(size) = app.page_size_override {
        config.page_size = size;
    }
    if let Some(ms) = app.debounce_ms_override {
        config.debounce_ms = ms;
    }
    if let Some(enabled) = app.fallback_enabled_override {
        config.fallback_enabled = enabled;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
