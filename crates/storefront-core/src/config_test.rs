use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn app_config_with(pairs: &[(&'static str, &'static str)]) -> AppConfig {
    let map: HashMap<&str, &str> = pairs.iter().copied().collect();
    build_app_config(lookup_from_map(&map)).expect("valid env")
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "STOREFRONT_ENV"));
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.config_path, PathBuf::from("./config/storefront.yaml"));
    assert!(cfg.base_api_url_override.is_none());
    assert!(cfg.page_size_override.is_none());
    assert!(cfg.fallback_enabled_override.is_none());
}

#[test]
fn build_app_config_reads_overrides() {
    let cfg = app_config_with(&[
        ("STOREFRONT_BASE_API_URL", "https://api.example.com"),
        ("STOREFRONT_REQUEST_TIMEOUT_MS", "2500"),
        ("STOREFRONT_PAGE_SIZE", "24"),
        ("STOREFRONT_DEBOUNCE_MS", "150"),
        ("STOREFRONT_FALLBACK_ENABLED", "false"),
    ]);
    assert_eq!(
        cfg.base_api_url_override.as_deref(),
        Some("https://api.example.com")
    );
    assert_eq!(cfg.request_timeout_ms_override, Some(2500));
    assert_eq!(cfg.page_size_override, Some(24));
    assert_eq!(cfg.debounce_ms_override, Some(150));
    assert_eq!(cfg.fallback_enabled_override, Some(false));
}

#[test]
fn build_app_config_rejects_invalid_page_size() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_PAGE_SIZE", "twelve");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFRONT_PAGE_SIZE"),
        "expected InvalidEnvVar(STOREFRONT_PAGE_SIZE), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_invalid_bool() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_FALLBACK_ENABLED", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFRONT_FALLBACK_ENABLED"),
        "expected InvalidEnvVar(STOREFRONT_FALLBACK_ENABLED), got: {result:?}"
    );
}

#[test]
fn resolve_catalog_config_uses_defaults_when_file_missing() {
    let cfg = app_config_with(&[("STOREFRONT_CONFIG_PATH", "/nonexistent/storefront.yaml")]);
    let catalog = resolve_catalog_config(&cfg).unwrap();
    assert_eq!(catalog, CatalogConfig::default());
}

#[test]
fn resolve_catalog_config_applies_overrides() {
    let cfg = app_config_with(&[
        ("STOREFRONT_CONFIG_PATH", "/nonexistent/storefront.yaml"),
        ("STOREFRONT_PAGE_SIZE", "6"),
        ("STOREFRONT_FALLBACK_ENABLED", "0"),
    ]);
    let catalog = resolve_catalog_config(&cfg).unwrap();
    assert_eq!(catalog.page_size, 6);
    assert!(!catalog.fallback_enabled);
}

#[test]
fn resolve_catalog_config_validates_merged_result() {
    let cfg = app_config_with(&[
        ("STOREFRONT_CONFIG_PATH", "/nonexistent/storefront.yaml"),
        ("STOREFRONT_PAGE_SIZE", "0"),
    ]);
    let result = resolve_catalog_config(&cfg);
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}
