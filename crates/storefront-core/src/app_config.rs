use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-level settings read from the environment.
///
/// The `*_override` fields, when set, win over the matching key in the YAML
/// catalog config.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub config_path: PathBuf,
    pub base_api_url_override: Option<String>,
    pub request_timeout_ms_override: Option<u64>,
    pub page_size_override: Option<u32>,
    pub debounce_ms_override: Option<u64>,
    pub fallback_enabled_override: Option<bool>,
}
