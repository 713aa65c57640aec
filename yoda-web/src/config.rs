use std::env;

use tracing::Level;
use yoda_types::API_PREFIX;

pub const DEFAULT_IMAGE_BASE_URL: &str = "/images";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub image_base_url: String,
    pub log_level: Level,
    /// Values that could not be used and were replaced by defaults.
    pub rejected: Vec<ConfigError>,
}

impl Config {
    /// Reads `API_BASE_URL`, `IMAGE_BASE_URL` and `LOG_LEVEL` through `lookup`.
    /// Unset or blank keys keep their defaults; unusable ones do too and are
    /// listed in `rejected`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut rejected = Vec::new();

        let log_level = match read("LOG_LEVEL") {
            Some(raw) => raw.trim().parse::<Level>().unwrap_or_else(|_| {
                rejected.push(ConfigError::InvalidValue {
                    key: "LOG_LEVEL",
                    value: raw,
                });
                Level::INFO
            }),
            None => Level::INFO,
        };

        Self {
            api_base_url: read("API_BASE_URL").unwrap_or_else(|| API_PREFIX.to_string()),
            image_base_url: read("IMAGE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string()),
            log_level,
            rejected,
        }
    }

    /// Call once logging is up.
    pub fn warn_rejected(&self) {
        for error in &self.rejected {
            tracing::warn!("{}, using the default", error);
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Absolute API base: relative bases are joined onto the page origin.
    pub fn resolve_api_base(&self, origin: &str) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        if base.starts_with("http://") || base.starts_with("https://") {
            return base.to_string();
        }
        format!(
            "{}/{}",
            origin.trim_end_matches('/'),
            base.trim_start_matches('/')
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: API_PREFIX.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            log_level: Level::INFO,
            rejected: Vec::new(),
        }
    }
}

/// `API_BASE_URL` → `data-api-base-url`, the attribute read from `<body>`.
pub fn data_attribute_name(key: &str) -> String {
    format!("data-{}", key.to_lowercase().replace('_', "-"))
}
