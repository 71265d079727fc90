//! Client configuration
//!
//! The analysis service endpoint is an explicit value handed to
//! [`ApiClient`](crate::api::ApiClient) at construction. Frontends decide where
//! it comes from (embedded TOML, injected `<meta>` tags, a config file).

use serde::{Deserialize, Serialize};

use narrascope_types::{DEFAULT_TREND_GRANULARITY_DAYS, DEFAULT_TREND_PERIOD_DAYS};

use crate::error::ConfigError;

/// Where the analysis service listens when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Service base URL without trailing slash (e.g. "http://127.0.0.1:8000")
    pub base_url: String,
    /// Default look-back window offered by the trend panel
    pub trend_period_days: u32,
    /// Default bucket size offered by the trend panel
    pub trend_granularity_days: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            trend_period_days: DEFAULT_TREND_PERIOD_DAYS,
            trend_granularity_days: DEFAULT_TREND_GRANULARITY_DAYS,
        }
    }
}

impl ClientConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validated()
    }

    /// Replace the base URL, validating and normalizing it.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Result<Self, ConfigError> {
        self.base_url = url.into();
        self.validated()
    }

    /// Check invariants and strip trailing slashes from the base URL.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url,
            });
        }
        self.base_url = trimmed.to_string();

        if !is_valid_trend_window(self.trend_period_days, self.trend_granularity_days) {
            return Err(ConfigError::InvalidTrendWindow {
                period_days: self.trend_period_days,
                granularity_days: self.trend_granularity_days,
            });
        }

        Ok(self)
    }
}

/// A trend window must hold at least one whole bucket of at least one day.
pub(crate) fn is_valid_trend_window(period_days: u32, granularity_days: u32) -> bool {
    granularity_days > 0 && period_days >= granularity_days
}
