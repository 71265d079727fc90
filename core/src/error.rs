//! Error types for analysis requests and client configuration

use thiserror::Error;

/// Failures originating from the network call or response parsing.
///
/// Never shown to the operator verbatim; panels log it and display their
/// fixed failure message instead.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {route} failed")]
    Network {
        route: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{route} responded with HTTP {status}")]
    Status { route: &'static str, status: u16 },

    #[error("malformed response body from {route}")]
    Decode {
        route: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl TransportError {
    /// Backend route the failed request targeted.
    pub fn route(&self) -> &'static str {
        match self {
            TransportError::Network { route, .. }
            | TransportError::Status { route, .. }
            | TransportError::Decode { route, .. } => route,
        }
    }
}

/// A required input was empty at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Errors while loading or updating client configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),

    #[error("base URL '{url}' must start with http:// or https://")]
    InvalidBaseUrl { url: String },

    #[error("trend window of {period_days} days cannot be split into {granularity_days} day buckets")]
    InvalidTrendWindow {
        period_days: u32,
        granularity_days: u32,
    },
}
