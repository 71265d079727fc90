//! Narrascope client core
//!
//! Platform-independent logic behind the dashboard and the console:
//! - **api**: the [`AnalysisBackend`] seam and its reqwest [`ApiClient`]
//! - **lifecycle**: the idle/loading/success/error request state machine
//! - **series**: sentiment map to chart series adaptation
//! - **panels**: per-feature controllers composing the three
//!
//! Compiles for the host and for `wasm32-unknown-unknown`.

pub mod api;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod panels;
pub mod series;

// Re-exports for convenience
pub use api::{AnalysisBackend, ApiClient};
pub use config::ClientConfig;
pub use error::{ConfigError, TransportError, ValidationError};
pub use lifecycle::{RequestLifecycle, RequestState, Submission, Ticket};
pub use panels::{CompareQueryPanel, CompareQueryRequest, Panel, SearchPanel, TrendPanel};
pub use series::{ChartSeries, sentiment_series};
