use narrascope_types::{MitigationStrategy, PeriodAnalytics, TrendRequest, TrendResult};

use super::{Panel, require};
use crate::api::AnalysisBackend;
use crate::config::{self, ClientConfig};
use crate::error::{TransportError, ValidationError};
use crate::lifecycle::RequestLifecycle;
use crate::series::{self, ChartSeries};

/// Perception trend analysis over a configurable window.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPanel {
    pub keywords: String,
    pub time_period_days: u32,
    pub granularity_days: u32,
    lifecycle: RequestLifecycle<TrendResult>,
}

impl Default for TrendPanel {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl TrendPanel {
    pub const VALIDATION_MESSAGE: &'static str = "Please enter keywords to analyze.";
    pub const WINDOW_VALIDATION_MESSAGE: &'static str =
        "The time period must span at least one granularity step of one day or more.";
    pub const FAILURE_MESSAGE: &'static str =
        "Failed to analyze perception trend. Please try again.";

    pub fn new() -> Self {
        Self::default()
    }

    /// Panel pre-filled with the configured trend window.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            keywords: String::new(),
            time_period_days: config.trend_period_days,
            granularity_days: config.trend_granularity_days,
            lifecycle: RequestLifecycle::new(),
        }
    }

    pub fn set_keywords(&mut self, keywords: impl Into<String>) {
        self.keywords = keywords.into();
    }

    pub fn result(&self) -> Option<&TrendResult> {
        self.state().result()
    }

    /// Sentiment series for the chart; `None` means render the placeholder.
    pub fn chart_series(&self) -> Option<ChartSeries> {
        self.result()
            .and_then(|result| series::sentiment_series(result.time_series_analytics.as_ref()))
    }

    /// Per-period rows in chart order.
    pub fn periods(&self) -> Vec<(&str, &PeriodAnalytics)> {
        series::sorted_periods(self.result().and_then(|r| r.time_series_analytics.as_ref()))
    }

    pub fn strategies(&self) -> &[MitigationStrategy] {
        self.result()
            .map(|result| result.report.strategies())
            .unwrap_or_default()
    }
}

impl Panel for TrendPanel {
    type Request = TrendRequest;
    type Output = TrendResult;

    fn lifecycle(&self) -> &RequestLifecycle<TrendResult> {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut RequestLifecycle<TrendResult> {
        &mut self.lifecycle
    }

    fn validate(&self) -> Result<TrendRequest, ValidationError> {
        require("keywords", &self.keywords, Self::VALIDATION_MESSAGE)?;
        if !config::is_valid_trend_window(self.time_period_days, self.granularity_days) {
            return Err(ValidationError {
                field: "granularity_days",
                message: Self::WINDOW_VALIDATION_MESSAGE,
            });
        }
        Ok(TrendRequest::new(self.keywords.clone())
            .with_window(self.time_period_days, self.granularity_days))
    }

    fn failure_message(&self) -> &'static str {
        Self::FAILURE_MESSAGE
    }

    async fn dispatch<B: AnalysisBackend>(
        backend: &B,
        request: &TrendRequest,
    ) -> Result<TrendResult, TransportError> {
        backend.analyze_trend(request).await
    }
}
