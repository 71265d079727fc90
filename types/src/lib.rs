//! Shared request and response types for Narrascope
//!
//! This crate contains the serializable wire types exchanged with the analysis
//! service. They are shared between the client core (narrascope-core), the WASM
//! frontend (narrascope-ui) and the operator console (narrascope-cli).
//!
//! Response types are decoded leniently: every nested field the service may
//! omit is optional, and accessors return a fallback string instead of failing.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Default look-back window for trend analysis, in days.
pub const DEFAULT_TREND_PERIOD_DAYS: u32 = 30;
/// Default bucket size for trend analysis, in days.
pub const DEFAULT_TREND_GRANULARITY_DAYS: u32 = 7;

// ─────────────────────────────────────────────────────────────────────────────
// Dashboard Navigation
// ─────────────────────────────────────────────────────────────────────────────

/// Dashboard tab - determines which feature panel is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DashboardTab {
    /// Article search
    #[default]
    Search,
    /// Narrative comparison and knowledge-base query
    CompareQuery,
    /// Perception trend analysis
    Trend,
}

impl DashboardTab {
    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::Search => "Search",
            DashboardTab::CompareQuery => "Compare & Query",
            DashboardTab::Trend => "Perception Trend",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DashboardTab::Search => "fa-magnifying-glass",
            DashboardTab::CompareQuery => "fa-scale-balanced",
            DashboardTab::Trend => "fa-chart-line",
        }
    }

    pub fn all() -> &'static [DashboardTab] {
        &[
            DashboardTab::Search,
            DashboardTab::CompareQuery,
            DashboardTab::Trend,
        ]
    }
}

/// Sub-form selector for the compare/query panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Narrative vs ground-truth comparison
    #[default]
    Compare,
    /// Knowledge-base question
    Query,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Compare => "Compare Narratives",
            Mode::Query => "Query Knowledge Base",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

/// Body for `/search` and `/query-ground-truth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// Body for `/query-ground-truth`. The service reuses the search body shape.
pub type QueryRequest = SearchRequest;

/// Body for `/compare-narratives`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareRequest {
    pub intended_truth: String,
    pub media_text: String,
}

/// Body for `/analyze-perception-trend`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendRequest {
    pub keywords: String,
    pub time_period_days: u32,
    pub granularity_days: u32,
}

impl TrendRequest {
    /// Trend request over the default 30 day window in 7 day buckets.
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            time_period_days: DEFAULT_TREND_PERIOD_DAYS,
            granularity_days: DEFAULT_TREND_GRANULARITY_DAYS,
        }
    }

    pub fn with_window(mut self, time_period_days: u32, granularity_days: u32) -> Self {
        self.time_period_days = time_period_days;
        self.granularity_days = granularity_days;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Search Results
// ─────────────────────────────────────────────────────────────────────────────

/// A credible article returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub snippet: String,
}

impl Article {
    pub fn title_text(&self) -> &str {
        non_empty_or(&self.title, "Untitled article")
    }

    pub fn source_text(&self) -> &str {
        non_empty_or(&self.source, "Unknown source")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Compare / Query Results
// ─────────────────────────────────────────────────────────────────────────────

/// Narrative gap analysis between an intended message and media coverage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompareResult {
    pub narrative_gap: String,
    #[serde(default)]
    pub misinterpreted_points: Vec<String>,
    #[serde(default)]
    pub counter_speech_points: Vec<String>,
}

/// Knowledge-base answer with the graph facts that support it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryResult {
    pub answer: String,
    /// `None` when the service returned no evidence key at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Vec<String>>,
}

impl QueryResult {
    /// Evidence facts, if any were returned.
    pub fn evidence(&self) -> Option<&[String]> {
        self.evidence
            .as_deref()
            .filter(|facts| !facts.is_empty())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Trend Results
// ─────────────────────────────────────────────────────────────────────────────

/// Aggregated analytics for one time bucket, keyed by its ISO start date.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PeriodAnalytics {
    /// Mean sentiment in [-1, 1]
    pub average_sentiment_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_narratives: Option<String>,
}

impl PeriodAnalytics {
    pub fn narratives_text(&self) -> &str {
        self.dominant_narratives
            .as_deref()
            .map(|n| non_empty_or(n, NO_NARRATIVES))
            .unwrap_or(NO_NARRATIVES)
    }
}

const NO_NARRATIVES: &str = "No narratives identified.";

/// A titled summary block inside the trend report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A recommended response to an identified trend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MitigationStrategy {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

impl MitigationStrategy {
    pub fn name_text(&self) -> &str {
        non_empty_or(&self.name, "Unnamed strategy")
    }

    pub fn description_text(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or("No description provided.")
    }

    pub fn justification_text(&self) -> &str {
        self.justification
            .as_deref()
            .unwrap_or("No justification provided.")
    }
}

/// Narrative report generated for a trend analysis.
///
/// Every field is optional; a report with nothing in it is still renderable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrendReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executive_summary: Option<ReportSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_of_trend: Option<ReportSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation_strategies: Option<Vec<MitigationStrategy>>,
    /// Free-text trend narrative; the layout the report generator emits
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub trend_analysis: Option<String>,
    /// Free-text interpretation of the sentiment score
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub sentiment_context: Option<String>,
    /// Set by the service when report generation failed
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
    /// Unparsed generator output accompanying `error`
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub raw_response: Option<String>,
}

impl TrendReport {
    pub fn executive_summary_text(&self) -> &str {
        section_summary(self.executive_summary.as_ref())
            .unwrap_or("No executive summary available.")
    }

    /// Sectioned summary if present, else the free-text `trend_analysis`.
    pub fn analysis_of_trend_text(&self) -> &str {
        section_summary(self.analysis_of_trend.as_ref())
            .or(self.trend_analysis.as_deref())
            .unwrap_or("No trend analysis available.")
    }

    /// Generator failure message, when the service could not build a report.
    pub fn generation_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn strategies(&self) -> &[MitigationStrategy] {
        self.mitigation_strategies.as_deref().unwrap_or_default()
    }
}

fn section_summary(section: Option<&ReportSection>) -> Option<&str> {
    section.and_then(|s| s.summary.as_deref())
}

/// Decode free text the report generator may emit as a string, a list or an
/// object. Lists become one line per item, objects `key: text` lines.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(flatten_text))
}

fn flatten_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => join_lines(items.iter().filter_map(flatten_text)),
        Value::Object(fields) => join_lines(
            fields
                .iter()
                .filter_map(|(key, v)| flatten_text(v).map(|text| format!("{key}: {text}"))),
        ),
        other => Some(other.to_string()),
    }
}

fn join_lines(lines: impl Iterator<Item = String>) -> Option<String> {
    let lines: Vec<String> = lines.collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// Full trend analysis response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendResult {
    #[serde(default)]
    pub keywords: String,
    /// Per-period analytics keyed by ISO date (`YYYY-MM-DD`). Unordered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_series_analytics: Option<HashMap<String, PeriodAnalytics>>,
    #[serde(default)]
    pub report: TrendReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Result Union
// ─────────────────────────────────────────────────────────────────────────────

/// Every successful response shape, tagged by feature.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultPayload {
    Search(SearchResult),
    Compare(CompareResult),
    Query(QueryResult),
    Trend(TrendResult),
}

impl From<SearchResult> for ResultPayload {
    fn from(result: SearchResult) -> Self {
        ResultPayload::Search(result)
    }
}

impl From<CompareResult> for ResultPayload {
    fn from(result: CompareResult) -> Self {
        ResultPayload::Compare(result)
    }
}

impl From<QueryResult> for ResultPayload {
    fn from(result: QueryResult) -> Self {
        ResultPayload::Query(result)
    }
}

impl From<TrendResult> for ResultPayload {
    fn from(result: TrendResult) -> Self {
        ResultPayload::Trend(result)
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_request_defaults() {
        let req = TrendRequest::new("policy reform");
        assert_eq!(req.time_period_days, 30);
        assert_eq!(req.granularity_days, 7);

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "keywords": "policy reform",
                "time_period_days": 30,
                "granularity_days": 7
            })
        );
    }

    #[test]
    fn empty_report_uses_fallbacks() {
        let result: TrendResult =
            serde_json::from_str(r#"{"keywords": "x", "report": {}}"#).unwrap();
        assert!(result.time_series_analytics.is_none());
        assert_eq!(
            result.report.executive_summary_text(),
            "No executive summary available."
        );
        assert_eq!(
            result.report.analysis_of_trend_text(),
            "No trend analysis available."
        );
        assert!(result.report.strategies().is_empty());
    }

    #[test]
    fn missing_report_decodes_as_default() {
        let result: TrendResult = serde_json::from_str(r#"{"keywords": "x"}"#).unwrap();
        assert_eq!(result.report, TrendReport::default());
    }

    #[test]
    fn section_without_summary_falls_back() {
        let report: TrendReport = serde_json::from_str(
            r#"{"executive_summary": {}, "analysis_of_trend": {"summary": "Rising concern"}}"#,
        )
        .unwrap();
        assert_eq!(report.executive_summary_text(), "No executive summary available.");
        assert_eq!(report.analysis_of_trend_text(), "Rising concern");
    }

    #[test]
    fn partial_strategy_falls_back() {
        let strategy: MitigationStrategy =
            serde_json::from_str(r#"{"name": "Proactive briefings"}"#).unwrap();
        assert_eq!(strategy.name_text(), "Proactive briefings");
        assert_eq!(strategy.description_text(), "No description provided.");
        assert_eq!(strategy.justification_text(), "No justification provided.");
    }

    #[test]
    fn period_carries_optional_backend_fields() {
        let period: PeriodAnalytics = serde_json::from_str(
            r#"{"average_sentiment_score": -0.25, "article_count": 4, "dominant_narratives": "Cost overruns"}"#,
        )
        .unwrap();
        assert_eq!(period.article_count, Some(4));
        assert_eq!(period.narratives_text(), "Cost overruns");

        let bare: PeriodAnalytics =
            serde_json::from_str(r#"{"average_sentiment_score": 0.1}"#).unwrap();
        assert_eq!(bare.narratives_text(), "No narratives identified.");
    }

    #[test]
    fn query_evidence_absent_and_empty() {
        let absent: QueryResult = serde_json::from_str(r#"{"answer": "No link found."}"#).unwrap();
        assert!(absent.evidence.is_none());
        assert!(absent.evidence().is_none());

        let empty: QueryResult =
            serde_json::from_str(r#"{"answer": "a", "evidence": []}"#).unwrap();
        assert_eq!(empty.evidence, Some(vec![]));
        assert!(empty.evidence().is_none());

        let full: QueryResult =
            serde_json::from_str(r#"{"answer": "a", "evidence": ["(A)-[FUNDS]->(B)"]}"#).unwrap();
        assert_eq!(full.evidence().map(<[String]>::len), Some(1));
    }

    #[test]
    fn compare_lists_default_to_empty() {
        let result: CompareResult =
            serde_json::from_str(r#"{"narrative_gap": "Coverage omits the timeline."}"#).unwrap();
        assert!(result.misinterpreted_points.is_empty());
        assert!(result.counter_speech_points.is_empty());
    }

    #[test]
    fn article_fallbacks() {
        let article = Article {
            url: "http://x".to_string(),
            ..Default::default()
        };
        assert_eq!(article.title_text(), "Untitled article");
        assert_eq!(article.source_text(), "Unknown source");
    }

    #[test]
    fn generator_report_shape_fills_analysis() {
        let report: TrendReport = serde_json::from_str(
            r#"{
                "trend_analysis": "Coverage shifted toward costs.",
                "sentiment_context": "Mildly negative overall.",
                "mitigation_strategies": [{"name": "Publish cost breakdown"}]
            }"#,
        )
        .unwrap();
        assert_eq!(report.analysis_of_trend_text(), "Coverage shifted toward costs.");
        assert_eq!(report.sentiment_context.as_deref(), Some("Mildly negative overall."));
        assert_eq!(report.strategies().len(), 1);
    }

    #[test]
    fn sectioned_analysis_wins_over_free_text() {
        let report: TrendReport = serde_json::from_str(
            r#"{"analysis_of_trend": {"summary": "Sectioned"}, "trend_analysis": "Free text"}"#,
        )
        .unwrap();
        assert_eq!(report.analysis_of_trend_text(), "Sectioned");
    }

    #[test]
    fn structured_free_text_still_decodes() {
        let result: TrendResult = serde_json::from_str(
            r#"{"keywords": "x", "report": {
                "trend_analysis": {"period_1": "a", "period_2": "b"},
                "sentiment_context": ["first", "second"]
            }}"#,
        )
        .unwrap();
        assert_eq!(
            result.report.trend_analysis.as_deref(),
            Some("period_1: a\nperiod_2: b")
        );
        assert_eq!(result.report.sentiment_context.as_deref(), Some("first\nsecond"));
    }

    #[test]
    fn failed_report_keeps_error() {
        let result: TrendResult = serde_json::from_str(
            r#"{"keywords": "x", "report": {
                "error": "Failed to generate valid JSON report.",
                "raw_response": "not json"
            }}"#,
        )
        .unwrap();
        assert_eq!(
            result.report.generation_error(),
            Some("Failed to generate valid JSON report.")
        );
        assert_eq!(result.report.raw_response.as_deref(), Some("not json"));
        assert!(TrendReport::default().generation_error().is_none());
    }
}
