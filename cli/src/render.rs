//! Plain-text projections of panel state for the console.
//!
//! Uses the same fallback strings as the dashboard.

use std::fmt::Write;

use narrascope_core::{
    ChartSeries, CompareQueryPanel, Panel, RequestState, SearchPanel, TrendPanel,
};
use narrascope_types::{Article, CompareResult, MitigationStrategy, QueryResult, TrendResult};

const NO_ARTICLES: &str = "No articles found.";
const NO_EVIDENCE: &str = "No supporting evidence returned.";
const NO_SENTIMENT_DATA: &str = "No sentiment data available for this period.";
const NO_STRATEGIES: &str = "No mitigation strategies suggested.";

pub fn search_panel(panel: &SearchPanel) -> String {
    status(panel.state()).unwrap_or_else(|| panel.articles().map(articles).unwrap_or_default())
}

pub fn compare_query_panel(panel: &CompareQueryPanel) -> String {
    status(panel.state()).unwrap_or_else(|| {
        if let Some(result) = panel.compare_result() {
            compare(result)
        } else if let Some(result) = panel.query_result() {
            query(result)
        } else {
            String::new()
        }
    })
}

pub fn trend_panel(panel: &TrendPanel) -> String {
    status(panel.state()).unwrap_or_else(|| {
        panel
            .result()
            .map(|result| trend(result, panel.chart_series().as_ref(), panel.strategies()))
            .unwrap_or_default()
    })
}

/// Idle, loading and error lines; `None` once a result is available.
fn status<T>(state: &RequestState<T>) -> Option<String> {
    if state.is_loading() {
        return Some("Loading...".to_string());
    }
    if let Some(message) = state.error_message() {
        return Some(format!("error: {message}"));
    }
    state.result().is_none().then(String::new)
}

fn articles(articles: &[Article]) -> String {
    if articles.is_empty() {
        return NO_ARTICLES.to_string();
    }

    let mut out = String::new();
    for (idx, article) in articles.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} ({})",
            idx + 1,
            article.title_text(),
            article.source_text()
        );
        if !article.url.is_empty() {
            let _ = writeln!(out, "   {}", article.url);
        }
        if !article.snippet.is_empty() {
            let _ = writeln!(out, "   {}", article.snippet);
        }
    }
    out
}

fn compare(result: &CompareResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Narrative gap:\n  {}", result.narrative_gap);
    write_points(
        &mut out,
        "Misinterpreted points",
        &result.misinterpreted_points,
        "No misinterpretations found.",
    );
    write_points(
        &mut out,
        "Counter-speech points",
        &result.counter_speech_points,
        "No counter-speech points suggested.",
    );
    out
}

fn query(result: &QueryResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Answer:\n  {}", result.answer);
    match result.evidence() {
        Some(facts) => write_points(&mut out, "Evidence", facts, NO_EVIDENCE),
        None => {
            let _ = writeln!(out, "Evidence:\n  {NO_EVIDENCE}");
        }
    }
    out
}

fn trend(
    result: &TrendResult,
    series: Option<&ChartSeries>,
    strategies: &[MitigationStrategy],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Sentiment for \"{}\":", result.keywords);
    out.push_str(&chart(series));

    let report = &result.report;
    if let Some(error) = report.generation_error() {
        let _ = writeln!(out, "Report generation failed: {error}");
    }
    let _ = writeln!(out, "Executive summary:\n  {}", report.executive_summary_text());
    let _ = writeln!(out, "Analysis of trend:\n  {}", report.analysis_of_trend_text());
    if let Some(context) = report.sentiment_context.as_deref() {
        let _ = writeln!(out, "Sentiment context:\n  {context}");
    }

    let _ = writeln!(out, "Mitigation strategies:");
    if strategies.is_empty() {
        let _ = writeln!(out, "  {NO_STRATEGIES}");
    }
    for strategy in strategies {
        let _ = writeln!(out, "  - {}", strategy.name_text());
        let _ = writeln!(out, "    {}", strategy.description_text());
        let _ = writeln!(out, "    Why: {}", strategy.justification_text());
    }
    out
}

/// Chart as `label  value` rows, or the no-data placeholder.
fn chart(series: Option<&ChartSeries>) -> String {
    let Some(series) = series else {
        return format!("  {NO_SENTIMENT_DATA}\n");
    };

    let mut out = String::new();
    for (label, value) in series.points() {
        let _ = writeln!(out, "  {label}  {value:+.2}");
    }
    out
}

fn write_points(out: &mut String, heading: &str, points: &[String], empty: &str) {
    let _ = writeln!(out, "{heading}:");
    if points.is_empty() {
        let _ = writeln!(out, "  {empty}");
    }
    for point in points {
        let _ = writeln!(out, "  - {point}");
    }
}
