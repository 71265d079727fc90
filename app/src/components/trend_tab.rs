//! Perception Trend Tab
//!
//! Keyword trend analysis: sentiment over time plus the generated report.

use dioxus::prelude::*;
use narrascope_core::{ChartSeries, Panel, TrendPanel};
use narrascope_types::{MitigationStrategy, PeriodAnalytics, TrendResult};

use super::request_status::{request_status, submit_label};
use super::sentiment_chart::SentimentChart;
use crate::api;

#[component]
pub fn TrendTab() -> Element {
    let client = api::use_api();
    let config = api::use_client_config();
    let mut panel = use_signal(move || TrendPanel::from_config(&config));

    use_drop(move || {
        let _ = panel.try_write().map(|mut p| p.unmount());
    });

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        api::submit_panel(panel, client.clone());
    };

    let busy = panel.read().is_busy();
    let label = submit_label(busy, "Analyze");
    let result = panel.read().result().cloned();
    let series = panel.read().chart_series();
    let periods: Vec<(String, PeriodAnalytics)> = panel
        .read()
        .periods()
        .into_iter()
        .map(|(date, period)| (date.to_string(), period.clone()))
        .collect();
    let strategies = panel.read().strategies().to_vec();

    rsx! {
        section { class: "feature-panel trend-panel",
            h2 { i { class: "fa-solid fa-chart-line" } " Perception Trend" }

            form { class: "panel-form", onsubmit: submit,
                input {
                    r#type: "text",
                    class: "panel-input",
                    placeholder: "Keywords, e.g. carbon tax",
                    value: "{panel.read().keywords}",
                    oninput: move |e| panel.write().set_keywords(e.value()),
                }
                label { class: "field-inline",
                    "Days"
                    input {
                        r#type: "number",
                        class: "panel-number",
                        min: "1",
                        value: "{panel.read().time_period_days}",
                        oninput: move |e| {
                            if let Ok(days) = e.value().parse::<u32>() {
                                panel.write().time_period_days = days;
                            }
                        },
                    }
                }
                label { class: "field-inline",
                    "Every"
                    input {
                        r#type: "number",
                        class: "panel-number",
                        min: "1",
                        value: "{panel.read().granularity_days}",
                        oninput: move |e| {
                            if let Ok(days) = e.value().parse::<u32>() {
                                panel.write().granularity_days = days;
                            }
                        },
                    }
                    "days"
                }
                button {
                    r#type: "submit",
                    class: "btn btn-primary",
                    disabled: busy,
                    "{label}"
                }
            }

            {request_status(panel.read().state())}

            if let Some(result) = result {
                TrendResultView { result, series, periods, strategies }
            }
        }
    }
}

#[component]
fn TrendResultView(
    result: TrendResult,
    series: Option<ChartSeries>,
    periods: Vec<(String, PeriodAnalytics)>,
    strategies: Vec<MitigationStrategy>,
) -> Element {
    let report = &result.report;

    rsx! {
        div { class: "result-card",
            h3 { "Sentiment for {result.keywords}" }
            match series {
                Some(series) => rsx! { SentimentChart { series } },
                None => rsx! {
                    div { class: "chart-empty", "No sentiment data available for this period." }
                },
            }

            if !periods.is_empty() {
                table { class: "period-table",
                    thead {
                        tr {
                            th { "Period" }
                            th { "Articles" }
                            th { "Sentiment" }
                            th { "Dominant narratives" }
                        }
                    }
                    tbody {
                        for (date, period) in periods.iter() {
                            tr { key: "{date}",
                                td { "{date}" }
                                td { "{article_count_text(period)}" }
                                td { "{period.average_sentiment_score:.2}" }
                                td { "{period.narratives_text()}" }
                            }
                        }
                    }
                }
            }
        }

        div { class: "result-card report-card",
            if let Some(error) = report.generation_error() {
                div { class: "error-message",
                    i { class: "fa-solid fa-triangle-exclamation" }
                    " Report generation failed: {error}"
                }
            }

            h3 { "Executive Summary" }
            p { class: "result-text", "{report.executive_summary_text()}" }

            h3 { "Analysis of Trend" }
            p { class: "result-text", "{report.analysis_of_trend_text()}" }

            if let Some(context) = report.sentiment_context.as_deref() {
                h3 { "Sentiment Context" }
                p { class: "result-text", "{context}" }
            }

            h3 { "Mitigation Strategies" }
            if strategies.is_empty() {
                p { class: "panel-empty", "No mitigation strategies suggested." }
            } else {
                ul { class: "strategy-list",
                    for (idx, strategy) in strategies.iter().enumerate() {
                        li { key: "{idx}", class: "strategy-item",
                            strong { "{strategy.name_text()}" }
                            p { "{strategy.description_text()}" }
                            p { class: "strategy-justification",
                                em { "Why: " }
                                "{strategy.justification_text()}"
                            }
                        }
                    }
                }
            }
        }
    }
}

fn article_count_text(period: &PeriodAnalytics) -> String {
    period
        .article_count
        .map(|count| count.to_string())
        .unwrap_or_else(|| "-".to_string())
}
