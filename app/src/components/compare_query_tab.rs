//! Compare & Query Tab
//!
//! Two sub-forms sharing one request state: narrative comparison against an
//! intended truth, and free-form questions to the knowledge base. Switching
//! sub-form discards the previous result.

use dioxus::prelude::*;
use narrascope_core::{CompareQueryPanel, Panel};
use narrascope_types::{CompareResult, Mode, QueryResult};

use super::request_status::{request_status, submit_label};
use crate::api;

#[component]
pub fn CompareQueryTab() -> Element {
    let client = api::use_api();
    let mut panel = use_signal(CompareQueryPanel::new);

    use_drop(move || {
        let _ = panel.try_write().map(|mut p| p.unmount());
    });

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        api::submit_panel(panel, client.clone());
    };

    let mode = panel.read().mode();
    let busy = panel.read().is_busy();
    let compare_label = submit_label(busy, "Compare");
    let ask_label = submit_label(busy, "Ask");
    let compare_result = panel.read().compare_result().cloned();
    let query_result = panel.read().query_result().cloned();

    rsx! {
        section { class: "feature-panel compare-query-panel",
            div { class: "mode-toggle",
                for m in [Mode::Compare, Mode::Query] {
                    button {
                        class: if mode == m { "tab-btn active" } else { "tab-btn" },
                        onclick: move |_| panel.write().set_mode(m),
                        "{m.label()}"
                    }
                }
            }

            form { class: "panel-form panel-form-stacked", onsubmit: submit,
                match mode {
                    Mode::Compare => rsx! {
                        label { class: "field-label", "Intended truth" }
                        textarea {
                            class: "panel-textarea",
                            rows: "4",
                            placeholder: "The message you meant to communicate",
                            value: "{panel.read().intended_truth}",
                            oninput: move |e| panel.write().intended_truth = e.value(),
                        }
                        label { class: "field-label", "Media text" }
                        textarea {
                            class: "panel-textarea",
                            rows: "6",
                            placeholder: "How the media reported it",
                            value: "{panel.read().media_text}",
                            oninput: move |e| panel.write().media_text = e.value(),
                        }
                        button {
                            r#type: "submit",
                            class: "btn btn-primary",
                            disabled: busy,
                            "{compare_label}"
                        }
                    },
                    Mode::Query => rsx! {
                        label { class: "field-label", "Question" }
                        input {
                            r#type: "text",
                            class: "panel-input",
                            placeholder: "Ask the knowledge base",
                            value: "{panel.read().question}",
                            oninput: move |e| panel.write().question = e.value(),
                        }
                        button {
                            r#type: "submit",
                            class: "btn btn-primary",
                            disabled: busy,
                            "{ask_label}"
                        }
                    },
                }
            }

            {request_status(panel.read().state())}

            if let Some(result) = compare_result {
                CompareResultView { result }
            }
            if let Some(result) = query_result {
                QueryResultView { result }
            }
        }
    }
}

#[component]
fn CompareResultView(result: CompareResult) -> Element {
    rsx! {
        div { class: "result-card",
            h3 { "Narrative Gap" }
            p { class: "result-text", "{result.narrative_gap}" }

            h3 { "Misinterpreted Points" }
            PointList {
                points: result.misinterpreted_points.clone(),
                empty: "No misinterpretations found.",
            }

            h3 { "Counter-Speech Points" }
            PointList {
                points: result.counter_speech_points.clone(),
                empty: "No counter-speech points suggested.",
            }
        }
    }
}

#[component]
fn QueryResultView(result: QueryResult) -> Element {
    let evidence = result.evidence().map(<[String]>::to_vec);

    rsx! {
        div { class: "result-card",
            h3 { "Answer" }
            p { class: "result-text", "{result.answer}" }

            h3 { "Evidence" }
            match evidence {
                Some(facts) => rsx! {
                    ul { class: "evidence-list",
                        for (idx, fact) in facts.iter().enumerate() {
                            li { key: "{idx}", code { "{fact}" } }
                        }
                    }
                },
                None => rsx! {
                    p { class: "panel-empty", "No supporting evidence returned." }
                },
            }
        }
    }
}

#[component]
fn PointList(points: Vec<String>, empty: &'static str) -> Element {
    if points.is_empty() {
        return rsx! { p { class: "panel-empty", "{empty}" } };
    }

    rsx! {
        ul { class: "point-list",
            for (idx, point) in points.iter().enumerate() {
                li { key: "{idx}", "{point}" }
            }
        }
    }
}
