//! Article Search Tab
//!
//! Free-text search over collected news coverage.

use dioxus::prelude::*;
use narrascope_core::{Panel, SearchPanel};
use narrascope_types::Article;

use super::request_status::{request_status, submit_label};
use crate::api;

#[component]
pub fn SearchTab() -> Element {
    let client = api::use_api();
    let mut panel = use_signal(SearchPanel::new);

    use_drop(move || {
        let _ = panel.try_write().map(|mut p| p.unmount());
    });

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        api::submit_panel(panel, client.clone());
    };

    let busy = panel.read().is_busy();
    let label = submit_label(busy, "Search");
    let query = panel.read().query.clone();
    let articles: Option<Vec<Article>> = panel.read().articles().map(<[Article]>::to_vec);

    rsx! {
        section { class: "feature-panel search-panel",
            h2 { i { class: "fa-solid fa-magnifying-glass" } " Article Search" }

            form { class: "panel-form", onsubmit: submit,
                input {
                    r#type: "text",
                    class: "panel-input",
                    placeholder: "Search coverage, e.g. EV subsidies",
                    value: "{query}",
                    oninput: move |e| panel.write().set_query(e.value()),
                }
                button {
                    r#type: "submit",
                    class: "btn btn-primary",
                    disabled: busy,
                    "{label}"
                }
            }

            {request_status(panel.read().state())}

            if let Some(articles) = articles {
                if articles.is_empty() {
                    div { class: "panel-empty", "No articles found." }
                } else {
                    ul { class: "article-list",
                        for (idx, article) in articles.iter().enumerate() {
                            ArticleCard { key: "{idx}", article: article.clone() }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ArticleCard(article: Article) -> Element {
    rsx! {
        li { class: "article-card",
            if article.url.is_empty() {
                h3 { class: "article-title", "{article.title_text()}" }
            } else {
                h3 { class: "article-title",
                    a { href: "{article.url}", target: "_blank", rel: "noopener noreferrer",
                        "{article.title_text()}"
                    }
                }
            }
            span { class: "article-source", "{article.source_text()}" }
            if !article.snippet.is_empty() {
                p { class: "article-snippet", "{article.snippet}" }
            }
        }
    }
}
