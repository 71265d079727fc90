use dioxus::prelude::*;
use narrascope_types::DashboardTab;

use crate::api;
use crate::components::{CompareQueryTab, SearchTab, TrendTab};

static CSS: Asset = asset!("/assets/styles.css");

/// Dashboard root: provides the analysis client and mounts the shell.
#[component]
pub fn App() -> Element {
    let config = api::use_api_provider();

    use_hook(move || {
        tracing::info!(base_url = %config.base_url, "narrascope dashboard started");
    });

    rsx! {
        link { rel: "stylesheet", href: CSS }
        link { rel: "stylesheet", href: "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css" }
        DashboardShell {}
    }
}

/// Header, tab navigation and the active feature panel.
///
/// Only the active panel is mounted; switching tabs unmounts the previous
/// one, which discards its inputs and orphans its in-flight request.
#[component]
pub fn DashboardShell() -> Element {
    let mut active_tab = use_signal(DashboardTab::default);

    rsx! {
        main { class: "container",
            header { class: "app-header",
                div { class: "header-content",
                    h1 { "Narrascope" }
                    p { class: "subtitle", "Narrative and perception analysis" }
                }
            }

            nav { class: "tab-nav",
                for tab in DashboardTab::all() {
                    {
                        let is_active = active_tab() == *tab;
                        let tab_copy = *tab;

                        rsx! {
                            button {
                                class: if is_active { "tab-btn active" } else { "tab-btn" },
                                onclick: move |_| active_tab.set(tab_copy),
                                i { class: "fa-solid {tab.icon()}" }
                                " {tab.label()}"
                            }
                        }
                    }
                }
            }

            div { class: "tab-content",
                match active_tab() {
                    DashboardTab::Search => rsx! { SearchTab {} },
                    DashboardTab::CompareQuery => rsx! { CompareQueryTab {} },
                    DashboardTab::Trend => rsx! { TrendTab {} },
                }
            }
        }
    }
}
