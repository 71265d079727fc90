//! Loading and error indicators shared by every panel.

use dioxus::prelude::*;
use narrascope_core::RequestState;

/// Spinner while loading, error banner on failure, nothing otherwise.
pub fn request_status<T>(state: &RequestState<T>) -> Element {
    match state {
        RequestState::Loading => rsx! {
            div { class: "panel-loading",
                i { class: "fa-solid fa-spinner fa-spin" }
                " Loading..."
            }
        },
        RequestState::Error(message) => rsx! {
            div { class: "error-message",
                i { class: "fa-solid fa-triangle-exclamation" }
                " {message}"
            }
        },
        RequestState::Idle | RequestState::Success(_) => rsx! {},
    }
}

/// Submit button label, switched while a request is in flight.
pub fn submit_label(busy: bool, idle: &'static str) -> &'static str {
    if busy { "Working..." } else { idle }
}
