//! Analysis service access for components
//!
//! The [`ApiClient`] and its [`ClientConfig`] are provided once at the app
//! root and read from context by each panel. [`submit_panel`] runs one panel
//! submission: begin synchronously, await the backend on the event loop, then
//! settle into the panel signal (a stale ticket is dropped by the panel).

use dioxus::prelude::*;
use narrascope_core::{ApiClient, ClientConfig, Panel};

/// Initialize configuration and client at app root.
pub fn use_api_provider() -> ClientConfig {
    let config = use_context_provider(crate::config::load);
    use_context_provider(|| ApiClient::from_config(&config));
    config
}

/// Get the API client from context.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

/// Get the client configuration from context.
pub fn use_client_config() -> ClientConfig {
    use_context::<ClientConfig>()
}

/// Start a submission on `panel` and settle it when the backend answers.
///
/// Does nothing if the panel is already busy; a validation failure is recorded
/// on the panel without contacting the backend.
pub fn submit_panel<P>(mut panel: Signal<P>, client: ApiClient)
where
    P: Panel + 'static,
    P::Request: 'static,
    P::Output: 'static,
{
    let Some(submission) = panel.write().begin() else {
        return;
    };

    spawn(async move {
        let outcome = P::dispatch(&client, &submission.request).await;
        // Use try_write to handle the signal being dropped when the panel unmounts
        let _ = panel
            .try_write()
            .map(|mut p| p.finish(submission.ticket, outcome));
    });
}
