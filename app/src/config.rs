//! Dashboard configuration
//!
//! Defaults come from the TOML embedded in the bundle. A server can inject the
//! analysis endpoint without rebuilding:
//!
//! ```html
//! <meta name="narrascope:api-url" content="https://analysis.internal">
//! ```
//!
//! or via `window.__NARRASCOPE_CONFIG__ = { api_url: "..." }`.

use narrascope_core::ClientConfig;
use wasm_bindgen::JsCast;

const EMBEDDED_CONFIG: &str = include_str!("../assets/narrascope.toml");

/// Load configuration (priority order):
/// 1. `<meta name="narrascope:api-url">` tag (server-injected)
/// 2. `window.__NARRASCOPE_CONFIG__.api_url`
/// 3. Embedded `narrascope.toml`
pub fn load() -> ClientConfig {
    let config = match ClientConfig::from_toml_str(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "embedded configuration invalid, using defaults");
            ClientConfig::default()
        }
    };

    let injected = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|document| get_meta_content(&document, "narrascope:api-url"))
        .filter(|url| !url.is_empty())
        .or_else(|| get_js_config("api_url"));

    let Some(url) = injected else {
        return config;
    };

    match config.clone().with_base_url(url) {
        Ok(updated) => {
            tracing::info!(base_url = %updated.base_url, "using injected analysis endpoint");
            updated
        }
        Err(err) => {
            tracing::warn!(error = %err, "ignoring injected analysis endpoint");
            config
        }
    }
}

/// Get content from a <meta name="..."> tag
fn get_meta_content(document: &web_sys::Document, name: &str) -> Option<String> {
    let selector = format!("meta[name=\"{}\"]", name);
    document
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlMetaElement>().ok())
        .map(|meta| meta.content())
}

/// Get a value from window.__NARRASCOPE_CONFIG__
fn get_js_config(key: &str) -> Option<String> {
    let window = web_sys::window()?;
    let config = js_sys::Reflect::get(&window, &"__NARRASCOPE_CONFIG__".into()).ok()?;

    if config.is_undefined() || config.is_null() {
        return None;
    }

    js_sys::Reflect::get(&config, &key.into()).ok()?.as_string()
}
