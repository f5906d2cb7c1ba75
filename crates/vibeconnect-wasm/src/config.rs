//! Host-provided widget configuration, read once at startup.

use serde::Deserialize;
use wasm_bindgen::JsValue;
use web_sys::Document;

/// Configuration embedded by the host page.
///
/// Preferred form is a JSON blob in `<script id="widgetConfig"
/// type="application/json">`; pages that only care about guest mode may
/// instead set a plain `IS_GUEST` window global.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WidgetConfig {
    /// Guest (unauthenticated) mode: the interest/save feature is disabled.
    #[serde(default)]
    pub is_guest: bool,
    /// Override for the WebSocket path, defaults to `/ws/chat/`.
    #[serde(default)]
    pub ws_path: Option<String>,
}

/// Load the configuration from the page. Missing or malformed config falls
/// back to defaults rather than failing the widget.
pub fn load(document: &Document) -> WidgetConfig {
    if let Some(element) = document.get_element_by_id("widgetConfig") {
        if let Some(text) = element.text_content() {
            match serde_json::from_str(&text) {
                Ok(config) => return config,
                Err(e) => log::warn!("Invalid widget config, using fallback: {}", e),
            }
        }
    }

    let mut config = WidgetConfig::default();
    if let Some(window) = web_sys::window() {
        if let Ok(flag) = js_sys::Reflect::get(&window, &JsValue::from_str("IS_GUEST")) {
            config.is_guest = flag.as_bool().unwrap_or(false);
        }
    }
    config
}
