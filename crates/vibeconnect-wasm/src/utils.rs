use wasm_bindgen::JsValue;

/// Default WebSocket path on the matching server.
pub const DEFAULT_WS_PATH: &str = "/ws/chat/";

/// Get the current protocol (ws or wss) based on the page protocol
pub fn get_ws_protocol() -> String {
    let location = web_sys::window()
        .and_then(|w| w.location().protocol().ok())
        .unwrap_or_else(|| "http:".to_string());

    if location == "https:" {
        "wss:".to_string()
    } else {
        "ws:".to_string()
    }
}

/// Get the current host
pub fn get_host() -> Result<String, JsValue> {
    web_sys::window()
        .and_then(|w| w.location().host().ok())
        .ok_or_else(|| JsValue::from_str("Failed to get host"))
}

/// Build the chat WebSocket URL, honoring a host-page path override
pub fn build_chat_ws_url(path_override: Option<&str>) -> Result<String, JsValue> {
    let protocol = get_ws_protocol();
    let host = get_host()?;
    let path = path_override.unwrap_or(DEFAULT_WS_PATH);
    Ok(format!("{}//{}{}", protocol, host, path))
}

/// Escape HTML to prevent XSS
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_message_bodies() {
        assert_eq!(
            escape_html(r#"<b>"hi" & 'bye'</b>"#),
            "&lt;b&gt;&quot;hi&quot; &amp; &#39;bye&#39;&lt;/b&gt;"
        );
    }
}
