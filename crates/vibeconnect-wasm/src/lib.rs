//! Browser adapter for the vibeconnect matchmaking chat widget.
//!
//! Everything here is glue: the session rules live in
//! `vibeconnect-session`, this crate binds them to the host page's DOM and
//! to a WebSocket reaching the matching server.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

mod config;
mod dom;
mod presenter;
mod utils;
mod widget;

pub use config::WidgetConfig;

/// Initialize the WASM module: panic hook and logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    log::info!("VibeConnect widget initialized");
}

/// Start the chat widget on the current page.
///
/// Resolves when the socket closes; the page stays on the static
/// disconnect notice after that (no automatic reconnect).
#[wasm_bindgen]
pub async fn init_chat_widget() -> Result<(), JsValue> {
    widget::ChatWidget::new()?.start().await
}

/// Get the window object
fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))
}

/// Get the document object
fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("No document object"))
}
