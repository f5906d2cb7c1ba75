//! The widget itself: wires the session controller to the page's controls
//! and runs the WebSocket frame loop.

use std::cell::RefCell;
use std::rc::Rc;

use futures::stream::{SplitSink, StreamExt};
use futures::SinkExt;
use gloo_net::websocket::futures::WebSocket;
use gloo_net::websocket::Message as WsMessage;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

use vibeconnect_protocol::OutboundFrame;
use vibeconnect_session::{FrameSink, SessionConfig, SessionController};

use crate::config::{self, WidgetConfig};
use crate::dom;
use crate::presenter::DomPresenter;
use crate::utils;

type SharedSink = Rc<RefCell<Option<SplitSink<WebSocket, WsMessage>>>>;
type SharedController = Rc<RefCell<SessionController<DomPresenter, WsFrameSink>>>;

/// Outbound port backed by the write half of the socket. Sends are queued
/// onto the event loop; a frame sent before the socket is ready is dropped
/// with a warning.
pub struct WsFrameSink {
    sink: SharedSink,
}

impl FrameSink for WsFrameSink {
    fn send(&mut self, frame: OutboundFrame) {
        let raw = frame.encode();
        log::debug!("outbound frame: {:?}", raw);

        let sink = self.sink.clone();
        spawn_local(async move {
            let mut slot = sink.borrow_mut();
            match slot.as_mut() {
                Some(ws) => {
                    if let Err(e) = ws.send(WsMessage::Text(raw)).await {
                        log::error!("Failed to send frame: {:?}", e);
                    }
                }
                None => log::warn!("Socket not ready, outbound frame dropped"),
            }
        });
    }
}

pub struct ChatWidget {
    document: Document,
    config: WidgetConfig,
}

impl ChatWidget {
    pub fn new() -> Result<Self, JsValue> {
        let document = crate::document()?;
        let config = config::load(&document);
        log::info!("Widget config: {:?}", config);

        Ok(Self { document, config })
    }

    pub async fn start(self) -> Result<(), JsValue> {
        let guest = self.config.is_guest;
        let presenter = DomPresenter::new(&self.document, guest)?;

        let sink_slot: SharedSink = Rc::new(RefCell::new(None));
        let controller: SharedController = Rc::new(RefCell::new(SessionController::new(
            SessionConfig { guest },
            presenter,
            WsFrameSink {
                sink: sink_slot.clone(),
            },
        )));

        self.setup_send_controls(&controller)?;
        self.setup_skip_control(&controller)?;
        if !guest {
            self.setup_interest_control(&controller)?;
        }

        let url = utils::build_chat_ws_url(self.config.ws_path.as_deref())?;
        log::info!("Connecting to {}", url);

        let ws = WebSocket::open(&url)
            .map_err(|e| JsValue::from_str(&format!("Failed to connect: {:?}", e)))?;
        let (sink, mut stream) = ws.split();
        *sink_slot.borrow_mut() = Some(sink);
        controller.borrow_mut().handle_open();

        while let Some(next) = stream.next().await {
            match next {
                Ok(WsMessage::Text(text)) => controller.borrow_mut().handle_frame(&text),
                Ok(WsMessage::Bytes(_)) => log::warn!("Received unexpected binary frame"),
                Err(e) => {
                    log::error!("WebSocket error: {:?}", e);
                    break;
                }
            }
        }

        // Terminal: the widget advises a manual page reload instead of
        // reconnecting.
        sink_slot.borrow_mut().take();
        controller.borrow_mut().handle_close();
        Ok(())
    }

    fn setup_send_controls(&self, controller: &SharedController) -> Result<(), JsValue> {
        let input = dom::get_input_by_id(&self.document, "msgInput")?;
        let send_btn = dom::get_element_by_id(&self.document, "sendBtn")?;

        let controller_ref = controller.clone();
        let input_ref = input.clone();
        dom::add_click_listener(&send_btn, move || {
            controller_ref.borrow_mut().send_chat(&input_ref.value());
        })?;

        // Enter sends, same as the button.
        let controller_ref = controller.clone();
        let input_ref = input.clone();
        let closure = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
            if event.key() == "Enter" {
                event.prevent_default();
                controller_ref.borrow_mut().send_chat(&input_ref.value());
            }
        }) as Box<dyn FnMut(_)>);
        input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();

        Ok(())
    }

    fn setup_skip_control(&self, controller: &SharedController) -> Result<(), JsValue> {
        let skip_btn = dom::get_element_by_id(&self.document, "skipBtn")?;

        let controller_ref = controller.clone();
        dom::add_click_listener(&skip_btn, move || {
            controller_ref.borrow_mut().skip();
        })
    }

    fn setup_interest_control(&self, controller: &SharedController) -> Result<(), JsValue> {
        // Interest is optional page surface even for logged-in users.
        let Some(btn) = dom::try_get_button_by_id(&self.document, "interestedBtn") else {
            log::warn!("No interested button on this page");
            return Ok(());
        };

        let controller_ref = controller.clone();
        dom::add_click_listener(&btn, move || {
            controller_ref.borrow_mut().express_interest();
        })
    }
}
