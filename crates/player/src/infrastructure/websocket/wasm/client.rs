//! WASM WebSocket client using web-sys

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use wasm_bindgen::prelude::*;
use web_sys::{MessageEvent, WebSocket};

use crate::ports::inbound::ConnectionEvents;
use crate::ports::outbound::TransportPort;

/// Sends text straight through the browser socket.
#[derive(Clone)]
pub struct WebSocketTransport {
    ws: WebSocket,
}

impl TransportPort for WebSocketTransport {
    fn send_text(&self, text: &str) -> Result<()> {
        self.ws
            .send_with_str(text)
            .map_err(|e| anyhow::anyhow!("Failed to send: {:?}", e))
    }
}

/// Storage for WebSocket event closures; dropping them detaches the handlers.
struct WasmClosures {
    #[allow(dead_code)]
    onmessage: Closure<dyn FnMut(MessageEvent)>,
    #[allow(dead_code)]
    onopen: Closure<dyn FnMut()>,
    #[allow(dead_code)]
    onclose: Closure<dyn FnMut()>,
    #[allow(dead_code)]
    onerror: Closure<dyn FnMut()>,
}

/// WebSocket client for the game server (WASM)
pub struct GameClient {
    url: String,
    ws: Option<WebSocket>,
    closures: Option<WasmClosures>,
}

impl GameClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ws: None,
            closures: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Create the socket (the browser starts connecting immediately).
    pub fn open(&mut self) -> Result<WebSocketTransport> {
        self.closures = None;

        let ws = WebSocket::new(&self.url)
            .map_err(|e| anyhow::anyhow!("Failed to create WebSocket: {:?}", e))?;

        self.ws = Some(ws.clone());
        Ok(WebSocketTransport { ws })
    }

    /// Route socket callbacks into `handler`.
    ///
    /// Callbacks run on the browser event loop one at a time, so the handler is only
    /// ever borrowed by one of them.
    pub fn attach<H>(&mut self, handler: Rc<RefCell<H>>) -> Result<()>
    where
        H: ConnectionEvents + 'static,
    {
        let ws = self
            .ws
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("WebSocket not opened"))?;

        let on_message = Rc::clone(&handler);
        let onmessage_callback = Closure::<dyn FnMut(_)>::new(move |e: MessageEvent| {
            match e.data().dyn_into::<js_sys::JsString>() {
                Ok(txt) => {
                    let text: String = txt.into();
                    on_message.borrow_mut().on_message(&text);
                }
                Err(_) => tracing::debug!("Ignoring non-text message"),
            }
        });
        ws.set_onmessage(Some(onmessage_callback.as_ref().unchecked_ref()));

        let on_open = Rc::clone(&handler);
        let onopen_callback = Closure::<dyn FnMut()>::new(move || {
            on_open.borrow_mut().on_open();
        });
        ws.set_onopen(Some(onopen_callback.as_ref().unchecked_ref()));

        let on_close = Rc::clone(&handler);
        let onclose_callback = Closure::<dyn FnMut()>::new(move || {
            on_close.borrow_mut().on_close();
        });
        ws.set_onclose(Some(onclose_callback.as_ref().unchecked_ref()));

        let on_error = Rc::clone(&handler);
        let onerror_callback = Closure::<dyn FnMut()>::new(move || {
            on_error.borrow_mut().on_error("WebSocket error");
        });
        ws.set_onerror(Some(onerror_callback.as_ref().unchecked_ref()));

        self.closures = Some(WasmClosures {
            onmessage: onmessage_callback,
            onopen: onopen_callback,
            onclose: onclose_callback,
            onerror: onerror_callback,
        });

        Ok(())
    }
}
