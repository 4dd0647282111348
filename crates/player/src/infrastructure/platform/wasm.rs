//! Browser platform: canvas, socket and document keyboard listeners.

use std::cell::RefCell;
use std::rc::Rc;

use chaos_protocol::decode_frame;
use wasm_bindgen::prelude::*;
use web_sys::KeyboardEvent;

use crate::application::services::input_service::Key;
use crate::infrastructure::canvas::{CanvasSurface, SpriteSheet};
use crate::infrastructure::config::ClientConfig;
use crate::infrastructure::websocket::{GameClient, WebSocketTransport};
use crate::ports::inbound::InputEvents;
use crate::session::GameSession;

pub type WebSession = GameSession<WebSocketTransport, CanvasSurface>;

/// Everything that must stay alive for the page to keep playing.
///
/// Dropping this detaches the socket and keyboard handlers.
pub struct LaunchedClient {
    session: Rc<RefCell<WebSession>>,
    #[allow(dead_code)]
    client: GameClient,
    #[allow(dead_code)]
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
    #[allow(dead_code)]
    keyup: Closure<dyn FnMut(KeyboardEvent)>,
}

impl LaunchedClient {
    pub fn session(&self) -> Rc<RefCell<WebSession>> {
        Rc::clone(&self.session)
    }
}

/// Map an event to one of the five game keys; any other key is ignored and sends nothing.
fn tracked_key(event: &KeyboardEvent) -> Option<Key> {
    Key::from_key_name(&event.key()).or_else(|| Key::from_key_code(event.key_code()))
}

fn key_listener(
    session: &Rc<RefCell<WebSession>>,
    pressed: bool,
) -> Closure<dyn FnMut(KeyboardEvent)> {
    let session = Rc::clone(session);
    Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
        let Some(key) = tracked_key(&event) else {
            return;
        };
        // keep arrows and space from scrolling the page
        event.prevent_default();
        let mut session = session.borrow_mut();
        if pressed {
            session.on_key_down(key);
        } else {
            session.on_key_up(key);
        }
    })
}

/// Wire the canvas, socket and keyboard to a fresh session.
pub fn launch(config: ClientConfig) -> Result<LaunchedClient, JsValue> {
    let url = config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let sprites = SpriteSheet::load(&config)?;
    let surface = CanvasSurface::from_document(&config.canvas_id, sprites)?;

    let mut client = GameClient::new(url.as_str());
    let transport = client
        .open()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let session = Rc::new(RefCell::new(
        GameSession::new(transport, surface).with_join_name(config.player_name.clone()),
    ));
    session.borrow_mut().set_connecting();

    client
        .attach(Rc::clone(&session))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let keydown = key_listener(&session, true);
    document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
    let keyup = key_listener(&session, false);
    document.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;

    tracing::info!("Connecting to {}", client.url());

    Ok(LaunchedClient {
        session,
        client,
        keydown,
        keyup,
    })
}

/// Decode a frame message into a plain JS object (for debugging from the console).
#[wasm_bindgen(js_name = decodeFrame)]
pub fn decode_frame_js(text: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&decode_frame(text).frame).map_err(Into::into)
}
