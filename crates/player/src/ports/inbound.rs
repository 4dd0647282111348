//! Inbound ports - events pushed into the game session
//!
//! The browser delivers socket and keyboard callbacks one at a time on its event loop;
//! the desktop client reproduces that with a single FIFO channel of [`ClientEvent`]s.
//! Both end up calling these handlers, so the session can be driven directly in tests.

use crate::application::services::input_service::Key;

/// Socket lifecycle and message callbacks.
pub trait ConnectionEvents {
    fn on_open(&mut self);
    fn on_message(&mut self, text: &str);
    fn on_close(&mut self);
    fn on_error(&mut self, reason: &str);
}

/// Keyboard transitions for the tracked keys.
pub trait InputEvents {
    fn on_key_down(&mut self, key: Key);
    fn on_key_up(&mut self, key: Key);
}

/// One queued event for the desktop event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Opened,
    Message(String),
    Closed,
    Error(String),
    KeyDown(Key),
    KeyUp(Key),
}

impl ClientEvent {
    /// Route the event to the matching handler.
    pub fn dispatch<H: ConnectionEvents + InputEvents + ?Sized>(self, handler: &mut H) {
        match self {
            ClientEvent::Opened => handler.on_open(),
            ClientEvent::Message(text) => handler.on_message(&text),
            ClientEvent::Closed => handler.on_close(),
            ClientEvent::Error(reason) => handler.on_error(&reason),
            ClientEvent::KeyDown(key) => handler.on_key_down(key),
            ClientEvent::KeyUp(key) => handler.on_key_up(key),
        }
    }
}
