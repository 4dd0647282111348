//! Game session - the single context object for one connection.
//!
//! Owns everything the client mutates: connection state (and with it the readiness
//! flag), the held-key mapping, the transport and the draw surface. Platform code
//! forwards socket and keyboard callbacks into the [`ConnectionEvents`] and
//! [`InputEvents`] impls; nothing else holds shared mutable state.

use chaos_protocol::{decode_frame, join_announcement};

use crate::application::services::{FrameRenderer, HeldKeys, InputEncoder, RenderStats};
use crate::application::services::input_service::Key;
use crate::ports::inbound::{ConnectionEvents, InputEvents};
use crate::ports::outbound::{ConnectionState, DrawSurface, TransportPort};

pub struct GameSession<T, S> {
    state: ConnectionState,
    input: InputEncoder,
    renderer: FrameRenderer,
    transport: T,
    surface: S,
    /// Name announced on open, if any.
    join_name: Option<String>,
    last_render: Option<RenderStats>,
    frames_rendered: u64,
}

impl<T: TransportPort, S: DrawSurface> GameSession<T, S> {
    pub fn new(transport: T, surface: S) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            input: InputEncoder::new(),
            renderer: FrameRenderer::new(),
            transport,
            surface,
            join_name: None,
            last_render: None,
            frames_rendered: 0,
        }
    }

    /// Announce `name` to the server once the socket opens.
    pub fn with_join_name(mut self, name: Option<String>) -> Self {
        self.join_name = name.filter(|n| !n.trim().is_empty());
        self
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// The readiness flag: true only while the socket is open.
    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// Mark the socket as being established.
    pub fn set_connecting(&mut self) {
        self.set_state(ConnectionState::Connecting);
    }

    pub fn held_keys(&self) -> &HeldKeys {
        self.input.held()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Stats of the frame currently on the surface.
    pub fn last_render(&self) -> Option<RenderStats> {
        self.last_render
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    fn set_state(&mut self, new_state: ConnectionState) {
        if self.state != new_state {
            tracing::debug!(from = %self.state, to = %new_state, "connection state changed");
        }
        self.state = new_state;
    }

    fn handle_key(&mut self, key: Key, pressed: bool) {
        let ready = self.is_ready();
        self.input.handle_key(key, pressed, ready, &self.transport);
    }
}

impl<T: TransportPort, S: DrawSurface> ConnectionEvents for GameSession<T, S> {
    fn on_open(&mut self) {
        self.set_state(ConnectionState::Connected);
        tracing::info!("Connected to game server");

        if let Some(name) = &self.join_name {
            if let Err(e) = self.transport.send_text(&join_announcement(name)) {
                tracing::warn!("Failed to send join announcement: {}", e);
            }
        }
    }

    fn on_message(&mut self, text: &str) {
        let decoded = decode_frame(text);
        for rejected in &decoded.rejected {
            tracing::warn!("Skipping malformed record: {}", rejected);
        }
        if decoded.extra_segments > 0 {
            tracing::warn!(
                extra = decoded.extra_segments,
                "Ignoring unexpected trailing segments"
            );
        }

        let mut stats = self.renderer.render(&decoded.frame, &mut self.surface);
        stats.rejected = decoded.rejected.len();
        self.last_render = Some(stats);
        self.frames_rendered += 1;
    }

    fn on_close(&mut self) {
        self.set_state(ConnectionState::Disconnected);
        tracing::info!(
            frames = self.frames_rendered,
            "Connection closed; keeping last frame"
        );
    }

    fn on_error(&mut self, reason: &str) {
        self.set_state(ConnectionState::Failed);
        tracing::error!("WebSocket error: {}", reason);
    }
}

impl<T: TransportPort, S: DrawSurface> InputEvents for GameSession<T, S> {
    fn on_key_down(&mut self, key: Key) {
        self.handle_key(key, true);
    }

    fn on_key_up(&mut self, key: Key) {
        self.handle_key(key, false);
    }
}
