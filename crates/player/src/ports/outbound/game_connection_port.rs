//! Game Connection Port - Outbound port for the game server WebSocket
//!
//! The session only ever pushes text frames out; everything inbound arrives through
//! [`crate::ports::inbound::ConnectionEvents`].

/// Connection state for the game session.
///
/// There is no reconnect: `Disconnected` and `Failed` are terminal once the socket
/// has been opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Not connected to the server
    #[default]
    Disconnected,
    /// Attempting to establish connection
    Connecting,
    /// Socket is open; input may be sent
    Connected,
    /// Socket reported an error
    Failed,
}

impl ConnectionState {
    /// Whether outgoing input is allowed in this state.
    pub fn is_ready(self) -> bool {
        self == ConnectionState::Connected
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Fire-and-forget text transport to the game server.
///
/// Implemented by the web-sys socket in the browser and by a channel feeding the
/// tokio-tungstenite writer on desktop.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait TransportPort {
    /// Queue one text message for sending.
    fn send_text(&self, text: &str) -> anyhow::Result<()>;
}
