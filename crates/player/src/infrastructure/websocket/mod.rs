//! WebSocket client for the game server connection
//!
//! Platform-specific implementations are in submodules:
//! - `desktop`: tokio-tungstenite based client
//! - `wasm`: web-sys WebSocket based client
//!
//! Both expose a `GameClient` plus a transport implementing
//! [`TransportPort`](crate::ports::outbound::TransportPort).

#[cfg(not(target_arch = "wasm32"))]
mod desktop;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
pub use desktop::{ChannelTransport, GameClient};

#[cfg(target_arch = "wasm32")]
pub use wasm::{GameClient, WebSocketTransport};
