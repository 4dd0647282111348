//! Desktop WebSocket implementation using tokio-tungstenite

mod client;
mod transport;

pub use client::GameClient;
pub use transport::ChannelTransport;
