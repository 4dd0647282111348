//! Chaos Player crate.
//!
//! Browser (wasm32) and desktop client for Chaos The Game: keyboard input goes out as
//! `dx,dy,action` messages, frame snapshots come back and are drawn from scratch.
//! Multi-platform support is provided via compile-time `cfg` selection.

pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod session;

// Re-export commonly used entrypoints
pub use application::services::{FrameRenderer, InputEncoder, Key, RenderStats};
pub use infrastructure::{ClientConfig, ConfigError};
pub use ports::inbound::{ClientEvent, ConnectionEvents, InputEvents};
pub use ports::outbound::{ConnectionState, DrawSurface, TransportPort};
pub use session::GameSession;
