//! Chaos Protocol - Wire formats shared by the game server and player clients
//!
//! The game speaks plain delimited text over a WebSocket:
//! - Client → Server: input vectors (`dx,dy,action`)
//! - Server → Client: frame snapshots (`players/walls/projectiles`)
//! - Client → Server (optional): a one-line join announcement
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and thiserror
//! 2. **No I/O** - Pure parsing and formatting
//! 3. **WASM compatible** - Must compile for both native and wasm32 targets
//! 4. **Best-effort decoding** - A bad record never poisons the rest of a frame

pub mod frame;
pub mod input;
pub mod schema;

pub use frame::{
    decode_frame, Frame, FrameDecode, PlayerColor, PlayerRecord, ProjectileRecord, RecordError,
    RecordErrorReason, WallRecord,
};
pub use input::{InputParseError, InputVector};
pub use schema::{RecordKind, FIELD_SEPARATOR, PROTOCOL_VERSION, SEGMENT_SEPARATOR};

/// Build the announcement sent once when a named player connects.
pub fn join_announcement(name: &str) -> String {
    format!("*** {} joined the chat", name.trim())
}
