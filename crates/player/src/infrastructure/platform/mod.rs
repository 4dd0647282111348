//! Platform-specific composition
//!
//! Wires the session to a real socket, surface and keyboard. The correct platform is
//! selected at compile time based on the target architecture.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
mod desktop;

#[cfg(target_arch = "wasm32")]
pub use wasm::{decode_frame_js, launch, LaunchedClient, WebSession};

#[cfg(not(target_arch = "wasm32"))]
pub use desktop::{
    drive_session, parse_key_command, pump_key_commands, run, spawn_stdin_reader, DesktopSession,
    LogSurface, SurfaceCounters,
};
