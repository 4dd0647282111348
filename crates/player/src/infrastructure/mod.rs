pub mod config;
pub mod platform;
pub mod websocket;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{ClientConfig, ConfigError};
