//! Application services
//!
//! Services depend on port traits, not concrete infrastructure implementations.

pub mod frame_renderer;
pub mod input_service;

pub use frame_renderer::{FrameRenderer, RenderStats};
pub use input_service::{HeldKeys, InputEncoder, Key, SendOutcome};
