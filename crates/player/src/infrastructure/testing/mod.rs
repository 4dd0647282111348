//! Test doubles for the outbound ports.
//!
//! `MockTransportPort` comes from `mockall::automock` on the port itself; the drawing
//! port is easier to assert against as a recorded call list than as expectations.

mod recording_surface;

pub use recording_surface::{DrawCall, RecordingSurface};
