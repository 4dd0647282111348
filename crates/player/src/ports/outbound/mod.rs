//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing the session and application services to talk to the socket and the
//! canvas without depending on concrete implementations.

pub mod draw_surface_port;
pub mod game_connection_port;

pub use draw_surface_port::{DrawSurface, Point};
pub use game_connection_port::{ConnectionState, TransportPort};

#[cfg(any(test, feature = "testing"))]
pub use game_connection_port::MockTransportPort;
