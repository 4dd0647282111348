//! Player port definitions.
//!
//! - `inbound`: events the platform pushes into the session (socket + keyboard)
//! - `outbound`: what the session needs from the platform (transport + drawing)

pub mod inbound;
pub mod outbound;
