//! Application layer: use cases that sit between the ports and the session.

pub mod services;
