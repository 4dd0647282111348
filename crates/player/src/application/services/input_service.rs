//! Input service: held-key tracking and input vector encoding
//!
//! Every key transition recomputes the full `[dx, dy, action]` vector from the
//! held-key mapping and sends it, as long as the connection is ready. There is no
//! debouncing; auto-repeated key-downs each produce a send.

use std::collections::HashMap;
use std::fmt;

use chaos_protocol::InputVector;

use crate::ports::outbound::TransportPort;

/// Keys the game listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Action,
}

impl Key {
    pub const ALL: [Key; 5] = [Key::Up, Key::Down, Key::Left, Key::Right, Key::Action];

    /// Map a DOM `keyCode` (arrows 37-40, space 32).
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            38 => Some(Key::Up),
            40 => Some(Key::Down),
            37 => Some(Key::Left),
            39 => Some(Key::Right),
            32 => Some(Key::Action),
            _ => None,
        }
    }

    /// Map a DOM `KeyboardEvent.key` value or a plain key name, case-insensitively.
    pub fn from_key_name(name: &str) -> Option<Self> {
        if name == " " {
            return Some(Key::Action);
        }
        match name.trim().to_ascii_lowercase().as_str() {
            "arrowup" | "up" => Some(Key::Up),
            "arrowdown" | "down" => Some(Key::Down),
            "arrowleft" | "left" => Some(Key::Left),
            "arrowright" | "right" => Some(Key::Right),
            "space" | "spacebar" | "action" => Some(Key::Action),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Key::Up => "up",
            Key::Down => "down",
            Key::Left => "left",
            Key::Right => "right",
            Key::Action => "action",
        };
        f.write_str(name)
    }
}

/// Current held state of each tracked key.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    inner: HashMap<Key, bool>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Key, held: bool) {
        self.inner.insert(key, held);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.inner.get(&key).copied().unwrap_or(false)
    }

    /// Derive the input vector from the keys currently held.
    pub fn vector(&self) -> InputVector {
        InputVector::from_held(
            self.is_held(Key::Up),
            self.is_held(Key::Down),
            self.is_held(Key::Left),
            self.is_held(Key::Right),
            self.is_held(Key::Action),
        )
    }
}

/// What happened to a key transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent(InputVector),
    /// Connection not open yet; held state was still updated.
    NotReady,
    /// The transport refused the message.
    Failed(String),
}

/// Turns key transitions into input messages.
#[derive(Debug, Default)]
pub struct InputEncoder {
    held: HeldKeys,
}

impl InputEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> &HeldKeys {
        &self.held
    }

    /// Record a key transition and, when `ready`, send the resulting vector.
    pub fn handle_key<T: TransportPort + ?Sized>(
        &mut self,
        key: Key,
        pressed: bool,
        ready: bool,
        transport: &T,
    ) -> SendOutcome {
        self.held.set(key, pressed);

        if !ready {
            tracing::debug!(%key, pressed, "not ready to send");
            return SendOutcome::NotReady;
        }

        let vector = self.held.vector();
        match transport.send_text(&vector.to_string()) {
            Ok(()) => {
                tracing::trace!(%vector, "sent input");
                SendOutcome::Sent(vector)
            }
            Err(e) => {
                tracing::warn!("Failed to send input: {}", e);
                SendOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::MockTransportPort;
    use mockall::predicate::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_key_code(38), Some(Key::Up));
        assert_eq!(Key::from_key_code(40), Some(Key::Down));
        assert_eq!(Key::from_key_code(37), Some(Key::Left));
        assert_eq!(Key::from_key_code(39), Some(Key::Right));
        assert_eq!(Key::from_key_code(32), Some(Key::Action));
        assert_eq!(Key::from_key_code(65), None);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_key_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_key_name(" "), Some(Key::Action));
        assert_eq!(Key::from_key_name("SPACE"), Some(Key::Action));
        assert_eq!(Key::from_key_name("down"), Some(Key::Down));
        assert_eq!(Key::from_key_name("Enter"), None);
    }

    #[test]
    fn test_vector_for_every_held_combination() {
        for bits in 0u8..32 {
            let mut held = HeldKeys::new();
            for (i, key) in Key::ALL.iter().enumerate() {
                held.set(*key, bits & (1 << i) != 0);
            }

            let up = held.is_held(Key::Up) as i8;
            let down = held.is_held(Key::Down) as i8;
            let left = held.is_held(Key::Left) as i8;
            let right = held.is_held(Key::Right) as i8;

            let v = held.vector();
            assert_eq!(v.dx, right - left);
            assert_eq!(v.dy, down - up);
            assert_eq!(v.action, held.is_held(Key::Action));
        }
    }

    #[test]
    fn test_sends_on_each_transition_when_ready() {
        let mut transport = MockTransportPort::new();
        let mut seq = mockall::Sequence::new();
        transport
            .expect_send_text()
            .with(eq("1,0,0"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        transport
            .expect_send_text()
            .with(eq("1,0,1"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        transport
            .expect_send_text()
            .with(eq("0,0,1"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let mut encoder = InputEncoder::new();
        encoder.handle_key(Key::Right, true, true, &transport);
        encoder.handle_key(Key::Action, true, true, &transport);
        let outcome = encoder.handle_key(Key::Right, false, true, &transport);

        assert_eq!(outcome, SendOutcome::Sent(InputVector::new(0, 0, true).unwrap()));
    }

    #[test]
    fn test_repeated_key_down_sends_again() {
        let mut transport = MockTransportPort::new();
        transport
            .expect_send_text()
            .with(eq("0,-1,0"))
            .times(2)
            .returning(|_| Ok(()));

        let mut encoder = InputEncoder::new();
        encoder.handle_key(Key::Up, true, true, &transport);
        encoder.handle_key(Key::Up, true, true, &transport);
    }

    #[test]
    fn test_not_ready_suppresses_send_but_tracks_keys() {
        let mut transport = MockTransportPort::new();
        transport.expect_send_text().never();

        let mut encoder = InputEncoder::new();
        let outcome = encoder.handle_key(Key::Down, true, false, &transport);

        assert_eq!(outcome, SendOutcome::NotReady);
        assert!(encoder.held().is_held(Key::Down));
    }

    #[test]
    fn test_transport_failure_is_reported() {
        let mut transport = MockTransportPort::new();
        transport
            .expect_send_text()
            .returning(|_| Err(anyhow::anyhow!("socket closed")));

        let mut encoder = InputEncoder::new();
        let outcome = encoder.handle_key(Key::Left, true, true, &transport);

        assert_eq!(outcome, SendOutcome::Failed("socket closed".to_string()));
    }
}
