use anyhow::Result;
use tokio::sync::mpsc;

use crate::ports::outbound::TransportPort;

/// Transport that queues text for the socket writer task.
///
/// Created before the socket exists; anything sent is written once the client runs.
#[derive(Clone)]
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelTransport {
    /// Create the transport and the receiver to hand to [`super::GameClient::run`].
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl TransportPort for ChannelTransport {
    fn send_text(&self, text: &str) -> Result<()> {
        self.tx
            .send(text.to_string())
            .map_err(|_| anyhow::anyhow!("Not connected"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_queues_text() {
        let (transport, mut rx) = ChannelTransport::new();
        transport.send_text("1,0,0").unwrap();
        assert_eq!(rx.try_recv().unwrap(), "1,0,0");
    }

    #[test]
    fn test_send_after_writer_gone_fails() {
        let (transport, rx) = ChannelTransport::new();
        drop(rx);
        assert!(transport.send_text("0,0,0").is_err());
    }
}
