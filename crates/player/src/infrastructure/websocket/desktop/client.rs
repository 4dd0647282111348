//! Desktop WebSocket client using tokio-tungstenite

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::ports::inbound::ClientEvent;

/// WebSocket client for the game server (Desktop).
///
/// Socket activity is reported as [`ClientEvent`]s on one channel so the session can
/// handle socket and keyboard events in arrival order. There is no reconnect.
pub struct GameClient {
    url: String,
}

impl GameClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Connect and pump the socket until either side finishes.
    ///
    /// Emits `Opened` once connected, `Message` per text frame, then exactly one `Closed`
    /// or `Error`, whichever side stops first. A failed connect emits `Error` and returns
    /// the error.
    pub async fn run(
        &self,
        mut outgoing: mpsc::UnboundedReceiver<String>,
        events: mpsc::UnboundedSender<ClientEvent>,
    ) -> Result<()> {
        let ws_stream = match connect_async(&self.url).await {
            Ok((ws_stream, _)) => ws_stream,
            Err(e) => {
                tracing::error!("Failed to connect to game server: {}", e);
                let _ = events.send(ClientEvent::Error(e.to_string()));
                return Err(e.into());
            }
        };

        tracing::info!("Connected to game server at {}", self.url);
        let _ = events.send(ClientEvent::Opened);

        let (mut write, mut read) = ws_stream.split();

        let read_events = events.clone();
        let mut read_handle = tokio::spawn(async move {
            while let Some(msg) = read.next().await {
                match msg {
                    Ok(Message::Text(text)) => {
                        if read_events.send(ClientEvent::Message(text)).is_err() {
                            return;
                        }
                    }
                    Ok(Message::Binary(data)) => {
                        tracing::debug!(len = data.len(), "Ignoring binary message");
                    }
                    Ok(Message::Close(_)) => {
                        tracing::info!("Server closed connection");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::error!("WebSocket error: {}", e);
                        let _ = read_events.send(ClientEvent::Error(e.to_string()));
                        return;
                    }
                }
            }
            let _ = read_events.send(ClientEvent::Closed);
        });

        // Resolves to the send error, if that is what stopped the writer.
        let mut write_handle = tokio::spawn(async move {
            while let Some(text) = outgoing.recv().await {
                if let Err(e) = write.send(Message::Text(text)).await {
                    tracing::error!("Failed to send message: {}", e);
                    return Some(e.to_string());
                }
            }
            let _ = write.close().await;
            None
        });

        tokio::select! {
            _ = &mut read_handle => {
                tracing::debug!("Read task completed");
                write_handle.abort();
            }
            result = &mut write_handle => {
                tracing::debug!("Write task completed");
                read_handle.abort();
                // the reader was cut off, so report the end of the connection here
                let event = match result {
                    Ok(Some(error)) => ClientEvent::Error(error),
                    Ok(None) => ClientEvent::Closed,
                    Err(e) => ClientEvent::Error(e.to_string()),
                };
                let _ = events.send(event);
            }
        }

        Ok(())
    }
}
