//! Desktop platform: a headless client
//!
//! Draw calls go to `tracing` instead of a window, and key transitions are read from
//! stdin as `down <key>` / `up <key>` lines. Socket and keyboard events share one FIFO
//! channel, so the session sees them in arrival order just like the browser build.

use std::io::BufRead;

use anyhow::Result;
use chaos_protocol::PlayerColor;
use tokio::sync::mpsc;

use crate::application::services::input_service::Key;
use crate::infrastructure::config::ClientConfig;
use crate::infrastructure::websocket::{ChannelTransport, GameClient};
use crate::ports::inbound::ClientEvent;
use crate::ports::outbound::{ConnectionState, DrawSurface, Point};
use crate::session::GameSession;

pub type DesktopSession = GameSession<ChannelTransport, LogSurface>;

/// Running totals of what a [`LogSurface`] was asked to draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceCounters {
    pub clears: u64,
    pub sprites: u64,
    pub missing_sprites: u64,
    pub rects: u64,
    pub polylines: u64,
    pub circles: u64,
}

/// Surface that traces every draw call; every known color counts as having a sprite.
#[derive(Debug, Default)]
pub struct LogSurface {
    counters: SurfaceCounters,
}

impl LogSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> SurfaceCounters {
        self.counters
    }
}

impl DrawSurface for LogSurface {
    fn clear(&mut self) {
        self.counters.clears += 1;
        tracing::trace!("clear");
    }

    fn save(&mut self) {}

    fn restore(&mut self) {}

    fn translate(&mut self, x: f64, y: f64) {
        tracing::trace!(x, y, "translate");
    }

    fn rotate(&mut self, radians: f64) {
        tracing::trace!(radians, "rotate");
    }

    fn draw_sprite(
        &mut self,
        color: &PlayerColor,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> bool {
        if !color.is_known() {
            self.counters.missing_sprites += 1;
            return false;
        }
        self.counters.sprites += 1;
        tracing::trace!(%color, x, y, width, height, "sprite");
        true
    }

    fn fill_rect(&mut self, fill: &str, x: f64, y: f64, width: f64, height: f64) {
        self.counters.rects += 1;
        tracing::trace!(fill, x, y, width, height, "fill_rect");
    }

    fn stroke_polyline(&mut self, points: &[Point]) {
        self.counters.polylines += 1;
        tracing::trace!(points = points.len(), "polyline");
    }

    fn stroke_circle(&mut self, center: Point, radius: f64) {
        self.counters.circles += 1;
        tracing::trace!(x = center.x, y = center.y, radius, "circle");
    }
}

/// Parse a `down <key>` / `up <key>` line.
pub fn parse_key_command(line: &str) -> Option<ClientEvent> {
    let mut parts = line.split_whitespace();
    let action = parts.next()?.to_ascii_lowercase();
    let key = Key::from_key_name(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }

    match action.as_str() {
        "down" | "press" => Some(ClientEvent::KeyDown(key)),
        "up" | "release" => Some(ClientEvent::KeyUp(key)),
        _ => None,
    }
}

/// Forward key commands from `input` until it ends or the session stops listening.
///
/// Blocking, see [`spawn_stdin_reader`].
pub fn pump_key_commands(input: impl BufRead, events: &mpsc::UnboundedSender<ClientEvent>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Failed to read stdin: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_key_command(&line) {
            Some(event) => {
                if events.send(event).is_err() {
                    break;
                }
            }
            None => tracing::warn!("Unrecognized key command: {:?}", line),
        }
    }
    tracing::debug!("stdin closed");
}

/// Read key commands from stdin on a detached thread.
///
/// The thread is never joined: a read blocked on an idle terminal must not keep the
/// process alive once the session is over.
pub fn spawn_stdin_reader(events: mpsc::UnboundedSender<ClientEvent>) -> Result<()> {
    std::thread::Builder::new()
        .name("stdin-keys".to_string())
        .spawn(move || pump_key_commands(std::io::stdin().lock(), &events))?;
    Ok(())
}

/// Feed queued events to the session until the connection closes or fails.
pub async fn drive_session<S: DrawSurface>(
    session: &mut GameSession<ChannelTransport, S>,
    events: &mut mpsc::UnboundedReceiver<ClientEvent>,
) {
    while let Some(event) = events.recv().await {
        let terminal = matches!(event, ClientEvent::Closed | ClientEvent::Error(_));
        event.dispatch(session);
        if terminal {
            break;
        }
    }
}

/// Connect to the configured server and play until the connection ends.
///
/// Returns an error when the connection could not be made or ended in failure.
pub async fn run(config: ClientConfig) -> Result<DesktopSession> {
    let url = config.validate()?;

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let (transport, outgoing) = ChannelTransport::new();

    let mut session =
        GameSession::new(transport, LogSurface::new()).with_join_name(config.player_name.clone());
    session.set_connecting();

    let client = GameClient::new(url.as_str());
    let client_events = events_tx.clone();
    let client_task = tokio::spawn(async move {
        if let Err(e) = client.run(outgoing, client_events).await {
            tracing::debug!("Client stopped: {}", e);
        }
    });
    spawn_stdin_reader(events_tx)?;

    drive_session(&mut session, &mut events_rx).await;

    client_task.abort();

    tracing::info!(
        state = %session.state(),
        frames = session.frames_rendered(),
        counters = ?session.surface().counters(),
        "Session ended"
    );

    if session.state() == ConnectionState::Failed {
        anyhow::bail!("Connection to {} failed", url);
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_key_commands() {
        assert_eq!(
            parse_key_command("down up"),
            Some(ClientEvent::KeyDown(Key::Up))
        );
        assert_eq!(
            parse_key_command("UP space"),
            Some(ClientEvent::KeyUp(Key::Action))
        );
        assert_eq!(
            parse_key_command("press ArrowLeft"),
            Some(ClientEvent::KeyDown(Key::Left))
        );
        assert_eq!(parse_key_command("down"), None);
        assert_eq!(parse_key_command("jump up"), None);
        assert_eq!(parse_key_command("down up now"), None);
    }

    #[test]
    fn test_log_surface_counts_missing_sprites() {
        let mut surface = LogSurface::new();
        assert!(surface.draw_sprite(&PlayerColor::Green, 0.0, 0.0, 1.0, 1.0));
        assert!(!surface.draw_sprite(&PlayerColor::parse("red"), 0.0, 0.0, 1.0, 1.0));

        let counters = surface.counters();
        assert_eq!(counters.sprites, 1);
        assert_eq!(counters.missing_sprites, 1);
    }

    #[tokio::test]
    async fn test_drive_session_stops_on_close() {
        let (transport, mut outgoing) = ChannelTransport::new();
        let mut session = GameSession::new(transport, LogSurface::new());
        let (tx, mut rx) = mpsc::unbounded_channel();

        tx.send(ClientEvent::KeyDown(Key::Up)).unwrap();
        tx.send(ClientEvent::Opened).unwrap();
        tx.send(ClientEvent::KeyDown(Key::Right)).unwrap();
        tx.send(ClientEvent::Message("blue,1,2,0/3,4,5/6,7".to_string()))
            .unwrap();
        tx.send(ClientEvent::Closed).unwrap();
        tx.send(ClientEvent::KeyUp(Key::Right)).unwrap();

        drive_session(&mut session, &mut rx).await;

        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert_eq!(outgoing.try_recv().unwrap(), "1,-1,0");
        assert!(outgoing.try_recv().is_err());

        let counters = session.surface().counters();
        assert_eq!(counters.clears, 1);
        assert_eq!(counters.sprites, 1);
        assert_eq!(counters.rects, 1);
        assert_eq!(counters.polylines, 2);
        assert_eq!(counters.circles, 1);

        // the key-up queued after close was never dispatched
        assert_eq!(rx.try_recv().unwrap(), ClientEvent::KeyUp(Key::Right));
    }

    #[test]
    fn test_pump_key_commands_skips_blank_and_unknown_lines() {
        let input = Cursor::new("down left\n\n  \nwave hello\nup left\n");
        let (tx, mut rx) = mpsc::unbounded_channel();

        pump_key_commands(input, &tx);

        assert_eq!(rx.try_recv().unwrap(), ClientEvent::KeyDown(Key::Left));
        assert_eq!(rx.try_recv().unwrap(), ClientEvent::KeyUp(Key::Left));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_pump_key_commands_stops_when_session_is_gone() {
        let input = Cursor::new("down up\ndown left\n");
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        // returns instead of reading the rest
        pump_key_commands(input, &tx);
    }

    #[tokio::test]
    async fn test_drive_session_stops_on_error() {
        let (transport, _outgoing) = ChannelTransport::new();
        let mut session = GameSession::new(transport, LogSurface::new());
        let (tx, mut rx) = mpsc::unbounded_channel();

        tx.send(ClientEvent::Opened).unwrap();
        tx.send(ClientEvent::Error("broken pipe".to_string())).unwrap();

        // `tx` is still alive, so only the terminal event can end the loop
        drive_session(&mut session, &mut rx).await;

        assert_eq!(session.state(), ConnectionState::Failed);
    }

    #[tokio::test]
    async fn test_run_fails_when_connection_is_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = ClientConfig::default().with_server_url(format!("ws://{}", addr));
        let err = run(config).await.err().expect("refused connection is an error");
        assert!(err.to_string().contains("failed"));
    }

    #[tokio::test]
    async fn test_run_rejects_non_websocket_url() {
        let config = ClientConfig::default().with_server_url("http://localhost:1");
        assert!(run(config).await.is_err());
    }
}
