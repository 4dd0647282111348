//! Client configuration.
//!
//! Desktop reads environment variables (after `.env.local` / `.env` at the repo root are
//! loaded by the binary). The browser build starts from [`ClientConfig::default`].

use thiserror::Error;
use url::Url;

pub const DEFAULT_SERVER_URL: &str = "ws://localhost:8080";
pub const DEFAULT_CANVAS_ID: &str = "canvas";
pub const DEFAULT_SPRITE_DIR: &str = "player-sprites";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid server URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("server URL must use ws:// or wss://, got {0:?}")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// WebSocket endpoint of the game server.
    pub server_url: String,
    /// When set, `*** <name> joined the chat` is sent on open.
    pub player_name: Option<String>,
    /// DOM id of the canvas element (browser only).
    pub canvas_id: String,
    /// Directory holding `player-sprite-<color>.png` (browser only).
    pub sprite_dir: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            player_name: None,
            canvas_id: DEFAULT_CANVAS_ID.to_string(),
            sprite_dir: DEFAULT_SPRITE_DIR.to_string(),
        }
    }
}

impl ClientConfig {
    /// Build configuration from environment variables.
    ///
    /// Uses `CHAOS_SERVER_URL` (falling back to `SERVER_URL`), `CHAOS_PLAYER_NAME`,
    /// `CHAOS_CANVAS_ID` and `CHAOS_SPRITE_DIR`; anything unset keeps its default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from an arbitrary source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            server_url: non_empty("CHAOS_SERVER_URL")
                .or_else(|| non_empty("SERVER_URL"))
                .unwrap_or(defaults.server_url),
            player_name: non_empty("CHAOS_PLAYER_NAME"),
            canvas_id: non_empty("CHAOS_CANVAS_ID").unwrap_or(defaults.canvas_id),
            sprite_dir: non_empty("CHAOS_SPRITE_DIR").unwrap_or(defaults.sprite_dir),
        }
    }

    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = Some(name.into());
        self
    }

    /// Check the server URL is a usable WebSocket URL.
    pub fn validate(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.server_url).map_err(|source| ConfigError::InvalidUrl {
            url: self.server_url.clone(),
            source,
        })?;

        match url.scheme() {
            "ws" | "wss" => Ok(url),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Path of the sprite image for a color name.
    pub fn sprite_path(&self, color: &str) -> String {
        format!(
            "{}/player-sprite-{}.png",
            self.sprite_dir.trim_end_matches('/'),
            color
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.server_url, "ws://localhost:8080");
        assert!(config.player_name.is_none());
    }

    #[test]
    fn test_prefers_chaos_server_url() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("CHAOS_SERVER_URL", "wss://chaos-the-game.com/websocket"),
            ("SERVER_URL", "ws://other:1"),
        ]));
        assert_eq!(config.server_url, "wss://chaos-the-game.com/websocket");
    }

    #[test]
    fn test_falls_back_to_server_url() {
        let config = ClientConfig::from_lookup(lookup(&[("SERVER_URL", "ws://other:1")]));
        assert_eq!(config.server_url, "ws://other:1");
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("CHAOS_PLAYER_NAME", "  "),
            ("CHAOS_SPRITE_DIR", ""),
        ]));
        assert!(config.player_name.is_none());
        assert_eq!(config.sprite_dir, DEFAULT_SPRITE_DIR);
    }

    #[test]
    fn test_validate_accepts_ws_and_wss() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::default()
            .with_server_url("wss://example.com:443/websocket")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_rejects_http() {
        let err = ClientConfig::default()
            .with_server_url("http://example.com")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(s) if s == "http"));
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let err = ClientConfig::default()
            .with_server_url("not a url")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn test_sprite_path() {
        let config = ClientConfig {
            sprite_dir: "assets/player-sprites/".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(
            config.sprite_path("blue"),
            "assets/player-sprites/player-sprite-blue.png"
        );
    }
}
