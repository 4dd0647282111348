//! Server → Client frame snapshots.
//!
//! Each frame message is a complete snapshot: `players/walls/projectiles`, every segment a
//! comma-joined list of fields read in fixed strides (see [`RecordKind::stride`]).
//!
//! Decoding is best-effort. A record with a bad field, or a trailing partial record, is
//! reported in [`FrameDecode::rejected`] and skipped; the remaining records still decode.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::{RecordKind, FIELD_SEPARATOR, SEGMENT_SEPARATOR};

/// Player color as sent by the server. Colors without a sprite are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerColor {
    Blue,
    Green,
    Purple,
    Orange,
    Unknown(String),
}

impl PlayerColor {
    /// Colors that have a player sprite.
    pub const KNOWN: [PlayerColor; 4] = [
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Purple,
        PlayerColor::Orange,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "blue" => PlayerColor::Blue,
            "green" => PlayerColor::Green,
            "purple" => PlayerColor::Purple,
            "orange" => PlayerColor::Orange,
            other => PlayerColor::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PlayerColor::Blue => "blue",
            PlayerColor::Green => "green",
            PlayerColor::Purple => "purple",
            PlayerColor::Orange => "orange",
            PlayerColor::Unknown(other) => other,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, PlayerColor::Unknown(_))
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub color: PlayerColor,
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
}

impl PlayerRecord {
    pub fn rotation_radians(&self) -> f64 {
        self.rotation_deg.to_radians()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallRecord {
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
}

impl WallRecord {
    pub fn rotation_radians(&self) -> f64 {
        self.rotation_deg.to_radians()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileRecord {
    pub x: f64,
    pub y: f64,
}

/// One complete snapshot of everything on screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub players: Vec<PlayerRecord>,
    pub walls: Vec<WallRecord>,
    pub projectiles: Vec<ProjectileRecord>,
}

impl Frame {
    pub fn entity_count(&self) -> usize {
        self.players.len() + self.walls.len() + self.projectiles.len()
    }

    /// Number of wire fields the records of this frame occupy.
    pub fn field_count(&self) -> usize {
        self.players.len() * RecordKind::Player.stride()
            + self.walls.len() * RecordKind::Wall.stride()
            + self.projectiles.len() * RecordKind::Projectile.stride()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0
    }
}

struct Joined<'a, T>(&'a [T]);

impl<T: fmt::Display> fmt::Display for Joined<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", FIELD_SEPARATOR)?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

impl fmt::Display for PlayerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{s}{}{s}{}{s}{}",
            self.color,
            self.x,
            self.y,
            self.rotation_deg,
            s = FIELD_SEPARATOR
        )
    }
}

impl fmt::Display for WallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{s}{}{s}{}",
            self.x,
            self.y,
            self.rotation_deg,
            s = FIELD_SEPARATOR
        )
    }
}

impl fmt::Display for ProjectileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.x, FIELD_SEPARATOR, self.y)
    }
}

/// Canonical wire text, as the server would emit it.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{s}{}{s}{}",
            Joined(&self.players),
            Joined(&self.walls),
            Joined(&self.projectiles),
            s = SEGMENT_SEPARATOR
        )
    }
}

/// Why a single record was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordErrorReason {
    /// The segment ended part-way through this record.
    Truncated { found: usize, expected: usize },
    /// A numeric field did not parse to a finite number.
    InvalidNumber { field: &'static str, raw: String },
}

impl fmt::Display for RecordErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordErrorReason::Truncated { found, expected } => {
                write!(f, "truncated: {} of {} fields", found, expected)
            }
            RecordErrorReason::InvalidNumber { field, raw } => {
                write!(f, "field `{}` is not a number: {:?}", field, raw)
            }
        }
    }
}

/// A record that was skipped while decoding a frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} record #{index}: {reason}")]
pub struct RecordError {
    pub kind: RecordKind,
    /// Zero-based record position within its segment.
    pub index: usize,
    pub reason: RecordErrorReason,
}

/// Result of decoding one frame message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameDecode {
    pub frame: Frame,
    pub rejected: Vec<RecordError>,
    /// Segments present past the projectiles segment; never decoded.
    pub extra_segments: usize,
}

impl FrameDecode {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.extra_segments == 0
    }
}

/// Decode a frame message. Never fails; bad records land in `rejected`.
pub fn decode_frame(text: &str) -> FrameDecode {
    let segments: Vec<&str> = text.split(SEGMENT_SEPARATOR).collect();
    let segment = |kind: RecordKind| segments.get(kind.segment_index()).copied().unwrap_or("");

    let mut rejected = Vec::new();
    let players = decode_segment(
        RecordKind::Player,
        segment(RecordKind::Player),
        &mut rejected,
        |f| {
            Ok(PlayerRecord {
                color: PlayerColor::parse(f[0]),
                x: number("x", f[1])?,
                y: number("y", f[2])?,
                rotation_deg: number("rotation_deg", f[3])?,
            })
        },
    );
    let walls = decode_segment(
        RecordKind::Wall,
        segment(RecordKind::Wall),
        &mut rejected,
        |f| {
            Ok(WallRecord {
                x: number("x", f[0])?,
                y: number("y", f[1])?,
                rotation_deg: number("rotation_deg", f[2])?,
            })
        },
    );
    let projectiles = decode_segment(
        RecordKind::Projectile,
        segment(RecordKind::Projectile),
        &mut rejected,
        |f| {
            Ok(ProjectileRecord {
                x: number("x", f[0])?,
                y: number("y", f[1])?,
            })
        },
    );

    FrameDecode {
        frame: Frame {
            players,
            walls,
            projectiles,
        },
        rejected,
        extra_segments: segments.len().saturating_sub(RecordKind::ALL.len()),
    }
}

fn number(field: &'static str, raw: &str) -> Result<f64, RecordErrorReason> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RecordErrorReason::InvalidNumber {
            field,
            raw: raw.to_string(),
        })
}

fn decode_segment<T>(
    kind: RecordKind,
    segment: &str,
    rejected: &mut Vec<RecordError>,
    parse: impl Fn(&[&str]) -> Result<T, RecordErrorReason>,
) -> Vec<T> {
    if segment.trim().is_empty() {
        return Vec::new();
    }

    let stride = kind.stride();
    let fields: Vec<&str> = segment.split(FIELD_SEPARATOR).collect();
    let mut records = Vec::with_capacity(fields.len() / stride);

    for (index, chunk) in fields.chunks(stride).enumerate() {
        let result = if chunk.len() < stride {
            Err(RecordErrorReason::Truncated {
                found: chunk.len(),
                expected: stride,
            })
        } else {
            parse(chunk)
        };

        match result {
            Ok(record) => records.push(record),
            Err(reason) => rejected.push(RecordError {
                kind,
                index,
                reason,
            }),
        }
    }

    records
}
