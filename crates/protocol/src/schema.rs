//! Versioned schema for the positional frame format.
//!
//! A frame message is three segments joined by [`SEGMENT_SEPARATOR`], each a flat list of
//! fields joined by [`FIELD_SEPARATOR`]. Records are read in fixed strides per segment.

use serde::{Deserialize, Serialize};

/// Version of the positional wire schema described here.
pub const PROTOCOL_VERSION: u8 = 1;

/// Separates the players, walls and projectiles segments of a frame.
pub const SEGMENT_SEPARATOR: char = '/';

/// Separates fields within a segment and within an input message.
pub const FIELD_SEPARATOR: char = ',';

/// The kinds of record carried by a frame, in segment order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Player,
    Wall,
    Projectile,
}

impl RecordKind {
    /// All record kinds in the order their segments appear on the wire.
    pub const ALL: [RecordKind; 3] = [RecordKind::Player, RecordKind::Wall, RecordKind::Projectile];

    /// Field names in wire order.
    pub fn field_names(self) -> &'static [&'static str] {
        match self {
            RecordKind::Player => &["color", "x", "y", "rotation_deg"],
            RecordKind::Wall => &["x", "y", "rotation_deg"],
            RecordKind::Projectile => &["x", "y"],
        }
    }

    /// Number of fields consumed per record.
    pub fn stride(self) -> usize {
        self.field_names().len()
    }

    /// Position of this kind's segment within a frame message.
    pub fn segment_index(self) -> usize {
        match self {
            RecordKind::Player => 0,
            RecordKind::Wall => 1,
            RecordKind::Projectile => 2,
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RecordKind::Player => "player",
            RecordKind::Wall => "wall",
            RecordKind::Projectile => "projectile",
        };
        f.write_str(name)
    }
}
