use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User-assigned classification for a slot, display-only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayMode {
    Solo,
    Online,
}

impl std::fmt::Display for PlayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayMode::Solo => write!(f, "Solo"),
            PlayMode::Online => write!(f, "Online"),
        }
    }
}

impl std::str::FromStr for PlayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "solo" => Ok(PlayMode::Solo),
            "online" => Ok(PlayMode::Online),
            other => Err(format!("unknown play mode '{other}' (expected Solo or Online)")),
        }
    }
}

/// The metadata.json record inside each slot directory.
/// Unknown fields are ignored on read; missing required fields make the
/// slot corrupt.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotMeta {
    pub name: String,
    pub play_mode: PlayMode,
    pub created_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
}

/// A slot whose metadata parsed cleanly.
#[derive(Clone, Debug)]
pub struct SaveSlot {
    pub meta: SlotMeta,
    /// Backing directory, store-root/slot-name.
    pub path: PathBuf,
    /// Total bytes under the slot directory, computed at listing time.
    pub disk_size: u64,
}

/// Listing entry: a loadable slot or a directory the user can still delete.
#[derive(Clone, Debug)]
pub enum SlotEntry {
    Ready(SaveSlot),
    Corrupt {
        name: String,
        path: PathBuf,
        reason: String,
    },
}

impl SlotEntry {
    pub fn name(&self) -> &str {
        match self {
            SlotEntry::Ready(slot) => &slot.meta.name,
            SlotEntry::Corrupt { name, .. } => name,
        }
    }
}
