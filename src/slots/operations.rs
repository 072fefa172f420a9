// Slot store operations: enumeration, creation, deletion and metadata
// rewrites. Metadata always goes through a temp-file-plus-rename write so
// a crash never leaves a half-written record.

use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, VaultError};
use crate::util::{dir_size, write_json_atomic};

use super::types::{PlayMode, SaveSlot, SlotEntry, SlotMeta};

const META_FILE: &str = "metadata.json";

/// Characters that are unsafe in a directory name on at least one of the
/// filesystems saves end up on.
const UNSAFE_NAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

pub struct SlotStore {
    root: PathBuf,
}

/// Reject names that are empty, dot-relative or not a safe directory name.
fn validate_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() || name == "." || name == ".." {
        return Err(VaultError::InvalidName(name.to_string()));
    }
    if name.contains(UNSAFE_NAME_CHARS) || name.chars().any(|c| c.is_control()) {
        return Err(VaultError::InvalidName(name.to_string()));
    }
    Ok(name)
}

impl SlotStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn slot_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn meta_path(&self, name: &str) -> PathBuf {
        self.slot_dir(name).join(META_FILE)
    }

    /// All slots on disk. Ready slots first, newest created first; corrupt
    /// entries after them ordered by name. A single unreadable slot never
    /// fails the listing, it is isolated as a Corrupt entry.
    pub fn list_slots(&self) -> Result<Vec<SlotEntry>> {
        let mut ready: Vec<SaveSlot> = Vec::new();
        let mut corrupt: Vec<SlotEntry> = Vec::new();

        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            // No store directory yet means no slots, not an error.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            let path = entry.path();
            match self.read_meta(&name) {
                Ok(meta) => ready.push(SaveSlot {
                    meta,
                    disk_size: dir_size(&path),
                    path,
                }),
                Err(e) => corrupt.push(SlotEntry::Corrupt {
                    name,
                    path,
                    reason: e.to_string(),
                }),
            }
        }

        ready.sort_by(|a, b| b.meta.created_at.cmp(&a.meta.created_at));
        corrupt.sort_by(|a, b| a.name().cmp(b.name()));

        let mut out: Vec<SlotEntry> = ready.into_iter().map(SlotEntry::Ready).collect();
        out.extend(corrupt);
        Ok(out)
    }

    /// Load one slot, failing with NotFound or CorruptSlot.
    pub fn slot(&self, name: &str) -> Result<SaveSlot> {
        let name = validate_name(name)?;
        let path = self.slot_dir(name);
        if !path.is_dir() {
            return Err(VaultError::NotFound(name.to_string()));
        }
        let meta = self.read_meta(name).map_err(|e| VaultError::CorruptSlot {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        Ok(SaveSlot {
            meta,
            disk_size: dir_size(&path),
            path,
        })
    }

    /// Create an empty slot: directory plus initial metadata as one logical
    /// unit. If the metadata write fails the directory is rolled back so the
    /// listing never shows a ghost entry.
    pub fn create_slot(&self, name: &str, mode: PlayMode) -> Result<SaveSlot> {
        let name = validate_name(name)?;

        if let Some(existing) = self.find_case_insensitive(name)? {
            return Err(VaultError::DuplicateName(existing));
        }

        fs::create_dir_all(&self.root)?;
        let path = self.slot_dir(name);
        fs::create_dir(&path)?;

        let now = Utc::now();
        let meta = SlotMeta {
            name: name.to_string(),
            play_mode: mode,
            created_at: now,
            last_modified_at: now,
        };

        if let Err(e) = write_json_atomic(&self.meta_path(name), &meta) {
            let _ = fs::remove_dir_all(&path);
            return Err(e);
        }

        Ok(SaveSlot {
            meta,
            disk_size: 0,
            path,
        })
    }

    /// Remove a slot directory recursively. Idempotent: deleting a slot that
    /// is already gone succeeds, so a partially failed prior delete can be
    /// retried safely.
    pub fn delete_slot(&self, name: &str) -> Result<()> {
        let name = validate_name(name)?;
        let path = self.slot_dir(name);
        match fs::remove_dir_all(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Rewrite the play mode, preserving created-at and bumping
    /// last-modified.
    pub fn set_play_mode(&self, name: &str, mode: PlayMode) -> Result<SaveSlot> {
        let mut slot = self.slot(name)?;
        slot.meta.play_mode = mode;
        slot.meta.last_modified_at = Utc::now();
        write_json_atomic(&self.meta_path(&slot.meta.name), &slot.meta)?;
        Ok(slot)
    }

    /// Bump last-modified after a successful backup into this slot.
    pub fn touch(&self, name: &str) -> Result<()> {
        let mut slot = self.slot(name)?;
        slot.meta.last_modified_at = Utc::now();
        write_json_atomic(&self.meta_path(&slot.meta.name), &slot.meta)
    }

    fn read_meta(&self, name: &str) -> std::result::Result<SlotMeta, String> {
        let path = self.meta_path(name);
        let body = fs::read_to_string(&path).map_err(|e| format!("{}: {e}", META_FILE))?;
        serde_json::from_str(&body).map_err(|e| format!("{}: {e}", META_FILE))
    }

    /// Case-insensitive lookup of an existing slot directory, returning the
    /// on-disk name. Avoids creating two slots that collide on
    /// case-insensitive filesystems.
    fn find_case_insensitive(&self, name: &str) -> Result<Option<String>> {
        let wanted = name.to_lowercase();
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let entry = entry?;
            let existing = entry.file_name().to_string_lossy().to_string();
            if existing.to_lowercase() == wanted {
                return Ok(Some(existing));
            }
        }
        Ok(None)
    }
}
