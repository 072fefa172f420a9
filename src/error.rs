// Error taxonomy for the save vault
// Structural errors (bad input, duplicate names, busy lock) are rejected
// before any I/O starts. Per-file copy errors are accumulated into
// PartialSync so one locked file never discards the rest of a backup.

use std::path::PathBuf;
use thiserror::Error;

/// One failed file inside an otherwise-continuing sync pass.
#[derive(Debug, Clone)]
pub struct SyncFailure {
    /// Path relative to the operation's source root.
    pub relative_path: PathBuf,
    /// Rendered cause, kept as a string so results stay cloneable.
    pub reason: String,
}

impl std::fmt::Display for SyncFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.relative_path.display(), self.reason)
    }
}

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("invalid path '{0}': must be relative, non-empty and without '..' segments")]
    InvalidPath(String),

    #[error("invalid slot name '{0}': must be non-empty and free of path separators")]
    InvalidName(String),

    #[error("a slot named '{0}' already exists")]
    DuplicateName(String),

    #[error("no slot named '{0}'")]
    NotFound(String),

    #[error("slot '{name}' has missing or unreadable metadata: {reason}")]
    CorruptSlot { name: String, reason: String },

    #[error("another sync operation is already in progress")]
    Busy,

    #[error("failed to launch game: {0}")]
    LaunchFailed(String),

    /// The copy pass finished but some files could not be transferred.
    /// Files counted in `files_copied` are already at the destination.
    #[error("sync finished with {} failed files ({files_copied} copied)", .failures.len())]
    PartialSync {
        files_copied: usize,
        failures: Vec<SyncFailure>,
    },

    #[error("save root not found: {0}")]
    SaveRootNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("metadata error: {0}")]
    Metadata(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VaultError>;
