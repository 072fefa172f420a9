use std::path::PathBuf;

use crate::error::{SyncFailure, VaultError};

/// Which way the bytes flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncDirection {
    /// live save directory -> slot directory
    Backup,
    /// slot directory -> live save directory
    Restore,
}

/// One copy pass, fully resolved before any I/O happens. The path list is
/// a snapshot of the selector taken at planning time, so later selector
/// edits cannot affect an in-flight operation. Not persisted.
#[derive(Clone, Debug)]
pub struct SyncOperation {
    pub direction: SyncDirection,
    pub source_root: PathBuf,
    pub dest_root: PathBuf,
    /// Included paths relative to the source root, insertion order.
    pub paths: Vec<String>,
}

/// Outcome of a copy pass. Failures are accumulated, not raised: a single
/// game-held file handle must not abort the whole backup.
#[derive(Clone, Debug, Default)]
pub struct SyncResult {
    pub files_copied: usize,
    pub failures: Vec<SyncFailure>,
}

impl SyncResult {
    pub fn files_failed(&self) -> usize {
        self.failures.len()
    }

    /// Default policy: surface failures to the caller, keep what succeeded.
    pub fn into_result(self) -> crate::error::Result<SyncResult> {
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(VaultError::PartialSync {
                files_copied: self.files_copied,
                failures: self.failures,
            })
        }
    }
}
