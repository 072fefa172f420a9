//! Manual path platform (user override)

use std::path::PathBuf;

use super::Platform;
use crate::error::{Result, VaultError};

pub struct ManualPlatform {
    pub path: String,
}

impl ManualPlatform {
    pub fn new(path: String) -> Self {
        Self { path }
    }
}

impl Platform for ManualPlatform {
    fn name(&self) -> &str {
        "manual"
    }

    /// No validation beyond existence, per the override contract.
    fn find_save_root(&self) -> Result<PathBuf> {
        let path = PathBuf::from(&self.path);
        if path.is_dir() {
            Ok(path)
        } else {
            Err(VaultError::SaveRootNotFound(self.path.clone()))
        }
    }
}
