//! Steam save root resolution
//!
//! Uses the steamlocate crate to find the installed game, then descends to
//! the ConanSandbox directory that holds the live saves.

use std::path::PathBuf;

use super::Platform;
use crate::error::{Result, VaultError};

/// Conan Exiles keeps its saves inside the install tree, not in a profile
/// directory.
const SAVE_SUBDIR: &str = "ConanSandbox";

pub struct SteamPlatform {
    pub app_id: u32,
}

impl SteamPlatform {
    pub fn new(app_id: u32) -> Self {
        Self { app_id }
    }
}

impl Platform for SteamPlatform {
    fn name(&self) -> &str {
        "steam"
    }

    fn find_save_root(&self) -> Result<PathBuf> {
        find_save_root(self.app_id)
    }
}

/// Find the live save directory for a Steam game by app id
///
/// Searches all Steam library folders for the app and appends the save
/// subdirectory.
pub fn find_save_root(app_id: u32) -> Result<PathBuf> {
    let steam_dir = steamlocate::SteamDir::locate()
        .map_err(|e| VaultError::SaveRootNotFound(e.to_string()))?;

    if let Some((app, library)) = steam_dir.find_app(app_id).ok().flatten() {
        let path = library.resolve_app_dir(&app).join(SAVE_SUBDIR);
        if path.exists() {
            return Ok(path);
        }
    }

    Err(VaultError::SaveRootNotFound(format!(
        "Steam app {} not found or not installed",
        app_id
    )))
}
