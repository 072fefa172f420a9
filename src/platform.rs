//! Save root discovery - WHERE the live save directory comes from
//!
//! - Steam: resolved through steamlocate from the app id
//! - Manual: user-supplied path, checked only for existence

use std::path::PathBuf;

use crate::error::Result;

/// Platform trait - resolves the game's live save directory
pub trait Platform {
    /// Platform name for identification
    fn name(&self) -> &str;

    /// Locate the live save root for this game
    fn find_save_root(&self) -> Result<PathBuf>;
}

mod manual;
mod steam;

pub use manual::ManualPlatform;
pub use steam::SteamPlatform;

pub use steam::find_save_root;

/// Resolve the live save root from configuration: a manual override wins,
/// otherwise Steam discovery runs with the configured app id.
pub fn resolve_save_root(save_root: Option<&str>, app_id: u32) -> Result<PathBuf> {
    match save_root {
        Some(path) => ManualPlatform::new(path.to_string()).find_save_root(),
        None => SteamPlatform::new(app_id).find_save_root(),
    }
}
