use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::selector::PathSelector;

/// Conan Exiles on Steam.
pub const DEFAULT_APP_ID: u32 = 440900;

/// One selector entry as persisted. A list (not a map) so the on-disk
/// document keeps the user's insertion order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PathRule {
    pub path: String,
    pub included: bool,
}

/// Main application configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Paths relative to the live save root that take part in syncs.
    #[serde(default)]
    pub paths: Vec<PathRule>,
    /// Manual override for the live save directory. When unset the save
    /// root is discovered through Steam.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_root: Option<String>,
    /// Steam app id used for discovery and launching.
    #[serde(default = "default_app_id")]
    pub app_id: u32,
}

fn default_app_id() -> u32 {
    DEFAULT_APP_ID
}

impl Default for VaultConfig {
    fn default() -> Self {
        VaultConfig {
            paths: Vec::new(),
            save_root: None,
            app_id: DEFAULT_APP_ID,
        }
    }
}

impl VaultConfig {
    /// Build the in-memory selector from the persisted rules.
    /// Rules that no longer validate are dropped rather than failing load.
    pub fn selector(&self) -> PathSelector {
        let mut selector = PathSelector::new();
        for rule in &self.paths {
            let _ = selector.set_included(&rule.path, rule.included);
        }
        selector
    }

    /// Replace the persisted rules with the selector's current state.
    pub fn set_paths_from(&mut self, selector: &PathSelector) -> Result<()> {
        self.paths = selector
            .entries()
            .iter()
            .map(|e| PathRule {
                path: e.relative_path.clone(),
                included: e.included,
            })
            .collect();
        Ok(())
    }
}
