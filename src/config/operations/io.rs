use crate::config::types::VaultConfig;
use crate::error::Result;
use crate::paths::config_file;
use crate::util::write_json_atomic;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load configuration from an explicit path.
/// A missing or malformed file yields the default configuration (empty
/// selector, Steam discovery) rather than failing startup.
pub fn load_cfg_from(path: &Path) -> VaultConfig {
    if let Ok(file) = File::open(path) {
        if let Ok(config) = serde_json::from_reader::<_, VaultConfig>(BufReader::new(file)) {
            return config;
        }
    }
    VaultConfig::default()
}

pub fn load_cfg() -> VaultConfig {
    load_cfg_from(&config_file())
}

pub fn save_cfg_to(path: &Path, config: &VaultConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    write_json_atomic(path, config)
}

pub fn save_cfg(config: &VaultConfig) -> Result<()> {
    save_cfg_to(&config_file(), config)
}
