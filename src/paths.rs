use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;

pub static PATH_HOME: LazyLock<PathBuf> =
    LazyLock::new(|| PathBuf::from(env::var("HOME").unwrap()));

pub static PATH_LOCAL_SHARE: LazyLock<PathBuf> = LazyLock::new(|| PATH_HOME.join(".local/share"));

pub static PATH_VAULT: LazyLock<PathBuf> = LazyLock::new(|| {
    if let Ok(xdg_data_home) = env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg_data_home).join("sandvault");
    }
    PATH_LOCAL_SHARE.join("sandvault")
});

/// Directory holding one subdirectory per save slot.
pub fn slots_dir() -> PathBuf {
    PATH_VAULT.join("slots")
}

/// The selector/settings document.
pub fn config_file() -> PathBuf {
    PATH_VAULT.join("config.json")
}
