use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Write a JSON document through a temp file plus rename so a reader never
/// observes a half-written file. The temp file lives next to the target so
/// the rename stays on one filesystem.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let body = serde_json::to_vec_pretty(value)?;
    fs::write(&tmp, body)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// Total size in bytes of all files under a directory.
/// Unreadable entries count as zero rather than failing the caller.
pub fn dir_size(path: &Path) -> u64 {
    walkdir::WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}
