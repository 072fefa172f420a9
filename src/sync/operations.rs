// Filesystem side of the sync engine: discovery and transfer passes.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SyncFailure;

use super::types::{SyncOperation, SyncResult};

/// Enumerate every source file the operation covers, as paths relative to
/// the source root. Configured paths that do not exist are skipped, not
/// errors: an empty Mods folder is a normal state. Directories enumerate
/// lexicographically so repeated runs report identical progress sequences.
/// Unreadable directory entries surface in the failure list.
pub fn discover_files(op: &SyncOperation, failures: &mut Vec<SyncFailure>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for rel in &op.paths {
        let src = op.source_root.join(rel);
        if !src.exists() {
            continue;
        }
        if src.is_file() {
            files.push(PathBuf::from(rel));
            continue;
        }

        let walk = walkdir::WalkDir::new(&src)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();
        for entry in walk {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    failures.push(SyncFailure {
                        relative_path: e
                            .path()
                            .and_then(|p| p.strip_prefix(&op.source_root).ok())
                            .unwrap_or_else(|| Path::new(rel))
                            .to_path_buf(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match entry.path().strip_prefix(&op.source_root) {
                Ok(relative) => files.push(relative.to_path_buf()),
                Err(e) => failures.push(SyncFailure {
                    relative_path: entry.path().to_path_buf(),
                    reason: e.to_string(),
                }),
            }
        }
    }

    files
}

/// Copy one file, creating intermediate destination directories and
/// carrying the source's modification time over.
fn copy_file(source_root: &Path, dest_root: &Path, relative: &Path) -> std::io::Result<()> {
    let src = source_root.join(relative);
    let dst = dest_root.join(relative);

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(&src, &dst)?;

    let modified = fs::metadata(&src)?.modified()?;
    let dest_file = fs::File::options().write(true).open(&dst)?;
    dest_file.set_times(fs::FileTimes::new().set_modified(modified))?;
    Ok(())
}

/// Run a sync pass: discovery first for an accurate total, then transfer.
/// `on_progress` fires after every file attempt with (files done, total).
/// Per-file failures are recorded and the pass continues; the destination
/// is never pruned of files absent from the source selection.
pub fn sync(op: &SyncOperation, mut on_progress: impl FnMut(usize, usize)) -> SyncResult {
    let mut result = SyncResult::default();

    let files = discover_files(op, &mut result.failures);
    let total = files.len();

    for (done, relative) in files.iter().enumerate() {
        match copy_file(&op.source_root, &op.dest_root, relative) {
            Ok(()) => result.files_copied += 1,
            Err(e) => result.failures.push(SyncFailure {
                relative_path: relative.clone(),
                reason: e.to_string(),
            }),
        }
        on_progress(done + 1, total);
    }

    result
}
