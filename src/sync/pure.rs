// Pure planning logic for sync operations
// No side effects - only path resolution and snapshotting

use std::path::Path;

use crate::selector::PathSelector;

use super::types::{SyncDirection, SyncOperation};

/// Resolve a sync operation from the selector's current state. The active
/// set is snapshotted here; the engine never consults the selector again.
pub fn plan_operation(
    direction: SyncDirection,
    live_root: &Path,
    slot_dir: &Path,
    selector: &PathSelector,
) -> SyncOperation {
    let (source_root, dest_root) = match direction {
        SyncDirection::Backup => (live_root, slot_dir),
        SyncDirection::Restore => (slot_dir, live_root),
    };
    SyncOperation {
        direction,
        source_root: source_root.to_path_buf(),
        dest_root: dest_root.to_path_buf(),
        paths: selector.active_entries().map(str::to_string).collect(),
    }
}
