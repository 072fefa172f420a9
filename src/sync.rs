// Selective sync engine: copies the configured subset of paths between the
// live save directory and a slot directory, in either direction. Two-pass
// by design: discover every file first so progress reporting is accurate,
// then transfer. Additive/overwrite-only, never a mirror-delete.

pub mod operations;
pub mod pure;
pub mod types;


// Re-export types
pub use types::{SyncDirection, SyncOperation, SyncResult};

// Re-export operations
pub use operations::sync;
pub use pure::plan_operation;
