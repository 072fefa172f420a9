// Save slot storage: the on-disk collection of named backups.
// Each slot is one directory under the store root holding a metadata.json
// plus whatever files the sync engine copied into it.

pub mod operations;
pub mod types;


// Re-export types
pub use types::{PlayMode, SaveSlot, SlotEntry, SlotMeta};

// Re-export operations
pub use operations::SlotStore;
