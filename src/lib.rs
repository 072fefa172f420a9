// sandvault: selective save backup manager for Conan Exiles.
// The library carries the whole engine; main.rs is just a CLI front end
// and any future GUI talks to the same Vault surface.

pub mod api;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod paths;
pub mod platform;
pub mod selector;
pub mod slots;
pub mod sync;
pub mod util;

pub use api::{SelectionSummary, Vault};
pub use error::{Result, SyncFailure, VaultError};
pub use lifecycle::{
    CancelToken, LifecycleCoordinator, ProcessHost, SessionOutcome, SessionReport, SessionState,
    SteamProcessHost,
};
pub use selector::{PathEntry, PathSelector};
pub use slots::{PlayMode, SaveSlot, SlotEntry, SlotStore};
pub use sync::{SyncDirection, SyncOperation, SyncResult};
