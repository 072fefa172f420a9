// Vault: the composition surface any front end talks to. Owns the
// configuration, the selector, the slot store, the resolved live save root
// and the single-sync-at-a-time gate. No ambient singletons; everything a
// call needs is inside this context object.

use std::path::PathBuf;
use std::sync::Mutex;

use crate::config::{load_cfg_from, save_cfg_to, VaultConfig};
use crate::error::{Result, SyncFailure, VaultError};
use crate::lifecycle::{
    CancelToken, LifecycleCoordinator, ProcessHost, SessionOutcome,
};
use crate::paths::{config_file, slots_dir};
use crate::platform::resolve_save_root;
use crate::selector::PathSelector;
use crate::slots::{PlayMode, SaveSlot, SlotEntry, SlotStore};
use crate::sync::{plan_operation, sync, SyncDirection, SyncResult};
use crate::util::dir_size;

/// Count and total byte size of the currently included paths, as found in
/// the live save directory right now.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectionSummary {
    pub items: usize,
    pub total_bytes: u64,
}

pub struct Vault {
    config: VaultConfig,
    config_path: PathBuf,
    selector: PathSelector,
    store: SlotStore,
    live_root: PathBuf,
    /// At most one sync pass may touch the live directory at a time.
    /// Interleaved partial copies into the same destination would corrupt
    /// save state, so a second request fails fast instead of queuing.
    gate: Mutex<()>,
}

impl Vault {
    /// Open the vault at the default data directory, resolving the live
    /// save root from config override or Steam discovery.
    pub fn open() -> Result<Self> {
        let config = load_cfg_from(&config_file());
        let live_root = resolve_save_root(config.save_root.as_deref(), config.app_id)?;
        Ok(Self::with_roots(config, config_file(), slots_dir(), live_root))
    }

    /// Assemble a vault from explicit parts. This is the seam the tests and
    /// any embedding front end use.
    pub fn with_roots(
        config: VaultConfig,
        config_path: PathBuf,
        slots_root: PathBuf,
        live_root: PathBuf,
    ) -> Self {
        let selector = config.selector();
        Self {
            selector,
            store: SlotStore::new(slots_root),
            config,
            config_path,
            live_root,
            gate: Mutex::new(()),
        }
    }

    pub fn live_root(&self) -> &PathBuf {
        &self.live_root
    }

    pub fn app_id(&self) -> u32 {
        self.config.app_id
    }

    pub fn selector(&self) -> &PathSelector {
        &self.selector
    }

    pub fn list_slots(&self) -> Result<Vec<SlotEntry>> {
        self.store.list_slots()
    }

    pub fn delete_slot(&self, name: &str) -> Result<()> {
        self.store.delete_slot(name)
    }

    pub fn set_slot_mode(&self, name: &str, mode: PlayMode) -> Result<SaveSlot> {
        self.store.set_play_mode(name, mode)
    }

    /// Flip a selector entry and persist the configuration.
    pub fn set_path_included(&mut self, path: &str, included: bool) -> Result<()> {
        self.selector.set_included(path, included)?;
        self.config.set_paths_from(&self.selector)?;
        save_cfg_to(&self.config_path, &self.config)
    }

    /// Size up what a backup would currently cover.
    pub fn selection_summary(&self) -> SelectionSummary {
        let mut summary = SelectionSummary::default();
        for rel in self.selector.active_entries() {
            let path = self.live_root.join(rel);
            if !path.exists() {
                continue;
            }
            summary.items += 1;
            summary.total_bytes += if path.is_dir() {
                dir_size(&path)
            } else {
                path.metadata().map(|m| m.len()).unwrap_or(0)
            };
        }
        summary
    }

    /// Create a new slot and back the selected live paths up into it.
    /// The slot directory and metadata are written as a unit before any
    /// copying starts; a partial copy keeps the files that succeeded and
    /// surfaces the rest as PartialSync.
    pub fn create_slot_from_live(
        &self,
        name: &str,
        mode: PlayMode,
        on_progress: impl FnMut(usize, usize),
    ) -> Result<(SaveSlot, SyncResult)> {
        let _guard = self.gate.try_lock().map_err(|_| VaultError::Busy)?;

        let slot = self.store.create_slot(name, mode)?;
        let op = plan_operation(
            SyncDirection::Backup,
            &self.live_root,
            &slot.path,
            &self.selector,
        );
        let result = sync(&op, on_progress);
        self.store.touch(&slot.meta.name)?;
        Ok((slot, result.into_result()?))
    }

    /// Overwrite the live directory's selected paths from an existing slot.
    /// Corrupt slots are rejected before any file is touched.
    pub fn restore_slot_to_live(
        &self,
        name: &str,
        on_progress: impl FnMut(usize, usize),
    ) -> Result<SyncResult> {
        let _guard = self.gate.try_lock().map_err(|_| VaultError::Busy)?;

        let slot = self.store.slot(name)?;
        let op = plan_operation(
            SyncDirection::Restore,
            &self.live_root,
            &slot.path,
            &self.selector,
        );
        sync(&op, on_progress).into_result()
    }

    /// Launch the game and, once it exits, capture the live save state back
    /// into the slot. The gate is held for the whole session: the game owns
    /// the live directory while it runs, so competing syncs fail fast with
    /// Busy. Capture failures are reported in the outcome, not raised; a
    /// locked log file must not fail the session.
    pub fn launch_and_auto_restore<H: ProcessHost>(
        &self,
        name: &str,
        host: &mut H,
        cancel: &CancelToken,
        on_progress: impl FnMut(usize, usize),
    ) -> Result<SessionOutcome> {
        let _guard = self.gate.try_lock().map_err(|_| VaultError::Busy)?;

        // Require a loadable slot before anything launches.
        let slot = self.store.slot(name)?;
        let op = plan_operation(
            SyncDirection::Backup,
            &self.live_root,
            &slot.path,
            &self.selector,
        );

        let mut coordinator = LifecycleCoordinator::new();
        let mut outcome = coordinator.run_session(host, cancel, || sync(&op, on_progress))?;

        if let SessionOutcome::Completed(report) = &mut outcome {
            if let Err(e) = self.store.touch(&slot.meta.name) {
                report.capture.failures.push(SyncFailure {
                    relative_path: PathBuf::from("metadata.json"),
                    reason: e.to_string(),
                });
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    fn vault(tmp: &TempDir, rules: &[(&str, bool)]) -> Vault {
        let mut config = VaultConfig::default();
        config.paths = rules
            .iter()
            .map(|(path, included)| crate::config::PathRule {
                path: path.to_string(),
                included: *included,
            })
            .collect();
        Vault::with_roots(
            config,
            tmp.path().join("config.json"),
            tmp.path().join("slots"),
            tmp.path().join("live"),
        )
    }

    #[test]
    fn acceptance_scenario_backs_up_saved_but_not_mods() {
        let tmp = TempDir::new().unwrap();
        let vault = vault(&tmp, &[("Saved/", true), ("Mods/", false)]);
        write(vault.live_root(), "Saved/a.sav", "a");
        write(vault.live_root(), "Saved/sub/b.sav", "b");
        write(vault.live_root(), "Mods/x.pak", "x");

        let mut last = (0, 0);
        let (slot, result) = vault
            .create_slot_from_live("run1", PlayMode::Solo, |done, total| last = (done, total))
            .unwrap();

        assert_eq!(result.files_copied, 2);
        assert_eq!(result.files_failed(), 0);
        assert_eq!(last, (2, 2));
        assert!(slot.path.join("Saved/a.sav").is_file());
        assert!(slot.path.join("Saved/sub/b.sav").is_file());
        assert!(!slot.path.join("Mods").exists());
    }

    #[test]
    fn backup_then_restore_round_trips_bytes() {
        let tmp = TempDir::new().unwrap();
        let vault = vault(&tmp, &[("Saved", true)]);
        write(vault.live_root(), "Saved/game.db", "original bytes");

        vault
            .create_slot_from_live("trip", PlayMode::Online, |_, _| {})
            .unwrap();

        fs::remove_dir_all(vault.live_root()).unwrap();
        let result = vault.restore_slot_to_live("trip", |_, _| {}).unwrap();

        assert_eq!(result.files_copied, 1);
        assert_eq!(
            fs::read_to_string(vault.live_root().join("Saved/game.db")).unwrap(),
            "original bytes"
        );
    }

    #[test]
    fn restore_of_corrupt_slot_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let vault = vault(&tmp, &[("Saved", true)]);
        write(vault.live_root(), "Saved/a.sav", "a");

        let (slot, _) = vault
            .create_slot_from_live("bad", PlayMode::Solo, |_, _| {})
            .unwrap();
        fs::remove_file(slot.path.join("metadata.json")).unwrap();

        let err = vault.restore_slot_to_live("bad", |_, _| {}).unwrap_err();
        assert!(matches!(err, VaultError::CorruptSlot { .. }));

        // Still deletable.
        vault.delete_slot("bad").unwrap();
        assert!(vault.list_slots().unwrap().is_empty());
    }

    #[test]
    fn set_path_included_persists_configuration() {
        let tmp = TempDir::new().unwrap();
        let mut vault = vault(&tmp, &[]);
        fs::create_dir_all(vault.live_root()).unwrap();

        vault.set_path_included("Saved/", true).unwrap();
        vault.set_path_included("Mods/", false).unwrap();

        let reloaded = load_cfg_from(&tmp.path().join("config.json"));
        assert_eq!(reloaded.paths.len(), 2);
        assert_eq!(reloaded.paths[0].path, "Saved");
        assert!(reloaded.paths[0].included);
        assert!(!reloaded.paths[1].included);
    }

    #[test]
    fn invalid_selector_path_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut vault = vault(&tmp, &[]);
        let err = vault.set_path_included("../outside", true).unwrap_err();
        assert!(matches!(err, VaultError::InvalidPath(_)));
    }

    #[test]
    fn selection_summary_counts_existing_included_paths() {
        let tmp = TempDir::new().unwrap();
        let vault = vault(&tmp, &[("Saved", true), ("Mods", true), ("DLC", false)]);
        write(vault.live_root(), "Saved/a.sav", "12345");
        write(vault.live_root(), "Saved/b.sav", "678");
        // Mods is configured but absent, DLC exists but excluded.
        write(vault.live_root(), "DLC/pack.bin", "xxxxxxxx");

        let summary = vault.selection_summary();
        assert_eq!(summary.items, 1);
        assert_eq!(summary.total_bytes, 8);
    }

    struct BlockingHost {
        release: mpsc::Receiver<()>,
        /// Signalled on start, after the caller holds the sync gate.
        started: Option<mpsc::Sender<()>>,
    }

    impl ProcessHost for BlockingHost {
        type Handle = ();

        fn start(&mut self) -> Result<()> {
            if let Some(tx) = self.started.take() {
                let _ = tx.send(());
            }
            Ok(())
        }

        fn wait_for_exit(&mut self, _handle: ()) -> Result<i32> {
            self.release.recv().map_err(|e| VaultError::LaunchFailed(e.to_string()))?;
            Ok(0)
        }
    }

    #[test]
    fn concurrent_sync_fails_fast_with_busy() {
        let tmp = TempDir::new().unwrap();
        let vault = vault(&tmp, &[("Saved", true)]);
        write(vault.live_root(), "Saved/a.sav", "a");
        vault
            .create_slot_from_live("session", PlayMode::Solo, |_, _| {})
            .unwrap();

        let (release_tx, release_rx) = mpsc::channel();
        let (running_tx, running_rx) = mpsc::channel();

        std::thread::scope(|scope| {
            let vault_ref = &vault;
            scope.spawn(move || {
                let mut host = BlockingHost {
                    release: release_rx,
                    started: Some(running_tx),
                };
                vault_ref
                    .launch_and_auto_restore("session", &mut host, &CancelToken::new(), |_, _| {})
                    .unwrap();
            });

            // Wait until the session thread holds the gate.
            running_rx.recv().unwrap();

            let err = vault
                .create_slot_from_live("second", PlayMode::Solo, |_, _| {})
                .unwrap_err();
            assert!(matches!(err, VaultError::Busy));

            release_tx.send(()).unwrap();
        });

        // The first session finished unaffected; the rejected slot was
        // never created.
        let names: Vec<String> = vault
            .list_slots()
            .unwrap()
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(names, vec!["session"]);
    }

    #[test]
    fn session_capture_writes_live_state_into_slot() {
        let tmp = TempDir::new().unwrap();
        let vault = vault(&tmp, &[("Saved", true)]);
        write(vault.live_root(), "Saved/a.sav", "before");
        let (slot, _) = vault
            .create_slot_from_live("active", PlayMode::Solo, |_, _| {})
            .unwrap();

        // The game rewrites its save while running.
        let (release_tx, release_rx) = mpsc::channel();
        write(vault.live_root(), "Saved/a.sav", "after session");
        release_tx.send(()).unwrap();

        let mut host = BlockingHost {
            release: release_rx,
            started: None,
        };
        let outcome = vault
            .launch_and_auto_restore("active", &mut host, &CancelToken::new(), |_, _| {})
            .unwrap();

        assert!(matches!(outcome, SessionOutcome::Completed(_)));
        assert_eq!(
            fs::read_to_string(slot.path.join("Saved/a.sav")).unwrap(),
            "after session"
        );
    }
}
