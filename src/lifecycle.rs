// Session lifecycle: launch the game, wait for it to exit, then capture
// the live save state back into the active slot. Modeled as an explicit
// state machine so the flow is testable without a real process or display.

use std::process::{Child, Command};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Result, VaultError};
use crate::sync::SyncResult;

/// External process seam. The host owns its executable and arguments; the
/// coordinator only needs start and wait.
pub trait ProcessHost {
    type Handle;

    /// Launch the game. Failure here maps to LaunchFailed and nothing on
    /// disk has changed yet.
    fn start(&mut self) -> Result<Self::Handle>;

    /// Block until the game exits, returning its exit code. The coordinator
    /// does not interpret the code as success or failure of the game.
    fn wait_for_exit(&mut self, handle: Self::Handle) -> Result<i32>;
}

/// Launches the game through the Steam client URL handler, the same way a
/// desktop shortcut would.
pub struct SteamProcessHost {
    pub app_id: u32,
}

impl SteamProcessHost {
    pub fn new(app_id: u32) -> Self {
        Self { app_id }
    }
}

impl ProcessHost for SteamProcessHost {
    type Handle = Child;

    fn start(&mut self) -> Result<Child> {
        Command::new("steam")
            .arg(format!("steam://rungameid/{}", self.app_id))
            .spawn()
            .map_err(|e| VaultError::LaunchFailed(e.to_string()))
    }

    fn wait_for_exit(&mut self, mut handle: Child) -> Result<i32> {
        let status = handle
            .wait()
            .map_err(|e| VaultError::LaunchFailed(e.to_string()))?;
        Ok(status.code().unwrap_or(-1))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Launching,
    Running,
    Restoring,
    Error,
}

/// Cancellation token honored only while the session is still Launching.
/// Once the game has started the session runs to completion; copies are
/// short and bounded by the selected path set.
#[derive(Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// What a completed session produced.
#[derive(Debug)]
pub struct SessionReport {
    pub exit_code: i32,
    /// Result of the post-exit capture back into the slot. May carry
    /// per-file failures without failing the session.
    pub capture: SyncResult,
}

#[derive(Debug)]
pub enum SessionOutcome {
    Completed(SessionReport),
    /// Cancelled while still Launching; the game never started.
    Cancelled,
}

#[derive(Default)]
pub struct LifecycleCoordinator {
    state: SessionState,
}

impl LifecycleCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Clear the Error absorbing state back to Idle.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }

    /// Run one full session: Idle -> Launching -> Running -> Restoring ->
    /// Idle. `capture` performs the Backup-direction sync from the live
    /// directory into the active slot once the game has exited; its
    /// failures are reported in the outcome but do not fail the session.
    pub fn run_session<H: ProcessHost>(
        &mut self,
        host: &mut H,
        cancel: &CancelToken,
        capture: impl FnOnce() -> SyncResult,
    ) -> Result<SessionOutcome> {
        if self.state != SessionState::Idle {
            return Err(VaultError::Busy);
        }

        self.state = SessionState::Launching;

        if cancel.is_cancelled() {
            self.state = SessionState::Idle;
            return Ok(SessionOutcome::Cancelled);
        }

        let handle = match host.start() {
            Ok(handle) => handle,
            Err(e) => {
                // Nothing changed yet, no restore attempted.
                self.state = SessionState::Error;
                return Err(e);
            }
        };

        self.state = SessionState::Running;

        let exit_code = match host.wait_for_exit(handle) {
            Ok(code) => code,
            Err(e) => {
                self.state = SessionState::Error;
                return Err(e);
            }
        };

        self.state = SessionState::Restoring;
        let capture = capture();
        self.state = SessionState::Idle;

        Ok(SessionOutcome::Completed(SessionReport { exit_code, capture }))
    }
}
