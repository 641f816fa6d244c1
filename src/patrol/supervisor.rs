//! Patrol session supervision

use super::runner::{self, PatrolContext};
use super::session::{CancelFlag, PatrolSession};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Enforces the one-session rule and holds the active session's cancel flag
#[derive(Clone)]
pub struct PatrolSupervisor {
    running: Arc<AtomicBool>,
    runs_started: Arc<AtomicU64>,
    cancel: Arc<Mutex<Option<CancelFlag>>>,
}

impl PatrolSupervisor {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            runs_started: Arc::new(AtomicU64::new(0)),
            cancel: Arc::new(Mutex::new(None)),
        }
    }

    /// Spawn a patrol session unless one is already running
    ///
    /// Returns whether a new session was started. A start request while a
    /// session runs is a silent no-op, not an error.
    pub async fn try_start(&self, ctx: PatrolContext) -> bool {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Patrol already running, ignoring start request");
            return false;
        }

        self.runs_started.fetch_add(1, Ordering::SeqCst);
        let cancel = CancelFlag::new();
        *self.cancel.lock().await = Some(cancel.clone());

        let running = self.running.clone();
        tokio::spawn(async move {
            let session = PatrolSession::new(cancel);
            runner::run_session(ctx, &session).await;
            running.store(false, Ordering::SeqCst);
        });
        true
    }

    /// Signal the active session to stop at its next action boundary
    ///
    /// Returns whether a session was running when the cancel arrived.
    /// Harmless with no session; the stored flag may belong to a session
    /// that already ended, and setting it then does nothing.
    pub async fn cancel(&self) -> bool {
        let was_running = self.running.load(Ordering::SeqCst);
        if let Some(flag) = self.cancel.lock().await.take() {
            flag.set();
        }
        was_running
    }

    /// Whether a session is currently running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Sessions started since boot
    pub fn runs_started(&self) -> u64 {
        self.runs_started.load(Ordering::SeqCst)
    }
}

impl Default for PatrolSupervisor {
    fn default() -> Self {
        Self::new()
    }
}
