//! Per-session cancellation and progress tracking

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

/// Cooperative cancellation signal for one patrol session
///
/// Polled at action-group boundaries, never mid-action; aborting the
/// in-flight action itself is the executor's job.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// One run of the autonomous patrol loop
pub struct PatrolSession {
    pub cancel: CancelFlag,
    steps_taken: AtomicU32,
    turns_taken: AtomicU32,
}

impl PatrolSession {
    pub fn new(cancel: CancelFlag) -> Self {
        Self {
            cancel,
            steps_taken: AtomicU32::new(0),
            turns_taken: AtomicU32::new(0),
        }
    }

    /// Count one completed forward step
    pub fn record_step(&self) {
        self.steps_taken.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one completed turn repetition
    pub fn record_turn(&self) {
        self.turns_taken.fetch_add(1, Ordering::Relaxed);
    }

    /// Step and turn totals for the end-of-session log line
    pub fn totals(&self) -> (u32, u32) {
        (
            self.steps_taken.load(Ordering::Relaxed),
            self.turns_taken.load(Ordering::Relaxed),
        )
    }
}
