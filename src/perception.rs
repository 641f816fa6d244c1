//! Perception snapshot shared between the perception source and the patrol loop
//!
//! The camera pipeline that produces face counts lives outside this crate.
//! Whatever runs it calls `publish` at its own cadence; the patrol loop reads
//! the latest value once per step and never waits for a fresh frame.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

/// Point-in-time view of the intruder signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerceptionSnapshot {
    /// Faces visible in the most recent frame
    pub faces: usize,
    /// Remaining ticks the alert stays latched after faces drop to zero
    pub alert_hold: u32,
}

impl PerceptionSnapshot {
    /// Whether the intruder alert should currently be shown
    pub fn alert_active(&self) -> bool {
        self.faces > 0 || self.alert_hold > 0
    }
}

/// Thread-safe holder of the latest perception reading
///
/// Fields are independent atomics. A reader may pair a count from one frame
/// with a hold value from the next, which is fine (staleness is bounded by
/// one perception cycle), but it can never see a torn value.
#[derive(Clone, Default)]
pub struct PerceptionHub {
    faces: Arc<AtomicUsize>,
    alert_hold: Arc<AtomicU32>,
}

impl PerceptionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the face count from the latest frame
    pub fn publish(&self, faces: usize) {
        self.faces.store(faces, Ordering::SeqCst);
    }

    /// Read the latest snapshot
    pub fn snapshot(&self) -> PerceptionSnapshot {
        PerceptionSnapshot {
            faces: self.faces.load(Ordering::SeqCst),
            alert_hold: self.alert_hold.load(Ordering::SeqCst),
        }
    }

    /// Latch the intruder alert for `ticks` decay ticks
    pub fn latch_alert(&self, ticks: u32) {
        self.alert_hold.store(ticks, Ordering::SeqCst);
    }

    /// Count one decay tick while no faces are visible
    ///
    /// Returns true if this tick cleared the latch.
    pub fn tick_decay(&self) -> bool {
        if self.faces.load(Ordering::SeqCst) > 0 {
            return false;
        }
        let prev = self
            .alert_hold
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |held| held.checked_sub(1));
        matches!(prev, Ok(1))
    }
}
