//! Robot activity state
//!
//! This module handles:
//! - The `Mode` label describing what the robot is doing right now
//! - The shared `ModeCell` that publishes every transition as an event
//!
//! Mode is observational: components act on their own signals (cancel flag,
//! perception snapshot), never on the mode label.

use std::fmt;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use wardbot_shared::ActionGroup;

/// Current robot activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Patrolling,
    Turning,
    Defending,
    /// Running a one-shot action group
    Action(ActionGroup),
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Idle => write!(f, "idle"),
            Mode::Patrolling => write!(f, "patrolling"),
            Mode::Turning => write!(f, "turning"),
            Mode::Defending => write!(f, "defending"),
            Mode::Action(group) => write!(f, "{}", group.name()),
        }
    }
}

/// One mode transition, published on the event stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChange {
    pub from: Mode,
    pub to: Mode,
}

/// Shared holder of the current mode
///
/// Writers go through `set`, which publishes a `ModeChange` for every actual
/// transition. Observers either poll `get` or subscribe to the stream.
#[derive(Clone)]
pub struct ModeCell {
    mode: Arc<RwLock<Mode>>,
    events: broadcast::Sender<ModeChange>,
}

impl ModeCell {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            mode: Arc::new(RwLock::new(Mode::Idle)),
            events,
        }
    }

    /// Read the current mode
    pub async fn get(&self) -> Mode {
        *self.mode.read().await
    }

    /// Set the mode, publishing the transition if the value actually changed
    pub async fn set(&self, to: Mode) {
        let mut guard = self.mode.write().await;
        let from = *guard;
        if from == to {
            return;
        }
        *guard = to;
        // Publish while holding the lock so event order matches write order
        let _ = self.events.send(ModeChange { from, to });
    }

    /// Subscribe to mode transitions
    pub fn subscribe(&self) -> broadcast::Receiver<ModeChange> {
        self.events.subscribe()
    }
}

impl Default for ModeCell {
    fn default() -> Self {
        Self::new()
    }
}
