//! Action executor - serializes action-group execution

use super::backend::{ActionBackend, ActionOutcome};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use wardbot_shared::ActionGroup;

/// Runs action groups one at a time against the backend
///
/// The actuator is one physical device. The execution slot guarantees at
/// most one `run_action` in flight system-wide no matter how many tasks
/// hold a clone of the executor.
#[derive(Clone)]
pub struct ActionExecutor {
    backend: Arc<dyn ActionBackend>,
    /// Execution slot, held for the duration of each backend call
    slot: Arc<Mutex<()>>,
}

impl ActionExecutor {
    /// Create an executor over the given backend
    pub fn new(backend: Arc<dyn ActionBackend>) -> Self {
        Self {
            backend,
            slot: Arc::new(Mutex::new(())),
        }
    }

    /// Run one action group, waiting for the slot if another is in flight
    ///
    /// Unknown names are rejected here and never reach the backend.
    pub async fn execute(&self, name: &str) -> Result<ActionOutcome> {
        let group = ActionGroup::from_name(name)?;
        let _slot = self.slot.lock().await;
        debug!("Running action group: {}", group.name());
        self.backend.run_action(group.name()).await
    }

    /// Tell the backend to stop any in-flight action immediately
    ///
    /// Bypasses the execution slot: the slot holder is the very call being
    /// aborted, so waiting for it would deadlock.
    pub async fn abort_all(&self) -> Result<()> {
        self.backend.stop_all().await
    }
}
