//! Actuator backend abstraction for pluggable motion hardware

use anyhow::Result;
use async_trait::async_trait;

/// How an action group finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Ran to completion
    Completed,
    /// Stopped early by `stop_all`
    Aborted,
}

/// A backend that can run named action groups on the robot
///
/// Real hardware sits behind this trait; `SimBackend` ships for development.
/// `run_action` blocks until the group finishes or is aborted. `stop_all`
/// must be callable concurrently with an in-flight `run_action` and convert
/// it into an `Aborted` return.
#[async_trait]
pub trait ActionBackend: Send + Sync {
    /// Run a named action group to completion or abort
    async fn run_action(&self, name: &str) -> Result<ActionOutcome>;

    /// Stop whatever is running and halt all motion immediately
    async fn stop_all(&self) -> Result<()>;
}
