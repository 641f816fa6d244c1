//! Simulated actuator backend for development and tests

use super::backend::{ActionBackend, ActionOutcome};
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Notify;
use tokio::time::{sleep, Duration};
use tracing::debug;

/// Backend that pretends to move the robot
///
/// Each action group sleeps for a rough fraction of the real motion time.
/// `stop_all` converts an in-flight sleep into an `Aborted` return.
pub struct SimBackend {
    pace: Duration,
    abort: Notify,
}

impl SimBackend {
    /// Create a backend with the default pace
    pub fn new() -> Self {
        Self::paced(Duration::from_millis(400))
    }

    /// Create a backend where a plain step takes `pace` (tests use short ones)
    pub fn paced(pace: Duration) -> Self {
        Self {
            pace,
            abort: Notify::new(),
        }
    }

    fn duration_for(&self, name: &str) -> Duration {
        match name {
            "go_forward" | "turn_right" => self.pace,
            "stand" => self.pace / 2,
            // Combat moves take longer than a step
            _ => self.pace * 2,
        }
    }
}

impl Default for SimBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActionBackend for SimBackend {
    async fn run_action(&self, name: &str) -> Result<ActionOutcome> {
        let duration = self.duration_for(name);
        debug!("[SIM] {} ({:?})", name, duration);

        tokio::select! {
            _ = sleep(duration) => Ok(ActionOutcome::Completed),
            _ = self.abort.notified() => {
                debug!("[SIM] {} aborted", name);
                Ok(ActionOutcome::Aborted)
            }
        }
    }

    async fn stop_all(&self) -> Result<()> {
        // Wakes current waiters only; the next action starts clean
        self.abort.notify_waiters();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_action_completes() {
        let backend = SimBackend::paced(Duration::from_millis(5));
        let outcome = backend.run_action("go_forward").await.unwrap();
        assert_eq!(outcome, ActionOutcome::Completed);
    }

    #[tokio::test]
    async fn test_stop_all_aborts_in_flight_action() {
        let backend = std::sync::Arc::new(SimBackend::paced(Duration::from_secs(30)));

        let running = tokio::spawn({
            let backend = backend.clone();
            async move { backend.run_action("wing_chun").await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        backend.stop_all().await.unwrap();

        let outcome = timeout(Duration::from_secs(1), running)
            .await
            .expect("abort should end the action promptly")
            .unwrap()
            .unwrap();
        assert_eq!(outcome, ActionOutcome::Aborted);
    }

    #[tokio::test]
    async fn test_stop_all_without_action_is_harmless() {
        let backend = SimBackend::paced(Duration::from_millis(5));
        backend.stop_all().await.unwrap();

        // A later action still runs to completion
        let outcome = backend.run_action("stand").await.unwrap();
        assert_eq!(outcome, ActionOutcome::Completed);
    }
}
