//! Top-level wiring for the robot controller

use crate::actuator::{ActionBackend, ActionExecutor};
use crate::command::CommandDispatcher;
use crate::config::ControllerConfig;
use crate::connection::{ConnectionManager, Notifier};
use crate::patrol::PatrolSupervisor;
use crate::perception::PerceptionHub;
use crate::state::ModeCell;
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;

/// The assembled robot controller
///
/// Wires the executor, patrol supervisor, dispatcher and connection manager
/// together over a backend, and exposes the shared handles that `main` and
/// the integration tests observe.
pub struct Controller {
    pub mode: ModeCell,
    pub perception: PerceptionHub,
    pub executor: ActionExecutor,
    pub supervisor: PatrolSupervisor,
    manager: ConnectionManager,
}

impl Controller {
    /// Wire everything together and bind the command port
    pub async fn start(config: ControllerConfig, backend: Arc<dyn ActionBackend>) -> Result<Self> {
        let mode = ModeCell::new();
        let perception = PerceptionHub::new();
        let executor = ActionExecutor::new(backend);
        let supervisor = PatrolSupervisor::new();
        let notifier = Notifier::new();

        let dispatcher = CommandDispatcher::new(
            executor.clone(),
            mode.clone(),
            notifier.clone(),
            perception.clone(),
            supervisor.clone(),
            config.patrol.clone(),
        );
        let manager = ConnectionManager::bind(&config.bind_addr, dispatcher, notifier).await?;

        Ok(Self {
            mode,
            perception,
            executor,
            supervisor,
            manager,
        })
    }

    /// Address the command listener is bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.manager.local_addr()
    }

    /// Run the accept loop; does not return under normal operation
    pub async fn serve(self) -> Result<()> {
        self.manager.serve().await
    }
}
