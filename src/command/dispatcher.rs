//! Command dispatcher - routes parsed commands to the controller

use crate::actuator::{ActionExecutor, ActionOutcome};
use crate::config::PatrolConfig;
use crate::connection::Notifier;
use crate::patrol::{PatrolContext, PatrolSupervisor};
use crate::perception::PerceptionHub;
use crate::state::{Mode, ModeCell};
use tracing::{debug, info, warn};
use wardbot_shared::{parse_command, ActionGroup, Command};

/// Routes commands from the connection to patrol control and the executor
///
/// Dispatch never fails: every error is absorbed and logged, and the
/// connection stays open.
#[derive(Clone)]
pub struct CommandDispatcher {
    executor: ActionExecutor,
    mode: ModeCell,
    notifier: Notifier,
    perception: PerceptionHub,
    supervisor: PatrolSupervisor,
    patrol_config: PatrolConfig,
}

impl CommandDispatcher {
    pub fn new(
        executor: ActionExecutor,
        mode: ModeCell,
        notifier: Notifier,
        perception: PerceptionHub,
        supervisor: PatrolSupervisor,
        patrol_config: PatrolConfig,
    ) -> Self {
        Self {
            executor,
            mode,
            notifier,
            perception,
            supervisor,
            patrol_config,
        }
    }

    /// Parse one raw input line and dispatch it
    pub async fn dispatch_line(&self, line: &str) {
        match parse_command(line) {
            Ok(cmd) => self.dispatch(cmd).await,
            Err(e) => warn!("Dropping command: {}", e),
        }
    }

    /// Route one parsed command
    pub async fn dispatch(&self, cmd: Command) {
        debug!("Dispatching {:?}", cmd);
        match cmd {
            Command::Patrol => self.handle_patrol().await,
            Command::StopPatrol => self.handle_stop_patrol().await,
            Command::OneShot(group) => self.handle_one_shot(group).await,
        }
    }

    async fn handle_patrol(&self) {
        let ctx = PatrolContext {
            executor: self.executor.clone(),
            mode: self.mode.clone(),
            notifier: self.notifier.clone(),
            perception: self.perception.clone(),
            config: self.patrol_config.clone(),
        };
        if self.supervisor.try_start(ctx).await {
            info!("Patrol session spawned");
        }
    }

    /// Stop patrolling and return to a neutral stance
    ///
    /// Effective whether or not a session is running.
    async fn handle_stop_patrol(&self) {
        let was_running = self.supervisor.cancel().await;
        if let Err(e) = self.executor.abort_all().await {
            warn!("Abort failed: {}", e);
        }

        self.notifier.notify("Standing down.").await;
        if let Err(e) = self.executor.execute(ActionGroup::Stand.name()).await {
            warn!("Stand recovery failed: {}", e);
        }
        self.mode.set(Mode::Idle).await;
        info!("Stop patrol handled (session was running: {})", was_running);
    }

    /// Run a single commanded action outside of patrol
    async fn handle_one_shot(&self, group: ActionGroup) {
        self.mode.set(Mode::Action(group)).await;
        self.notifier.notify(group.speech()).await;

        match self.executor.execute(group.name()).await {
            Ok(ActionOutcome::Completed) => debug!("One-shot {} completed", group.name()),
            Ok(ActionOutcome::Aborted) => debug!("One-shot {} aborted", group.name()),
            Err(e) => warn!("One-shot {} failed: {}", group.name(), e),
        }

        // A running patrol session owns the mode; only restore when idle
        if !self.supervisor.is_running() {
            self.mode.set(Mode::Idle).await;
        }
    }
}
