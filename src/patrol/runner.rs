//! The patrol loop itself

use super::session::PatrolSession;
use crate::actuator::{ActionExecutor, ActionOutcome};
use crate::config::PatrolConfig;
use crate::connection::Notifier;
use crate::perception::PerceptionHub;
use crate::state::{Mode, ModeCell};
use tracing::{debug, info, warn};
use wardbot_shared::ActionGroup;

/// Everything a patrol session needs from the rest of the controller
#[derive(Clone)]
pub struct PatrolContext {
    pub executor: ActionExecutor,
    pub mode: ModeCell,
    pub notifier: Notifier,
    pub perception: PerceptionHub,
    pub config: PatrolConfig,
}

/// Run one patrol session until cancellation is observed
///
/// The loop walks `steps_per_leg` forward steps, makes an in-place U-turn
/// and repeats. After each completed step the perception snapshot is
/// checked; one or more visible faces trigger the defend sub-sequence
/// before stepping resumes. Cancellation is polled between actuator calls
/// only; the executor's `abort_all` covers the in-flight action.
pub async fn run_session(ctx: PatrolContext, session: &PatrolSession) {
    ctx.mode.set(Mode::Patrolling).await;
    ctx.notifier.notify("Patrol started.").await;
    info!("Patrol session started");

    'patrol: loop {
        for step in 1..=ctx.config.steps_per_leg {
            if session.cancel.is_set() {
                break 'patrol;
            }
            step_forward(&ctx, session, step).await;

            if !session.cancel.is_set() && ctx.perception.snapshot().faces > 0 {
                defend(&ctx, session).await;
            }
        }

        if session.cancel.is_set() {
            break;
        }
        u_turn(&ctx, session).await;
    }

    ctx.mode.set(Mode::Idle).await;
    let (steps, turns) = session.totals();
    info!("Patrol session ended: {} steps, {} turns", steps, turns);
}

/// Walk one forward step and announce it
async fn step_forward(ctx: &PatrolContext, session: &PatrolSession, step: u32) {
    match run_group(ctx, ActionGroup::GoForward).await {
        ActionOutcome::Completed => {
            session.record_step();
            ctx.mode.set(Mode::Patrolling).await;
            ctx.notifier.notify(&format!("Step {step}")).await;
        }
        ActionOutcome::Aborted => {
            debug!("Forward step {} aborted", step);
        }
    }
}

/// Turn in place until facing the other way
async fn u_turn(ctx: &PatrolContext, session: &PatrolSession) {
    ctx.mode.set(Mode::Turning).await;
    ctx.notifier.notify("Turning.").await;

    for _ in 0..ctx.config.u_turn_steps {
        if session.cancel.is_set() {
            return;
        }
        if run_group(ctx, ActionGroup::TurnRight).await == ActionOutcome::Completed {
            session.record_turn();
        }
    }

    ctx.mode.set(Mode::Patrolling).await;
}

/// The intruder response: announce, latch the alert, strike, stand guard
///
/// Perception is not re-checked while defending, so a face that stays in
/// view cannot retrigger the sequence from inside itself.
async fn defend(ctx: &PatrolContext, session: &PatrolSession) {
    ctx.mode.set(Mode::Defending).await;
    ctx.notifier.notify("Intruder detected! Wing Chun activated.").await;
    ctx.perception.latch_alert(ctx.config.alert_hold_ticks);
    info!("Intruder response triggered");

    for _ in 0..ctx.config.defend_reps {
        if session.cancel.is_set() {
            return;
        }
        run_group(ctx, ActionGroup::WingChun).await;
    }

    ctx.notifier.notify("Area secured.").await;
    ctx.mode.set(Mode::Patrolling).await;
}

/// Run one action group, absorbing executor errors
async fn run_group(ctx: &PatrolContext, group: ActionGroup) -> ActionOutcome {
    match ctx.executor.execute(group.name()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Action {} failed: {}", group.name(), e);
            ActionOutcome::Aborted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::ActionBackend;
    use crate::patrol::CancelFlag;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::Mutex as StdMutex;

    type Hook = Box<dyn FnMut(usize, &str) -> ActionOutcome + Send>;

    /// Backend whose hook sees every call and decides its outcome
    struct HookBackend {
        calls: StdMutex<Vec<String>>,
        hook: StdMutex<Hook>,
    }

    impl HookBackend {
        fn new(hook: impl FnMut(usize, &str) -> ActionOutcome + Send + 'static) -> Arc<Self> {
            Arc::new(Self {
                calls: StdMutex::new(Vec::new()),
                hook: StdMutex::new(Box::new(hook)),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ActionBackend for HookBackend {
        async fn run_action(&self, name: &str) -> Result<ActionOutcome> {
            let idx = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(name.to_string());
                calls.len()
            };
            let outcome = (self.hook.lock().unwrap())(idx, name);
            Ok(outcome)
        }

        async fn stop_all(&self) -> Result<()> {
            Ok(())
        }
    }

    fn context(
        backend: Arc<dyn ActionBackend>,
        perception: PerceptionHub,
        config: PatrolConfig,
    ) -> PatrolContext {
        PatrolContext {
            executor: ActionExecutor::new(backend),
            mode: ModeCell::new(),
            notifier: Notifier::new(),
            perception,
            config,
        }
    }

    fn short_config() -> PatrolConfig {
        PatrolConfig {
            steps_per_leg: 3,
            u_turn_steps: 2,
            defend_reps: 3,
            alert_hold_ticks: 30,
        }
    }

    #[tokio::test]
    async fn test_leg_then_turn_then_stepping_resumes() {
        let cancel = CancelFlag::new();
        let backend = HookBackend::new({
            let cancel = cancel.clone();
            move |idx, _name| {
                if idx == 6 {
                    cancel.set();
                }
                ActionOutcome::Completed
            }
        });

        let ctx = context(backend.clone(), PerceptionHub::new(), short_config());
        let mut events = ctx.mode.subscribe();
        let session = PatrolSession::new(cancel);
        run_session(ctx.clone(), &session).await;

        assert_eq!(
            backend.calls(),
            vec![
                "go_forward",
                "go_forward",
                "go_forward",
                "turn_right",
                "turn_right",
                "go_forward",
            ]
        );
        assert_eq!(session.totals(), (4, 2));
        assert_eq!(ctx.mode.get().await, Mode::Idle);

        let mut transitions = Vec::new();
        while let Ok(change) = events.try_recv() {
            transitions.push((change.from, change.to));
        }
        assert_eq!(
            transitions,
            vec![
                (Mode::Idle, Mode::Patrolling),
                (Mode::Patrolling, Mode::Turning),
                (Mode::Turning, Mode::Patrolling),
                (Mode::Patrolling, Mode::Idle),
            ]
        );
    }

    #[tokio::test]
    async fn test_intruder_triggers_one_defend_sequence() {
        let cancel = CancelFlag::new();
        let perception = PerceptionHub::new();
        let backend = HookBackend::new({
            let cancel = cancel.clone();
            let perception = perception.clone();
            move |idx, name| {
                if idx == 2 {
                    perception.publish(1);
                }
                if name == "wing_chun" {
                    // Face moves out of view during the first strike
                    perception.publish(0);
                }
                if name == "turn_right" {
                    cancel.set();
                }
                ActionOutcome::Completed
            }
        });

        let config = PatrolConfig {
            steps_per_leg: 4,
            ..short_config()
        };
        let ctx = context(backend.clone(), perception, config);
        let mut events = ctx.mode.subscribe();

        let session = PatrolSession::new(cancel);
        run_session(ctx.clone(), &session).await;

        assert_eq!(
            backend.calls(),
            vec![
                "go_forward",
                "go_forward",
                "wing_chun",
                "wing_chun",
                "wing_chun",
                "go_forward",
                "go_forward",
                "turn_right",
            ]
        );

        // The alert stays latched after the sequence
        assert_eq!(ctx.perception.snapshot().alert_hold, 30);

        let mut defends = 0;
        while let Ok(change) = events.try_recv() {
            if change.to == Mode::Defending {
                defends += 1;
            }
        }
        assert_eq!(defends, 1);
    }

    #[tokio::test]
    async fn test_cancel_wins_over_pending_intruder() {
        let cancel = CancelFlag::new();
        let perception = PerceptionHub::new();
        let backend = HookBackend::new({
            let cancel = cancel.clone();
            let perception = perception.clone();
            move |idx, _name| {
                if idx == 1 {
                    perception.publish(1);
                    cancel.set();
                }
                ActionOutcome::Completed
            }
        });

        let ctx = context(backend.clone(), perception, short_config());

        let session = PatrolSession::new(cancel);
        run_session(ctx.clone(), &session).await;

        // No defend sequence after cancellation, even with a face in view
        assert_eq!(backend.calls(), vec!["go_forward"]);
        assert_eq!(ctx.mode.get().await, Mode::Idle);
    }

    #[tokio::test]
    async fn test_aborted_steps_are_not_counted() {
        let cancel = CancelFlag::new();
        let backend = HookBackend::new({
            let cancel = cancel.clone();
            move |idx, _name| match idx {
                2 => ActionOutcome::Aborted,
                3 => {
                    cancel.set();
                    ActionOutcome::Completed
                }
                _ => ActionOutcome::Completed,
            }
        });

        let ctx = context(backend.clone(), PerceptionHub::new(), short_config());
        let session = PatrolSession::new(cancel);
        run_session(ctx, &session).await;

        assert_eq!(backend.calls().len(), 3);
        assert_eq!(session.totals(), (2, 0));
    }
}
