//! Controller configuration

use wardbot_shared::wire;

/// Tuning for the autonomous patrol behavior
#[derive(Debug, Clone)]
pub struct PatrolConfig {
    /// Forward steps per patrol leg
    pub steps_per_leg: u32,
    /// turn_right repetitions that make up the in-place U-turn
    pub u_turn_steps: u32,
    /// wing_chun repetitions per intruder response
    pub defend_reps: u32,
    /// Ticks the intruder alert stays latched after the signal clears
    pub alert_hold_ticks: u32,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            steps_per_leg: 10,
            u_turn_steps: 16,
            defend_reps: 3,
            alert_hold_ticks: 30,
        }
    }
}

/// Top-level controller configuration
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Address the command listener binds
    pub bind_addr: String,
    /// Patrol behavior tuning
    pub patrol: PatrolConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            bind_addr: wire::DEFAULT_BIND_ADDR.to_string(),
            patrol: PatrolConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patrol_defaults() {
        let patrol = PatrolConfig::default();
        assert_eq!(patrol.steps_per_leg, 10);
        assert_eq!(patrol.u_turn_steps, 16);
        assert_eq!(patrol.defend_reps, 3);
        assert_eq!(patrol.alert_hold_ticks, 30);

        let config = ControllerConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:50090");
    }
}
