//! Command vocabulary for the Wardbot wire protocol
//!
//! The remote side sends one already-classified token per line; tokens are
//! matched exactly after trimming. Everything the robot can physically
//! perform is an [`ActionGroup`]; the subset reachable from the wire is the
//! five combat moves plus the `patrol` / `stop patrol` control tokens.

use thiserror::Error;

/// Errors produced while interpreting wire tokens and action names
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The token did not match any command in the fixed set
    #[error("unknown command token: {token:?}")]
    UnknownCommand { token: String },

    /// The name did not match any known actuator action group
    #[error("unknown action group: {name:?}")]
    UnknownAction { name: String },
}

/// A named, indivisible motion routine run by the actuator backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionGroup {
    GoForward,
    TurnRight,
    Stand,
    WingChun,
    RightUppercut,
    LeftUppercut,
    RightKick,
    LeftKick,
}

impl ActionGroup {
    /// Every known action group
    pub const ALL: [ActionGroup; 8] = [
        ActionGroup::GoForward,
        ActionGroup::TurnRight,
        ActionGroup::Stand,
        ActionGroup::WingChun,
        ActionGroup::RightUppercut,
        ActionGroup::LeftUppercut,
        ActionGroup::RightKick,
        ActionGroup::LeftKick,
    ];

    /// Actuator-side name of the group (what the backend runs)
    pub const fn name(self) -> &'static str {
        match self {
            ActionGroup::GoForward => "go_forward",
            ActionGroup::TurnRight => "turn_right",
            ActionGroup::Stand => "stand",
            ActionGroup::WingChun => "wing_chun",
            ActionGroup::RightUppercut => "right_uppercut",
            ActionGroup::LeftUppercut => "left_uppercut",
            ActionGroup::RightKick => "right_kick",
            ActionGroup::LeftKick => "left_kick",
        }
    }

    /// Resolve an actuator action group name
    pub fn from_name(name: &str) -> Result<Self, ProtocolError> {
        Self::ALL
            .into_iter()
            .find(|group| group.name() == name)
            .ok_or_else(|| ProtocolError::UnknownAction {
                name: name.to_string(),
            })
    }

    /// Wire token for directly commandable groups
    ///
    /// Patrol-internal groups (walking, turning, the recovery stance) have
    /// no token and cannot be requested over the wire.
    pub const fn token(self) -> Option<&'static str> {
        match self {
            ActionGroup::WingChun => Some("wingchun"),
            ActionGroup::RightUppercut => Some("right uppercut"),
            ActionGroup::LeftUppercut => Some("left uppercut"),
            ActionGroup::RightKick => Some("right kick"),
            ActionGroup::LeftKick => Some("left kick"),
            ActionGroup::GoForward | ActionGroup::TurnRight | ActionGroup::Stand => None,
        }
    }

    /// Human-formatted announcement spoken when the group runs as a one-shot
    pub const fn speech(self) -> &'static str {
        match self {
            ActionGroup::GoForward => "Go Forward",
            ActionGroup::TurnRight => "Turn Right",
            ActionGroup::Stand => "Stand",
            ActionGroup::WingChun => "Wingchun",
            ActionGroup::RightUppercut => "Right Uppercut",
            ActionGroup::LeftUppercut => "Left Uppercut",
            ActionGroup::RightKick => "Right Kick",
            ActionGroup::LeftKick => "Left Kick",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|group| group.token() == Some(token))
    }
}

/// One parsed command from the wire, consumed immediately by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start the autonomous patrol loop
    Patrol,
    /// Cancel the patrol loop and stand down
    StopPatrol,
    /// Run a single named action group
    OneShot(ActionGroup),
}

/// Parse one line of input into a command
///
/// Matching is exact-string after trimming surrounding whitespace.
pub fn parse_command(line: &str) -> Result<Command, ProtocolError> {
    let token = line.trim();
    match token {
        "patrol" => Ok(Command::Patrol),
        "stop patrol" => Ok(Command::StopPatrol),
        _ => ActionGroup::from_token(token)
            .map(Command::OneShot)
            .ok_or_else(|| ProtocolError::UnknownCommand {
                token: token.to_string(),
            }),
    }
}
