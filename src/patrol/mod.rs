//! Autonomous patrol behavior
//!
//! This module handles:
//! - Per-session cancellation and progress counters
//! - The patrol loop itself (walk a leg, U-turn, repeat, defend on intruders)
//! - The supervisor enforcing at most one session at a time

mod runner;
mod session;
mod supervisor;

pub use runner::PatrolContext;
pub use session::{CancelFlag, PatrolSession};
pub use supervisor::PatrolSupervisor;
