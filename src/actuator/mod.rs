//! Actuator control
//!
//! This module handles:
//! - The `ActionBackend` trait abstracting the physical actuator
//! - The `ActionExecutor` that serializes action-group execution
//! - A simulated backend for development and tests

mod backend;
mod executor;
mod sim;

pub use backend::{ActionBackend, ActionOutcome};
pub use executor::ActionExecutor;
pub use sim::SimBackend;
