//! Command handling for the robot controller
//!
//! This module handles:
//! - Turning raw input lines into parsed commands
//! - Routing commands to patrol control or one-shot execution
//! - Absorbing command failures so the connection stays open

mod dispatcher;

pub use dispatcher::CommandDispatcher;
