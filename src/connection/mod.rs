//! Operator connection handling
//!
//! This module handles:
//! - Accepting one persistent TCP connection at a time
//! - Forwarding newline-delimited command lines to the dispatcher
//! - Delivering `SPEAK:` notifications to the attached client

mod manager;
mod notifier;

pub use manager::ConnectionManager;
pub use notifier::Notifier;
