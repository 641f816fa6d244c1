//! Wardbot Shared Protocol Types
//!
//! This crate provides the command vocabulary and the line codec for
//! communication between the on-robot controller and the operator console.

pub mod codec;
pub mod command;

// Re-export commonly used types at crate root
pub use codec::{encode_speak, parse_speak, CodecError, LineDecoder};
pub use command::{parse_command, ActionGroup, Command, ProtocolError};

/// Wire parameters shared by both ends of the protocol
pub mod wire {
    /// Default TCP port the robot controller listens on
    pub const DEFAULT_PORT: u16 = 50090;

    /// Default bind address for the robot controller
    pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:50090";
}
