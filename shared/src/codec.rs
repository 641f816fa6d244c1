//! Newline-delimited codec for TCP framing
//!
//! Both directions are framed as UTF-8 text lines:
//! ```text
//! [ N bytes: payload ][ 1 byte: '\n' ]
//! ```
//!
//! Client to robot lines carry one command token each; robot to client
//! lines carry `SPEAK:` notifications. The decoder preserves message
//! boundaries over TCP streams, where a single read may hold a partial
//! line or several complete ones.

use bytes::{Buf, BytesMut};
use thiserror::Error;

/// Maximum accepted line length in bytes, to prevent memory exhaustion
pub const MAX_LINE_BYTES: usize = 1024;

/// Prefix for robot to client notification lines
pub const SPEAK_PREFIX: &str = "SPEAK:";

/// Errors that can occur while decoding the line stream
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("line exceeds {MAX_LINE_BYTES} bytes without a terminator")]
    LineTooLong,

    #[error("line is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Encode a notification as a `SPEAK:` line ready for the wire
pub fn encode_speak(text: &str) -> String {
    format!("{SPEAK_PREFIX}{text}\n")
}

/// Extract the notification text from a `SPEAK:` line
///
/// Returns `None` for lines that are not notifications.
pub fn parse_speak(line: &str) -> Option<&str> {
    line.trim().strip_prefix(SPEAK_PREFIX).map(str::trim)
}

/// Decoder state machine for streaming line decoding
#[derive(Debug, Default)]
pub struct LineDecoder {
    /// Partial line data being accumulated
    buffer: BytesMut,
}

impl LineDecoder {
    /// Create a new line decoder
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(1024),
        }
    }

    /// Add data to the decoder buffer
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to decode the next complete line from the buffer
    ///
    /// The terminating newline is consumed but not returned; a trailing
    /// carriage return is stripped. Call this repeatedly until it returns
    /// `Ok(None)` to drain all complete lines.
    pub fn decode_next(&mut self) -> Result<Option<String>, CodecError> {
        match self.buffer.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                if pos > MAX_LINE_BYTES {
                    return Err(CodecError::LineTooLong);
                }
                let line = self.buffer.split_to(pos);
                // Consume the newline itself
                self.buffer.advance(1);
                let text = std::str::from_utf8(&line)?;
                Ok(Some(text.trim_end_matches('\r').to_string()))
            }
            None if self.buffer.len() > MAX_LINE_BYTES => Err(CodecError::LineTooLong),
            None => Ok(None),
        }
    }

    /// Get the current buffer length (for debugging)
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }
}
