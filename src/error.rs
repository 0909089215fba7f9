//! Error types for the board synchronization engine.
//!
//! Remote failures are always returned as values; nothing in this crate
//! panics across the client boundary. Server-reported failures keep the
//! server's own message so the UI layer can surface it verbatim.

use thiserror::Error;

/// Failure of a remote board operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The board service could not be reached (transport failure, timeout).
    #[error("board service unreachable: {0}")]
    Unreachable(String),

    /// The service answered, but reported a non-success application code.
    #[error("board service rejected the request (code {code}): {message}")]
    Rejected { code: i64, message: String },

    /// The payload exceeds the configured ceiling. Checked before any
    /// network round trip is made.
    #[error("payload of {size} bytes exceeds the {limit} byte ceiling")]
    PayloadTooLarge { size: usize, limit: usize },

    /// The response body could not be decoded as a board envelope.
    #[error("malformed board response: {0}")]
    Protocol(String),
}

impl RemoteError {
    /// Message suitable for a user-facing notification. Prefers the
    /// server-provided text when the server sent one.
    pub fn surface_message(&self) -> String {
        match self {
            RemoteError::Rejected { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Failure that never leaves the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocalError {
    /// The input was empty after trimming; treated as a quiet no-op.
    #[error("input is empty")]
    EmptyInput,
}

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;
