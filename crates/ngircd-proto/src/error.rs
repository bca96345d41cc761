//! Errors produced while parsing wire lines.

use thiserror::Error;

/// Reasons a raw line could not be turned into a [`Message`](crate::Message).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line was empty or only whitespace / line terminators.
    #[error("empty message")]
    Empty,

    /// The line did not match `[:prefix] COMMAND [args]`.
    #[error("invalid message at position {position}: {input:?}")]
    Invalid {
        /// The offending line.
        input: String,
        /// Byte offset where parsing stopped.
        position: usize,
    },
}
