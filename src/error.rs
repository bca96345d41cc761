//! Unified error handling for ngircd-link.
//!
//! Nothing here ever reaches the wire: the registry logs handler errors at
//! debug level and drops the line, and outbound send failures are logged
//! except during the login handshake.

use thiserror::Error;

// ============================================================================
// Handler Errors (inbound command processing)
// ============================================================================

/// Reasons an inbound command was dropped.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("no such user: {0}")]
    NoSuchUser(String),

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("no such server: {0}")]
    NoSuchServer(String),

    #[error("command not accepted from {0}")]
    WrongSource(&'static str),

    #[error(transparent)]
    State(#[from] StateError),
}

impl HandlerError {
    /// Static code for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams => "need_more_params",
            Self::NoSuchUser(_) => "no_such_user",
            Self::NoSuchChannel(_) => "no_such_channel",
            Self::NoSuchServer(_) => "no_such_server",
            Self::WrongSource(_) => "wrong_source",
            Self::State(_) => "state",
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// State Errors (entity store mutations)
// ============================================================================

/// Entity store mutation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("no such user: {0}")]
    NoSuchUser(String),

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("no such server: {0}")]
    NoSuchServer(String),

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("server already exists: {0}")]
    ServerExists(String),

    #[error("{nick} is not on {channel}")]
    NotOnChannel { nick: String, channel: String },

    #[error("channel namespace not tracked: {0}")]
    UntrackedChannel(String),
}

// ============================================================================
// Send Errors (outbound transport)
// ============================================================================

/// The transport refused a line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("uplink connection closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_codes() {
        assert_eq!(HandlerError::NeedMoreParams.error_code(), "need_more_params");
        assert_eq!(HandlerError::NoSuchChannel("#x".into()).error_code(), "no_such_channel");
        assert_eq!(
            HandlerError::from(StateError::NoSuchUser("bob".into())).error_code(),
            "state"
        );
    }

    #[test]
    fn test_state_error_messages() {
        let err = StateError::NotOnChannel {
            nick: "bob".into(),
            channel: "#rust".into(),
        };
        assert_eq!(err.to_string(), "bob is not on #rust");
        assert_eq!(
            HandlerError::from(err).to_string(),
            "bob is not on #rust"
        );
    }
}
