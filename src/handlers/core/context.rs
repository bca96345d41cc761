//! Command handler context and core types.
//!
//! Defines the [`Context`] passed to every handler and the [`Handler`] trait
//! itself. Handlers run to completion on the link's single task, so the
//! context hands out plain `&mut` access to the session.

use std::fmt;

use bitflags::bitflags;
use ngircd_proto::Message;

use crate::error::{HandlerError, HandlerResult};
use crate::protocol::Protocol;
use crate::services::ServicesHooks;
use crate::state::Session;

bitflags! {
    /// Classes of line source a command accepts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SourceKinds: u8 {
        /// The link has not sent SERVER yet.
        const UNREG = 1 << 0;
        const USER = 1 << 1;
        const SERVER = 1 << 2;
    }
}

/// Resolved origin of an inbound line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Unregistered,
    /// A known user, by canonical nick.
    User(String),
    /// A known server, by canonical name.
    Server(String),
}

impl Source {
    pub fn kind(&self) -> SourceKinds {
        match self {
            Self::Unregistered => SourceKinds::UNREG,
            Self::User(_) => SourceKinds::USER,
            Self::Server(_) => SourceKinds::SERVER,
        }
    }

    /// Nick or server name; `None` before registration.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Unregistered => None,
            Self::User(name) | Self::Server(name) => Some(name),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unregistered => f.write_str("<unregistered>"),
            Self::User(nick) => f.write_str(nick),
            Self::Server(name) => f.write_str(name),
        }
    }
}

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// Active dialect, for replies.
    pub protocol: &'a dyn Protocol,
    pub session: &'a mut Session,
    /// The services core.
    pub hooks: &'a mut dyn ServicesHooks,
    pub source: Source,
}

impl Context<'_> {
    /// Source nick, or `WrongSource` for servers and unregistered links.
    pub fn source_user(&self) -> Result<&str, HandlerError> {
        match &self.source {
            Source::User(nick) => Ok(nick),
            _ => Err(HandlerError::WrongSource("a non-user")),
        }
    }

    /// The server a line came from: the source itself, or the user's server.
    pub fn source_server(&self) -> Result<String, HandlerError> {
        match &self.source {
            Source::Server(name) => Ok(name.clone()),
            Source::User(nick) => self
                .session
                .network
                .user(nick)
                .map(|u| u.server.clone())
                .ok_or_else(|| HandlerError::NoSuchUser(nick.clone())),
            Source::Unregistered => Err(HandlerError::WrongSource("an unregistered link")),
        }
    }

    /// Creation TS for a channel first seen from `server`: now once the
    /// server has finished its burst, backdated otherwise.
    pub fn channel_ts(&self, server: &str) -> i64 {
        let now = self.session.now();
        let at_eob = self
            .session
            .network
            .server(server)
            .is_some_and(|s| s.eob);
        if at_eob { now } else { now - BURST_TS_BACKDATE }
    }
}

/// Seconds subtracted from channels created during a burst, so the
/// authoritative announcement that follows never looks newer.
pub const BURST_TS_BACKDATE: i64 = 601;

/// Inbound command handler.
pub trait Handler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult;
}

/// Argument `n` or `NeedMoreParams`.
pub fn arg(msg: &Message, n: usize) -> Result<&str, HandlerError> {
    msg.param(n).ok_or(HandlerError::NeedMoreParams)
}
