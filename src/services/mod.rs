//! The seam towards the services core.
//!
//! The link layer never decides policy. It reports what happened through
//! [`ServicesHooks`] and offers a few composite actions (service joins,
//! reintroduction after a kill) that several handlers need.

mod pseudo;

pub use pseudo::PseudoClients;

use ngircd_proto::irc_to_lower;
use tracing::debug;

use crate::handlers::Source;
use crate::modes::StatusModes;
use crate::protocol::Protocol;
use crate::state::{Channel, Server, Session, User};

/// Informational requests forwarded to the services core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoQuery {
    Stats(char),
    Admin,
    Version,
    Info,
    Whois(String),
    Trace {
        target: String,
        dest: Option<String>,
    },
    Motd,
}

/// A PRIVMSG or NOTICE addressed to something on our side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage<'a> {
    pub source: &'a Source,
    pub target: &'a str,
    pub text: &'a str,
    pub notice: bool,
}

/// Callbacks into the services core. Every method has a do-nothing default.
pub trait ServicesHooks {
    /// Link handshake sent; introduce service clients here.
    fn services_init(&mut self, _protocol: &dyn Protocol, _session: &mut Session) {}

    /// A channel was just created; enforce any mode lock.
    fn check_mode_lock(&mut self, _protocol: &dyn Protocol, _session: &mut Session, _channel: &str) {}

    /// Modes a service sets when it creates `channel` by joining.
    fn mode_lock_string(&self, _channel: &str) -> String {
        "+".to_string()
    }

    fn handle_message(
        &mut self,
        _protocol: &dyn Protocol,
        _session: &mut Session,
        _msg: &IncomingMessage<'_>,
    ) {
    }

    fn handle_topic(&mut self, _channel: &Channel) {}

    /// A user appeared or changed nick.
    fn handle_nickchange(&mut self, _user: &User) {}

    fn handle_query(
        &mut self,
        _protocol: &dyn Protocol,
        _session: &mut Session,
        _nick: &str,
        _query: &InfoQuery,
    ) {
    }

    fn handle_away(&mut self, _user: &User, _message: Option<&str>) {}

    /// Whether `user` should carry the registered-nick mode.
    fn should_reg_umode(&self, _user: &User) -> bool {
        false
    }

    fn is_internal_client(&self, _nick: &str) -> bool {
        false
    }

    /// `server` finished its burst.
    fn handle_eob(&mut self, _server: &Server) {}
}

/// Join service client `nick` to `channel`, creating the channel if needed.
///
/// Does nothing if the client is unknown or already on the channel.
pub fn join(
    protocol: &dyn Protocol,
    session: &mut Session,
    hooks: &dyn ServicesHooks,
    channel: &str,
    nick: &str,
) {
    if session.network.user(nick).is_none() {
        debug!(channel = %channel, nick = %nick, "Join for unknown client");
        return;
    }
    if session.network.is_member(channel, nick) {
        return;
    }

    let is_new = session.network.channel(channel).is_none();
    if is_new {
        let now = session.now();
        if let Err(e) = session.network.add_channel(channel, now) {
            debug!(channel = %channel, error = %e, "Not joining");
            return;
        }
    }
    if let Err(e) = session.network.add_member(channel, nick, StatusModes::OP) {
        debug!(channel = %channel, nick = %nick, error = %e, "Join failed");
        return;
    }

    let modes = if is_new {
        hooks.mode_lock_string(channel)
    } else {
        "+".to_string()
    };
    protocol.join_sts(session, channel, nick, is_new, &modes);
}

/// Part service client `nick` from `channel`.
pub fn part(protocol: &dyn Protocol, session: &mut Session, channel: &str, nick: &str) {
    if let Err(e) = session.network.remove_member(channel, nick) {
        debug!(channel = %channel, nick = %nick, error = %e, "Part for non-member");
        return;
    }
    protocol.part_sts(session, channel, nick);
}

/// Bring back a killed service client and its channels.
pub fn reintroduce(protocol: &dyn Protocol, session: &mut Session, nick: &str) {
    let Some(user) = session.network.user(nick) else {
        return;
    };
    let channels: Vec<String> = user.channels.iter().cloned().collect();
    protocol.introduce_nick(session, nick);

    for key in channels {
        let Some(channel) = session.network.channel(&key) else {
            continue;
        };
        let name = channel.name.clone();
        let modes = protocol.mode_tables().channel_mode_string(channel.modes);
        protocol.join_sts(session, &name, nick, false, &modes);
    }
}

/// Canonical names of `nick`'s channels, sorted.
pub fn channels_of(session: &Session, nick: &str) -> Vec<String> {
    let Some(user) = session.network.user(nick) else {
        return Vec::new();
    };
    let mut names: Vec<String> = user
        .channels
        .iter()
        .filter_map(|key| session.network.channel(key).map(|c| c.name.clone()))
        .collect();
    names.sort_by_key(|n| irc_to_lower(n));
    names
}
