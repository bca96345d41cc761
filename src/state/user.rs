//! User-related types and state.

use std::collections::HashSet;

use crate::modes::UserModes;

/// A user known to services, remote or internal.
#[derive(Debug, Clone)]
pub struct User {
    pub nick: String,
    pub user: String,
    pub host: String,
    pub gecos: String,
    /// Name of the server the user is attached to.
    pub server: String,
    /// Nick timestamp.
    pub ts: i64,
    pub modes: UserModes,
    /// Channels this user is in (case-folded names).
    pub channels: HashSet<String>,
    /// Account name if logged in to services.
    pub account: Option<String>,
}

impl User {
    pub fn new(
        nick: impl Into<String>,
        user: impl Into<String>,
        host: impl Into<String>,
        gecos: impl Into<String>,
        server: impl Into<String>,
        ts: i64,
    ) -> Self {
        Self {
            nick: nick.into(),
            user: user.into(),
            host: host.into(),
            gecos: gecos.into(),
            server: server.into(),
            ts,
            modes: UserModes::empty(),
            channels: HashSet::new(),
            account: None,
        }
    }

    pub fn with_modes(mut self, modes: UserModes) -> Self {
        self.modes = modes;
        self
    }

    pub fn is_away(&self) -> bool {
        self.modes.contains(UserModes::AWAY)
    }

    /// `nick!user@host`
    pub fn hostmask(&self) -> String {
        format!("{}!{}@{}", self.nick, self.user, self.host)
    }
}
