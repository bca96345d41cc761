//! In-memory view of the network behind the uplink.
//!
//! Every map is keyed by the RFC 1459 case-folded name, so lookups accept any
//! casing the wire sends.

use std::collections::HashMap;

use ngircd_proto::{ChannelExt, irc_to_lower};
use tracing::debug;

use super::{Channel, Server, User};
use crate::error::StateError;
use crate::modes::{ChannelModes, StatusModes};

/// Everything removed by a server split.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Split {
    pub servers: Vec<String>,
    pub users: Vec<String>,
}

/// Users, channels and servers, plus memberships between users and channels.
#[derive(Debug, Default)]
pub struct Network {
    users: HashMap<String, User>,
    channels: HashMap<String, Channel>,
    servers: HashMap<String, Server>,
    /// Modes that keep an empty channel alive.
    permanent: ChannelModes,
}

impl Network {
    pub fn new(permanent: ChannelModes) -> Self {
        Self {
            permanent,
            ..Self::default()
        }
    }

    pub fn set_permanent_modes(&mut self, permanent: ChannelModes) {
        self.permanent = permanent;
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.users.clear();
        self.channels.clear();
        self.servers.clear();
    }

    // ------------------------------------------------------------------
    // Servers
    // ------------------------------------------------------------------

    pub fn server(&self, name: &str) -> Option<&Server> {
        self.servers.get(&irc_to_lower(name))
    }

    pub fn server_mut(&mut self, name: &str) -> Option<&mut Server> {
        self.servers.get_mut(&irc_to_lower(name))
    }

    pub fn servers(&self) -> impl Iterator<Item = &Server> {
        self.servers.values()
    }

    pub fn add_server(&mut self, server: Server) -> Result<&mut Server, StateError> {
        let key = irc_to_lower(&server.name);
        if self.servers.contains_key(&key) {
            return Err(StateError::ServerExists(server.name));
        }
        Ok(self.servers.entry(key).or_insert(server))
    }

    /// Remove `name`, every server introduced behind it, and their users.
    pub fn delete_server(&mut self, name: &str) -> Result<Split, StateError> {
        let root = irc_to_lower(name);
        if !self.servers.contains_key(&root) {
            return Err(StateError::NoSuchServer(name.to_string()));
        }

        let mut doomed = vec![root];
        let mut i = 0;
        while i < doomed.len() {
            let parent = doomed[i].clone();
            doomed.extend(
                self.servers
                    .iter()
                    .filter(|(_, s)| {
                        s.uplink
                            .as_deref()
                            .is_some_and(|up| irc_to_lower(up) == parent)
                    })
                    .map(|(key, _)| key.clone()),
            );
            i += 1;
        }

        let mut split = Split::default();
        for key in &doomed {
            if let Some(server) = self.servers.remove(key) {
                split.servers.push(server.name);
            }
        }

        let victims: Vec<String> = self
            .users
            .values()
            .filter(|u| doomed.contains(&irc_to_lower(&u.server)))
            .map(|u| u.nick.clone())
            .collect();
        for nick in victims {
            if let Some(user) = self.delete_user(&nick) {
                split.users.push(user.nick);
            }
        }

        Ok(split)
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub fn user(&self, nick: &str) -> Option<&User> {
        self.users.get(&irc_to_lower(nick))
    }

    pub fn user_mut(&mut self, nick: &str) -> Option<&mut User> {
        self.users.get_mut(&irc_to_lower(nick))
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn add_user(&mut self, user: User) -> Result<&mut User, StateError> {
        let key = irc_to_lower(&user.nick);
        if self.users.contains_key(&key) {
            return Err(StateError::NicknameInUse(user.nick));
        }
        Ok(self.users.entry(key).or_insert(user))
    }

    /// Rename `old` to `new`, carrying memberships along.
    ///
    /// A case-only change is always allowed; anything else fails if `new`
    /// belongs to a different user.
    pub fn change_nick(&mut self, old: &str, new: &str, ts: i64) -> Result<(), StateError> {
        let old_key = irc_to_lower(old);
        let new_key = irc_to_lower(new);
        if old_key != new_key && self.users.contains_key(&new_key) {
            return Err(StateError::NicknameInUse(new.to_string()));
        }
        let mut user = self
            .users
            .remove(&old_key)
            .ok_or_else(|| StateError::NoSuchUser(old.to_string()))?;

        for chan_key in &user.channels {
            if let Some(channel) = self.channels.get_mut(chan_key) {
                channel.rename_member(old, new);
            }
        }
        user.nick = new.to_string();
        user.ts = ts;
        self.users.insert(new_key, user);
        Ok(())
    }

    /// Remove a user and all of their memberships.
    pub fn delete_user(&mut self, nick: &str) -> Option<User> {
        let user = self.users.remove(&irc_to_lower(nick))?;
        for chan_key in &user.channels {
            let emptied = match self.channels.get_mut(chan_key) {
                Some(channel) => {
                    channel.remove_member(&user.nick);
                    disposable(channel, self.permanent)
                }
                None => false,
            };
            if emptied {
                self.channels.remove(chan_key);
            }
        }
        Some(user)
    }

    // ------------------------------------------------------------------
    // Channels
    // ------------------------------------------------------------------

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(&irc_to_lower(name))
    }

    pub fn channel_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.channels.get_mut(&irc_to_lower(name))
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    /// Find or create a channel. Non-`#` names are not tracked.
    pub fn add_channel(&mut self, name: &str, ts: i64) -> Result<&mut Channel, StateError> {
        if !name.is_global_channel() {
            return Err(StateError::UntrackedChannel(name.to_string()));
        }
        Ok(self
            .channels
            .entry(irc_to_lower(name))
            .or_insert_with(|| Channel::new(name, ts)))
    }

    /// Remove a channel and every membership in it.
    pub fn delete_channel(&mut self, name: &str) -> Option<Channel> {
        let key = irc_to_lower(name);
        let channel = self.channels.remove(&key)?;
        for member in channel.members() {
            if let Some(user) = self.users.get_mut(&irc_to_lower(&member.nick)) {
                user.channels.remove(&key);
            }
        }
        Some(channel)
    }

    /// Drop the channel if it is empty and not permanent. Returns whether it went.
    pub fn delete_if_empty(&mut self, name: &str) -> bool {
        let key = irc_to_lower(name);
        let gone = self
            .channels
            .get(&key)
            .is_some_and(|c| disposable(c, self.permanent));
        if gone {
            debug!(channel = %name, "Removing empty channel");
            self.channels.remove(&key);
        }
        gone
    }

    // ------------------------------------------------------------------
    // Memberships
    // ------------------------------------------------------------------

    /// Put `nick` on `channel` with `status`. Both must exist.
    ///
    /// Returns `true` for a new membership, `false` when status was merged
    /// into an existing one.
    pub fn add_member(
        &mut self,
        channel: &str,
        nick: &str,
        status: StatusModes,
    ) -> Result<bool, StateError> {
        let chan_key = irc_to_lower(channel);
        let user = self
            .users
            .get_mut(&irc_to_lower(nick))
            .ok_or_else(|| StateError::NoSuchUser(nick.to_string()))?;
        let chan = self
            .channels
            .get_mut(&chan_key)
            .ok_or_else(|| StateError::NoSuchChannel(channel.to_string()))?;
        user.channels.insert(chan_key);
        Ok(chan.insert_member(&user.nick, status))
    }

    /// Take `nick` off `channel`, deleting the channel if that emptied it.
    ///
    /// Returns `true` if the channel was deleted.
    pub fn remove_member(&mut self, channel: &str, nick: &str) -> Result<bool, StateError> {
        let chan_key = irc_to_lower(channel);
        let chan = self
            .channels
            .get_mut(&chan_key)
            .ok_or_else(|| StateError::NoSuchChannel(channel.to_string()))?;
        if chan.remove_member(nick).is_none() {
            return Err(StateError::NotOnChannel {
                nick: nick.to_string(),
                channel: channel.to_string(),
            });
        }
        if let Some(user) = self.users.get_mut(&irc_to_lower(nick)) {
            user.channels.remove(&chan_key);
        }
        Ok(self.delete_if_empty(channel))
    }

    pub fn is_member(&self, channel: &str, nick: &str) -> bool {
        self.channel(channel).is_some_and(|c| c.is_member(nick))
    }
}

fn disposable(channel: &Channel, permanent: ChannelModes) -> bool {
    channel.member_count() == 0 && !channel.modes.intersects(permanent)
}
