//! Channel-related types and state.

use std::collections::{BTreeMap, HashMap};

use ngircd_proto::irc_to_lower;

use crate::modes::{ChannelModes, StatusModes};

/// Channel topic with metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub text: String,
    pub set_by: String,
    pub set_at: i64,
}

/// One user's presence on a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub nick: String,
    pub status: StatusModes,
}

impl Member {
    pub fn is_op(&self) -> bool {
        self.status.contains(StatusModes::OP)
    }
}

/// A `#` channel as seen by services.
#[derive(Debug, Clone)]
pub struct Channel {
    pub name: String,
    /// Creation timestamp; authoritative for merge conflicts.
    pub ts: i64,
    pub modes: ChannelModes,
    pub key: Option<String>,
    pub limit: Option<u32>,
    /// Ban-like lists keyed by mode letter (`b`, `e`, `I`).
    pub lists: BTreeMap<char, Vec<String>>,
    pub topic: Option<Topic>,
    /// Members keyed by case-folded nick.
    members: HashMap<String, Member>,
}

impl Channel {
    pub fn new(name: impl Into<String>, ts: i64) -> Self {
        Self {
            name: name.into(),
            ts,
            modes: ChannelModes::empty(),
            key: None,
            limit: None,
            lists: BTreeMap::new(),
            topic: None,
            members: HashMap::new(),
        }
    }

    pub fn member(&self, nick: &str) -> Option<&Member> {
        self.members.get(&irc_to_lower(nick))
    }

    pub fn member_mut(&mut self, nick: &str) -> Option<&mut Member> {
        self.members.get_mut(&irc_to_lower(nick))
    }

    pub fn is_member(&self, nick: &str) -> bool {
        self.members.contains_key(&irc_to_lower(nick))
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Add `nick` with `status`, merging status into an existing membership.
    ///
    /// Returns `true` when the nick was not a member before.
    pub(crate) fn insert_member(&mut self, nick: &str, status: StatusModes) -> bool {
        match self.members.get_mut(&irc_to_lower(nick)) {
            Some(existing) => {
                existing.status |= status;
                false
            }
            None => {
                self.members.insert(
                    irc_to_lower(nick),
                    Member {
                        nick: nick.to_string(),
                        status,
                    },
                );
                true
            }
        }
    }

    pub(crate) fn remove_member(&mut self, nick: &str) -> Option<Member> {
        self.members.remove(&irc_to_lower(nick))
    }

    /// Re-key a membership after a nick change.
    pub(crate) fn rename_member(&mut self, old: &str, new: &str) {
        if let Some(mut member) = self.members.remove(&irc_to_lower(old)) {
            member.nick = new.to_string();
            self.members.insert(irc_to_lower(new), member);
        }
    }

    pub fn set_topic(&mut self, text: &str, set_by: &str, set_at: i64) {
        if text.is_empty() {
            self.topic = None;
        } else {
            self.topic = Some(Topic {
                text: text.to_string(),
                set_by: set_by.to_string(),
                set_at,
            });
        }
    }

    /// Entries on the ban-like list for `letter`.
    pub fn list(&self, letter: char) -> &[String] {
        self.lists.get(&letter).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn add_list_entry(&mut self, letter: char, mask: &str) -> bool {
        let list = self.lists.entry(letter).or_default();
        if list.iter().any(|m| m.eq_ignore_ascii_case(mask)) {
            return false;
        }
        list.push(mask.to_string());
        true
    }

    pub(crate) fn remove_list_entry(&mut self, letter: char, mask: &str) -> bool {
        let Some(list) = self.lists.get_mut(&letter) else {
            return false;
        };
        let before = list.len();
        list.retain(|m| !m.eq_ignore_ascii_case(mask));
        let removed = list.len() != before;
        if list.is_empty() {
            self.lists.remove(&letter);
        }
        removed
    }
}
