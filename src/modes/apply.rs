//! Applying wire mode strings to channels and users.

use tracing::debug;

use super::{Direction, ModeTables};
use crate::protocol::Ircd;
use crate::state::{Channel, User};

const KEY: char = 'k';
const LIMIT: char = 'l';

/// One applied mode letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeChange {
    pub direction: Direction,
    pub letter: char,
    pub arg: Option<String>,
}

impl ModeChange {
    fn new(direction: Direction, letter: char, arg: Option<&str>) -> Self {
        Self {
            direction,
            letter,
            arg: arg.map(str::to_string),
        }
    }
}

/// Apply `parts` (`["+ov-b", "alice", "bob", "*!*@x"]`) to `channel`.
///
/// Letters the dialect does not know, letters missing their argument, and
/// status changes for non-members are skipped; the rest of the string is
/// still applied.
pub fn apply_channel_modes<S: AsRef<str>>(
    channel: &mut Channel,
    tables: &ModeTables,
    ircd: &Ircd,
    parts: &[S],
) -> Vec<ModeChange> {
    let Some((modes, params)) = parts.split_first() else {
        return Vec::new();
    };
    let mut params = params.iter().map(AsRef::as_ref);
    let mut direction = Direction::Add;
    let mut applied = Vec::new();

    for letter in modes.as_ref().chars() {
        match letter {
            '+' => direction = Direction::Add,
            '-' => direction = Direction::Remove,
            _ if tables.status.flag_for(letter).is_some() => {
                let Some(nick) = params.next() else {
                    debug!(channel = %channel.name, mode = %letter, "Status mode without a nick");
                    continue;
                };
                let Some(flag) = tables.status.flag_for(letter) else {
                    continue;
                };
                match channel.member_mut(nick) {
                    Some(member) => {
                        member.status.set(flag, direction == Direction::Add);
                        applied.push(ModeChange::new(direction, letter, Some(nick)));
                    }
                    None => {
                        debug!(channel = %channel.name, nick = %nick, "Status mode for non-member");
                    }
                }
            }
            _ if ircd.is_ban_like(letter) => {
                let Some(mask) = params.next() else {
                    debug!(channel = %channel.name, mode = %letter, "List mode without a mask");
                    continue;
                };
                let changed = match direction {
                    Direction::Add => channel.add_list_entry(letter, mask),
                    Direction::Remove => channel.remove_list_entry(letter, mask),
                };
                if changed {
                    applied.push(ModeChange::new(direction, letter, Some(mask)));
                }
            }
            KEY => match direction {
                Direction::Add => {
                    let Some(key) = params.next() else {
                        debug!(channel = %channel.name, "+k without a key");
                        continue;
                    };
                    channel.key = Some(key.to_string());
                    applied.push(ModeChange::new(direction, letter, Some(key)));
                }
                Direction::Remove => {
                    // ngIRCd echoes the old key on removal.
                    let key = params.next();
                    channel.key = None;
                    applied.push(ModeChange::new(direction, letter, key));
                }
            },
            LIMIT => match direction {
                Direction::Add => {
                    let Some(raw) = params.next() else {
                        debug!(channel = %channel.name, "+l without a limit");
                        continue;
                    };
                    match raw.parse::<u32>() {
                        Ok(limit) if limit > 0 => {
                            channel.limit = Some(limit);
                            applied.push(ModeChange::new(direction, letter, Some(raw)));
                        }
                        _ => debug!(channel = %channel.name, limit = %raw, "Ignoring bad +l"),
                    }
                }
                Direction::Remove => {
                    channel.limit = None;
                    applied.push(ModeChange::new(direction, letter, None));
                }
            },
            _ => match tables.channel.flag_for(letter) {
                Some(flag) => {
                    channel.modes.set(flag, direction == Direction::Add);
                    applied.push(ModeChange::new(direction, letter, None));
                }
                None => {
                    debug!(channel = %channel.name, mode = %letter, "Unknown channel mode");
                }
            },
        }
    }

    applied
}

/// Apply a user mode string such as `+ai-o`.
pub fn apply_user_modes(user: &mut User, tables: &ModeTables, modes: &str) -> Vec<ModeChange> {
    let mut direction = Direction::Add;
    let mut applied = Vec::new();

    for letter in modes.chars() {
        match letter {
            '+' => direction = Direction::Add,
            '-' => direction = Direction::Remove,
            _ => match tables.user.flag_for(letter) {
                Some(flag) => {
                    user.modes.set(flag, direction == Direction::Add);
                    applied.push(ModeChange::new(direction, letter, None));
                }
                None => debug!(nick = %user.nick, mode = %letter, "Unknown user mode"),
            },
        }
    }

    applied
}
