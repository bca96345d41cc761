//! Letter <-> flag translation tables.

use bitflags::Flags;

use super::{ChannelModes, StatusModes, UserModes};

/// An ordered list of `(wire letter, flag)` pairs.
///
/// Lookups are linear; tables are a dozen entries at most.
#[derive(Debug, Clone, Copy)]
pub struct ModeTable<F: 'static> {
    entries: &'static [(char, F)],
}

impl<F> ModeTable<F>
where
    F: Flags + Copy + PartialEq + 'static,
{
    pub const fn new(entries: &'static [(char, F)]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [(char, F)] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The wire letter for exactly `flag`, if the dialect has one.
    pub fn char_for(&self, flag: F) -> Option<char> {
        self.entries
            .iter()
            .find(|(_, f)| *f == flag)
            .map(|(c, _)| *c)
    }

    /// The flag behind wire letter `c`, if any.
    pub fn flag_for(&self, c: char) -> Option<F> {
        self.entries
            .iter()
            .find(|(letter, _)| *letter == c)
            .map(|(_, f)| *f)
    }

    /// Letters for every table entry contained in `flags`, in table order.
    ///
    /// Flags without an entry are dropped.
    pub fn encode(&self, flags: F) -> String {
        self.entries
            .iter()
            .filter(|(_, f)| flags.contains(*f))
            .map(|(c, _)| *c)
            .collect()
    }

    /// Union of the flags for every known letter in `letters`.
    ///
    /// Unknown letters (and `+`/`-` signs) are skipped.
    pub fn decode(&self, letters: &str) -> F {
        letters
            .chars()
            .filter_map(|c| self.flag_for(c))
            .fold(F::empty(), |acc, f| acc.union(f))
    }
}

/// The four tables a dialect publishes.
#[derive(Debug, Clone, Copy)]
pub struct ModeTables {
    /// Simple channel modes.
    pub channel: ModeTable<ChannelModes>,
    /// Membership status letters used in MODE (`o`, `v`).
    pub status: ModeTable<StatusModes>,
    /// Membership prefix characters used in NJOIN (`@`, `+`).
    pub prefix: ModeTable<StatusModes>,
    /// User modes.
    pub user: ModeTable<UserModes>,
}

impl ModeTables {
    /// `+` followed by the channel letters for `modes`.
    pub fn channel_mode_string(&self, modes: ChannelModes) -> String {
        format!("+{}", self.channel.encode(modes))
    }

    /// `+` followed by the user letters for `modes`.
    pub fn user_mode_string(&self, modes: UserModes) -> String {
        format!("+{}", self.user.encode(modes))
    }

    /// Split a leading run of prefix characters (`@+alice`) from a nick.
    pub fn strip_prefixes<'a>(&self, token: &'a str) -> (StatusModes, &'a str) {
        let mut status = StatusModes::empty();
        let mut rest = token;
        while let Some(c) = rest.chars().next() {
            match self.prefix.flag_for(c) {
                Some(flag) => {
                    status |= flag;
                    rest = &rest[c.len_utf8()..];
                }
                None => break,
            }
        }
        (status, rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static CHANNEL: &[(char, ChannelModes)] = &[
        ('n', ChannelModes::NO_EXTERNAL),
        ('t', ChannelModes::TOPIC),
        ('s', ChannelModes::SECRET),
    ];
    static PREFIX: &[(char, StatusModes)] = &[('@', StatusModes::OP), ('+', StatusModes::VOICE)];
    static STATUS: &[(char, StatusModes)] = &[('o', StatusModes::OP), ('v', StatusModes::VOICE)];
    static USER: &[(char, UserModes)] = &[('i', UserModes::INVISIBLE)];

    fn tables() -> ModeTables {
        ModeTables {
            channel: ModeTable::new(CHANNEL),
            status: ModeTable::new(STATUS),
            prefix: ModeTable::new(PREFIX),
            user: ModeTable::new(USER),
        }
    }

    #[test]
    fn encode_follows_table_order_and_drops_unknown_flags() {
        let table = ModeTable::new(CHANNEL);
        let flags = ChannelModes::SECRET | ChannelModes::NO_EXTERNAL | ChannelModes::NO_COLOR;
        assert_eq!(table.encode(flags), "ns");
    }

    #[test]
    fn decode_skips_unknown_letters() {
        let table = ModeTable::new(CHANNEL);
        assert_eq!(
            table.decode("+nXzt"),
            ChannelModes::NO_EXTERNAL | ChannelModes::TOPIC
        );
        assert_eq!(table.decode(""), ChannelModes::empty());
    }

    #[test]
    fn char_lookup_is_exact() {
        let table = ModeTable::new(CHANNEL);
        assert_eq!(table.char_for(ChannelModes::TOPIC), Some('t'));
        assert_eq!(table.char_for(ChannelModes::TOPIC | ChannelModes::SECRET), None);
        assert_eq!(table.flag_for('q'), None);
    }

    #[test]
    fn strips_member_prefixes() {
        let t = tables();
        assert_eq!(t.strip_prefixes("@+alice"), (StatusModes::OP | StatusModes::VOICE, "alice"));
        assert_eq!(t.strip_prefixes("bob"), (StatusModes::empty(), "bob"));
        assert_eq!(t.strip_prefixes("%carol"), (StatusModes::empty(), "%carol"));
    }

    #[test]
    fn mode_strings_carry_plus() {
        let t = tables();
        assert_eq!(t.channel_mode_string(ChannelModes::empty()), "+");
        assert_eq!(t.user_mode_string(UserModes::INVISIBLE | UserModes::OPER), "+i");
    }
}
