//! RFC 1459 case mapping.
//!
//! ngIRCd folds nicknames and channel names with the `rfc1459` mapping, so
//! `[]\~` are the uppercase forms of `{}|^`. Every key the adapter stores for
//! a nick or channel goes through [`irc_to_lower`].

/// Fold a single character to its RFC 1459 lowercase form.
#[inline]
pub const fn irc_lower_char(c: char) -> char {
    match c {
        'A'..='Z' => (c as u8 + 32) as char,
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        _ => c,
    }
}

/// Fold a whole string, producing the lookup key for a nick or channel.
pub fn irc_to_lower(s: &str) -> String {
    s.chars().map(irc_lower_char).collect()
}

/// Case-insensitive comparison under RFC 1459 rules.
///
/// `irc_eq("Alice", "aLICE")` is true, so a rename between those two forms
/// is only a capitalization change.
pub fn irc_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a.chars()
            .zip(b.chars())
            .all(|(x, y)| irc_lower_char(x) == irc_lower_char(y))
}
