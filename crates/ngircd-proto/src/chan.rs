//! Channel name helpers.

/// The sigil of the only channel namespace services track on ngIRCd.
pub const CHANNEL_SIGIL: char = '#';

/// Channel name checks for `&str` and `String`.
pub trait ChannelExt {
    /// True for any IRC channel prefix (`#`, `&`, `+`, `!`) followed by
    /// characters that are legal in a channel name.
    fn is_channel_name(&self) -> bool;

    /// True only for network-wide `#` channels.
    fn is_global_channel(&self) -> bool;
}

impl ChannelExt for str {
    fn is_channel_name(&self) -> bool {
        let mut chars = self.chars();
        if !matches!(chars.next(), Some('#' | '&' | '+' | '!')) {
            return false;
        }
        chars.all(|c| c != ' ' && c != ',' && c != '\x07' && !c.is_control())
    }

    fn is_global_channel(&self) -> bool {
        self.starts_with(CHANNEL_SIGIL) && self.is_channel_name()
    }
}

impl ChannelExt for String {
    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }

    fn is_global_channel(&self) -> bool {
        self.as_str().is_global_channel()
    }
}
