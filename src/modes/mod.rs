//! Abstract mode flags and their wire translation tables.
//!
//! The services core reasons about channel, membership and user modes as
//! flag sets. Each dialect supplies a [`ModeTables`] that maps the subset it
//! supports onto wire letters; anything outside the table simply has no wire
//! form.

mod apply;
mod table;

pub use apply::{ModeChange, apply_channel_modes, apply_user_modes};
pub use table::{ModeTable, ModeTables};

use bitflags::bitflags;

bitflags! {
    /// Simple (argument-less) channel modes. Key and limit live on the channel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ChannelModes: u32 {
        const INVITE = 1 << 0;
        const MODERATED = 1 << 1;
        const NO_EXTERNAL = 1 << 2;
        const PRIVATE = 1 << 3;
        const SECRET = 1 << 4;
        const TOPIC = 1 << 5;
        const OPER_ONLY = 1 << 6;
        const REG_ONLY = 1 << 7;
        const CHAN_REG = 1 << 8;
        const PERMANENT = 1 << 9;
        const NO_COLOR = 1 << 10;
    }
}

bitflags! {
    /// Per-member channel status.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StatusModes: u8 {
        const OWNER = 1 << 0;
        const PROTECT = 1 << 1;
        const OP = 1 << 2;
        const HALFOP = 1 << 3;
        const VOICE = 1 << 4;
    }
}

bitflags! {
    /// User modes the services core tracks.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct UserModes: u8 {
        const AWAY = 1 << 0;
        const INVISIBLE = 1 << 1;
        const OPER = 1 << 2;
        const REGISTERED = 1 << 3;
        const SERVICE = 1 << 4;
    }
}

/// Direction of a mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Add,
    Remove,
}
