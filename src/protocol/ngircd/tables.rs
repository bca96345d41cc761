//! ngIRCd capability descriptor and mode tables.

use crate::modes::{ChannelModes, ModeTable, ModeTables, StatusModes, UserModes};
use crate::protocol::Ircd;

pub static NGIRCD: Ircd = Ircd {
    name: "ngIRCd",
    tld_prefix: "$",
    uses_uid: false,
    uses_rcommand: false,
    uses_owner: false,
    uses_protect: false,
    uses_halfops: false,
    uses_p10: false,
    uses_vhost: false,
    oper_only_modes: ChannelModes::OPER_ONLY.union(ChannelModes::PERMANENT),
    perm_mode: ChannelModes::PERMANENT,
    oper_immune_mode: ChannelModes::empty(),
    ban_like_modes: "beI",
    except_mchar: Some('e'),
    invex_mchar: Some('I'),
};

static CHANNEL_MODES: &[(char, ChannelModes)] = &[
    ('i', ChannelModes::INVITE),
    ('m', ChannelModes::MODERATED),
    ('n', ChannelModes::NO_EXTERNAL),
    ('p', ChannelModes::PRIVATE),
    ('s', ChannelModes::SECRET),
    ('t', ChannelModes::TOPIC),
    ('O', ChannelModes::OPER_ONLY),
    ('R', ChannelModes::REG_ONLY),
    ('r', ChannelModes::CHAN_REG),
    ('P', ChannelModes::PERMANENT),
];

static STATUS_MODES: &[(char, StatusModes)] = &[('o', StatusModes::OP), ('v', StatusModes::VOICE)];

static PREFIX_MODES: &[(char, StatusModes)] = &[('@', StatusModes::OP), ('+', StatusModes::VOICE)];

static USER_MODES: &[(char, UserModes)] = &[
    ('a', UserModes::AWAY),
    ('i', UserModes::INVISIBLE),
    ('o', UserModes::OPER),
];

pub static MODE_TABLES: ModeTables = ModeTables {
    channel: ModeTable::new(CHANNEL_MODES),
    status: ModeTable::new(STATUS_MODES),
    prefix: ModeTable::new(PREFIX_MODES),
    user: ModeTable::new(USER_MODES),
};
