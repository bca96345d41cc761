//! Server-link dialects.
//!
//! A dialect is a [`Protocol`] implementation: a static capability
//! descriptor ([`Ircd`]), its mode tables, the inbound command set it
//! registers, and one outbound builder per abstract action. The services
//! core only ever talks to `&dyn Protocol`.

pub mod ngircd;

use crate::handlers::Registry;
use crate::modes::{ChannelModes, ModeTables};
use crate::services::ServicesHooks;
use crate::state::Session;
use crate::error::SendError;

pub use ngircd::Ngircd;

/// What a dialect supports, fixed for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ircd {
    pub name: &'static str,
    /// Prefix for network-wide message masks (`$*.org`).
    pub tld_prefix: &'static str,
    pub uses_uid: bool,
    pub uses_rcommand: bool,
    pub uses_owner: bool,
    pub uses_protect: bool,
    pub uses_halfops: bool,
    pub uses_p10: bool,
    pub uses_vhost: bool,
    /// Channel modes only opers may set.
    pub oper_only_modes: ChannelModes,
    /// Channel modes that keep an empty channel alive.
    pub perm_mode: ChannelModes,
    pub oper_immune_mode: ChannelModes,
    /// Channel modes that carry a mask list.
    pub ban_like_modes: &'static str,
    pub except_mchar: Option<char>,
    pub invex_mchar: Option<char>,
}

impl Ircd {
    pub fn is_ban_like(&self, c: char) -> bool {
        self.ban_like_modes.contains(c)
    }
}

/// Outbound translator and command set for one wire dialect.
///
/// Every builder takes the session so it can consult the entity store and
/// hand lines to the sink. Builders that name an entity the store does not
/// know log at debug and send nothing.
pub trait Protocol {
    fn ircd(&self) -> &'static Ircd;

    fn mode_tables(&self) -> &'static ModeTables;

    /// Add this dialect's inbound commands to `registry`.
    fn register_commands(&self, registry: &mut Registry);

    /// Handshake with the uplink. A failed first line is returned as is.
    fn server_login(
        &self,
        session: &mut Session,
        hooks: &mut dyn ServicesHooks,
    ) -> Result<(), SendError>;

    /// Announce an internal client already present in the store.
    fn introduce_nick(&self, session: &mut Session, nick: &str);

    fn invite_sts(&self, session: &mut Session, sender: &str, target: &str, channel: &str);

    fn quit_sts(&self, session: &mut Session, nick: &str, reason: &str);

    fn wallops_sts(&self, session: &mut Session, text: &str);

    fn join_sts(&self, session: &mut Session, channel: &str, nick: &str, is_new: bool, modes: &str);

    /// Kick `target` and drop the membership locally.
    fn kick(&self, session: &mut Session, source: &str, channel: &str, target: &str, reason: &str);

    fn msg(&self, session: &mut Session, from: &str, target: &str, text: &str);

    fn msg_global_sts(&self, session: &mut Session, from: Option<&str>, mask: &str, text: &str);

    fn notice_user_sts(&self, session: &mut Session, from: Option<&str>, target: &str, text: &str);

    fn notice_global_sts(&self, session: &mut Session, from: Option<&str>, mask: &str, text: &str);

    fn notice_channel_sts(
        &self,
        session: &mut Session,
        from: Option<&str>,
        channel: &str,
        text: &str,
    );

    /// Numeric reply; `text` is sent as given, colon included.
    fn numeric_sts(&self, session: &mut Session, from: &str, numeric: u16, target: &str, text: &str);

    /// Kill `id`; `killer` is an internal client, `None` for the server itself.
    fn kill_id_sts(&self, session: &mut Session, killer: Option<&str>, id: &str, reason: &str);

    fn part_sts(&self, session: &mut Session, channel: &str, nick: &str);

    fn kline_sts(
        &self,
        session: &mut Session,
        server: &str,
        user: &str,
        host: &str,
        duration: u64,
        reason: &str,
    );

    fn unkline_sts(&self, session: &mut Session, server: &str, user: &str, host: &str);

    fn topic_sts(
        &self,
        session: &mut Session,
        channel: &str,
        source: &str,
        setter: &str,
        topic: &str,
    );

    fn mode_sts(
        &self,
        session: &mut Session,
        sender: Option<&str>,
        target: Option<&str>,
        modes: Option<&str>,
    );

    fn ping_sts(&self, session: &mut Session);

    fn on_login(&self, session: &mut Session, hooks: &dyn ServicesHooks, nick: &str, account: &str);

    /// Returns whether the user was killed.
    fn on_logout(&self, session: &mut Session, nick: &str, account: &str) -> bool;

    /// Replace `server` with a placeholder we own.
    fn jupe(&self, session: &mut Session, server: &str, reason: &str);

    /// A nick was grouped to an account by `actor`.
    fn nick_group(
        &self,
        session: &mut Session,
        hooks: &dyn ServicesHooks,
        actor: Option<&str>,
        nick: &str,
    );

    /// A nick was dropped from an account by `actor`.
    fn nick_ungroup(&self, session: &mut Session, actor: Option<&str>, nick: &str);
}

/// Resolve a dialect by its configuration name.
pub fn find(name: &str) -> Option<Box<dyn Protocol>> {
    match name.to_ascii_lowercase().as_str() {
        "ngircd" => Some(Box::new(Ngircd)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_ngircd_by_name() {
        let proto = find("ngIRCd").map(|p| p.ircd().name);
        assert_eq!(proto, Some("ngIRCd"));
        assert!(find("inspircd").is_none());
    }
}
