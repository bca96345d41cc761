//! ngIRCd server-link dialect.
//!
//! ngIRCd speaks RFC 2813 with a few extensions (NJOIN, CHANINFO, `+`
//! flags in PASS). It has no force-join, so any service that must act inside
//! a channel it is not in gets NJOINed first and PARTs right after.

pub mod lines;
mod tables;

pub use tables::{MODE_TABLES, NGIRCD};

use ngircd_proto::irc_eq;
use tracing::{debug, info};

use super::{Ircd, Protocol};
use crate::error::SendError;
use crate::handlers::{
    AdminHandler, AwayHandler, ChaninfoHandler, ErrorHandler, InfoHandler, JoinHandler,
    KickHandler, KillHandler, ModeHandler, MotdHandler, NickHandler, NjoinHandler, NoticeHandler,
    PartHandler, PassHandler, PingHandler, PongHandler, PrivmsgHandler, QuitHandler, Registry,
    ServerHandler, SourceKinds, SquitHandler, StatsHandler, TopicHandler, TraceHandler,
    VersionHandler, WhoisHandler,
};
use crate::modes::{ModeTables, UserModes};
use crate::services::ServicesHooks;
use crate::state::Session;

/// The ngIRCd dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ngircd;

/// `:<nickserv> MODE <nick> +R|-R`, mirrored onto the local user.
pub(crate) fn set_registered(session: &mut Session, nick: &str, registered: bool) {
    let sign = if registered { "+R" } else { "-R" };
    let nickserv = session.services.nickserv.clone();
    session.send(lines::mode(&nickserv, nick, sign));
    if let Some(user) = session.network.user_mut(nick) {
        user.modes.set(UserModes::REGISTERED, registered);
    }
}

impl Ngircd {
    /// Run `line` with `source` inside `channel`, joining and parting around
    /// it when `source` is not already a member.
    fn bracketed(
        &self,
        session: &mut Session,
        channel: &str,
        source: &str,
        line: ngircd_proto::Message,
        part_reason: String,
    ) {
        let joined = !session.network.is_member(channel, source);
        if joined {
            let me = session.me().to_string();
            session.send(lines::njoin(&me, channel, source));
        }
        session.send(line);
        if joined {
            session.send(lines::part(source, channel, Some(&part_reason)));
        }
    }

    fn global(
        &self,
        session: &mut Session,
        command: &str,
        from: Option<&str>,
        mask: &str,
        text: &str,
    ) {
        let from = from.unwrap_or(session.me()).to_string();
        let prefix = self.ircd().tld_prefix;
        let targets: Vec<String> = if mask == "*" {
            session
                .tlds
                .iter()
                .map(|tld| format!("{prefix}*{tld}"))
                .collect()
        } else {
            vec![format!("{prefix}{mask}")]
        };
        for target in targets {
            session.send(lines::text(command, &from, &target, text));
        }
    }
}

impl Protocol for Ngircd {
    fn ircd(&self) -> &'static Ircd {
        &NGIRCD
    }

    fn mode_tables(&self) -> &'static ModeTables {
        &MODE_TABLES
    }

    fn register_commands(&self, registry: &mut Registry) {
        let user = SourceKinds::USER;
        let server = SourceKinds::SERVER;
        let unreg = SourceKinds::UNREG;

        registry.register("PING", PingHandler, 1, user | server);
        registry.register("PONG", PongHandler, 1, server);
        registry.register("PRIVMSG", PrivmsgHandler, 2, user);
        registry.register("NOTICE", NoticeHandler, 2, unreg | user | server);
        registry.register("CHANINFO", ChaninfoHandler, 3, server);
        registry.register("NJOIN", NjoinHandler, 2, server);
        registry.register("PART", PartHandler, 1, user);
        registry.register("NICK", NickHandler, 2, user | server);
        registry.register("QUIT", QuitHandler, 1, user);
        registry.register("MODE", ModeHandler, 2, user | server);
        registry.register("KICK", KickHandler, 2, user | server);
        registry.register("KILL", KillHandler, 1, user | server);
        registry.register("SQUIT", SquitHandler, 1, user | server);
        registry.register("SERVER", ServerHandler, 3, unreg | server);
        registry.register("STATS", StatsHandler, 2, user);
        registry.register("ADMIN", AdminHandler, 1, user);
        registry.register("VERSION", VersionHandler, 1, user);
        registry.register("INFO", InfoHandler, 1, user);
        registry.register("WHOIS", WhoisHandler, 2, user);
        registry.register("TRACE", TraceHandler, 1, user);
        registry.register("AWAY", AwayHandler, 0, user);
        registry.register("JOIN", JoinHandler, 1, user);
        registry.register("PASS", PassHandler, 1, unreg);
        registry.register("ERROR", ErrorHandler, 1, unreg | server);
        registry.register("TOPIC", TopicHandler, 2, user | server);
        registry.register("MOTD", MotdHandler, 1, user);
    }

    fn server_login(
        &self,
        session: &mut Session,
        hooks: &mut dyn ServicesHooks,
    ) -> Result<(), SendError> {
        let pass = lines::pass(&session.link.send_password);
        session.try_send(pass)?;

        session.burst.begin();

        let me = session.me.clone();
        session.send(lines::server(&me.name, 1, &me.description));
        info!(server = %me.name, uplink = %session.link.name, "Sent link handshake");

        hooks.services_init(self, session);
        Ok(())
    }

    fn introduce_nick(&self, session: &mut Session, nick: &str) {
        let Some(user) = session.network.user(nick) else {
            debug!(nick = %nick, "introduce_nick for unknown user");
            return;
        };
        let line = lines::nick(
            session.me(),
            &user.nick,
            &user.user,
            &user.host,
            &session.me.numeric,
            &MODE_TABLES.user_mode_string(user.modes),
            &user.gecos,
        );
        session.send(line);
    }

    fn invite_sts(&self, session: &mut Session, sender: &str, target: &str, channel: &str) {
        let line = lines::invite(sender, target, channel);
        self.bracketed(session, channel, sender, line, format!("Invited {target}"));
    }

    fn quit_sts(&self, session: &mut Session, nick: &str, reason: &str) {
        session.send(lines::quit(nick, reason));
    }

    fn wallops_sts(&self, session: &mut Session, text: &str) {
        let line = lines::wallops(session.me(), text);
        session.send(line);
    }

    fn join_sts(&self, session: &mut Session, channel: &str, nick: &str, is_new: bool, modes: &str) {
        let me = session.me().to_string();
        session.send(lines::njoin(&me, channel, nick));
        if is_new && modes.chars().nth(1).is_some() {
            session.send(lines::mode(&me, channel, modes));
        }
    }

    fn kick(&self, session: &mut Session, source: &str, channel: &str, target: &str, reason: &str) {
        session.send(lines::kick(source, channel, target, reason));
        if let Err(e) = session.network.remove_member(channel, target) {
            debug!(channel = %channel, nick = %target, error = %e, "Kick target not tracked");
        }
    }

    fn msg(&self, session: &mut Session, from: &str, target: &str, text: &str) {
        session.send(lines::text("PRIVMSG", from, target, text));
    }

    fn msg_global_sts(&self, session: &mut Session, from: Option<&str>, mask: &str, text: &str) {
        self.global(session, "PRIVMSG", from, mask, text);
    }

    fn notice_user_sts(&self, session: &mut Session, from: Option<&str>, target: &str, text: &str) {
        let from = from.unwrap_or(session.me()).to_string();
        session.send(lines::text("NOTICE", &from, target, text));
    }

    fn notice_global_sts(&self, session: &mut Session, from: Option<&str>, mask: &str, text: &str) {
        self.global(session, "NOTICE", from, mask, text);
    }

    fn notice_channel_sts(
        &self,
        session: &mut Session,
        from: Option<&str>,
        channel: &str,
        text: &str,
    ) {
        let from = from.unwrap_or(session.me()).to_string();
        session.send(lines::text("NOTICE", &from, channel, text));
    }

    fn numeric_sts(&self, session: &mut Session, from: &str, numeric: u16, target: &str, text: &str) {
        match lines::numeric(from, numeric, target, text) {
            Ok(line) => session.send(line),
            Err(e) => debug!(numeric, target = %target, error = %e, "Unsendable numeric"),
        }
    }

    fn kill_id_sts(&self, session: &mut Session, killer: Option<&str>, id: &str, reason: &str) {
        let line = match killer {
            Some(killer) => {
                let host = session
                    .network
                    .user(killer)
                    .map_or_else(|| session.me().to_string(), |u| u.host.clone());
                lines::kill(killer, id, &format!("{host}!{killer} ({reason})"))
            }
            None => {
                let me = session.me();
                lines::kill(me, id, &format!("{me} ({reason})"))
            }
        };
        session.send(line);
    }

    fn part_sts(&self, session: &mut Session, channel: &str, nick: &str) {
        session.send(lines::part(nick, channel, None));
    }

    fn kline_sts(
        &self,
        _session: &mut Session,
        server: &str,
        user: &str,
        host: &str,
        duration: u64,
        _reason: &str,
    ) {
        debug!(server = %server, mask = %format!("{user}@{host}"), duration, "ngIRCd has no remote klines");
    }

    fn unkline_sts(&self, _session: &mut Session, server: &str, user: &str, host: &str) {
        debug!(server = %server, mask = %format!("{user}@{host}"), "ngIRCd has no remote klines");
    }

    fn topic_sts(
        &self,
        session: &mut Session,
        channel: &str,
        source: &str,
        setter: &str,
        topic: &str,
    ) {
        let line = lines::topic(source, channel, topic);
        self.bracketed(session, channel, source, line, format!("Topic set for {setter}"));
    }

    fn mode_sts(
        &self,
        session: &mut Session,
        sender: Option<&str>,
        target: Option<&str>,
        modes: Option<&str>,
    ) {
        let (Some(sender), Some(target), Some(modes)) = (sender, target, modes) else {
            debug!(?sender, ?target, ?modes, "mode_sts missing a parameter");
            return;
        };
        session.send(lines::mode(sender, target, modes));
    }

    fn ping_sts(&self, session: &mut Session) {
        let line = lines::ping_self(session.me());
        session.send(line);
    }

    fn on_login(&self, session: &mut Session, hooks: &dyn ServicesHooks, nick: &str, account: &str) {
        let Some(user) = session.network.user_mut(nick) else {
            debug!(nick = %nick, "on_login for unknown user");
            return;
        };
        user.account = Some(account.to_string());
        if hooks.should_reg_umode(user) {
            set_registered(session, nick, true);
        }
    }

    fn on_logout(&self, session: &mut Session, nick: &str, account: &str) -> bool {
        let Some(user) = session.network.user_mut(nick) else {
            debug!(nick = %nick, account = %account, "on_logout for unknown user");
            return false;
        };
        user.account = None;
        if !session.services.no_nick_ownership {
            set_registered(session, nick, false);
        }
        false
    }

    fn jupe(&self, session: &mut Session, server: &str, reason: &str) {
        match session.network.delete_server(server) {
            Ok(split) => info!(
                server = %server,
                servers = split.servers.len(),
                users = split.users.len(),
                "Juping server"
            ),
            Err(e) => debug!(server = %server, error = %e, "Juping unlinked server"),
        }
        let me = session.me().to_string();
        session.send(lines::squit(&me, server, reason));
        let token = session.burst.next_jupe_token();
        session.send(lines::jupe_server(&me, server, token, reason));
    }

    fn nick_group(
        &self,
        session: &mut Session,
        hooks: &dyn ServicesHooks,
        actor: Option<&str>,
        nick: &str,
    ) {
        let target = actor.filter(|a| irc_eq(a, nick)).unwrap_or(nick);
        let eligible = session
            .network
            .user(target)
            .is_some_and(|u| hooks.should_reg_umode(u));
        if eligible {
            set_registered(session, target, true);
        }
    }

    fn nick_ungroup(&self, session: &mut Session, actor: Option<&str>, nick: &str) {
        let target = actor.filter(|a| irc_eq(a, nick)).unwrap_or(nick);
        if session.network.user(target).is_some() && !session.services.no_nick_ownership {
            set_registered(session, target, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::modes::StatusModes;
    use crate::network::Capture;
    use crate::state::User;

    fn session() -> (Session, Capture) {
        let config: Config = toml::from_str(
            r#"
[server]
name = "services.example.net"
description = "Services"

[uplink]
name = "hub.example.net"
send_password = "a"
receive_password = "b"

[network]
tlds = [".net"]
"#,
        )
        .unwrap();
        let capture = Capture::new();
        let session = Session::new(&config, NGIRCD.perm_mode, Box::new(capture.clone()));
        (session, capture)
    }

    fn add(session: &mut Session, nick: &str) {
        let user = User::new(nick, nick, "services.int", nick, "services.example.net", 0);
        session.network.add_user(user).unwrap();
    }

    #[test]
    fn join_sts_sends_mode_only_for_new_channels_with_modes() {
        let (mut session, capture) = session();
        Ngircd.join_sts(&mut session, "#a", "ChanServ", true, "+nt");
        Ngircd.join_sts(&mut session, "#b", "ChanServ", true, "+");
        Ngircd.join_sts(&mut session, "#c", "ChanServ", false, "+nt");
        assert_eq!(
            capture.take(),
            vec![
                ":services.example.net NJOIN #a :@ChanServ",
                ":services.example.net MODE #a +nt",
                ":services.example.net NJOIN #b :@ChanServ",
                ":services.example.net NJOIN #c :@ChanServ",
            ]
        );
    }

    #[test]
    fn kick_drops_membership() {
        let (mut session, capture) = session();
        add(&mut session, "ChanServ");
        add(&mut session, "bob");
        session.network.add_channel("#chan", 1).unwrap();
        session.network.add_member("#chan", "ChanServ", StatusModes::OP).unwrap();
        session.network.add_member("#chan", "bob", StatusModes::empty()).unwrap();

        Ngircd.kick(&mut session, "ChanServ", "#chan", "bob", "Banned");
        assert_eq!(capture.take(), vec![":ChanServ KICK #chan bob :Banned"]);
        assert!(!session.network.is_member("#chan", "bob"));
    }

    #[test]
    fn numerics_and_notices() {
        let (mut session, capture) = session();
        Ngircd.numeric_sts(&mut session, "services.example.net", 219, "alice", "u :End of /STATS report");
        Ngircd.notice_channel_sts(&mut session, None, "#chan", "hello");
        Ngircd.notice_user_sts(&mut session, Some("Global"), "alice", "hi there");
        Ngircd.msg(&mut session, "Global", "alice", "psst");
        Ngircd.quit_sts(&mut session, "Global", "Shutting down");
        Ngircd.part_sts(&mut session, "#chan", "Global");
        assert_eq!(
            capture.take(),
            vec![
                ":services.example.net 219 alice u :End of /STATS report",
                ":services.example.net NOTICE #chan :hello",
                ":Global NOTICE alice :hi there",
                ":Global PRIVMSG alice :psst",
                ":Global QUIT :Shutting down",
                ":Global PART #chan",
            ]
        );
    }

    #[test]
    fn introduce_unknown_nick_sends_nothing() {
        let (mut session, capture) = session();
        Ngircd.introduce_nick(&mut session, "ghost");
        assert!(capture.is_empty());
    }

    #[test]
    fn logout_without_nick_ownership_keeps_mode() {
        let (mut session, capture) = session();
        session.services.no_nick_ownership = true;
        add(&mut session, "alice");
        assert!(!Ngircd.on_logout(&mut session, "alice", "alice"));
        assert!(capture.is_empty());
    }
}
