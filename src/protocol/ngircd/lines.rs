//! One builder per ngIRCd line shape.
//!
//! These are pure; sequencing, membership checks and sending live in the
//! [`Protocol`](crate::protocol::Protocol) impl.

use ngircd_proto::Message;

/// Version token sent after the link password.
pub fn pass(password: &str) -> Message {
    Message::new("PASS")
        .args([password, "0210-IRC+"])
        .arg(format!(
            "{}|{}:CLo",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ))
}

pub fn server(name: &str, hops: u32, description: &str) -> Message {
    Message::new("SERVER")
        .arg(name)
        .arg(hops.to_string())
        .trailing(description)
}

/// `:<me> NICK <nick> 1 <user> <host> <numeric> <umodes> :<gecos>`
pub fn nick(
    me: &str,
    nick: &str,
    user: &str,
    host: &str,
    numeric: &str,
    umodes: &str,
    gecos: &str,
) -> Message {
    Message::new("NICK")
        .with_prefix(me)
        .args([nick, "1", user, host, numeric, umodes])
        .trailing(gecos)
}

/// Op-join a single nick.
pub fn njoin(me: &str, channel: &str, nick: &str) -> Message {
    Message::new("NJOIN")
        .with_prefix(me)
        .arg(channel)
        .trailing(format!("@{nick}"))
}

pub fn invite(sender: &str, target: &str, channel: &str) -> Message {
    Message::new("INVITE")
        .with_prefix(sender)
        .arg(target)
        .arg(channel)
}

pub fn part(nick: &str, channel: &str, reason: Option<&str>) -> Message {
    let msg = Message::new("PART").with_prefix(nick).arg(channel);
    match reason {
        Some(reason) => msg.trailing(reason),
        None => msg,
    }
}

pub fn topic(source: &str, channel: &str, topic: &str) -> Message {
    Message::new("TOPIC")
        .with_prefix(source)
        .arg(channel)
        .trailing(topic)
}

/// `:<sender> MODE <target> <modes...>`; mode arguments stay middle params.
pub fn mode(sender: &str, target: &str, modes: &str) -> Message {
    Message::new("MODE")
        .with_prefix(sender)
        .arg(target)
        .args(modes.split(' ').filter(|s| !s.is_empty()))
}

pub fn kick(source: &str, channel: &str, target: &str, reason: &str) -> Message {
    Message::new("KICK")
        .with_prefix(source)
        .arg(channel)
        .arg(target)
        .trailing(reason)
}

pub fn quit(nick: &str, reason: &str) -> Message {
    Message::new("QUIT").with_prefix(nick).trailing(reason)
}

pub fn wallops(me: &str, text: &str) -> Message {
    Message::new("WALLOPS").with_prefix(me).trailing(text)
}

/// PRIVMSG or NOTICE.
pub fn text(command: &str, from: &str, target: &str, text: &str) -> Message {
    Message::new(command)
        .with_prefix(from)
        .arg(target)
        .trailing(text)
}

pub fn kill(source: &str, id: &str, path: &str) -> Message {
    Message::new("KILL").with_prefix(source).arg(id).trailing(path)
}

pub fn ping(me: &str, target: &str) -> Message {
    Message::new("PING").with_prefix(me).arg(target)
}

/// Self-addressed liveness ping.
pub fn ping_self(me: &str) -> Message {
    Message::new("PING").with_prefix(me).trailing(me)
}

pub fn pong(me: &str, token: &str) -> Message {
    Message::new("PONG").with_prefix(me).arg(token)
}

pub fn squit(me: &str, server: &str, reason: &str) -> Message {
    Message::new("SQUIT")
        .with_prefix(me)
        .arg(server)
        .trailing(reason)
}

/// Placeholder server introduced by a jupe.
pub fn jupe_server(me: &str, server: &str, token: u32, reason: &str) -> Message {
    Message::new("SERVER")
        .with_prefix(me)
        .args([server, "2"])
        .arg(token.to_string())
        .trailing(reason)
}

/// Raw numeric; `text` may carry its own `:`.
pub fn numeric(from: &str, numeric: u16, target: &str, text: &str) -> Result<Message, ngircd_proto::ParseError> {
    format!(":{from} {numeric:03} {target} {text}").parse()
}
