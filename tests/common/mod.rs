//! Shared harness for link integration tests.
//!
//! Builds an [`Uplink`] wired to a [`Capture`] sink and a [`RecordingHooks`]
//! services core, and offers a few shortcuts for the usual handshake.

#![allow(dead_code)]

use ngircd_link::config::Config;
use ngircd_link::network::Capture;
use ngircd_link::protocol::Protocol;
use ngircd_link::state::{Channel, Server, Session, User};
use ngircd_link::{IncomingMessage, InfoQuery, Ngircd, ServicesHooks, Uplink};
use ngircd_proto::irc_eq;

pub const ME: &str = "services.example.net";
pub const HUB: &str = "hub.example.net";

const CONFIG: &str = r#"
[server]
name = "services.example.net"
description = "Example services"
numeric = "1"

[uplink]
name = "hub.example.net"
send_password = "out-secret"
receive_password = "in-secret"

[services]
nickserv = "NickServ"

[network]
tlds = [".net", ".org"]
"#;

pub fn config() -> Config {
    toml::from_str(CONFIG).expect("test config parses")
}

/// One observed hook call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Init,
    ModeLock(String),
    Message {
        source: String,
        target: String,
        text: String,
        notice: bool,
    },
    Topic {
        channel: String,
        text: String,
    },
    NickChange(String),
    Query {
        nick: String,
        query: InfoQuery,
    },
    Away {
        nick: String,
        message: Option<String>,
    },
    Eob(String),
}

/// Services core that records every hook it sees.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    pub events: Vec<Event>,
    /// Nicks treated as our own clients.
    pub internal: Vec<String>,
    /// Nicks eligible for +R.
    pub registered: Vec<String>,
}

impl RecordingHooks {
    pub fn mode_lock_checks(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::ModeLock(channel) => Some(channel.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl ServicesHooks for RecordingHooks {
    fn services_init(&mut self, _protocol: &dyn Protocol, _session: &mut Session) {
        self.events.push(Event::Init);
    }

    fn check_mode_lock(&mut self, _protocol: &dyn Protocol, _session: &mut Session, channel: &str) {
        self.events.push(Event::ModeLock(channel.to_string()));
    }

    fn mode_lock_string(&self, _channel: &str) -> String {
        "+nt".to_string()
    }

    fn handle_message(
        &mut self,
        _protocol: &dyn Protocol,
        _session: &mut Session,
        msg: &IncomingMessage<'_>,
    ) {
        self.events.push(Event::Message {
            source: msg.source.to_string(),
            target: msg.target.to_string(),
            text: msg.text.to_string(),
            notice: msg.notice,
        });
    }

    fn handle_topic(&mut self, channel: &Channel) {
        self.events.push(Event::Topic {
            channel: channel.name.clone(),
            text: channel
                .topic
                .as_ref()
                .map(|t| t.text.clone())
                .unwrap_or_default(),
        });
    }

    fn handle_nickchange(&mut self, user: &User) {
        self.events.push(Event::NickChange(user.nick.clone()));
    }

    fn handle_query(
        &mut self,
        _protocol: &dyn Protocol,
        _session: &mut Session,
        nick: &str,
        query: &InfoQuery,
    ) {
        self.events.push(Event::Query {
            nick: nick.to_string(),
            query: query.clone(),
        });
    }

    fn handle_away(&mut self, user: &User, message: Option<&str>) {
        self.events.push(Event::Away {
            nick: user.nick.clone(),
            message: message.map(str::to_string),
        });
    }

    fn should_reg_umode(&self, user: &User) -> bool {
        self.registered.iter().any(|n| irc_eq(n, &user.nick))
    }

    fn is_internal_client(&self, nick: &str) -> bool {
        self.internal.iter().any(|n| irc_eq(n, nick))
    }

    fn handle_eob(&mut self, server: &Server) {
        self.events.push(Event::Eob(server.name.clone()));
    }
}

pub type TestUplink = Uplink<RecordingHooks>;

/// A fresh, unconnected uplink and the sink it writes to.
pub fn uplink() -> (TestUplink, Capture) {
    let capture = Capture::new();
    let uplink = Uplink::new(
        &config(),
        Box::new(Ngircd),
        RecordingHooks::default(),
        Box::new(capture.clone()),
    );
    (uplink, capture)
}

/// Log in, accept the hub's PASS and SERVER, and clear the sink.
///
/// The hub is left bursting.
pub fn linked() -> (TestUplink, Capture) {
    let (mut uplink, capture) = uplink();
    uplink.connect().expect("capture sink never fails");
    uplink.process_line("PASS in-secret 0210-IRC+ ngIRCd|26:CHLMSXZ PZ");
    uplink.process_line(&format!("SERVER {HUB} 1 :Hub server"));
    capture.take();
    (uplink, capture)
}

/// [`linked`], then finish the hub's burst.
pub fn synced() -> (TestUplink, Capture) {
    let (mut uplink, capture) = linked();
    uplink.process_line(&format!(":{HUB} PONG {HUB} :{ME}"));
    capture.take();
    (uplink, capture)
}

/// Introduce a remote user on the hub.
pub fn add_user(uplink: &mut TestUplink, nick: &str) {
    uplink.process_line(&format!(
        ":{HUB} NICK {nick} 1 ~{nick} host.example 1 +i :{nick} gecos"
    ));
}

/// Introduce one of our own clients, bypassing the wire.
pub fn add_local_client(uplink: &mut TestUplink, nick: &str) {
    let now = uplink.session().now();
    let user = User::new(nick, "service", "services.int", "Service", ME, now);
    uplink
        .session_mut()
        .network
        .add_user(user)
        .expect("nick is free");
    uplink.hooks_mut().internal.push(nick.to_string());
}
