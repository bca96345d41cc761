//! Configured pseudo-clients, the services core the binary ships with.
//!
//! Introduces the clients from `[services]` after login, answers the
//! informational queries with stock numerics, and tells anyone who messages
//! a client that nothing is listening.

use ngircd_proto::irc_eq;
use tracing::{debug, info};

use super::{IncomingMessage, InfoQuery, ServicesHooks};
use crate::config::{ServiceClient, ServicesConfig};
use crate::handlers::Source;
use crate::modes::UserModes;
use crate::protocol::Protocol;
use crate::state::{Session, User};

const CLIENT_MODES: UserModes = UserModes::INVISIBLE
    .union(UserModes::OPER)
    .union(UserModes::SERVICE);

/// Service clients loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct PseudoClients {
    clients: Vec<ServiceClient>,
    mode_lock: String,
}

impl PseudoClients {
    pub fn new(config: &ServicesConfig) -> Self {
        Self {
            clients: config.clients.clone(),
            mode_lock: "+nt".to_string(),
        }
    }

    fn find(&self, nick: &str) -> Option<&ServiceClient> {
        self.clients.iter().find(|c| irc_eq(&c.nick, nick))
    }
}

impl ServicesHooks for PseudoClients {
    fn services_init(&mut self, protocol: &dyn Protocol, session: &mut Session) {
        let me = session.me().to_string();
        let now = session.now();
        for client in &self.clients {
            let user = User::new(
                &client.nick,
                &client.user,
                &client.host,
                &client.gecos,
                &me,
                now,
            )
            .with_modes(CLIENT_MODES);
            if let Err(e) = session.network.add_user(user) {
                debug!(nick = %client.nick, error = %e, "Client already present");
                continue;
            }
            protocol.introduce_nick(session, &client.nick);
            for channel in &client.channels {
                super::join(protocol, session, &*self, channel, &client.nick);
            }
        }
        info!(clients = self.clients.len(), "Service clients introduced");
    }

    fn mode_lock_string(&self, _channel: &str) -> String {
        self.mode_lock.clone()
    }

    fn handle_message(
        &mut self,
        protocol: &dyn Protocol,
        session: &mut Session,
        msg: &IncomingMessage<'_>,
    ) {
        let Some(client) = self.find(msg.target) else {
            return;
        };
        let Source::User(sender) = msg.source else {
            return;
        };
        if msg.notice {
            return;
        }
        let from = client.nick.clone();
        protocol.notice_user_sts(session, Some(&from), sender, "This service is not available.");
    }

    fn handle_query(
        &mut self,
        protocol: &dyn Protocol,
        session: &mut Session,
        nick: &str,
        query: &InfoQuery,
    ) {
        let me = session.me().to_string();
        let ircd = protocol.ircd().name;
        let version = env!("CARGO_PKG_VERSION");

        let replies: Vec<(u16, String)> = match query {
            InfoQuery::Version => vec![(
                351,
                format!("{}-{version}. {me} :{ircd}", env!("CARGO_PKG_NAME")),
            )],
            InfoQuery::Admin => vec![
                (256, format!(":Administrative info about {me}")),
                (257, format!(":{}", session.me.description)),
            ],
            InfoQuery::Info => vec![
                (371, format!(":{} {version}", env!("CARGO_PKG_NAME"))),
                (374, ":End of /INFO list.".to_string()),
            ],
            InfoQuery::Motd => vec![(422, ":MOTD File is missing".to_string())],
            InfoQuery::Stats(letter) => vec![(219, format!("{letter} :End of /STATS report"))],
            InfoQuery::Whois(target) => {
                let mut out = Vec::new();
                if let Some(user) = session.network.user(target) {
                    out.push((
                        311,
                        format!("{} {} {} * :{}", user.nick, user.user, user.host, user.gecos),
                    ));
                    out.push((312, format!("{} {} :{}", user.nick, user.server, ircd)));
                } else {
                    out.push((401, format!("{target} :No such nick/channel")));
                }
                out.push((318, format!("{target} :End of /WHOIS list.")));
                out
            }
            InfoQuery::Trace { target, .. } => vec![(262, format!("{target} :End of TRACE"))],
        };

        for (numeric, text) in replies {
            protocol.numeric_sts(session, &me, numeric, nick, &text);
        }
    }

    fn should_reg_umode(&self, user: &User) -> bool {
        user.account
            .as_deref()
            .is_some_and(|account| irc_eq(account, &user.nick))
    }

    fn is_internal_client(&self, nick: &str) -> bool {
        self.find(nick).is_some()
    }
}
