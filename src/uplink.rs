//! The uplink: one active dialect, its command registry, the session it
//! drives and the services core it reports to.

use ngircd_proto::Message;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::SendError;
use crate::handlers::Registry;
use crate::network::LineSink;
use crate::protocol::Protocol;
use crate::services::{self, ServicesHooks};
use crate::state::Session;

pub struct Uplink<H: ServicesHooks> {
    protocol: Box<dyn Protocol>,
    registry: Registry,
    session: Session,
    hooks: H,
}

impl<H: ServicesHooks> Uplink<H> {
    pub fn new(
        config: &Config,
        protocol: Box<dyn Protocol>,
        hooks: H,
        sink: Box<dyn LineSink>,
    ) -> Self {
        let session = Session::new(config, protocol.ircd().perm_mode, sink);
        let registry = Registry::for_protocol(protocol.as_ref());
        info!(
            protocol = protocol.ircd().name,
            commands = registry.len(),
            "Protocol installed"
        );
        Self {
            protocol,
            registry,
            session,
            hooks,
        }
    }

    /// Replace the active dialect and its command set.
    pub fn install_protocol(&mut self, protocol: Box<dyn Protocol>) {
        self.registry = Registry::for_protocol(protocol.as_ref());
        self.session
            .network
            .set_permanent_modes(protocol.ircd().perm_mode);
        info!(
            protocol = protocol.ircd().name,
            commands = self.registry.len(),
            "Protocol installed"
        );
        self.protocol = protocol;
    }

    pub fn protocol(&self) -> &dyn Protocol {
        self.protocol.as_ref()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Send the link handshake and start the burst.
    pub fn connect(&mut self) -> Result<(), SendError> {
        self.protocol
            .server_login(&mut self.session, &mut self.hooks)
    }

    /// Parse and dispatch one raw line. Unparsable lines are dropped.
    pub fn process_line(&mut self, line: &str) {
        match line.parse::<Message>() {
            Ok(msg) => self.process(&msg),
            Err(e) => debug!(line = %line, error = %e, "Dropping malformed line"),
        }
    }

    pub fn process(&mut self, msg: &Message) {
        self.registry.dispatch(
            self.protocol.as_ref(),
            &mut self.session,
            &mut self.hooks,
            msg,
        );
    }

    /// Liveness ping towards the uplink.
    pub fn ping(&mut self) {
        self.protocol.ping_sts(&mut self.session);
    }

    /// Join service client `nick` to `channel`.
    pub fn join(&mut self, channel: &str, nick: &str) {
        services::join(
            self.protocol.as_ref(),
            &mut self.session,
            &self.hooks,
            channel,
            nick,
        );
    }

    /// `nick` identified to `account`.
    pub fn login(&mut self, nick: &str, account: &str) {
        self.protocol
            .on_login(&mut self.session, &self.hooks, nick, account);
    }

    /// Returns whether the dialect disconnected the user.
    pub fn logout(&mut self, nick: &str, account: &str) -> bool {
        self.protocol.on_logout(&mut self.session, nick, account)
    }

    pub fn nick_group(&mut self, actor: Option<&str>, nick: &str) {
        self.protocol
            .nick_group(&mut self.session, &self.hooks, actor, nick);
    }

    pub fn nick_ungroup(&mut self, actor: Option<&str>, nick: &str) {
        self.protocol.nick_ungroup(&mut self.session, actor, nick);
    }

    /// The transport went away.
    pub fn link_closed(&mut self) {
        self.session.reset();
    }

    pub fn shutdown_requested(&self) -> bool {
        self.session.shutdown_requested()
    }
}
