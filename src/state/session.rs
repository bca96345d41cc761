//! Per-link session: who we are, what we know, where lines go.

use chrono::Utc;
use ngircd_proto::{Message, irc_eq};
use tracing::{info, warn};

use super::Network;
use crate::config::{Config, ServerConfig, ServicesConfig, UplinkBlock};
use crate::error::SendError;
use crate::modes::ChannelModes;
use crate::network::LineSink;
use crate::sync::BurstContext;

/// Everything one uplink connection owns.
pub struct Session {
    pub me: ServerConfig,
    pub link: UplinkBlock,
    pub services: ServicesConfig,
    pub tlds: Vec<String>,
    pub network: Network,
    pub burst: BurstContext,
    /// Name of the directly linked server, once it has sent SERVER.
    pub uplink_server: Option<String>,
    /// Unix time of the last PONG from a server.
    pub uplink_pong: Option<i64>,
    shutdown: bool,
    sink: Box<dyn LineSink>,
}

impl Session {
    pub fn new(config: &Config, permanent: ChannelModes, sink: Box<dyn LineSink>) -> Self {
        Self {
            me: config.server.clone(),
            link: config.uplink.clone(),
            services: config.services.clone(),
            tlds: config.network.tlds.clone(),
            network: Network::new(permanent),
            burst: BurstContext::new(),
            uplink_server: None,
            uplink_pong: None,
            shutdown: false,
            sink,
        }
    }

    /// Our server name.
    pub fn me(&self) -> &str {
        &self.me.name
    }

    /// Current unix time.
    pub fn now(&self) -> i64 {
        Utc::now().timestamp()
    }

    /// Send a line, surfacing transport failure.
    pub fn try_send(&mut self, msg: Message) -> Result<(), SendError> {
        self.sink.send(msg)
    }

    /// Send a line; failures are logged.
    pub fn send(&mut self, msg: Message) {
        let command = msg.command.clone();
        if let Err(e) = self.sink.send(msg) {
            warn!(command = %command, error = %e, "Failed to send line to uplink");
        }
    }

    pub fn is_registered(&self) -> bool {
        self.uplink_server.is_some()
    }

    pub fn is_uplink(&self, server: &str) -> bool {
        self.uplink_server
            .as_deref()
            .is_some_and(|up| irc_eq(up, server))
    }

    /// Flag the process for shutdown. Returns `false` if it already was.
    pub fn request_shutdown(&mut self) -> bool {
        if self.shutdown {
            return false;
        }
        self.shutdown = true;
        true
    }

    pub fn shutdown_requested(&self) -> bool {
        self.shutdown
    }

    /// Drop everything learned over the link.
    pub fn reset(&mut self) {
        info!(uplink = ?self.uplink_server, "Link closed; clearing network state");
        self.network.clear();
        self.burst.reset();
        self.uplink_server = None;
        self.uplink_pong = None;
    }
}
