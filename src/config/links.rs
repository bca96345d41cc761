//! Uplink configuration.

use serde::Deserialize;

use super::defaults::{default_ping_interval, default_protocol};

/// The one server we link to.
#[derive(Debug, Clone, Deserialize)]
pub struct UplinkBlock {
    /// Uplink server name (e.g., "hub.example.net").
    pub name: String,
    /// Wire dialect spoken on the link.
    #[serde(default = "default_protocol")]
    pub protocol: String,
    /// Password we send in PASS.
    pub send_password: String,
    /// Password the uplink must send us.
    pub receive_password: String,
    /// Seconds between liveness pings.
    #[serde(default = "default_ping_interval")]
    pub ping_interval: u64,
}
