//! Services-side settings the link layer needs.

use serde::Deserialize;

use super::defaults::{default_nickserv, default_service_host};

#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    /// Nick that sets and clears +R.
    #[serde(default = "default_nickserv")]
    pub nickserv: String,
    /// Disable nick ownership (no +R/-R handling).
    #[serde(default)]
    pub no_nick_ownership: bool,
    /// Pseudo-clients introduced after login.
    #[serde(default)]
    pub clients: Vec<ServiceClient>,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            nickserv: default_nickserv(),
            no_nick_ownership: false,
            clients: Vec::new(),
        }
    }
}

/// A service pseudo-client.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceClient {
    pub nick: String,
    pub user: String,
    #[serde(default = "default_service_host")]
    pub host: String,
    pub gecos: String,
    /// Channels joined right after introduction.
    #[serde(default)]
    pub channels: Vec<String>,
}
