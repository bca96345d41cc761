//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use std::collections::HashSet;

use ngircd_proto::{ChannelExt, irc_to_lower};
use thiserror::Error;

use super::Config;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("server.name must contain a '.', got '{0}'")]
    InvalidServerName(String),
    #[error("server.description is required")]
    MissingDescription,
    #[error("server.numeric is required")]
    MissingNumeric,
    #[error("uplink.name is required")]
    MissingUplinkName,
    #[error("uplink.send_password is required")]
    MissingSendPassword,
    #[error("uplink.receive_password is required")]
    MissingReceivePassword,
    #[error("uplink.protocol '{0}' is not a known dialect")]
    UnknownProtocol(String),
    #[error("uplink.ping_interval must be at least 1 second")]
    InvalidPingInterval,
    #[error("services.nickserv is required")]
    MissingNickserv,
    #[error("service client nick is empty or contains spaces: '{0}'")]
    InvalidClientNick(String),
    #[error("service client nick is used twice: {0}")]
    DuplicateClientNick(String),
    #[error("service client {nick} joins untracked channel {channel}")]
    InvalidClientChannel { nick: String, channel: String },
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let name = &config.server.name;
    if name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    } else if !name.contains('.') {
        errors.push(ValidationError::InvalidServerName(name.clone()));
    }
    if config.server.description.is_empty() {
        errors.push(ValidationError::MissingDescription);
    }
    if config.server.numeric.is_empty() {
        errors.push(ValidationError::MissingNumeric);
    }

    let uplink = &config.uplink;
    if uplink.name.is_empty() {
        errors.push(ValidationError::MissingUplinkName);
    }
    if uplink.send_password.is_empty() {
        errors.push(ValidationError::MissingSendPassword);
    }
    if uplink.receive_password.is_empty() {
        errors.push(ValidationError::MissingReceivePassword);
    }
    if crate::protocol::find(&uplink.protocol).is_none() {
        errors.push(ValidationError::UnknownProtocol(uplink.protocol.clone()));
    }
    if uplink.ping_interval == 0 {
        errors.push(ValidationError::InvalidPingInterval);
    }

    if config.services.nickserv.is_empty() {
        errors.push(ValidationError::MissingNickserv);
    }
    let mut seen = HashSet::new();
    for client in &config.services.clients {
        if client.nick.is_empty() || client.nick.contains(' ') {
            errors.push(ValidationError::InvalidClientNick(client.nick.clone()));
            continue;
        }
        if !seen.insert(irc_to_lower(&client.nick)) {
            errors.push(ValidationError::DuplicateClientNick(client.nick.clone()));
        }
        for channel in &client.channels {
            if !channel.is_global_channel() {
                errors.push(ValidationError::InvalidClientChannel {
                    nick: client.nick.clone(),
                    channel: channel.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(extra: &str) -> Config {
        let raw = format!(
            r#"
[server]
name = "services.example.net"
description = "Example Services"

[uplink]
name = "hub.example.net"
send_password = "linkpass"
receive_password = "hubpass"
{extra}
"#
        );
        toml::from_str(&raw).unwrap()
    }

    #[test]
    fn valid_config_passes() {
        assert_eq!(validate(&config("")), Ok(()));
    }

    #[test]
    fn shipped_example_is_valid() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/ngircd-link.example.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(validate(&config), Ok(()));
    }

    #[test]
    fn collects_every_error() {
        let mut cfg = config("protocol = \"unreal\"\nping_interval = 0");
        cfg.server.name = "services".into();
        cfg.uplink.receive_password.clear();

        let errors = validate(&cfg).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidServerName("services".into()),
                ValidationError::MissingReceivePassword,
                ValidationError::UnknownProtocol("unreal".into()),
                ValidationError::InvalidPingInterval,
            ]
        );
    }

    #[test]
    fn checks_service_clients() {
        let cfg = config(
            r#"
[[services.clients]]
nick = "Global"
user = "global"
gecos = "Global Noticer"
channels = ["&local"]

[[services.clients]]
nick = "GLOBAL"
user = "global"
gecos = "Duplicate"
"#,
        );
        let errors = validate(&cfg).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidClientChannel {
                    nick: "Global".into(),
                    channel: "&local".into()
                },
                ValidationError::DuplicateClientNick("GLOBAL".into()),
            ]
        );
    }
}
