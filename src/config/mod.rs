//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: top-level [`Config`], local server identity, network settings
//! - [`links`]: the uplink block (passwords, dialect, ping interval)
//! - [`services`]: NickServ policy and the service clients to introduce
//! - [`validation`]: startup checks

mod defaults;
mod links;
mod services;
mod types;
mod validation;

pub use links::UplinkBlock;
pub use services::{ServiceClient, ServicesConfig};
pub use types::{Config, ConfigError, NetworkConfig, ServerConfig};
pub use validation::{ValidationError, validate};
