//! ngircd-link - ngIRCd server-link protocol adapter for IRC services.
//!
//! Translates abstract service actions into ngIRCd's RFC 2813 dialect and
//! turns inbound link lines into entity-store mutations and services hooks.

pub mod config;
pub mod error;
pub mod handlers;
pub mod modes;
pub mod network;
pub mod protocol;
pub mod services;
pub mod state;
pub mod sync;
pub mod uplink;

pub use error::{HandlerError, HandlerResult, SendError, StateError};
pub use protocol::{Ircd, Ngircd, Protocol};
pub use services::{InfoQuery, IncomingMessage, PseudoClients, ServicesHooks};
pub use uplink::Uplink;
