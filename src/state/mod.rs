//! Entity store and link session.
//!
//! A single-owner, in-memory view of users, channels and servers behind the
//! uplink. There are no locks: the session owning it processes one line at a
//! time.

mod channel;
mod network;
mod server;
mod session;
mod user;

pub use channel::{Channel, Member, Topic};
pub use network::{Network, Split};
pub use server::Server;
pub use session::Session;
pub use user::User;
