//! Inbound server-link command handlers.
//!
//! Each command is a unit struct implementing [`Handler`]. The dialect
//! registers the ones it speaks into a [`Registry`], which checks argument
//! counts and source classes before a handler ever runs.

mod channel;
mod connection;
mod core;
mod messaging;
mod mode;
mod server;
mod server_query;
mod user;

pub use self::core::{
    BURST_TS_BACKDATE, Context, Handler, Registry, Source, SourceKinds, arg,
};
pub use channel::{
    ChaninfoHandler, JoinHandler, KickHandler, NjoinHandler, PartHandler, TopicHandler,
};
pub use connection::{ErrorHandler, PassHandler, PingHandler, PongHandler};
pub use messaging::{NoticeHandler, PrivmsgHandler};
pub use mode::ModeHandler;
pub use server::{ServerHandler, SquitHandler};
pub use server_query::{
    AdminHandler, InfoHandler, MotdHandler, StatsHandler, TraceHandler, VersionHandler,
    WhoisHandler,
};
pub use user::{AwayHandler, KillHandler, NickHandler, QuitHandler};
