//! # ngircd-proto
//!
//! Wire-level building blocks for talking to an ngIRCd server link:
//!
//! - [`Message`]: an owned line (`[:prefix] COMMAND arg... [:trailing]`)
//!   with a nom-based parser and a serializer that keeps the trailing form
//!   of the last argument stable across a parse/encode cycle
//! - [`casemap`]: RFC 1459 case mapping used for nick and channel keys
//! - [`ChannelExt`]: channel name checks
//!
//! ```rust
//! use ngircd_proto::Message;
//!
//! let msg: Message = ":irc.example.net NJOIN #rust :@alice,bob".parse().unwrap();
//! assert_eq!(msg.command, "NJOIN");
//! assert_eq!(msg.param(1), Some("@alice,bob"));
//! assert_eq!(msg.to_string(), ":irc.example.net NJOIN #rust :@alice,bob");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod chan;
pub mod error;
pub mod message;

pub use self::casemap::{irc_eq, irc_lower_char, irc_to_lower};
pub use self::chan::ChannelExt;
pub use self::error::ParseError;
pub use self::message::Message;
