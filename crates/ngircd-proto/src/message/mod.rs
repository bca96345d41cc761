//! Wire messages: type, parser and serializer.

mod parser;
mod serialize;
mod types;

pub use self::types::Message;
