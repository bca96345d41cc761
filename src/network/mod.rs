//! Network module.
//!
//! Both directions of the uplink transport: [`LineReader`] frames inbound
//! bytes into lines and [`LineSink`] takes every formatted outbound line.

mod reader;
mod sink;

pub use reader::LineReader;
pub use sink::{Capture, LineSink};
