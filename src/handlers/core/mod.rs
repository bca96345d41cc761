//! Core handler infrastructure.
//!
//! The handler context, source classification and the command registry.

pub mod context;
pub mod registry;

pub use context::{BURST_TS_BACKDATE, Context, Handler, Source, SourceKinds, arg};
pub use registry::Registry;
