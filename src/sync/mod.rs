//! Sync Module - uplink synchronization state.
//!
//! Tracks the burst we receive after linking and hands out jupe tokens.

pub mod burst;

pub use burst::{BurstContext, BurstReport, SyncState};
