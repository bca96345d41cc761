//! Channel command handlers.
//!
//! Handles NJOIN, CHANINFO, JOIN, PART, KICK and TOPIC.

mod burst;
mod join;
mod kick;
mod part;
mod topic;

pub use burst::{ChaninfoHandler, NjoinHandler};
pub use join::JoinHandler;
pub use kick::KickHandler;
pub use part::PartHandler;
pub use topic::TopicHandler;

use tracing::debug;

use super::Context;
use crate::error::HandlerError;

/// Find `name`, or create it with a TS chosen by `ts` and run the mode-lock
/// check once. Returns whether the channel is new.
fn find_or_create(
    ctx: &mut Context<'_>,
    name: &str,
    ts: i64,
    check_mode_lock: bool,
) -> Result<bool, HandlerError> {
    if ctx.session.network.channel(name).is_some() {
        return Ok(false);
    }
    ctx.session.network.add_channel(name, ts)?;
    debug!(channel = %name, ts, "New channel");
    if check_mode_lock {
        ctx.hooks.check_mode_lock(ctx.protocol, ctx.session, name);
    }
    Ok(true)
}
