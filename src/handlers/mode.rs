//! MODE command handler.

use ngircd_proto::Message;
use tracing::debug;

use super::{Context, Handler, arg};
use crate::error::{HandlerError, HandlerResult};
use crate::modes::{apply_channel_modes, apply_user_modes};

/// `MODE <#channel> <modes> [<args>...]` or `MODE <nick> <modes>`
pub struct ModeHandler;

impl Handler for ModeHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let target = arg(msg, 0)?;
        let tables = ctx.protocol.mode_tables();

        if target.starts_with('#') {
            let ircd = ctx.protocol.ircd();
            let channel = ctx
                .session
                .network
                .channel_mut(target)
                .ok_or_else(|| HandlerError::NoSuchChannel(target.to_string()))?;
            let changes = apply_channel_modes(channel, tables, ircd, &msg.args[1..]);
            debug!(channel = %target, by = %ctx.source, changes = changes.len(), "Channel modes");
        } else {
            let modes = arg(msg, 1)?;
            let user = ctx
                .session
                .network
                .user_mut(target)
                .ok_or_else(|| HandlerError::NoSuchUser(target.to_string()))?;
            apply_user_modes(user, tables, modes);
        }
        Ok(())
    }
}
