//! Channel burst commands: NJOIN and CHANINFO.
//!
//! Channels first seen here are backdated while their server is still
//! bursting, so the authoritative state that follows never looks newer.

use ngircd_proto::Message;
use tracing::debug;

use super::super::{Context, Handler, arg};
use super::find_or_create;
use crate::error::{HandlerError, HandlerResult};
use crate::modes::apply_channel_modes;

/// `NJOIN <channel> :[@|+]nick,...`
pub struct NjoinHandler;

impl Handler for NjoinHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let name = arg(msg, 0)?;
        let server = ctx.source_server()?;
        let ts = ctx.channel_ts(&server);
        find_or_create(ctx, name, ts, true)?;

        let tables = ctx.protocol.mode_tables();
        let members = msg.last_arg().unwrap_or_default();
        for token in members.split(',').filter(|t| !t.is_empty()) {
            let (status, nick) = tables.strip_prefixes(token);
            if let Err(e) = ctx.session.network.add_member(name, nick, status) {
                debug!(channel = %name, member = %token, error = %e, "Skipping NJOIN member");
            }
        }

        ctx.session.network.delete_if_empty(name);
        Ok(())
    }
}

/// `CHANINFO <channel> +<modes> [<key> <limit>] :<topic>`
pub struct ChaninfoHandler;

impl Handler for ChaninfoHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let name = arg(msg, 0)?;
        let server = ctx.source_server()?;
        let ts = ctx.channel_ts(&server);
        find_or_create(ctx, name, ts, true)?;

        let last = msg.arg_count() - 1;
        let topic = arg(msg, last)?;
        let tables = ctx.protocol.mode_tables();
        let ircd = ctx.protocol.ircd();
        let now = ctx.session.now();

        let channel = ctx
            .session
            .network
            .channel_mut(name)
            .ok_or_else(|| HandlerError::NoSuchChannel(name.to_string()))?;
        apply_channel_modes(channel, tables, ircd, &msg.args[1..last]);

        let changed = channel.topic.as_ref().map(|t| t.text.as_str()).unwrap_or_default() != topic;
        if changed {
            channel.set_topic(topic, &server, now);
            ctx.hooks.handle_topic(channel);
        }
        Ok(())
    }
}
