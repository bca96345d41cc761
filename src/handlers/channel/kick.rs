//! KICK command handler.

use ngircd_proto::Message;
use tracing::debug;

use super::super::{Context, Handler, arg};
use crate::error::{HandlerError, HandlerResult, StateError};
use crate::services;

/// `KICK <channel> <nick> [:<reason>]`
///
/// A kicked service client rejoins straight away.
pub struct KickHandler;

impl Handler for KickHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let channel = arg(msg, 0)?;
        let target = arg(msg, 1)?;

        let nick = ctx
            .session
            .network
            .user(target)
            .map(|u| u.nick.clone())
            .ok_or_else(|| HandlerError::NoSuchUser(target.to_string()))?;
        if ctx.session.network.channel(channel).is_none() {
            return Err(HandlerError::NoSuchChannel(channel.to_string()));
        }
        if !ctx.session.network.is_member(channel, &nick) {
            return Err(StateError::NotOnChannel {
                nick,
                channel: channel.to_string(),
            }
            .into());
        }

        ctx.session.network.remove_member(channel, &nick)?;
        debug!(channel = %channel, nick = %nick, by = %ctx.source, "Kicked");

        if ctx.hooks.is_internal_client(&nick) {
            services::join(ctx.protocol, ctx.session, &*ctx.hooks, channel, &nick);
        }
        Ok(())
    }
}
