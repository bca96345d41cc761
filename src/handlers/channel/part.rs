//! PART command handler.

use ngircd_proto::Message;
use tracing::debug;

use super::super::{Context, Handler, arg};
use crate::error::HandlerResult;

/// `PART <channel>[,<channel>...] [:<reason>]`
pub struct PartHandler;

impl Handler for PartHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let nick = ctx.source_user()?.to_string();
        for channel in arg(msg, 0)?.split(',').filter(|c| !c.is_empty()) {
            if let Err(e) = ctx.session.network.remove_member(channel, &nick) {
                debug!(channel = %channel, nick = %nick, error = %e, "Ignoring PART");
            }
        }
        Ok(())
    }
}
