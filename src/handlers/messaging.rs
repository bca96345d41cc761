//! PRIVMSG and NOTICE, handed to the services core.

use ngircd_proto::Message;
use tracing::debug;

use super::{Context, Handler};
use crate::error::HandlerResult;
use crate::services::IncomingMessage;

fn deliver(ctx: &mut Context<'_>, msg: &Message, notice: bool) -> HandlerResult {
    let [target, text] = msg.args.as_slice() else {
        debug!(command = %msg.command, args = msg.arg_count(), source = %ctx.source, "Dropping message with extra arguments");
        return Ok(());
    };
    let incoming = IncomingMessage {
        source: &ctx.source,
        target,
        text,
        notice,
    };
    ctx.hooks.handle_message(ctx.protocol, ctx.session, &incoming);
    Ok(())
}

pub struct PrivmsgHandler;

impl Handler for PrivmsgHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        deliver(ctx, msg, false)
    }
}

pub struct NoticeHandler;

impl Handler for NoticeHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        deliver(ctx, msg, true)
    }
}
