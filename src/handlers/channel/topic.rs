//! TOPIC command handler.

use ngircd_proto::Message;

use super::super::{Context, Handler, arg};
use crate::error::{HandlerError, HandlerResult};

/// `TOPIC <channel> :<text>`; an empty text clears the topic.
pub struct TopicHandler;

impl Handler for TopicHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let name = arg(msg, 0)?;
        let text = arg(msg, 1)?;
        let setter = ctx.source.name().unwrap_or_default().to_string();
        let now = ctx.session.now();

        let channel = ctx
            .session
            .network
            .channel_mut(name)
            .ok_or_else(|| HandlerError::NoSuchChannel(name.to_string()))?;
        channel.set_topic(text, &setter, now);
        ctx.hooks.handle_topic(channel);
        Ok(())
    }
}
