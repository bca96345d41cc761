//! Informational queries: STATS, ADMIN, VERSION, INFO, WHOIS, TRACE, MOTD.
//!
//! None of these are answered here; each becomes an [`InfoQuery`] for the
//! services core.

use ngircd_proto::Message;

use super::{Context, Handler, arg};
use crate::error::HandlerResult;
use crate::services::InfoQuery;

fn forward(ctx: &mut Context<'_>, query: InfoQuery) -> HandlerResult {
    let nick = ctx.source_user()?.to_string();
    ctx.hooks
        .handle_query(ctx.protocol, ctx.session, &nick, &query);
    Ok(())
}

/// `STATS <letter> <server>`
pub struct StatsHandler;

impl Handler for StatsHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let letter = arg(msg, 0)?.chars().next().unwrap_or_default();
        forward(ctx, InfoQuery::Stats(letter))
    }
}

pub struct AdminHandler;

impl Handler for AdminHandler {
    fn handle(&self, ctx: &mut Context<'_>, _msg: &Message) -> HandlerResult {
        forward(ctx, InfoQuery::Admin)
    }
}

pub struct VersionHandler;

impl Handler for VersionHandler {
    fn handle(&self, ctx: &mut Context<'_>, _msg: &Message) -> HandlerResult {
        forward(ctx, InfoQuery::Version)
    }
}

pub struct InfoHandler;

impl Handler for InfoHandler {
    fn handle(&self, ctx: &mut Context<'_>, _msg: &Message) -> HandlerResult {
        forward(ctx, InfoQuery::Info)
    }
}

/// `WHOIS <server> <nick>`
pub struct WhoisHandler;

impl Handler for WhoisHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let nick = arg(msg, 1)?.to_string();
        forward(ctx, InfoQuery::Whois(nick))
    }
}

/// `TRACE <target> [<dest>]`
pub struct TraceHandler;

impl Handler for TraceHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let query = InfoQuery::Trace {
            target: arg(msg, 0)?.to_string(),
            dest: msg.param(1).map(str::to_string),
        };
        forward(ctx, query)
    }
}

pub struct MotdHandler;

impl Handler for MotdHandler {
    fn handle(&self, ctx: &mut Context<'_>, _msg: &Message) -> HandlerResult {
        forward(ctx, InfoQuery::Motd)
    }
}
