//! Server introduction and removal: SERVER, SQUIT.

use ngircd_proto::{Message, irc_eq};
use tracing::{debug, info, warn};

use super::{Context, Handler, Source, arg};
use crate::error::{HandlerError, HandlerResult};
use crate::protocol::ngircd::lines;
use crate::state::Server;

/// `SERVER <name> <hops> [<token>] :<description>`
///
/// From an unregistered link this is the uplink itself; we answer with a
/// self-addressed ping whose PONG marks the end of its burst. Remote servers
/// get pinged by name for the same reason.
pub struct ServerHandler;

impl Handler for ServerHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let name = arg(msg, 0)?;
        let hops = arg(msg, 1)?.parse::<u32>().unwrap_or(1);
        let description = msg.last_arg().unwrap_or_default();

        match &ctx.source {
            Source::Unregistered => {
                ctx.session
                    .network
                    .add_server(Server::new(name, description, hops, None))?;
                if !irc_eq(name, &ctx.session.link.name) {
                    warn!(expected = %ctx.session.link.name, got = %name, "Uplink name differs from configuration");
                }
                ctx.session.uplink_server = Some(name.to_string());
                info!(uplink = %name, hops, "Uplink registered");
                ctx.protocol.ping_sts(ctx.session);
            }
            Source::Server(parent) => {
                let parent = parent.clone();
                ctx.session
                    .network
                    .add_server(Server::new(name, description, hops, Some(parent.clone())))?;
                debug!(server = %name, uplink = %parent, hops, "New server");
                let ping = lines::ping(ctx.session.me(), name);
                ctx.session.send(ping);
            }
            Source::User(_) => return Err(HandlerError::WrongSource("a user")),
        }
        Ok(())
    }
}

/// `SQUIT <server> :<reason>`
pub struct SquitHandler;

impl Handler for SquitHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let name = arg(msg, 0)?;
        let reason = msg.param(1).unwrap_or_default();

        if irc_eq(name, ctx.session.me()) {
            info!(reason = %reason, "Uplink squit us");
            return Ok(());
        }

        if ctx.session.is_uplink(name) {
            info!(uplink = %name, reason = %reason, "Uplink left");
            ctx.session.reset();
            return Ok(());
        }

        if ctx.session.network.server(name).is_none() {
            return Err(HandlerError::NoSuchServer(name.to_string()));
        }
        let split = ctx.session.network.delete_server(name)?;
        info!(
            server = %name,
            reason = %reason,
            servers = split.servers.len(),
            users = split.users.len(),
            "Server split"
        );
        Ok(())
    }
}
