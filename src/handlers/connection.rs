//! Link-level handlers: PASS, ERROR, PING, PONG.

use ngircd_proto::Message;
use tracing::{debug, info};

use super::{Context, Handler, Source, arg};
use crate::error::{HandlerError, HandlerResult};
use crate::protocol::ngircd::lines;

/// PASS from the uplink; a mismatch shuts the process down.
pub struct PassHandler;

impl Handler for PassHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let password = arg(msg, 0)?;
        if password != ctx.session.link.receive_password
            && ctx.session.request_shutdown()
        {
            info!(uplink = %ctx.session.link.name, "Password mismatch from uplink; aborting");
        }
        Ok(())
    }
}

pub struct ErrorHandler;

impl Handler for ErrorHandler {
    fn handle(&self, _ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        info!(error = %arg(msg, 0)?, "Error from server");
        Ok(())
    }
}

pub struct PingHandler;

impl Handler for PingHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let token = arg(msg, 0)?;
        let reply = lines::pong(ctx.session.me(), token);
        ctx.session.send(reply);
        Ok(())
    }
}

/// PONG marks end-of-burst for its source; from the uplink it also ends our
/// own synchronization.
pub struct PongHandler;

impl Handler for PongHandler {
    fn handle(&self, ctx: &mut Context<'_>, _msg: &Message) -> HandlerResult {
        let Source::Server(name) = &ctx.source else {
            return Err(HandlerError::WrongSource("a non-server"));
        };
        let name = name.clone();

        let newly_eob = ctx
            .session
            .network
            .server_mut(&name)
            .is_some_and(|s| s.mark_eob());
        if newly_eob {
            debug!(server = %name, "End of burst");
            if let Some(server) = ctx.session.network.server(&name) {
                ctx.hooks.handle_eob(server);
            }
        }

        ctx.session.uplink_pong = Some(ctx.session.now());

        if ctx.session.is_uplink(&name) {
            if let Some(report) = ctx.session.burst.finish() {
                let notice = report.notice();
                info!(uplink = %name, "{notice}");
                ctx.protocol.wallops_sts(ctx.session, &notice);
            }
        }
        Ok(())
    }
}
