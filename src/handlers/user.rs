//! User lifecycle handlers: NICK, QUIT, KILL, AWAY.

use ngircd_proto::{Message, irc_eq};
use tracing::{debug, info};

use super::{Context, Handler, Source, arg};
use crate::error::{HandlerError, HandlerResult};
use crate::modes::{UserModes, apply_user_modes};
use crate::protocol::ngircd::set_registered;
use crate::services;
use crate::state::User;

const KILL_DEFAULT_REASON: &str = "<No reason given>";

/// NICK in both of its forms.
///
/// Introduction (from a server):
/// `NICK <nick> <hops> <user> <host> <token> <modes> :<gecos>`
///
/// Change (from a user): `NICK <newnick> <ts>`
pub struct NickHandler;

impl NickHandler {
    fn introduce(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let server = ctx.source_server()?;
        let now = ctx.session.now();

        let mut user = User::new(
            arg(msg, 0)?,
            arg(msg, 2)?,
            arg(msg, 3)?,
            arg(msg, 6)?,
            server.as_str(),
            now,
        );
        apply_user_modes(&mut user, ctx.protocol.mode_tables(), arg(msg, 5)?);

        let user = ctx.session.network.add_user(user)?;
        debug!(nick = %user.nick, server = %user.server, "New user");
        ctx.hooks.handle_nickchange(user);
        Ok(())
    }

    fn rename(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let Source::User(old) = &ctx.source else {
            debug!(source = %ctx.source, "Server tried to change a nick");
            return Ok(());
        };
        let old = old.clone();
        let new = arg(msg, 0)?;
        let ts = msg
            .param(1)
            .and_then(|ts| ts.parse().ok())
            .unwrap_or_else(|| ctx.session.now());

        let real_change = !irc_eq(&old, new);
        ctx.session.network.change_nick(&old, new, ts)?;
        debug!(old = %old, new = %new, "Nick change");

        let user = ctx
            .session
            .network
            .user(new)
            .ok_or_else(|| HandlerError::NoSuchUser(new.to_string()))?;
        if real_change && !ctx.session.services.no_nick_ownership {
            let registered = ctx.hooks.should_reg_umode(user);
            set_registered(ctx.session, new, registered);
        }

        if let Some(user) = ctx.session.network.user(new) {
            ctx.hooks.handle_nickchange(user);
        }
        Ok(())
    }
}

impl Handler for NickHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        match msg.arg_count() {
            7 => Self::introduce(ctx, msg),
            2 => Self::rename(ctx, msg),
            n => {
                debug!(args = n, source = %ctx.source, "Unexpected NICK form");
                for (i, a) in msg.args.iter().enumerate() {
                    debug!(index = i, arg = %a, "NICK argument");
                }
                Ok(())
            }
        }
    }
}

/// `QUIT :<reason>`
pub struct QuitHandler;

impl Handler for QuitHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let nick = ctx.source_user()?.to_string();
        let reason = msg.param(0).unwrap_or_default();
        ctx.session.network.delete_user(&nick);
        debug!(nick = %nick, reason = %reason, "User quit");
        Ok(())
    }
}

/// `KILL <nick> :<path>`
///
/// Killed service clients are reintroduced instead of removed.
pub struct KillHandler;

impl Handler for KillHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let target = arg(msg, 0)?;
        let reason = msg.param(1).unwrap_or(KILL_DEFAULT_REASON);

        let nick = ctx
            .session
            .network
            .user(target)
            .map(|u| u.nick.clone())
            .ok_or_else(|| HandlerError::NoSuchUser(target.to_string()))?;

        if ctx.hooks.is_internal_client(&nick) {
            info!(nick = %nick, by = %ctx.source, reason = %reason, "Service client killed; reintroducing");
            services::reintroduce(ctx.protocol, ctx.session, &nick);
        } else {
            debug!(nick = %nick, by = %ctx.source, reason = %reason, "User killed");
            ctx.session.network.delete_user(&nick);
        }
        Ok(())
    }
}

/// `AWAY [:<message>]`; no or empty message returns the user.
pub struct AwayHandler;

impl Handler for AwayHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let nick = ctx.source_user()?.to_string();
        let message = msg.param(0).filter(|m| !m.is_empty());

        let user = ctx
            .session
            .network
            .user_mut(&nick)
            .ok_or_else(|| HandlerError::NoSuchUser(nick.clone()))?;
        user.modes.set(UserModes::AWAY, message.is_some());
        ctx.hooks.handle_away(user, message);
        Ok(())
    }
}
