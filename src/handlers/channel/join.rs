//! JOIN command handler.
//!
//! ngIRCd sends `JOIN <channel>[\x07<modes>][,...]`, with the member's
//! status letters appended after a BEL. `JOIN 0` parts the user from every
//! channel.

use ngircd_proto::Message;
use tracing::debug;

use super::super::{Context, Handler, arg};
use super::find_or_create;
use crate::error::HandlerResult;
use crate::modes::StatusModes;
use crate::services::channels_of;

const STATUS_SEPARATOR: char = '\x07';

pub struct JoinHandler;

impl Handler for JoinHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let nick = ctx.source_user()?.to_string();
        let targets = arg(msg, 0)?;

        if targets.starts_with('0') {
            for channel in channels_of(ctx.session, &nick) {
                ctx.session.network.remove_member(&channel, &nick)?;
            }
            return Ok(());
        }

        for token in targets.split(',').filter(|t| !t.is_empty()) {
            let (name, letters) = token
                .split_once(STATUS_SEPARATOR)
                .unwrap_or((token, ""));

            let now = ctx.session.now();
            let check_mode_lock = !ctx.session.burst.is_bursting();
            if let Err(e) = find_or_create(ctx, name, now, check_mode_lock) {
                debug!(channel = %name, error = %e, "Ignoring JOIN");
                continue;
            }

            let status = letters
                .chars()
                .filter_map(|c| ctx.protocol.mode_tables().status.flag_for(c))
                .fold(StatusModes::empty(), |acc, flag| acc | flag);
            ctx.session.network.add_member(name, &nick, status)?;
        }
        Ok(())
    }
}
