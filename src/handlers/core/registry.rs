//! Command handler registry and dispatch.
//!
//! The `Registry` maps each command to its handler, minimum argument count
//! and accepted source classes, and counts how often each one is used.
//! Validation happens here so handlers can assume their preconditions.

use std::cell::Cell;
use std::collections::HashMap;

use ngircd_proto::Message;
use tracing::{Level, debug, span, trace};

use super::context::{Context, Handler, Source, SourceKinds};
use crate::protocol::Protocol;
use crate::services::ServicesHooks;
use crate::state::Session;

struct Command {
    handler: Box<dyn Handler>,
    min_args: usize,
    sources: SourceKinds,
    uses: Cell<u64>,
}

/// Registry of command handlers.
#[derive(Default)]
pub struct Registry {
    commands: HashMap<&'static str, Command>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table a dialect declares.
    pub fn for_protocol(protocol: &dyn Protocol) -> Self {
        let mut registry = Self::new();
        protocol.register_commands(&mut registry);
        registry
    }

    /// Add (or replace) a command.
    pub fn register(
        &mut self,
        command: &'static str,
        handler: impl Handler + 'static,
        min_args: usize,
        sources: SourceKinds,
    ) {
        self.commands.insert(
            command,
            Command {
                handler: Box::new(handler),
                min_args,
                sources,
                uses: Cell::new(0),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Minimum argument count and accepted sources for `command`.
    pub fn lookup(&self, command: &str) -> Option<(usize, SourceKinds)> {
        self.commands
            .get(command.to_ascii_uppercase().as_str())
            .map(|c| (c.min_args, c.sources))
    }

    /// Command usage statistics, most used first, unused omitted.
    pub fn command_stats(&self) -> Vec<(&'static str, u64)> {
        let mut stats: Vec<_> = self
            .commands
            .iter()
            .map(|(name, cmd)| (*name, cmd.uses.get()))
            .filter(|(_, count)| *count > 0)
            .collect();
        stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        stats
    }

    /// Validate and route one inbound line.
    ///
    /// Nothing is returned: every rejection and handler error is logged at
    /// debug level and the line is dropped.
    pub fn dispatch(
        &self,
        protocol: &dyn Protocol,
        session: &mut Session,
        hooks: &mut dyn ServicesHooks,
        msg: &Message,
    ) {
        if session.shutdown_requested() {
            debug!(command = %msg.command, "Shutdown pending, dropping line");
            return;
        }

        let name = msg.command.to_ascii_uppercase();
        let Some(command) = self.commands.get(name.as_str()) else {
            trace!(command = %name, "Ignoring unknown command");
            return;
        };

        let Some(source) = resolve_source(session, msg) else {
            debug!(command = %name, prefix = ?msg.prefix, "Dropping line from unknown source");
            return;
        };

        if !command.sources.contains(source.kind()) {
            debug!(command = %name, source = %source, "Command not accepted from this source");
            return;
        }

        if msg.arg_count() < command.min_args {
            debug!(
                command = %name,
                source = %source,
                args = msg.arg_count(),
                min = command.min_args,
                "Not enough parameters"
            );
            return;
        }

        command.uses.set(command.uses.get() + 1);

        let span = span!(Level::DEBUG, "link.command", command = %name, source = %source);
        let _enter = span.enter();

        let mut ctx = Context {
            protocol,
            session,
            hooks,
            source,
        };
        if let Err(e) = command.handler.handle(&mut ctx, msg) {
            debug!(error = %e, code = e.error_code(), "Command dropped");
        }
    }
}

/// Work out who sent `msg`.
///
/// No prefix means the directly linked server (or an unregistered link).
/// A prefix must name a known server or user; before registration any
/// prefix is taken as the unregistered link itself.
fn resolve_source(session: &Session, msg: &Message) -> Option<Source> {
    let Some(name) = msg.source_name() else {
        return Some(match &session.uplink_server {
            Some(uplink) => Source::Server(uplink.clone()),
            None => Source::Unregistered,
        });
    };

    if let Some(server) = session.network.server(name) {
        return Some(Source::Server(server.name.clone()));
    }
    if let Some(user) = session.network.user(name) {
        return Some(Source::User(user.nick.clone()));
    }
    if !session.is_registered() {
        return Some(Source::Unregistered);
    }
    None
}
