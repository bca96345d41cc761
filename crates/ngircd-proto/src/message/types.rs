use std::str::FromStr;

use crate::error::ParseError;

use super::parser::ParsedLine;

/// An owned wire line.
///
/// Outbound lines are assembled with the builder methods:
///
/// ```
/// use ngircd_proto::Message;
///
/// let line = Message::new("NJOIN")
///     .with_prefix("services.example")
///     .arg("#help")
///     .trailing("@ChanServ");
/// assert_eq!(line.to_string(), ":services.example NJOIN #help :@ChanServ");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Source of the line (server name or nick), without the leading `:`.
    pub prefix: Option<String>,
    /// Command keyword or three digit numeric.
    pub command: String,
    /// Positional arguments, trailing argument included.
    pub args: Vec<String>,
    /// Whether the last argument is written in `:` form.
    pub trailing: bool,
}

impl Message {
    /// Start a line with no prefix and no arguments.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            prefix: None,
            command: command.into(),
            args: Vec::new(),
            trailing: false,
        }
    }

    /// Set the source prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Append a middle argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self.trailing = false;
        self
    }

    /// Append several middle arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self.trailing = false;
        self
    }

    /// Append the final argument in `:` form.
    #[must_use]
    pub fn trailing(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self.trailing = true;
        self
    }

    /// Argument `n`, if present.
    #[inline]
    pub fn param(&self, n: usize) -> Option<&str> {
        self.args.get(n).map(String::as_str)
    }

    /// The last argument, if any.
    pub fn last_arg(&self) -> Option<&str> {
        self.args.last().map(String::as_str)
    }

    /// Number of positional arguments.
    #[inline]
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// The nick part of a `nick!user@host` prefix, or the whole prefix.
    pub fn source_name(&self) -> Option<&str> {
        self.prefix
            .as_deref()
            .map(|p| p.split_once('!').map_or(p, |(nick, _)| nick))
    }
}

impl FromStr for Message {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim_matches(|c| c == ' ' || c == '\r' || c == '\n').is_empty() {
            return Err(ParseError::Empty);
        }

        let parsed = ParsedLine::parse(s).map_err(|position| ParseError::Invalid {
            input: s.to_owned(),
            position,
        })?;

        Ok(Message {
            prefix: parsed.prefix.map(str::to_owned),
            command: parsed.command.to_owned(),
            args: parsed.params.iter().map(|p| (*p).to_owned()).collect(),
            trailing: parsed.trailing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_tracks_trailing_on_last_argument() {
        let msg = Message::new("SERVER")
            .arg("services.example")
            .arg("1")
            .trailing("Example IRC Services");
        assert!(msg.trailing);
        assert_eq!(msg.arg_count(), 3);

        let msg = msg.arg("extra");
        assert!(!msg.trailing);
    }

    #[test]
    fn source_name_strips_user_and_host() {
        let msg: Message = ":alice!a@example.org PART #rust".parse().unwrap();
        assert_eq!(msg.source_name(), Some("alice"));

        let msg: Message = ":uplink.example PONG uplink.example".parse().unwrap();
        assert_eq!(msg.source_name(), Some("uplink.example"));
    }

    #[test]
    fn rejects_empty_lines() {
        assert_eq!("".parse::<Message>(), Err(ParseError::Empty));
        assert_eq!("\r\n".parse::<Message>(), Err(ParseError::Empty));
    }

    #[test]
    fn reports_invalid_position() {
        match "::: ???".parse::<Message>() {
            Err(ParseError::Invalid { position, .. }) => assert!(position > 0),
            other => panic!("expected invalid, got {other:?}"),
        }
    }
}
