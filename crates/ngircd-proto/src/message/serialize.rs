//! Encoding of [`Message`] back to wire form (without the CR LF terminator).

use std::fmt::{self, Display, Formatter};

use super::types::Message;

/// Cut an argument at its first CR or LF so it cannot start a second line.
fn single_line(arg: &str) -> &str {
    arg.find(['\r', '\n']).map_or(arg, |end| &arg[..end])
}

fn needs_colon(arg: &str) -> bool {
    arg.is_empty() || arg.contains(' ') || arg.starts_with(':')
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(ref prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }
        f.write_str(&self.command)?;

        let last = self.args.len().saturating_sub(1);
        for (i, arg) in self.args.iter().enumerate() {
            let arg = single_line(arg);
            if i == last && (self.trailing || needs_colon(arg)) {
                write!(f, " :{}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}
