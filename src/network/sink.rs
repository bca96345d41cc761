//! Line sinks.

use std::cell::RefCell;
use std::rc::Rc;

use ngircd_proto::Message;
use tokio::sync::mpsc;

use crate::error::SendError;

/// Raw line transmission towards the uplink.
pub trait LineSink {
    fn send(&mut self, msg: Message) -> Result<(), SendError>;
}

/// Hand lines to a writer task.
impl LineSink for mpsc::UnboundedSender<Message> {
    fn send(&mut self, msg: Message) -> Result<(), SendError> {
        mpsc::UnboundedSender::send(self, msg).map_err(|_| SendError::Closed)
    }
}

impl LineSink for Vec<Message> {
    fn send(&mut self, msg: Message) -> Result<(), SendError> {
        self.push(msg);
        Ok(())
    }
}

/// Shared in-memory sink; clones see the same buffer.
#[derive(Debug, Clone, Default)]
pub struct Capture {
    lines: Rc<RefCell<Vec<Message>>>,
}

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything captured so far, serialized.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().iter().map(ToString::to_string).collect()
    }

    /// Drain and return the captured lines.
    pub fn take(&self) -> Vec<String> {
        self.lines
            .borrow_mut()
            .drain(..)
            .map(|m| m.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }
}

impl LineSink for Capture {
    fn send(&mut self, msg: Message) -> Result<(), SendError> {
        self.lines.borrow_mut().push(msg);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_clones_share_buffer() {
        let capture = Capture::new();
        let mut sink: Box<dyn LineSink> = Box::new(capture.clone());
        sink.send(Message::new("PING").trailing("hub")).unwrap();
        assert_eq!(capture.lines(), vec!["PING :hub"]);
        assert_eq!(capture.take(), vec!["PING :hub"]);
        assert!(capture.is_empty());
    }

    #[test]
    fn closed_channel_reports_closed() {
        let (mut tx, rx) = mpsc::unbounded_channel::<Message>();
        drop(rx);
        assert_eq!(
            LineSink::send(&mut tx, Message::new("PING")),
            Err(SendError::Closed)
        );
    }
}
