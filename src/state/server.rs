//! Linked server records.

/// A server on the far side of the link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    pub name: String,
    pub description: String,
    /// Hop distance from us.
    pub hops: u32,
    /// Server this one was introduced by; `None` for the direct uplink.
    pub uplink: Option<String>,
    /// Still sending its initial state.
    pub bursting: bool,
    /// Answered our end-of-burst ping.
    pub eob: bool,
}

impl Server {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        hops: u32,
        uplink: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            hops,
            uplink,
            bursting: true,
            eob: false,
        }
    }

    /// Mark end-of-burst. Returns `false` if it was already marked.
    pub fn mark_eob(&mut self) -> bool {
        if self.eob {
            return false;
        }
        self.eob = true;
        self.bursting = false;
        true
    }
}
