//! Burst tracking for the uplink session.
//!
//! After our handshake the uplink floods us with its full state. ngIRCd has
//! no end-of-burst marker, so the handshake handler sends a ping right after
//! the uplink's SERVER line; the matching PONG can only arrive once the burst
//! ahead of it has been read.
//!
//! ```text
//! Idle --server_login--> Bursting --uplink PONG--> Synchronized
//!   ^                                                    |
//!   +------------------- link closed --------------------+
//! ```

use std::time::{Duration, Instant};

/// Where the uplink session is in its initial synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Idle,
    Bursting,
    Synchronized,
}

/// Burst state plus the process-wide jupe counter.
#[derive(Debug)]
pub struct BurstContext {
    state: SyncState,
    started: Option<Instant>,
    jupe_counter: u32,
}

impl Default for BurstContext {
    fn default() -> Self {
        Self::new()
    }
}

impl BurstContext {
    pub fn new() -> Self {
        Self {
            state: SyncState::Idle,
            started: None,
            jupe_counter: 1,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn is_bursting(&self) -> bool {
        self.state == SyncState::Bursting
    }

    /// Enter `Bursting` and start the timer.
    pub fn begin(&mut self) {
        self.begin_at(Some(Instant::now()));
    }

    /// Enter `Bursting` with an explicit (or no) start instant.
    pub fn begin_at(&mut self, started: Option<Instant>) {
        self.state = SyncState::Bursting;
        self.started = started;
    }

    /// Leave `Bursting` for `Synchronized`.
    ///
    /// Returns `None` unless a burst was in progress.
    pub fn finish(&mut self) -> Option<BurstReport> {
        if self.state != SyncState::Bursting {
            return None;
        }
        self.state = SyncState::Synchronized;
        Some(BurstReport {
            elapsed: self.started.take().map(|t| t.elapsed()),
        })
    }

    /// Link closed; the jupe counter survives.
    pub fn reset(&mut self) {
        self.state = SyncState::Idle;
        self.started = None;
    }

    /// Pre-incremented token for the next jupe; the first one is 2.
    pub fn next_jupe_token(&mut self) -> u32 {
        self.jupe_counter += 1;
        self.jupe_counter
    }
}

/// Outcome of a finished burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstReport {
    pub elapsed: Option<Duration>,
}

impl BurstReport {
    /// Operator-facing completion notice.
    pub fn notice(&self) -> String {
        match self.elapsed {
            Some(elapsed) => {
                let (amount, unit) = format_elapsed(elapsed);
                format!("Finished synchronizing with network in {amount} {unit}.")
            }
            None => "Finished synchronizing with network.".to_string(),
        }
    }
}

/// Whole seconds from one second up, milliseconds below.
pub fn format_elapsed(elapsed: Duration) -> (u128, &'static str) {
    let ms = elapsed.as_millis();
    if ms >= 1000 {
        (ms / 1000, "s")
    } else {
        (ms, "ms")
    }
}
