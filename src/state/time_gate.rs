//! Submission window computation for the configured fixture.

use std::time::{Duration, SystemTime};

/// How long before kickoff the submission window closes.
pub const SUBMISSION_CUTOFF: Duration = Duration::from_secs(5 * 60);

/// Interval at which the background task re-evaluates the gate.
pub const GATE_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Whether plays can still be entered for the fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    /// The window is open; score entry is allowed.
    Open,
    /// The cutoff has passed; no further score entry this cycle.
    Closed,
}

/// Computes the submission window against a fixed kickoff instant.
///
/// The gate itself is stateless; the one-way open-to-closed behavior comes
/// from the cutoff never moving, so once an evaluation reports
/// [`GateStatus::Closed`] every later evaluation does too.
#[derive(Debug, Clone, Copy)]
pub struct TimeGate {
    match_start: SystemTime,
}

impl TimeGate {
    /// Build a gate for a match starting at `match_start`.
    pub fn new(match_start: SystemTime) -> Self {
        Self { match_start }
    }

    /// Kickoff instant of the fixture this gate guards.
    pub fn match_start(&self) -> SystemTime {
        self.match_start
    }

    /// Instant at which the window closes. Reaching it counts as closed.
    pub fn cutoff(&self) -> SystemTime {
        self.match_start - SUBMISSION_CUTOFF
    }

    /// Evaluate the window against `now`.
    pub fn evaluate(&self, now: SystemTime) -> GateStatus {
        if now < self.cutoff() {
            GateStatus::Open
        } else {
            GateStatus::Closed
        }
    }
}
