//! Point-in-time telemetry snapshot.

/// Plain copy of all [`SequenceMetrics`](super::SequenceMetrics) counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TelemetrySnapshot {
    /// Runs that entered their step loop.
    pub runs_started: u64,
    /// Runs that executed every step.
    pub runs_completed: u64,
    /// Runs that stopped at a cancellation boundary.
    pub runs_cancelled: u64,
    /// Steps that ran to completion.
    pub steps_executed: u64,
    /// Fit steps skipped for unresolved or boundless layers.
    pub steps_skipped: u64,
    /// Camera commands issued.
    pub commands_issued: u64,
}

impl TelemetrySnapshot {
    /// Runs still in flight at snapshot time.
    pub fn runs_active(&self) -> u64 {
        self.runs_started
            .saturating_sub(self.runs_completed + self.runs_cancelled)
    }
}
