//! Atomic counters for sequence runs.

use std::sync::atomic::{AtomicU64, Ordering};

use super::TelemetrySnapshot;

/// Cumulative counters across all runs of a sequencer (or a whole
/// session, when shared).
///
/// All counters are relaxed atomics: they feed dashboards and assertions,
/// not control flow, and recording must stay cheap on the run's hot path.
#[derive(Debug, Default)]
pub struct SequenceMetrics {
    runs_started: AtomicU64,
    runs_completed: AtomicU64,
    runs_cancelled: AtomicU64,
    steps_executed: AtomicU64,
    steps_skipped: AtomicU64,
    commands_issued: AtomicU64,
}

impl SequenceMetrics {
    /// Create zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// A run entered its step loop.
    pub fn run_started(&self) {
        self.runs_started.fetch_add(1, Ordering::Relaxed);
    }

    /// A run executed every step.
    pub fn run_completed(&self) {
        self.runs_completed.fetch_add(1, Ordering::Relaxed);
    }

    /// A run observed cancellation and stopped.
    pub fn run_cancelled(&self) {
        self.runs_cancelled.fetch_add(1, Ordering::Relaxed);
    }

    /// A step ran to completion (waits and skipped fits included).
    pub fn step_executed(&self) {
        self.steps_executed.fetch_add(1, Ordering::Relaxed);
    }

    /// A fit step was skipped (layer missing or boundless).
    pub fn step_skipped(&self) {
        self.steps_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// A camera command went out.
    pub fn command_issued(&self) {
        self.commands_issued.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time copy of all counters.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            runs_started: self.runs_started.load(Ordering::Relaxed),
            runs_completed: self.runs_completed.load(Ordering::Relaxed),
            runs_cancelled: self.runs_cancelled.load(Ordering::Relaxed),
            steps_executed: self.steps_executed.load(Ordering::Relaxed),
            steps_skipped: self.steps_skipped.load(Ordering::Relaxed),
            commands_issued: self.commands_issued.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let snapshot = SequenceMetrics::new().snapshot();
        assert_eq!(snapshot.runs_started, 0);
        assert_eq!(snapshot.commands_issued, 0);
    }

    #[test]
    fn test_counters_accumulate() {
        let metrics = SequenceMetrics::new();
        metrics.run_started();
        metrics.command_issued();
        metrics.command_issued();
        metrics.step_executed();
        metrics.step_skipped();
        metrics.run_completed();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.runs_started, 1);
        assert_eq!(snapshot.runs_completed, 1);
        assert_eq!(snapshot.runs_cancelled, 0);
        assert_eq!(snapshot.commands_issued, 2);
        assert_eq!(snapshot.steps_executed, 1);
        assert_eq!(snapshot.steps_skipped, 1);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let metrics = SequenceMetrics::new();
        let before = metrics.snapshot();
        metrics.run_started();
        assert_eq!(before.runs_started, 0);
        assert_eq!(metrics.snapshot().runs_started, 1);
    }
}
