//! Sequencer telemetry for observability.
//!
//! Lock-free atomic counters recorded by [`FlySequencer`](crate::sequence::FlySequencer)
//! runs, with point-in-time snapshots for display:
//!
//! ```text
//! Sequence runs ─────► SequenceMetrics ─────► TelemetrySnapshot ─────► Views
//!                      (atomic counters)      (point-in-time copy)
//! ```

mod metrics;
mod snapshot;

pub use metrics::SequenceMetrics;
pub use snapshot::TelemetrySnapshot;
