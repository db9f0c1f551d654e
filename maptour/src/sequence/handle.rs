//! Run context handle for a spawned fly-through.

use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::sequence::RunSummary;

/// Handle to one spawned sequence run.
///
/// The handle owns the run's cancellation token. Cancellation is
/// level-triggered and monotonic: once set it is never unset, and the run
/// observes it at its next suspension boundary. Dropping the handle also
/// cancels the run, so unmounting the owning view cannot leave a live
/// fly-through behind.
#[derive(Debug)]
pub struct SequenceHandle {
    cancel: CancellationToken,
    join: JoinHandle<RunSummary>,
    _guard: DropGuard,
}

impl SequenceHandle {
    pub(crate) fn new(cancel: CancellationToken, join: JoinHandle<RunSummary>) -> Self {
        let guard = cancel.clone().drop_guard();
        Self {
            cancel,
            join,
            _guard: guard,
        }
    }

    /// Cancel the run.
    ///
    /// Cooperative: a camera animation already in flight is not aborted,
    /// only the run's progression to the next step. Safe to call more
    /// than once.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Whether the run's task has terminated.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the run to terminate and return its summary.
    pub async fn join(self) -> RunSummary {
        let Self { join, _guard, .. } = self;
        // A run never panics by design; a torn-down task reads as cancelled.
        join.await.unwrap_or_else(|_| RunSummary::cancelled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::camera::{CameraControl, FitOptions, MoveOptions, MovementFinished};
    use crate::geo::{GeoBounds, LatLng};
    use crate::layer::LayerRegistry;
    use crate::sequence::{FlySequencer, FlyStep, RunOutcome};

    struct InstantCamera;

    impl CameraControl for InstantCamera {
        fn fly_to(&self, _: LatLng, _: f64, _: MoveOptions) -> MovementFinished {
            MovementFinished::ready()
        }

        fn fit_bounds(&self, _: GeoBounds, _: FitOptions) -> MovementFinished {
            MovementFinished::ready()
        }

        fn zoom(&self) -> f64 {
            3.0
        }
    }

    fn long_wait() -> Vec<FlyStep> {
        vec![FlyStep::Wait { delay_ms: 60_000 }]
    }

    #[tokio::test]
    async fn test_spawned_run_completes() {
        let sequencer = FlySequencer::new(Arc::new(InstantCamera), LayerRegistry::new());
        let handle = sequencer.spawn(vec![FlyStep::Wait { delay_ms: 1 }]);

        let summary = tokio::time::timeout(Duration::from_secs(1), handle.join())
            .await
            .unwrap();
        assert_eq!(summary.outcome, RunOutcome::Completed);
    }

    #[tokio::test]
    async fn test_cancel_stops_run() {
        let sequencer = FlySequencer::new(Arc::new(InstantCamera), LayerRegistry::new());
        let handle = sequencer.spawn(long_wait());

        handle.cancel();
        assert!(handle.is_cancelled());

        let summary = tokio::time::timeout(Duration::from_secs(1), handle.join())
            .await
            .unwrap();
        assert_eq!(summary.outcome, RunOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_drop_cancels_run() {
        let sequencer = FlySequencer::new(Arc::new(InstantCamera), LayerRegistry::new());
        let handle = sequencer.spawn(long_wait());
        let token = handle.cancel.clone();

        drop(handle);
        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .expect("dropping the handle cancels the run token");
    }

    #[tokio::test]
    async fn test_independent_runs_have_independent_tokens() {
        let sequencer = FlySequencer::new(Arc::new(InstantCamera), LayerRegistry::new());
        let first = sequencer.spawn(long_wait());
        let second = sequencer.spawn(long_wait());

        first.cancel();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        second.cancel();
    }
}
