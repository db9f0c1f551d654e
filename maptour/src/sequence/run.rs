//! The fly sequencer and its per-run execution loop.

use std::sync::Arc;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::camera::{CameraControl, FitOptions, MoveOptions, MovementFinished};
use crate::layer::LayerRegistry;
use crate::sequence::{FlyStep, SequenceHandle, SequencerConfig};
use crate::telemetry::SequenceMetrics;

/// How a sequence run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every step was executed (or skipped per policy).
    Completed,
    /// The run's cancellation token fired at a suspension boundary.
    Cancelled,
}

/// Accounting for one sequence run.
///
/// Sequence runs never fail: anomalies degrade to skipped steps or a clean
/// stop, and the summary records what actually happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Terminal state of the run.
    pub outcome: RunOutcome,
    /// Steps that ran to completion (including waits and skipped fits).
    pub steps_executed: usize,
    /// Camera commands issued (fly-to plus resolvable fit-bounds).
    pub commands_issued: usize,
    /// Fit steps skipped because their layer was missing or boundless.
    pub steps_skipped: usize,
}

impl RunSummary {
    fn new() -> Self {
        Self {
            outcome: RunOutcome::Completed,
            steps_executed: 0,
            commands_issued: 0,
            steps_skipped: 0,
        }
    }

    pub(crate) fn cancelled() -> Self {
        Self {
            outcome: RunOutcome::Cancelled,
            ..Self::new()
        }
    }
}

/// Executes fly-through step lists against a camera control surface.
///
/// The sequencer holds the camera and the layer registry it resolves fit
/// targets through; both are injected at construction. One sequencer can
/// execute many runs, but each run gets its own cancellation token and no
/// state is shared between runs other than the registry itself.
pub struct FlySequencer<C: CameraControl> {
    camera: Arc<C>,
    registry: LayerRegistry,
    config: SequencerConfig,
    metrics: Arc<SequenceMetrics>,
}

impl<C: CameraControl> Clone for FlySequencer<C> {
    fn clone(&self) -> Self {
        Self {
            camera: Arc::clone(&self.camera),
            registry: self.registry.clone(),
            config: self.config.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

impl<C: CameraControl> FlySequencer<C> {
    /// Create a sequencer over a camera and a layer registry.
    pub fn new(camera: Arc<C>, registry: LayerRegistry) -> Self {
        Self {
            camera,
            registry,
            config: SequencerConfig::default(),
            metrics: Arc::new(SequenceMetrics::new()),
        }
    }

    /// Replace the default step configuration.
    pub fn with_config(mut self, config: SequencerConfig) -> Self {
        self.config = config;
        self
    }

    /// Share a metrics instance (e.g. the session-wide one).
    pub fn with_metrics(mut self, metrics: Arc<SequenceMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Metrics recorded by this sequencer's runs.
    pub fn metrics(&self) -> &Arc<SequenceMetrics> {
        &self.metrics
    }

    /// Execute `steps` strictly in order until done or cancelled.
    ///
    /// Cancellation is checked at every suspension boundary: before each
    /// step, across each delay, and while waiting for a movement to end.
    /// Once the token fires no further camera command is issued; an
    /// animation already in flight is left to the camera surface.
    ///
    /// This never returns an error. Fit steps whose layer cannot be
    /// resolved to valid bounds at execution time are skipped silently
    /// and are not retried, even if the layer registers later.
    pub async fn run(&self, steps: &[FlyStep], cancel: CancellationToken) -> RunSummary {
        self.metrics.run_started();
        let mut summary = RunSummary::new();

        for (index, step) in steps.iter().enumerate() {
            if cancel.is_cancelled() {
                return self.finish_cancelled(summary, index);
            }

            // Delay first; a cancellation that lands during the delay must
            // abort before any camera command for this step is issued.
            if let Some(delay) = step.delay() {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        return self.finish_cancelled(summary, index);
                    }
                    _ = sleep(delay) => {}
                }
                if cancel.is_cancelled() {
                    return self.finish_cancelled(summary, index);
                }
            }

            match step {
                FlyStep::Wait { delay_ms } => {
                    debug!(step = index, delay_ms, "wait step elapsed");
                }

                FlyStep::Fly {
                    center,
                    zoom,
                    duration_secs,
                    ..
                } => {
                    let zoom = zoom.unwrap_or_else(|| self.camera.zoom());
                    let opts = MoveOptions {
                        animate: true,
                        duration_secs: duration_secs
                            .unwrap_or(self.config.default_duration_secs),
                    };
                    debug!(step = index, center = %center, zoom, "issuing fly-to");
                    let finished = self.camera.fly_to(*center, zoom, opts);
                    summary.commands_issued += 1;
                    self.metrics.command_issued();

                    if !Self::await_movement(finished, &cancel).await {
                        return self.finish_cancelled(summary, index);
                    }
                }

                FlyStep::Fit {
                    layer,
                    padding,
                    duration_secs,
                    ..
                } => {
                    // Resolve at execution time, not at run start: a layer
                    // registered after the run began is still reachable if
                    // its step comes later.
                    let bounds = self
                        .registry
                        .get(layer)
                        .and_then(|handle| handle.bounds())
                        .filter(|bounds| bounds.is_valid());

                    let Some(bounds) = bounds else {
                        debug!(
                            step = index,
                            layer = %layer,
                            "layer unresolved or boundless, skipping fit step"
                        );
                        summary.steps_skipped += 1;
                        summary.steps_executed += 1;
                        self.metrics.step_skipped();
                        self.metrics.step_executed();
                        continue;
                    };

                    let opts = FitOptions {
                        padding: padding.unwrap_or(self.config.default_padding),
                        animate: true,
                        duration_secs: duration_secs
                            .unwrap_or(self.config.default_duration_secs),
                    };
                    debug!(step = index, layer = %layer, "issuing fit-bounds");
                    let finished = self.camera.fit_bounds(bounds, opts);
                    summary.commands_issued += 1;
                    self.metrics.command_issued();

                    if !Self::await_movement(finished, &cancel).await {
                        return self.finish_cancelled(summary, index);
                    }
                }
            }

            summary.steps_executed += 1;
            self.metrics.step_executed();
        }

        info!(
            steps = summary.steps_executed,
            commands = summary.commands_issued,
            skipped = summary.steps_skipped,
            "fly-through completed"
        );
        self.metrics.run_completed();
        summary
    }

    /// Suspend until the movement ends or the run is cancelled.
    ///
    /// Returns false on cancellation. The select drops `finished` on that
    /// path, which detaches the movement-end listener, so a stale
    /// notification can never fire into a cancelled run.
    async fn await_movement(finished: MovementFinished, cancel: &CancellationToken) -> bool {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => false,
            _ = finished => true,
        }
    }

    fn finish_cancelled(&self, mut summary: RunSummary, at_step: usize) -> RunSummary {
        debug!(step = at_step, "fly-through cancelled");
        summary.outcome = RunOutcome::Cancelled;
        self.metrics.run_cancelled();
        summary
    }
}

impl<C: CameraControl + 'static> FlySequencer<C> {
    /// Start a fresh run on its own task with its own cancellation token.
    ///
    /// The returned [`SequenceHandle`] is the run context: it cancels the
    /// run explicitly via [`SequenceHandle::cancel`] or implicitly when
    /// dropped. Spawning again creates an independent run; a previously
    /// cancelled context stays cancelled and inert.
    pub fn spawn(&self, steps: Vec<FlyStep>) -> SequenceHandle {
        let cancel = CancellationToken::new();
        let sequencer = self.clone();
        let token = cancel.clone();
        let join = tokio::spawn(async move { sequencer.run(&steps, token).await });
        SequenceHandle::new(cancel, join)
    }
}
