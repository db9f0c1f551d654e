//! Scripted fly-through sequencing.
//!
//! A fly-through is an ordered list of [`FlyStep`]s executed strictly one
//! at a time by the [`FlySequencer`]:
//!
//! ```text
//! steps ──► FlySequencer ──► CameraControl (fly_to / fit_bounds)
//!                │                 │
//!                │◄── MovementFinished (one-shot, per command)
//!                │
//!                └──► LayerRegistry (fit target resolution, at step time)
//! ```
//!
//! Each step may delay before acting; `Fly` and `Fit` steps then wait for
//! the camera movement to physically end before the next step starts, so
//! no two camera commands from the same run are ever in flight at once.
//! `Fit` steps that resolve to a missing or not-yet-loaded layer are
//! skipped silently and never retried. Cancellation is cooperative and
//! level-triggered via a [`CancellationToken`](tokio_util::sync::CancellationToken)
//! checked at every suspension boundary; an in-flight camera animation is
//! not aborted, only progression to the next step.
//!
//! # Example
//!
//! ```ignore
//! use maptour::sequence::{FlySequencer, FlyStep};
//!
//! let sequencer = FlySequencer::new(camera, registry);
//! let handle = sequencer.spawn(steps);
//! // ... later, on unmount:
//! handle.cancel();
//! ```

mod config;
mod handle;
mod run;
mod step;

pub use config::SequencerConfig;
pub use handle::SequenceHandle;
pub use run::{FlySequencer, RunOutcome, RunSummary};
pub use step::{FlyStep, TourSpec, TourSpecError};
