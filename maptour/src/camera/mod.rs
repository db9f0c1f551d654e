//! Camera control surface boundary.
//!
//! The map engine owns the camera; this crate only issues commands to it
//! and waits for the resulting movement to end. [`CameraControl`] is the
//! seam: the real implementation is an adapter over the external engine,
//! tests use a mock that records commands.
//!
//! # Movement-end notification
//!
//! Each issued command returns a [`MovementFinished`] handle backed by a
//! `tokio::sync::oneshot` channel. The handle resolves exactly once when
//! the engine reports the movement has ended, and dropping it detaches the
//! listener - there is no subscribe/unsubscribe pair to keep balanced, so
//! a cancelled run cannot leak a listener or receive a stale notification.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::geo::{GeoBounds, LatLng, Padding};

/// Options for a fly-to command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOptions {
    /// Whether the movement is animated.
    pub animate: bool,
    /// Animation duration in seconds.
    pub duration_secs: f64,
}

/// Options for a fit-bounds command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Pixel padding around the bounds.
    pub padding: Padding,
    /// Whether the movement is animated.
    pub animate: bool,
    /// Animation duration in seconds.
    pub duration_secs: f64,
}

/// Sender half of a movement-end notification.
///
/// Held by the camera adapter; fired once when the engine signals that the
/// movement triggered by the corresponding command has ended. Dropping it
/// without firing also resolves the waiting side (a torn-down camera must
/// not wedge the sequencer).
#[derive(Debug)]
pub struct MovementSignal {
    tx: oneshot::Sender<()>,
}

impl MovementSignal {
    /// Signal that the movement has ended.
    pub fn movement_ended(self) {
        let _ = self.tx.send(());
    }

    /// Whether the waiting side has gone away (run cancelled or dropped).
    pub fn is_abandoned(&self) -> bool {
        self.tx.is_closed()
    }
}

/// One-shot completion handle for an issued camera command.
///
/// Resolves when the camera surface reports the movement has ended, or
/// when the signalling side is dropped. Await it directly; dropping it
/// instead (the cancellation path) removes the listener.
#[derive(Debug)]
pub struct MovementFinished {
    rx: oneshot::Receiver<()>,
}

impl MovementFinished {
    /// Create a linked signal/handle pair.
    ///
    /// Camera adapters call this per issued command, keep the
    /// [`MovementSignal`], and return the handle to the caller.
    pub fn channel() -> (MovementSignal, MovementFinished) {
        let (tx, rx) = oneshot::channel();
        (MovementSignal { tx }, MovementFinished { rx })
    }

    /// A handle that resolves immediately.
    ///
    /// For camera surfaces that execute a command without animation.
    pub fn ready() -> MovementFinished {
        let (signal, finished) = Self::channel();
        signal.movement_ended();
        finished
    }
}

impl Future for MovementFinished {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // A closed channel counts as "movement over": the camera went away.
        Pin::new(&mut self.rx).poll(cx).map(|_| ())
    }
}

/// Control surface of the external map camera.
///
/// One logical camera per map session. Implementations adapt the engine's
/// own event model (e.g. a `moveend` event subscription) into the one-shot
/// [`MovementFinished`] handle, firing it exactly once per issued command.
pub trait CameraControl: Send + Sync {
    /// Issue an animated fly-to command targeting `center` at `zoom`.
    fn fly_to(&self, center: LatLng, zoom: f64, opts: MoveOptions) -> MovementFinished;

    /// Issue a command fitting the view to `bounds`.
    fn fit_bounds(&self, bounds: GeoBounds, opts: FitOptions) -> MovementFinished;

    /// Current zoom level of the camera.
    fn zoom(&self) -> f64;
}
