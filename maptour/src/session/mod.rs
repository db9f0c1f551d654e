//! Map session facade.
//!
//! A [`MapSession`] is the single logical owner of everything one map view
//! needs: the layer registry, the mounted overlay layers, the sequencer,
//! and at most one active tour. Components receive the registry by
//! explicit injection from here; nothing in the crate reaches for ambient
//! state.
//!
//! # Example
//!
//! ```ignore
//! let mut session = MapSession::new(camera);
//! session.mount_layer("jacarei", source);
//!
//! let tour = TourSpec::from_json(include_str!("../tours/default.json"))?;
//! session.start_tour(tour.steps);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::camera::CameraControl;
use crate::layer::LayerRegistry;
use crate::overlay::{GeometrySource, OverlayLayer};
use crate::sequence::{FlySequencer, FlyStep, SequenceHandle, SequencerConfig};
use crate::telemetry::{SequenceMetrics, TelemetrySnapshot};

/// One map view's worth of fly-through state.
///
/// Lives as long as the map view. Dropping the session cancels the active
/// tour (via its handle) and aborts in-flight layer fetches.
pub struct MapSession<C: CameraControl + 'static> {
    registry: LayerRegistry,
    sequencer: FlySequencer<C>,
    metrics: Arc<SequenceMetrics>,
    layers: HashMap<String, OverlayLayer>,
    tour: Option<SequenceHandle>,
}

impl<C: CameraControl + 'static> MapSession<C> {
    /// Create a session around a camera control surface.
    pub fn new(camera: Arc<C>) -> Self {
        Self::with_config(camera, SequencerConfig::default())
    }

    /// Create a session with explicit sequencer defaults.
    pub fn with_config(camera: Arc<C>, config: SequencerConfig) -> Self {
        let registry = LayerRegistry::new();
        let metrics = Arc::new(SequenceMetrics::new());
        let sequencer = FlySequencer::new(camera, registry.clone())
            .with_config(config)
            .with_metrics(Arc::clone(&metrics));
        Self {
            registry,
            sequencer,
            metrics,
            layers: HashMap::new(),
            tour: None,
        }
    }

    /// The session's layer registry.
    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    /// Mount an overlay layer under `id` and start its fetch.
    ///
    /// Re-mounting an existing id tears the previous layer down first, so
    /// the registry never briefly loses the id's newest handle.
    pub fn mount_layer<S: GeometrySource>(&mut self, id: impl Into<String>, source: S) {
        let id = id.into();
        if let Some(previous) = self.layers.remove(&id) {
            previous.unmount(&self.registry);
        }
        let layer = OverlayLayer::mount(id.clone(), source, &self.registry);
        info!(layer = %id, "overlay layer mounted");
        self.layers.insert(id, layer);
    }

    /// Unmount the overlay layer under `id`, if mounted.
    pub fn unmount_layer(&mut self, id: &str) -> bool {
        match self.layers.remove(id) {
            Some(layer) => {
                layer.unmount(&self.registry);
                true
            }
            None => false,
        }
    }

    /// Access a mounted layer.
    pub fn layer(&self, id: &str) -> Option<&OverlayLayer> {
        self.layers.get(id)
    }

    /// Start a tour over `steps`, cancelling any tour already running.
    ///
    /// Each call creates a fresh run context with its own cancellation
    /// token; a replaced run stays cancelled and inert.
    pub fn start_tour(&mut self, steps: Vec<FlyStep>) -> &SequenceHandle {
        if let Some(previous) = self.tour.take() {
            previous.cancel();
        }
        info!(steps = steps.len(), "starting fly-through");
        self.tour.insert(self.sequencer.spawn(steps))
    }

    /// Handle of the active tour, if any.
    pub fn tour(&self) -> Option<&SequenceHandle> {
        self.tour.as_ref()
    }

    /// Cancel the active tour, if any.
    pub fn cancel_tour(&mut self) {
        if let Some(tour) = self.tour.take() {
            tour.cancel();
        }
    }

    /// Point-in-time copy of the session's sequence telemetry.
    pub fn telemetry(&self) -> TelemetrySnapshot {
        self.metrics.snapshot()
    }
}
