//! Overlay layer lifecycle.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::geo::GeoBounds;
use crate::layer::{LayerHandle, LayerRegistry};
use crate::overlay::{FeatureCollection, GeometrySource};

/// Load state of an overlay layer.
#[derive(Debug)]
enum LayerState {
    /// Fetch in flight; bounds unavailable.
    Loading,
    /// Geometry loaded. Bounds may still be `None` for empty geometry.
    Ready {
        collection: Arc<FeatureCollection>,
        bounds: Option<GeoBounds>,
    },
    /// Fetch failed; bounds stay unavailable for the layer's lifetime.
    Failed,
}

#[derive(Debug)]
struct Shared {
    state: RwLock<LayerState>,
}

/// Registry-facing handle onto a mounted overlay layer.
struct OverlayHandle {
    shared: Arc<Shared>,
}

impl LayerHandle for OverlayHandle {
    fn bounds(&self) -> Option<GeoBounds> {
        match &*self.shared.state.read() {
            LayerState::Ready { bounds, .. } => *bounds,
            LayerState::Loading | LayerState::Failed => None,
        }
    }
}

/// One mounted overlay layer.
///
/// Mounting registers the layer's handle exactly once and starts the
/// geometry fetch on its own task. The handle answers bounds queries at
/// any point of the lifecycle: `None` before the fetch lands or after it
/// fails, the geometry's extent once loaded. Fetch errors are absorbed
/// here and logged; nothing downstream ever sees them.
#[derive(Debug)]
pub struct OverlayLayer {
    id: String,
    shared: Arc<Shared>,
    fetch_task: Option<JoinHandle<()>>,
}

impl OverlayLayer {
    /// Mount a layer: register its handle under `id` and start fetching.
    ///
    /// Must be called within a tokio runtime. Re-mounting the same id is
    /// harmless; the newest registration wins.
    pub fn mount<S: GeometrySource>(
        id: impl Into<String>,
        source: S,
        registry: &LayerRegistry,
    ) -> Self {
        let id = id.into();
        let shared = Arc::new(Shared {
            state: RwLock::new(LayerState::Loading),
        });

        registry.register(
            id.clone(),
            Arc::new(OverlayHandle {
                shared: Arc::clone(&shared),
            }),
        );

        let task_shared = Arc::clone(&shared);
        let layer_id = id.clone();
        let fetch_task = tokio::spawn(async move {
            match source.fetch().await {
                Ok(collection) => {
                    let bounds = collection.bounds();
                    debug!(
                        layer = %layer_id,
                        features = collection.len(),
                        has_bounds = bounds.is_some(),
                        "overlay layer loaded"
                    );
                    *task_shared.state.write() = LayerState::Ready {
                        collection: Arc::new(collection),
                        bounds,
                    };
                }
                Err(e) => {
                    warn!(layer = %layer_id, error = %e, "overlay layer fetch failed");
                    *task_shared.state.write() = LayerState::Failed;
                }
            }
        });

        Self {
            id,
            shared,
            fetch_task: Some(fetch_task),
        }
    }

    /// The layer's registry identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current extent, mirroring what the registered handle reports.
    pub fn bounds(&self) -> Option<GeoBounds> {
        match &*self.shared.state.read() {
            LayerState::Ready { bounds, .. } => *bounds,
            _ => None,
        }
    }

    /// Loaded geometry, for the rendering surface.
    pub fn features(&self) -> Option<Arc<FeatureCollection>> {
        match &*self.shared.state.read() {
            LayerState::Ready { collection, .. } => Some(Arc::clone(collection)),
            _ => None,
        }
    }

    /// Whether the fetch has landed successfully.
    pub fn is_loaded(&self) -> bool {
        matches!(&*self.shared.state.read(), LayerState::Ready { .. })
    }

    /// Whether the fetch failed.
    pub fn is_failed(&self) -> bool {
        matches!(&*self.shared.state.read(), LayerState::Failed)
    }

    /// Wait until the fetch task has settled (loaded or failed).
    ///
    /// Intended for tests and teardown; normal consumers poll bounds
    /// through the registry instead.
    pub async fn settled(&mut self) {
        if let Some(task) = self.fetch_task.take() {
            let _ = task.await;
        }
    }

    /// Unmount: remove the handle from the registry and abort an
    /// in-flight fetch.
    pub fn unmount(mut self, registry: &LayerRegistry) {
        registry.unregister(&self.id);
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }
        debug!(layer = %self.id, "overlay layer unmounted");
    }
}

impl Drop for OverlayLayer {
    fn drop(&mut self) {
        // The fetch task holds no registry reference, only the shared
        // state; letting it run to completion after a drop is harmless.
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{SourceError, StaticGeometrySource};
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    const POINT_LAYER: &str = r#"{
        "features": [ { "geometry": { "type": "Point", "coordinates": [-45.9, -23.3] } } ]
    }"#;

    struct FailingSource;

    impl GeometrySource for FailingSource {
        fn fetch(
            &self,
        ) -> Pin<Box<dyn Future<Output = Result<FeatureCollection, SourceError>> + Send + '_>>
        {
            Box::pin(async { Err(SourceError::Unavailable("offline".to_string())) })
        }
    }

    struct SlowSource;

    impl GeometrySource for SlowSource {
        fn fetch(
            &self,
        ) -> Pin<Box<dyn Future<Output = Result<FeatureCollection, SourceError>> + Send + '_>>
        {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(FeatureCollection::default())
            })
        }
    }

    #[tokio::test]
    async fn test_mount_registers_and_loads() {
        let registry = LayerRegistry::new();
        let source = StaticGeometrySource::from_json(POINT_LAYER).unwrap();

        let mut layer = OverlayLayer::mount("jacarei", source, &registry);
        layer.settled().await;

        assert!(layer.is_loaded());
        let handle = registry.get("jacarei").expect("registered on mount");
        let bounds = handle.bounds().expect("bounds available after load");
        assert_eq!(bounds.min_lat, -23.3);
        assert_eq!(bounds.min_lon, -45.9);
        assert_eq!(layer.features().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_queries_before_fetch_completes_see_no_bounds() {
        let registry = LayerRegistry::new();
        let layer = OverlayLayer::mount("slow", SlowSource, &registry);

        // Registered immediately, bounds not yet available.
        let handle = registry.get("slow").expect("registered on mount");
        assert!(handle.bounds().is_none());
        assert!(!layer.is_loaded());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_bounds_unavailable() {
        let registry = LayerRegistry::new();
        let mut layer = OverlayLayer::mount("offline", FailingSource, &registry);
        layer.settled().await;

        assert!(layer.is_failed());
        let handle = registry.get("offline").unwrap();
        assert!(handle.bounds().is_none());
        assert!(layer.features().is_none());
    }

    #[tokio::test]
    async fn test_empty_geometry_loads_without_bounds() {
        let registry = LayerRegistry::new();
        let source = StaticGeometrySource::from_json(r#"{ "features": [] }"#).unwrap();

        let mut layer = OverlayLayer::mount("empty", source, &registry);
        layer.settled().await;

        assert!(layer.is_loaded());
        assert!(registry.get("empty").unwrap().bounds().is_none());
    }

    #[tokio::test]
    async fn test_unmount_unregisters() {
        let registry = LayerRegistry::new();
        let source = StaticGeometrySource::from_json(POINT_LAYER).unwrap();

        let layer = OverlayLayer::mount("jacarei", source, &registry);
        layer.unmount(&registry);

        assert!(registry.get("jacarei").is_none());
        assert!(registry.is_empty());
    }
}
