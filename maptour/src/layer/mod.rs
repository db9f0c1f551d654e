//! Overlay layer registry.
//!
//! The registry is a process-local lookup table from logical layer
//! identifiers to [`LayerHandle`] capability objects. It does not own the
//! layers: a handle is a non-owning window onto whatever provider created
//! it, and the registry only answers "who is currently registered under
//! this id". Providers register as they become ready; the fly sequencer
//! looks ids up at the moment a step executes, so registration order
//! relative to sequence start does not matter.
//!
//! Registration and lookup may race from independent tasks (layers load at
//! unpredictable times), so the map is a [`dashmap::DashMap`] behind an
//! `Arc` - cloning a registry is cheap and every clone sees the same table.
//! Last write wins on a given identifier; only one provider per id is
//! expected to exist at a time.

use std::sync::Arc;

use dashmap::DashMap;

use crate::geo::GeoBounds;

/// Capability object reporting an overlay layer's current extent.
///
/// Returns `None` while the layer's data has not loaded (or failed to
/// load). Implementations must be safe to query at any time relative to
/// the layer's lifecycle.
pub trait LayerHandle: Send + Sync {
    /// Current geographic bounding box of the layer, if available.
    fn bounds(&self) -> Option<GeoBounds>;
}

/// Identifier → handle mapping, scoped to one map session.
///
/// Constructed by the session and passed by clone to every component that
/// needs it; there is no ambient/global registry.
#[derive(Clone, Default)]
pub struct LayerRegistry {
    handles: Arc<DashMap<String, Arc<dyn LayerHandle>>>,
}

impl LayerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the handle registered under `id`.
    ///
    /// Always succeeds. A later registration for the same id replaces the
    /// earlier one.
    pub fn register(&self, id: impl Into<String>, handle: Arc<dyn LayerHandle>) {
        self.handles.insert(id.into(), handle);
    }

    /// Look up the handle currently registered under `id`.
    ///
    /// Pure lookup, no side effects. Returns `None` if the id was never
    /// registered (or has been unregistered).
    pub fn get(&self, id: &str) -> Option<Arc<dyn LayerHandle>> {
        self.handles.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Remove the handle registered under `id`, returning it if present.
    ///
    /// Used by providers on unmount so a torn-down layer cannot be resolved
    /// by later fit steps.
    pub fn unregister(&self, id: &str) -> Option<Arc<dyn LayerHandle>> {
        self.handles.remove(id).map(|(_, handle)| handle)
    }

    /// Number of registered handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl std::fmt::Debug for LayerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerRegistry")
            .field("layers", &self.handles.len())
            .finish()
    }
}
