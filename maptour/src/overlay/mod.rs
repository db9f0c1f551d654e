//! Overlay layer providers.
//!
//! An overlay layer owns the lifecycle of one asynchronously fetched
//! geometry payload: it registers a [`LayerHandle`](crate::layer::LayerHandle)
//! the moment it mounts (bounds read as unavailable until the fetch
//! lands), fetches through a [`GeometrySource`] seam, and exposes the
//! loaded features for whatever renders them. Fetch and parse failures
//! stay inside the provider; consumers only ever observe "bounds valid"
//! or "bounds unavailable".

mod geojson;
mod layer;
mod source;

pub use geojson::{Feature, FeatureCollection, Geometry, Position};
pub use layer::OverlayLayer;
pub use source::{GeometrySource, SourceError, StaticGeometrySource};
