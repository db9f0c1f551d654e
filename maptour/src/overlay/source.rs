//! Geometry source seam.
//!
//! The network (or disk, or test fixture) lives behind [`GeometrySource`];
//! this crate never fetches anything itself.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use super::FeatureCollection;

/// Errors a geometry source can report.
///
/// These never escape the overlay provider: a failed fetch simply leaves
/// the layer's bounds unavailable.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be reached or did not respond.
    #[error("geometry source unavailable: {0}")]
    Unavailable(String),

    /// The payload could not be parsed as a feature collection.
    #[error("malformed geometry payload: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Malformed(e.to_string())
    }
}

/// An asynchronous producer of one layer's geometry.
///
/// Implementations wrap whatever actually supplies the data - an HTTP
/// endpoint, a file, a fixture. Fetch is called once per mount.
pub trait GeometrySource: Send + Sync + 'static {
    /// Fetch the layer's feature collection.
    fn fetch(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<FeatureCollection, SourceError>> + Send + '_>>;
}

/// A source serving a fixed, already-loaded collection.
///
/// Useful for tests and for layers whose geometry ships with the
/// application.
#[derive(Debug, Clone)]
pub struct StaticGeometrySource {
    collection: FeatureCollection,
}

impl StaticGeometrySource {
    /// Serve the given collection.
    pub fn new(collection: FeatureCollection) -> Self {
        Self { collection }
    }

    /// Parse and serve a GeoJSON document.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        Ok(Self::new(FeatureCollection::from_json(json)?))
    }
}

impl GeometrySource for StaticGeometrySource {
    fn fetch(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<FeatureCollection, SourceError>> + Send + '_>> {
        let collection = self.collection.clone();
        Box::pin(async move { Ok(collection) })
    }
}
