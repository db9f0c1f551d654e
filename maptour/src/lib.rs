//! Maptour - scripted camera fly-throughs over an interactive map view
//!
//! This library choreographs a sequence of camera operations (fly-to,
//! fit-to-layer, wait) over a map surface provided by an external mapping
//! engine. The interesting part is not rendering but sequencing: steps run
//! strictly in order, each one waits for the camera movement to physically
//! finish, fit targets are resolved at execution time against a registry of
//! asynchronously loaded overlay layers, and the whole run is cancellable
//! without leaking timers or movement listeners.
//!
//! # High-Level API
//!
//! For most use cases, the [`session`] module provides a simplified facade:
//!
//! ```ignore
//! use maptour::session::MapSession;
//! use maptour::sequence::FlyStep;
//! use maptour::geo::LatLng;
//!
//! let mut session = MapSession::new(camera);
//! session.mount_layer("jacarei", source);
//!
//! session.start_tour(vec![
//!     FlyStep::Wait { delay_ms: 1500 },
//!     FlyStep::Fly {
//!         center: LatLng::new(-23.3, -45.9),
//!         zoom: Some(9.0),
//!         delay_ms: Some(600),
//!         duration_secs: Some(2.0),
//!     },
//! ]);
//! ```

pub mod camera;
pub mod geo;
pub mod layer;
pub mod logging;
pub mod overlay;
pub mod sequence;
pub mod session;
pub mod telemetry;

/// Version of the maptour library.
///
/// Defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
