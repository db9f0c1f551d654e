//! Fly-through step definitions.
//!
//! Steps are immutable records supplied as an ordered list for one run.
//! They are also the component's only external configuration input, so
//! they deserialize from JSON documents ([`TourSpec`]):
//!
//! ```json
//! {
//!   "name": "vale do paraiba",
//!   "steps": [
//!     { "kind": "wait", "delay_ms": 1500 },
//!     { "kind": "fly", "center": [-23.3, -45.9], "zoom": 9, "delay_ms": 600, "duration_secs": 2 },
//!     { "kind": "fit", "layer": "jacarei", "padding": [24, 24], "delay_ms": 600, "duration_secs": 2 }
//!   ]
//! }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::{LatLng, Padding};

/// A single step of a fly-through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlyStep {
    /// Fly the camera to a fixed center and zoom.
    Fly {
        /// Target center.
        center: LatLng,
        /// Target zoom; defaults to the camera's current zoom.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        zoom: Option<f64>,
        /// Delay before issuing the command, in milliseconds.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delay_ms: Option<u64>,
        /// Animation duration in seconds; defaults to the sequencer's.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_secs: Option<f64>,
    },

    /// Fit the camera to the bounds of a registered overlay layer.
    ///
    /// Resolved through the layer registry at execution time. Skipped
    /// silently when the layer is unregistered or its bounds are not
    /// (yet) available.
    Fit {
        /// Identifier of the target layer.
        layer: String,
        /// Pixel padding around the bounds; defaults to the sequencer's.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        padding: Option<Padding>,
        /// Delay before issuing the command, in milliseconds.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delay_ms: Option<u64>,
        /// Animation duration in seconds; defaults to the sequencer's.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_secs: Option<f64>,
    },

    /// Pause without issuing any camera command.
    Wait {
        /// Pause duration in milliseconds.
        delay_ms: u64,
    },
}

impl FlyStep {
    /// The delay consumed before this step acts, if any.
    ///
    /// For `Wait` steps the delay *is* the step.
    pub fn delay(&self) -> Option<Duration> {
        match self {
            FlyStep::Fly { delay_ms, .. } | FlyStep::Fit { delay_ms, .. } => {
                delay_ms.map(Duration::from_millis)
            }
            FlyStep::Wait { delay_ms } => Some(Duration::from_millis(*delay_ms)),
        }
    }

    /// Short name of the step kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            FlyStep::Fly { .. } => "fly",
            FlyStep::Fit { .. } => "fit",
            FlyStep::Wait { .. } => "wait",
        }
    }
}

/// A named, ordered fly-through script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourSpec {
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Steps, in execution order.
    pub steps: Vec<FlyStep>,
}

/// Errors parsing a tour document.
#[derive(Debug, Error)]
pub enum TourSpecError {
    /// The document is not valid JSON or does not match the step schema.
    #[error("invalid tour document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl TourSpec {
    /// Parse a tour from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, TourSpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the tour to a JSON document.
    pub fn to_json(&self) -> Result<String, TourSpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
