//! Sequencer configuration.

use crate::geo::Padding;

/// Default camera animation duration in seconds, applied when a step does
/// not specify one.
pub const DEFAULT_DURATION_SECS: f64 = 1.2;

/// Configuration for a [`FlySequencer`](super::FlySequencer).
#[derive(Clone, Debug)]
pub struct SequencerConfig {
    /// Animation duration used when a step omits `duration_secs`.
    pub default_duration_secs: f64,

    /// Padding used when a fit step omits `padding`.
    pub default_padding: Padding,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            default_duration_secs: DEFAULT_DURATION_SECS,
            default_padding: Padding::default(),
        }
    }
}

impl SequencerConfig {
    /// Set the default animation duration.
    pub fn with_default_duration_secs(mut self, secs: f64) -> Self {
        self.default_duration_secs = secs;
        self
    }

    /// Set the default fit padding.
    pub fn with_default_padding(mut self, padding: Padding) -> Self {
        self.default_padding = padding;
        self
    }
}
