// src/playback/mod.rs

//! Time-driven playback over the frames of an [`Evaluation`](crate::simulation::Evaluation).
//!
//! The scheduler is a cooperative state machine: the host render loop calls
//! [`PlaybackScheduler::tick`] with its current clock, and the scheduler
//! publishes the vector to draw. There is at most one tween in flight, and
//! every operation that starts or abandons one does so synchronously.

mod scheduler;

pub use scheduler::{PlaybackScheduler, PlaybackState, TickOutcome, TweenState};

use crate::core::Result;
use crate::core::constants::DEFAULT_DURATION_MS;
use crate::core::ease_in_out_cubic;
use serde::{Deserialize, Serialize};

/// Easing curve applied to the raw tween progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Cubic ease-in/ease-out.
    #[default]
    InOutCubic,
    Linear,
}

impl Easing {
    /// Maps raw progress to eased progress, both in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::InOutCubic => ease_in_out_cubic(t),
            Easing::Linear => t.clamp(0.0, 1.0),
        }
    }
}

/// Playback settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Length of one tween in milliseconds. Changing it affects the next tween only.
    pub duration_ms: f64,
    /// Whether `play` keeps going frame after frame until the last one.
    pub continuous: bool,
    pub easing: Easing,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            continuous: true,
            easing: Easing::default(),
        }
    }
}

impl PlaybackConfig {
    /// Parses a JSON object; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
