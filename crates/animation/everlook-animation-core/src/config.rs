//! Configuration for timeline construction and clip loading.

use serde::{Deserialize, Serialize};

use crate::interp::InterpolationMode;

/// Per-timeline construction options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineOptions {
    /// Wrap the playhead instead of clamping at the end.
    #[serde(default)]
    pub looping: bool,
    /// Duration in milliseconds. Defaults to the last keyframe timestamp.
    #[serde(default)]
    pub duration: Option<f32>,
}

impl TimelineOptions {
    pub fn looping() -> Self {
        Self {
            looping: true,
            duration: None,
        }
    }

    pub fn with_duration(mut self, duration_ms: f32) -> Self {
        self.duration = Some(duration_ms);
        self
    }
}

/// Loader defaults applied when a clip document leaves a field out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Interpolation for timelines without an explicit mode.
    #[serde(default)]
    pub default_interpolation: InterpolationMode,
    /// Looping flag for timelines without an explicit one.
    #[serde(default)]
    pub default_looping: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_interpolation: InterpolationMode::Linear,
            default_looping: false,
        }
    }
}

impl Config {
    /// Options for a timeline, falling back to these defaults.
    pub fn timeline_options(
        &self,
        looping: Option<bool>,
        duration: Option<f32>,
    ) -> TimelineOptions {
        TimelineOptions {
            looping: looping.unwrap_or(self.default_looping),
            duration,
        }
    }
}
