//! Interpolation modes and blend functions.
//!
//! `Hermite` and `Bezier` share one evaluator: Bezier keyframes store their
//! control handles as Hermite tangents.

pub mod functions;

pub use functions::{hermite_basis, interpolate_hermite, interpolate_linear};

use serde::{Deserialize, Serialize};

/// How a timeline blends between its bracketing keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMode {
    /// Step function: hold the leaving keyframe.
    None,
    #[default]
    Linear,
    Hermite,
    Bezier,
}

impl InterpolationMode {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Linear => "linear",
            Self::Hermite => "hermite",
            Self::Bezier => "bezier",
        }
    }

    /// Hermite and Bezier evaluation need per-keyframe tangents.
    #[inline]
    pub fn requires_tangents(&self) -> bool {
        matches!(self, Self::Hermite | Self::Bezier)
    }
}

impl std::fmt::Display for InterpolationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
