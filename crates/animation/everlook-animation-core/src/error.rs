//! Error types for timelines, value conversion and clip loading.

use crate::interp::InterpolationMode;
use crate::value::ValueKind;

/// Errors raised by the animation core.
///
/// Construction problems are reported when a timeline or clip is built, never
/// deferred to the first evaluation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnimationError {
    /// A timeline was built without any keyframes.
    #[error("Timeline requires at least one keyframe")]
    EmptyTimeline,

    /// The timestamp and value sequences differ in length.
    #[error("Keyframe count mismatch: {timestamps} timestamps, {values} values")]
    KeyframeCountMismatch { timestamps: usize, values: usize },

    /// Timestamps are not strictly ascending.
    #[error("Timestamps must be strictly ascending: index {index} has {current} after {previous}")]
    UnorderedTimestamps {
        index: usize,
        previous: u32,
        current: u32,
    },

    /// Duration override is negative or not finite.
    #[error("Invalid duration: {duration}")]
    InvalidDuration { duration: f32 },

    /// The value kind has no flatten/coalesce conversion.
    #[error("Unsupported value kind: {kind:?}")]
    UnsupportedValueKind { kind: ValueKind },

    /// A component array does not match the width of its value kind.
    #[error("Component count mismatch for {kind:?}: expected {expected}, got {actual}")]
    ComponentCount {
        kind: ValueKind,
        expected: usize,
        actual: usize,
    },

    /// Two values taking part in one interpolation have different kinds.
    #[error("Value kind mismatch: expected {expected:?}, got {actual:?}")]
    ValueKindMismatch {
        expected: ValueKind,
        actual: ValueKind,
    },

    /// A spline keyframe tangent does not share the kind of its value.
    #[error("Tangent of keyframe {index} is {actual:?}, value is {expected:?}")]
    TangentKindMismatch {
        index: usize,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// Hermite/Bezier evaluation requested on a timeline without tangents.
    #[error("Interpolation mode {mode:?} requires spline keyframes with tangents")]
    TangentsRequired { mode: InterpolationMode },

    /// A clip document is structurally valid JSON but violates the clip schema.
    #[error("Invalid clip: {reason}")]
    InvalidClip { reason: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl AnimationError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::EmptyTimeline
            | Self::KeyframeCountMismatch { .. }
            | Self::UnorderedTimestamps { .. }
            | Self::InvalidDuration { .. }
            | Self::TangentsRequired { .. } => "construction",
            Self::UnsupportedValueKind { .. }
            | Self::ComponentCount { .. }
            | Self::ValueKindMismatch { .. }
            | Self::TangentKindMismatch { .. } => "value",
            Self::InvalidClip { .. } => "clip",
            Self::Serialization { .. } => "serialization",
        }
    }

    /// True for errors raised while validating timeline input.
    #[inline]
    pub fn is_construction_error(&self) -> bool {
        self.category() == "construction"
    }
}

impl From<serde_json::Error> for AnimationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
