//! Everlook Animation Core (renderer-agnostic)
//!
//! Keyframe timelines for animated model properties. A driver advances each
//! timeline by the frame delta; the renderer reads the interpolated value
//! before issuing draw calls.
//!
//! - `flatten`: typed values <-> float components
//! - `interp`: linear and Hermite blending on flattened values
//! - `timeline` / `spline`: playhead, looping and keyframe bracketing
//! - `track`: parallel channels under one name
//! - `clip`: JSON clip loading

pub mod clip;
pub mod config;
pub mod error;
pub mod flatten;
pub mod interp;
pub mod keyframe;
pub mod spline;
pub mod timeline;
pub mod track;
pub mod value;

// Re-exports for consumers (renderers, tools)
pub use clip::{parse_clip_json, parse_clip_json_with, ClipData};
pub use config::{Config, TimelineOptions};
pub use error::AnimationError;
pub use flatten::{Components, Flatten};
pub use interp::{interpolate_hermite, interpolate_linear, InterpolationMode};
pub use keyframe::{Keyframe, SplineKeyframe};
pub use spline::SplineTimeline;
pub use timeline::{Approach, Bracket, Timeline};
pub use track::{AnimationTrack, Channel};
pub use value::{Quaternion, Rgb, Value, ValueKind, Vector2, Vector3};

/// Animation core result type
pub type Result<T> = core::result::Result<T, AnimationError>;
