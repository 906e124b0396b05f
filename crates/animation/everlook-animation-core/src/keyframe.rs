//! Keyframe records.

use serde::{Deserialize, Serialize};

use crate::flatten::Flatten;
use crate::{AnimationError, Result};

/// A value anchored at a timestamp in milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<T> {
    pub timestamp: u32,
    pub value: T,
}

impl<T> Keyframe<T> {
    #[inline]
    pub fn new(timestamp: u32, value: T) -> Self {
        Self { timestamp, value }
    }
}

/// Keyframe payload for spline timelines: the value plus its arrival and
/// departure tangents, all of the same kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SplineKeyframe<T> {
    pub value: T,
    #[serde(rename = "in")]
    pub in_tangent: T,
    #[serde(rename = "out")]
    pub out_tangent: T,
}

impl<T> SplineKeyframe<T> {
    #[inline]
    pub fn new(value: T, in_tangent: T, out_tangent: T) -> Self {
        Self {
            value,
            in_tangent,
            out_tangent,
        }
    }
}

impl<T: Flatten> SplineKeyframe<T> {
    /// Keyframe with zero tangents on both sides.
    pub fn flat(value: T) -> Result<Self> {
        let kind = value.value_kind();
        let width = kind
            .component_count()
            .ok_or(AnimationError::UnsupportedValueKind { kind })?;
        let zero = T::coalesce(kind, &vec![0.0; width])?;
        Ok(Self::new(value, zero.clone(), zero))
    }
}
