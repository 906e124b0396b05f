//! Timeline whose keyframes carry Hermite tangents.

use crate::config::TimelineOptions;
use crate::flatten::Flatten;
use crate::interp::{interpolate_hermite, interpolate_linear, InterpolationMode};
use crate::keyframe::SplineKeyframe;
use crate::timeline::{Bracket, Timeline};
use crate::{AnimationError, Result};

/// A [`Timeline`] over [`SplineKeyframe`]s. Same playhead semantics; segments
/// evaluate with the Hermite basis when the mode is `Hermite` or `Bezier`.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineTimeline<T> {
    inner: Timeline<SplineKeyframe<T>>,
}

impl<T: Flatten> SplineTimeline<T> {
    /// Build a spline timeline. Besides the [`Timeline::new`] checks, every
    /// tangent must share the kind of its keyframe value.
    pub fn new(
        mode: InterpolationMode,
        timestamps: Vec<u32>,
        keys: Vec<SplineKeyframe<T>>,
        options: TimelineOptions,
    ) -> Result<Self> {
        if let Some(first) = keys.first() {
            let kind = first.value.value_kind();
            if mode != InterpolationMode::None && !kind.is_interpolatable() {
                return Err(AnimationError::UnsupportedValueKind { kind });
            }
            for (index, key) in keys.iter().enumerate() {
                if key.value.value_kind() != kind {
                    return Err(AnimationError::ValueKindMismatch {
                        expected: kind,
                        actual: key.value.value_kind(),
                    });
                }
                for tangent in [&key.in_tangent, &key.out_tangent] {
                    if tangent.value_kind() != kind {
                        return Err(AnimationError::TangentKindMismatch {
                            index,
                            expected: kind,
                            actual: tangent.value_kind(),
                        });
                    }
                }
            }
        }
        Ok(Self {
            inner: Timeline::from_parts(mode, timestamps, keys, options)?,
        })
    }

    /// Interpolated value at the current playhead.
    #[inline]
    pub fn value(&self) -> Result<T> {
        self.value_at(self.inner.position())
    }

    /// Interpolated value at `position` without moving the playhead.
    pub fn value_at(&self, position: f32) -> Result<T> {
        match self.inner.bracket_at(position) {
            Bracket::Hold(index) => Ok(self.inner.values()[index].value.clone()),
            Bracket::Segment {
                leaving,
                approaching,
                alpha,
            } => {
                let leaving = &self.inner.values()[leaving];
                let approaching = self.inner.approaching(approaching);
                match self.inner.interpolation() {
                    InterpolationMode::None => Ok(leaving.value.clone()),
                    InterpolationMode::Linear => {
                        interpolate_linear(&leaving.value, &approaching.value, alpha)
                    }
                    InterpolationMode::Hermite | InterpolationMode::Bezier => {
                        interpolate_hermite(leaving, approaching, alpha)
                    }
                }
            }
        }
    }
}

impl<T> SplineTimeline<T> {
    #[inline]
    pub fn advance(&mut self, delta_ms: f32) {
        self.inner.advance(delta_ms);
    }

    #[inline]
    pub fn position(&self) -> f32 {
        self.inner.position()
    }

    #[inline]
    pub fn normalized_position(&self) -> f32 {
        self.inner.normalized_position()
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.inner.duration()
    }

    #[inline]
    pub fn is_looping(&self) -> bool {
        self.inner.is_looping()
    }

    #[inline]
    pub fn set_looping(&mut self, looping: bool) {
        self.inner.set_looping(looping);
    }

    #[inline]
    pub fn interpolation(&self) -> InterpolationMode {
        self.inner.interpolation()
    }

    #[inline]
    pub fn timestamps(&self) -> &[u32] {
        self.inner.timestamps()
    }

    #[inline]
    pub fn keys(&self) -> &[SplineKeyframe<T>] {
        self.inner.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn bracket(&self) -> Bracket {
        self.inner.bracket()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Value, Vector2};

    #[test]
    fn tangent_kind_must_match_value() {
        let keys = vec![
            SplineKeyframe::new(Value::Float(0.0), Value::Float(0.0), Value::Float(0.0)),
            SplineKeyframe::new(
                Value::Float(1.0),
                Value::Vec2(Vector2::ZERO),
                Value::Float(0.0),
            ),
        ];
        let err = SplineTimeline::new(
            InterpolationMode::Hermite,
            vec![0, 100],
            keys,
            TimelineOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            AnimationError::TangentKindMismatch {
                index: 1,
                expected: crate::ValueKind::F32,
                actual: crate::ValueKind::Vec2,
            }
        );
    }

    #[test]
    fn linear_mode_ignores_tangents() {
        let keys = vec![
            SplineKeyframe::new(0.0f32, 50.0, 50.0),
            SplineKeyframe::new(10.0f32, 50.0, 50.0),
        ];
        let mut t = SplineTimeline::new(
            InterpolationMode::Linear,
            vec![0, 100],
            keys,
            TimelineOptions::default(),
        )
        .unwrap();
        t.advance(25.0);
        assert_eq!(t.value().unwrap(), 2.5);
    }
}
