//! Keyframe timeline with a playhead.
//!
//! Model:
//! - Keyframes are two parallel sequences: `timestamps` (ms, strictly ascending)
//!   and `values`. Both are fixed at construction.
//! - The playhead `position` (ms) moves only through [`Timeline::advance`].
//!   Non-looping timelines clamp at `duration`; looping timelines subtract the
//!   overflow and carry on.
//! - Evaluation normalizes the position (wrap when looping, clamp otherwise),
//!   brackets it between two keyframes and blends with the timeline's mode.
//! - When `duration` lies past the last keyframe, the tail is bridged by a
//!   virtual keyframe at `duration` holding the first value, so a looping clip
//!   eases back to its start pose during its dead time.

use crate::config::TimelineOptions;
use crate::flatten::Flatten;
use crate::interp::{interpolate_linear, InterpolationMode};
use crate::keyframe::Keyframe;
use crate::{AnimationError, Result};

/// Playhead state shared by plain and spline timelines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Playhead {
    pub(crate) position: f32,
    pub(crate) duration: f32,
    pub(crate) looping: bool,
}

impl Playhead {
    pub(crate) fn advance(&mut self, delta_ms: f32) {
        if self.position + delta_ms > self.duration {
            if self.looping {
                let overflow = delta_ms - (self.duration - self.position);
                log::trace!(
                    "timeline wrapped at {}ms, carrying {}ms",
                    self.duration,
                    overflow
                );
                self.position = overflow;
            } else {
                self.position = self.duration;
            }
        } else {
            self.position += delta_ms;
        }
    }

    /// Map `position` into `[0, duration]`.
    pub(crate) fn normalize(&self, position: f32) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        if self.looping {
            position.rem_euclid(self.duration)
        } else {
            position.clamp(0.0, self.duration)
        }
    }
}

/// The keyframe a segment is heading towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approach {
    /// A stored keyframe.
    Key(usize),
    /// The trailing keyframe at `duration`, holding the first keyframe's value.
    Virtual,
}

/// Location of a (normalized) position relative to the keyframes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bracket {
    /// Before the first keyframe or on/after the last one: hold a keyframe.
    Hold(usize),
    /// Between `leaving` and `approaching`, `alpha` of the way across.
    Segment {
        leaving: usize,
        approaching: Approach,
        alpha: f32,
    },
}

/// Locate `position` among `timestamps`. `timestamps` must be non-empty and
/// strictly ascending, which keeps every segment span non-zero.
pub(crate) fn locate(timestamps: &[u32], duration: f32, position: f32) -> Bracket {
    let before = timestamps.partition_point(|&t| t as f32 <= position);
    if before == 0 {
        return Bracket::Hold(0);
    }
    let leaving = before - 1;
    let start = timestamps[leaving] as f32;

    let (approaching, end) = if leaving + 1 < timestamps.len() {
        (Approach::Key(leaving + 1), timestamps[leaving + 1] as f32)
    } else if duration > start && position > start {
        (Approach::Virtual, duration)
    } else {
        return Bracket::Hold(leaving);
    };

    // Alpha is local to the bracketing pair, so it stays in [0, 1] on every segment.
    Bracket::Segment {
        leaving,
        approaching,
        alpha: (position - start) / (end - start),
    }
}

fn validate_keyframes(timestamps: &[u32], values: usize) -> Result<()> {
    if timestamps.len() != values {
        return Err(AnimationError::KeyframeCountMismatch {
            timestamps: timestamps.len(),
            values,
        });
    }
    if timestamps.is_empty() {
        return Err(AnimationError::EmptyTimeline);
    }
    for (index, pair) in timestamps.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(AnimationError::UnorderedTimestamps {
                index: index + 1,
                previous: pair[0],
                current: pair[1],
            });
        }
    }
    Ok(())
}

fn resolve_duration(timestamps: &[u32], options: &TimelineOptions) -> Result<f32> {
    match options.duration {
        Some(duration) if !duration.is_finite() || duration < 0.0 => {
            Err(AnimationError::InvalidDuration { duration })
        }
        Some(duration) => Ok(duration),
        None => Ok(timestamps.last().copied().unwrap_or(0) as f32),
    }
}

/// Ordered keyframes of one animated property plus a playhead.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<T> {
    mode: InterpolationMode,
    timestamps: Vec<u32>,
    values: Vec<T>,
    playhead: Playhead,
}

impl<T> Timeline<T> {
    /// Build without inspecting values. Callers check value kinds themselves.
    pub(crate) fn from_parts(
        mode: InterpolationMode,
        timestamps: Vec<u32>,
        values: Vec<T>,
        options: TimelineOptions,
    ) -> Result<Self> {
        validate_keyframes(&timestamps, values.len())?;
        let duration = resolve_duration(&timestamps, &options)?;
        log::debug!(
            "timeline built: {} keyframes, {}ms, mode {}, looping {}",
            timestamps.len(),
            duration,
            mode,
            options.looping
        );
        Ok(Self {
            mode,
            timestamps,
            values,
            playhead: Playhead {
                position: 0.0,
                duration,
                looping: options.looping,
            },
        })
    }

    /// Move the playhead forward by `delta_ms`.
    #[inline]
    pub fn advance(&mut self, delta_ms: f32) {
        self.playhead.advance(delta_ms);
    }

    /// Raw playhead position in milliseconds.
    #[inline]
    pub fn position(&self) -> f32 {
        self.playhead.position
    }

    /// Playhead position mapped into `[0, duration]`.
    #[inline]
    pub fn normalized_position(&self) -> f32 {
        self.playhead.normalize(self.playhead.position)
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.playhead.duration
    }

    #[inline]
    pub fn is_looping(&self) -> bool {
        self.playhead.looping
    }

    #[inline]
    pub fn set_looping(&mut self, looping: bool) {
        self.playhead.looping = looping;
    }

    #[inline]
    pub fn interpolation(&self) -> InterpolationMode {
        self.mode
    }

    #[inline]
    pub fn timestamps(&self) -> &[u32] {
        &self.timestamps
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Always false; construction rejects empty keyframe sets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Iterate `(timestamp, value)` pairs in time order.
    pub fn keyframes(&self) -> impl Iterator<Item = (u32, &T)> + '_ {
        self.timestamps.iter().copied().zip(self.values.iter())
    }

    /// Bracket for an arbitrary position; the position is normalized first.
    pub fn bracket_at(&self, position: f32) -> Bracket {
        let normalized = self.playhead.normalize(position);
        locate(&self.timestamps, self.playhead.duration, normalized)
    }

    /// Bracket for the current playhead.
    #[inline]
    pub fn bracket(&self) -> Bracket {
        self.bracket_at(self.playhead.position)
    }

    /// Value the segment is heading towards.
    #[inline]
    pub(crate) fn approaching(&self, approach: Approach) -> &T {
        match approach {
            Approach::Key(index) => &self.values[index],
            Approach::Virtual => &self.values[0],
        }
    }
}

impl<T: Flatten> Timeline<T> {
    /// Build a timeline from parallel timestamp/value sequences.
    ///
    /// Fails on mismatched lengths, empty input, non-ascending timestamps,
    /// mixed value kinds, a bad duration override, Hermite/Bezier modes (use
    /// [`SplineTimeline`](crate::SplineTimeline)), or a blending mode on values
    /// that cannot be flattened.
    pub fn new(
        mode: InterpolationMode,
        timestamps: Vec<u32>,
        values: Vec<T>,
        options: TimelineOptions,
    ) -> Result<Self> {
        if mode.requires_tangents() {
            return Err(AnimationError::TangentsRequired { mode });
        }
        if let Some(first) = values.first() {
            let kind = first.value_kind();
            if mode != InterpolationMode::None && !kind.is_interpolatable() {
                return Err(AnimationError::UnsupportedValueKind { kind });
            }
            if let Some(other) = values.iter().find(|v| v.value_kind() != kind) {
                return Err(AnimationError::ValueKindMismatch {
                    expected: kind,
                    actual: other.value_kind(),
                });
            }
        }
        Self::from_parts(mode, timestamps, values, options)
    }

    /// Build from keyframe records.
    pub fn from_keyframes(
        mode: InterpolationMode,
        keyframes: Vec<Keyframe<T>>,
        options: TimelineOptions,
    ) -> Result<Self> {
        let (timestamps, values): (Vec<u32>, Vec<T>) = keyframes
            .into_iter()
            .map(|k| (k.timestamp, k.value))
            .unzip();
        Self::new(mode, timestamps, values, options)
    }

    /// Interpolated value at the current playhead.
    #[inline]
    pub fn value(&self) -> Result<T> {
        self.value_at(self.playhead.position)
    }

    /// Interpolated value at `position` without moving the playhead.
    pub fn value_at(&self, position: f32) -> Result<T> {
        match self.bracket_at(position) {
            Bracket::Hold(index) => Ok(self.values[index].clone()),
            Bracket::Segment {
                leaving,
                approaching,
                alpha,
            } => {
                let leaving = &self.values[leaving];
                match self.mode {
                    InterpolationMode::None => Ok(leaving.clone()),
                    InterpolationMode::Linear => {
                        interpolate_linear(leaving, self.approaching(approaching), alpha)
                    }
                    InterpolationMode::Hermite | InterpolationMode::Bezier => {
                        Err(AnimationError::TangentsRequired { mode: self.mode })
                    }
                }
            }
        }
    }
}
