//! Animation tracks: independent timelines grouped under one name.
//!
//! A track does not share state between its channels. Each channel keeps its
//! own playhead, duration and looping flag; [`AnimationTrack::advance`] simply
//! feeds the same delta to all of them for uniform-time playback.

use std::fmt;

use crate::flatten::Flatten;
use crate::interp::InterpolationMode;
use crate::spline::SplineTimeline;
use crate::timeline::Timeline;
use crate::Result;

/// A keyframed channel that can be advanced and sampled.
pub trait Channel<T>: fmt::Debug {
    fn advance(&mut self, delta_ms: f32);

    fn value(&self) -> Result<T>;

    fn position(&self) -> f32;

    fn duration(&self) -> f32;

    fn is_looping(&self) -> bool;

    fn set_looping(&mut self, looping: bool);

    fn interpolation(&self) -> InterpolationMode;
}

impl<T: Flatten + fmt::Debug> Channel<T> for Timeline<T> {
    fn advance(&mut self, delta_ms: f32) {
        Timeline::advance(self, delta_ms)
    }

    fn value(&self) -> Result<T> {
        Timeline::value(self)
    }

    fn position(&self) -> f32 {
        Timeline::position(self)
    }

    fn duration(&self) -> f32 {
        Timeline::duration(self)
    }

    fn is_looping(&self) -> bool {
        Timeline::is_looping(self)
    }

    fn set_looping(&mut self, looping: bool) {
        Timeline::set_looping(self, looping)
    }

    fn interpolation(&self) -> InterpolationMode {
        Timeline::interpolation(self)
    }
}

impl<T: Flatten + fmt::Debug> Channel<T> for SplineTimeline<T> {
    fn advance(&mut self, delta_ms: f32) {
        SplineTimeline::advance(self, delta_ms)
    }

    fn value(&self) -> Result<T> {
        SplineTimeline::value(self)
    }

    fn position(&self) -> f32 {
        SplineTimeline::position(self)
    }

    fn duration(&self) -> f32 {
        SplineTimeline::duration(self)
    }

    fn is_looping(&self) -> bool {
        SplineTimeline::is_looping(self)
    }

    fn set_looping(&mut self, looping: bool) {
        SplineTimeline::set_looping(self, looping)
    }

    fn interpolation(&self) -> InterpolationMode {
        SplineTimeline::interpolation(self)
    }
}

/// A named set of channels animated in parallel (e.g. one bone's
/// translation, rotation and scale).
#[derive(Debug)]
pub struct AnimationTrack<T> {
    name: String,
    channels: Vec<Box<dyn Channel<T>>>,
}

impl<T> AnimationTrack<T> {
    pub fn new(name: impl Into<String>, channels: Vec<Box<dyn Channel<T>>>) -> Self {
        Self {
            name: name.into(),
            channels,
        }
    }

    /// Track made only of plain timelines.
    pub fn from_timelines(name: impl Into<String>, timelines: Vec<Timeline<T>>) -> Self
    where
        T: Flatten + fmt::Debug + 'static,
    {
        let channels = timelines
            .into_iter()
            .map(|t| Box::new(t) as Box<dyn Channel<T>>)
            .collect();
        Self::new(name, channels)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&dyn Channel<T>> {
        self.channels.get(index).map(|c| c.as_ref())
    }

    /// Read-only view of the channels.
    pub fn channels(&self) -> impl Iterator<Item = &dyn Channel<T>> + '_ {
        self.channels.iter().map(|c| c.as_ref())
    }

    /// Forward `delta_ms` to every channel.
    pub fn advance(&mut self, delta_ms: f32) {
        for channel in &mut self.channels {
            channel.advance(delta_ms);
        }
    }

    /// Evaluate every channel at its current playhead, in channel order.
    pub fn values(&self) -> Result<Vec<T>> {
        self.channels.iter().map(|c| c.value()).collect()
    }

    /// Longest channel duration in milliseconds.
    pub fn duration(&self) -> f32 {
        self.channels
            .iter()
            .map(|c| c.duration())
            .fold(0.0, f32::max)
    }
}
