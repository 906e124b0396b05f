use serde::Deserialize;

use crate::config::Config;
use crate::interp::InterpolationMode;
use crate::keyframe::SplineKeyframe;
use crate::spline::SplineTimeline;
use crate::timeline::Timeline;
use crate::track::{AnimationTrack, Channel};
use crate::value::{Quaternion, Rgb, Value, Vector2, Vector3};
use crate::{AnimationError, Result};

/// A loaded animation clip: named tracks of `Value` channels.
#[derive(Debug)]
pub struct ClipData {
    pub name: String,
    pub tracks: Vec<AnimationTrack<Value>>,
}

impl ClipData {
    /// Look a track up by name.
    pub fn track(&self, name: &str) -> Option<&AnimationTrack<Value>> {
        self.tracks.iter().find(|t| t.name() == name)
    }

    /// Advance every channel of every track by `delta_ms`.
    pub fn advance(&mut self, delta_ms: f32) {
        for track in &mut self.tracks {
            track.advance(delta_ms);
        }
    }

    /// Longest channel duration in milliseconds.
    pub fn duration(&self) -> f32 {
        self.tracks
            .iter()
            .map(|t| t.duration())
            .fold(0.0, f32::max)
    }
}

/// Public API: parse a JSON clip document with default loader settings.
pub fn parse_clip_json(s: &str) -> Result<ClipData> {
    parse_clip_json_with(s, &Config::default())
}

/// Parse a JSON clip document into timelines.
///
/// Notes:
/// - Key times are milliseconds and must be strictly ascending per timeline.
/// - A timeline whose keys all carry `in`/`out` tangents becomes a
///   [`SplineTimeline`]; keys without tangents build a plain [`Timeline`].
///   Mixing both within one timeline is rejected.
/// - Missing `interpolation`/`looping` fall back to `cfg`.
/// - Every timeline is fully validated here, never at first evaluation.
pub fn parse_clip_json_with(s: &str, cfg: &Config) -> Result<ClipData> {
    let stored: StoredClip = serde_json::from_str(s)?;

    let mut tracks = Vec::with_capacity(stored.tracks.len());
    for st in stored.tracks {
        let mut channels: Vec<Box<dyn Channel<Value>>> = Vec::with_capacity(st.timelines.len());
        for (index, tl) in st.timelines.into_iter().enumerate() {
            let channel = build_channel(tl, cfg).map_err(|err| {
                log::debug!("clip '{}': track '{}' timeline {index}: {err}", stored.name, st.name);
                err
            })?;
            channels.push(channel);
        }
        tracks.push(AnimationTrack::new(st.name, channels));
    }

    log::debug!(
        "clip '{}' loaded with {} tracks",
        stored.name,
        tracks.len()
    );
    Ok(ClipData {
        name: stored.name,
        tracks,
    })
}

fn build_channel(tl: StoredTimeline, cfg: &Config) -> Result<Box<dyn Channel<Value>>> {
    let mode = tl.interpolation.unwrap_or(cfg.default_interpolation);
    let options = cfg.timeline_options(tl.looping, tl.duration);

    let with_tangents = tl
        .keys
        .iter()
        .filter(|k| k.r#in.is_some() || k.r#out.is_some())
        .count();

    if with_tangents == 0 {
        if mode.requires_tangents() {
            return Err(AnimationError::TangentsRequired { mode });
        }
        let mut timestamps = Vec::with_capacity(tl.keys.len());
        let mut values = Vec::with_capacity(tl.keys.len());
        for key in tl.keys {
            timestamps.push(key.time);
            values.push(to_core_value(key.value));
        }
        return Ok(Box::new(Timeline::new(mode, timestamps, values, options)?));
    }

    if with_tangents != tl.keys.len() {
        return Err(AnimationError::InvalidClip {
            reason: format!(
                "{} of {} keys carry tangents; a timeline needs all or none",
                with_tangents,
                tl.keys.len()
            ),
        });
    }

    let mut timestamps = Vec::with_capacity(tl.keys.len());
    let mut keys = Vec::with_capacity(tl.keys.len());
    for key in tl.keys {
        let (in_tangent, out_tangent) = match (key.r#in, key.r#out) {
            (Some(i), Some(o)) => (i, o),
            _ => {
                return Err(AnimationError::InvalidClip {
                    reason: format!("key at {}ms is missing one of its tangents", key.time),
                })
            }
        };
        timestamps.push(key.time);
        keys.push(SplineKeyframe::new(
            to_core_value(key.value),
            to_core_value(in_tangent),
            to_core_value(out_tangent),
        ));
    }
    Ok(Box::new(SplineTimeline::new(mode, timestamps, keys, options)?))
}

fn to_core_value(v: RawValue) -> Value {
    match v {
        RawValue::Boolean(b) => Value::Bool(b),
        RawValue::Number(n) => Value::Float(n as f32),
        RawValue::String(s) => Value::Text(s),
        RawValue::Quaternion { x, y, z, w } => {
            Value::Quat(Quaternion::new(x as f32, y as f32, z as f32, w as f32))
        }
        RawValue::Vector3 { x, y, z } => Value::Vec3(Vector3::new(x as f32, y as f32, z as f32)),
        RawValue::Vector2 { x, y } => Value::Vec2(Vector2::new(x as f32, y as f32)),
        RawValue::Rgb { r, g, b } => Value::Rgb(Rgb::new(r as f32, g as f32, b as f32)),
    }
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct StoredClip {
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<StoredTrack>,
}

#[derive(Debug, Deserialize)]
struct StoredTrack {
    pub name: String,
    #[serde(default)]
    pub timelines: Vec<StoredTimeline>,
}

#[derive(Debug, Deserialize)]
struct StoredTimeline {
    #[serde(default)]
    pub interpolation: Option<InterpolationMode>,
    #[serde(default)]
    pub looping: Option<bool>,
    /// Milliseconds; defaults to the last key time.
    #[serde(default)]
    pub duration: Option<f32>,
    pub keys: Vec<StoredKey>,
}

#[derive(Debug, Deserialize)]
struct StoredKey {
    pub time: u32,
    pub value: RawValue,
    #[serde(default)]
    #[serde(rename = "in")]
    pub r#in: Option<RawValue>,
    #[serde(default)]
    #[serde(rename = "out")]
    pub r#out: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Boolean(bool),
    Number(f64),
    String(String),
    // Put more specific shapes BEFORE less specific to avoid untagged matching pitfalls.
    Quaternion { x: f64, y: f64, z: f64, w: f64 },
    Vector3 { x: f64, y: f64, z: f64 },
    Vector2 { x: f64, y: f64 },
    Rgb { r: f64, g: f64, b: f64 },
}
