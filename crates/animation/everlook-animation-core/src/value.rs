//! Animated value shapes.
//!
//! Model bone channels carry translations (`Vector3`), rotations
//! (`Quaternion`), scales, texture coordinates (`Vector2`), colors (`Rgb`) and
//! plain scalars (alpha, visibility). `Value` is the tagged union used where the
//! shape is only known at load time (clip files); statically typed timelines use
//! the concrete types directly.

use serde::{Deserialize, Serialize};

/// Kind of an animated value. Drives the flatten/coalesce conversion table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Vec2,
    Vec3,
    Rgb,
    Quat,
    Bool,
    Text,
}

impl ValueKind {
    /// Number of float components a value of this kind flattens to.
    ///
    /// `None` marks kinds with no numeric representation (step-only data).
    #[inline]
    pub fn component_count(self) -> Option<usize> {
        match self {
            ValueKind::I8
            | ValueKind::I16
            | ValueKind::I32
            | ValueKind::I64
            | ValueKind::U8
            | ValueKind::U16
            | ValueKind::U32
            | ValueKind::U64
            | ValueKind::F32
            | ValueKind::F64 => Some(1),
            ValueKind::Vec2 => Some(2),
            ValueKind::Vec3 | ValueKind::Rgb => Some(3),
            ValueKind::Quat => Some(4),
            ValueKind::Bool | ValueKind::Text => None,
        }
    }

    /// Whether values of this kind can be flattened and blended.
    #[inline]
    pub fn is_interpolatable(self) -> bool {
        self.component_count().is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Linear RGB color, components in [0, 1] by convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Rotation quaternion stored as (x, y, z, w).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Unit-length copy. Component-wise blends do not preserve length, so
    /// renderers normalize before building matrices.
    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            let inv = len.recip();
            Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
        } else {
            Self::IDENTITY
        }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Runtime-tagged animated value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Value {
    /// Scalar float
    Float(f32),

    /// 2D vector (texture coordinates)
    Vec2(Vector2),

    /// 3D vector (translation, scale)
    Vec3(Vector3),

    /// RGB color
    Rgb(Rgb),

    /// Quaternion (x, y, z, w)
    Quat(Quaternion),

    /// Boolean flag; not interpolatable
    Bool(bool),

    /// Text; not interpolatable
    Text(String),
}

impl Value {
    /// Return the kind of this value.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Float(_) => ValueKind::F32,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::Rgb(_) => ValueKind::Rgb,
            Value::Quat(_) => ValueKind::Quat,
            Value::Bool(_) => ValueKind::Bool,
            Value::Text(_) => ValueKind::Text,
        }
    }

    pub fn vec3(x: f32, y: f32, z: f32) -> Self {
        Value::Vec3(Vector3::new(x, y, z))
    }

    pub fn quat(x: f32, y: f32, z: f32, w: f32) -> Self {
        Value::Quat(Quaternion::new(x, y, z, w))
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<Vector2> for Value {
    fn from(value: Vector2) -> Self {
        Value::Vec2(value)
    }
}

impl From<Vector3> for Value {
    fn from(value: Vector3) -> Self {
        Value::Vec3(value)
    }
}

impl From<Rgb> for Value {
    fn from(value: Rgb) -> Self {
        Value::Rgb(value)
    }
}

impl From<Quaternion> for Value {
    fn from(value: Quaternion) -> Self {
        Value::Quat(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_report_component_counts() {
        assert_eq!(ValueKind::F64.component_count(), Some(1));
        assert_eq!(ValueKind::Rgb.component_count(), Some(3));
        assert_eq!(ValueKind::Quat.component_count(), Some(4));
        assert_eq!(ValueKind::Text.component_count(), None);
        assert!(!ValueKind::Bool.is_interpolatable());
    }

    #[test]
    fn quaternion_normalization() {
        let q = Quaternion::new(0.0, 0.0, 0.0, 2.0).normalized();
        assert_eq!(q, Quaternion::IDENTITY);
        assert_eq!(Quaternion::new(0.0, 0.0, 0.0, 0.0).normalized(), Quaternion::IDENTITY);
    }

    #[test]
    fn value_serializes_tagged() {
        let v = Value::vec3(1.0, 2.0, 3.0);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["type"], "Vec3");
        assert_eq!(json["data"]["y"], 2.0);
        let back: Value = serde_json::from_value(json).unwrap();
        assert_eq!(back, v);
    }
}
