//! Flatten/coalesce: conversion between typed values and float components.
//!
//! Every interpolator works on flat component arrays so a single blend routine
//! serves scalars, vectors, colors and quaternions alike. Conversions are
//! resolved statically through the [`Flatten`] impl of the value type; the
//! runtime-tagged [`Value`] resolves its conversion with one `match` on its kind.
//!
//! Component order:
//! - scalars: `[v]`
//! - `Vector2`: `[x, y]`, `Vector3`: `[x, y, z]`
//! - `Rgb`: `[r, g, b]`
//! - `Quaternion`: `[x, y, z, w]`
//!
//! Components are `f64`, so `f32`/`f64` values round-trip exactly. Integer
//! scalars round to the nearest integer on coalesce and are exact up to 2^53;
//! wider `i64`/`u64` magnitudes are lossy.

use smallvec::{smallvec, SmallVec};

use crate::value::{Quaternion, Rgb, Value, ValueKind, Vector2, Vector3};
use crate::{AnimationError, Result};

/// Flattened value. Inline storage covers every registered kind.
pub type Components = SmallVec<[f64; 4]>;

/// A value that can be decomposed into float components and rebuilt from them.
pub trait Flatten: Clone {
    /// Kind of this particular value.
    fn value_kind(&self) -> ValueKind;

    /// Decompose into components in the documented order.
    fn flatten(&self) -> Result<Components>;

    /// Rebuild a value of `kind` from `components`.
    fn coalesce(kind: ValueKind, components: &[f64]) -> Result<Self>;
}

/// Check that `components` has the width `kind` flattens to.
pub fn expect_width(kind: ValueKind, components: &[f64]) -> Result<()> {
    let expected = kind
        .component_count()
        .ok_or(AnimationError::UnsupportedValueKind { kind })?;
    if components.len() != expected {
        return Err(AnimationError::ComponentCount {
            kind,
            expected,
            actual: components.len(),
        });
    }
    Ok(())
}

#[inline]
fn expect_static(own: ValueKind, requested: ValueKind, components: &[f64]) -> Result<()> {
    if own != requested {
        return Err(AnimationError::ValueKindMismatch {
            expected: own,
            actual: requested,
        });
    }
    expect_width(own, components)
}

macro_rules! impl_flatten_int {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl Flatten for $ty {
            #[inline]
            fn value_kind(&self) -> ValueKind {
                ValueKind::$kind
            }

            #[inline]
            fn flatten(&self) -> Result<Components> {
                Ok(smallvec![*self as f64])
            }

            fn coalesce(kind: ValueKind, components: &[f64]) -> Result<Self> {
                expect_static(ValueKind::$kind, kind, components)?;
                Ok(components[0].round() as $ty)
            }
        }
    )*};
}

impl_flatten_int! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
}

impl Flatten for f32 {
    #[inline]
    fn value_kind(&self) -> ValueKind {
        ValueKind::F32
    }

    #[inline]
    fn flatten(&self) -> Result<Components> {
        Ok(smallvec![*self as f64])
    }

    fn coalesce(kind: ValueKind, components: &[f64]) -> Result<Self> {
        expect_static(ValueKind::F32, kind, components)?;
        Ok(components[0] as f32)
    }
}

impl Flatten for f64 {
    #[inline]
    fn value_kind(&self) -> ValueKind {
        ValueKind::F64
    }

    #[inline]
    fn flatten(&self) -> Result<Components> {
        Ok(smallvec![*self])
    }

    fn coalesce(kind: ValueKind, components: &[f64]) -> Result<Self> {
        expect_static(ValueKind::F64, kind, components)?;
        Ok(components[0])
    }
}

impl Flatten for Vector2 {
    #[inline]
    fn value_kind(&self) -> ValueKind {
        ValueKind::Vec2
    }

    #[inline]
    fn flatten(&self) -> Result<Components> {
        Ok(smallvec![self.x as f64, self.y as f64])
    }

    fn coalesce(kind: ValueKind, c: &[f64]) -> Result<Self> {
        expect_static(ValueKind::Vec2, kind, c)?;
        Ok(Vector2::new(c[0] as f32, c[1] as f32))
    }
}

impl Flatten for Vector3 {
    #[inline]
    fn value_kind(&self) -> ValueKind {
        ValueKind::Vec3
    }

    #[inline]
    fn flatten(&self) -> Result<Components> {
        Ok(smallvec![self.x as f64, self.y as f64, self.z as f64])
    }

    fn coalesce(kind: ValueKind, c: &[f64]) -> Result<Self> {
        expect_static(ValueKind::Vec3, kind, c)?;
        Ok(Vector3::new(c[0] as f32, c[1] as f32, c[2] as f32))
    }
}

impl Flatten for Rgb {
    #[inline]
    fn value_kind(&self) -> ValueKind {
        ValueKind::Rgb
    }

    #[inline]
    fn flatten(&self) -> Result<Components> {
        Ok(smallvec![self.r as f64, self.g as f64, self.b as f64])
    }

    fn coalesce(kind: ValueKind, c: &[f64]) -> Result<Self> {
        expect_static(ValueKind::Rgb, kind, c)?;
        Ok(Rgb::new(c[0] as f32, c[1] as f32, c[2] as f32))
    }
}

impl Flatten for Quaternion {
    #[inline]
    fn value_kind(&self) -> ValueKind {
        ValueKind::Quat
    }

    #[inline]
    fn flatten(&self) -> Result<Components> {
        Ok(smallvec![
            self.x as f64,
            self.y as f64,
            self.z as f64,
            self.w as f64
        ])
    }

    fn coalesce(kind: ValueKind, c: &[f64]) -> Result<Self> {
        expect_static(ValueKind::Quat, kind, c)?;
        Ok(Quaternion::new(
            c[0] as f32,
            c[1] as f32,
            c[2] as f32,
            c[3] as f32,
        ))
    }
}

// Raw arrays as produced by model parsers: [x,y], [x,y,z], [x,y,z,w].
macro_rules! impl_flatten_array {
    ($($n:literal => $kind:ident),* $(,)?) => {$(
        impl Flatten for [f32; $n] {
            #[inline]
            fn value_kind(&self) -> ValueKind {
                ValueKind::$kind
            }

            #[inline]
            fn flatten(&self) -> Result<Components> {
                Ok(self.iter().map(|c| *c as f64).collect())
            }

            fn coalesce(kind: ValueKind, c: &[f64]) -> Result<Self> {
                expect_static(ValueKind::$kind, kind, c)?;
                let mut out = [0.0f32; $n];
                for (dst, src) in out.iter_mut().zip(c) {
                    *dst = *src as f32;
                }
                Ok(out)
            }
        }
    )*};
}

impl_flatten_array! {
    2 => Vec2,
    3 => Vec3,
    4 => Quat,
}

impl Flatten for Value {
    #[inline]
    fn value_kind(&self) -> ValueKind {
        self.kind()
    }

    fn flatten(&self) -> Result<Components> {
        match self {
            Value::Float(v) => v.flatten(),
            Value::Vec2(v) => v.flatten(),
            Value::Vec3(v) => v.flatten(),
            Value::Rgb(v) => v.flatten(),
            Value::Quat(v) => v.flatten(),
            Value::Bool(_) | Value::Text(_) => Err(AnimationError::UnsupportedValueKind {
                kind: self.kind(),
            }),
        }
    }

    fn coalesce(kind: ValueKind, components: &[f64]) -> Result<Self> {
        match kind {
            ValueKind::F32 => f32::coalesce(kind, components).map(Value::Float),
            ValueKind::Vec2 => Vector2::coalesce(kind, components).map(Value::Vec2),
            ValueKind::Vec3 => Vector3::coalesce(kind, components).map(Value::Vec3),
            ValueKind::Rgb => Rgb::coalesce(kind, components).map(Value::Rgb),
            ValueKind::Quat => Quaternion::coalesce(kind, components).map(Value::Quat),
            _ => Err(AnimationError::UnsupportedValueKind { kind }),
        }
    }
}

#[cfg(feature = "glam")]
mod glam_impls {
    use super::*;

    impl Flatten for glam::Vec2 {
        #[inline]
        fn value_kind(&self) -> ValueKind {
            ValueKind::Vec2
        }

        #[inline]
        fn flatten(&self) -> Result<Components> {
            Ok(smallvec![self.x as f64, self.y as f64])
        }

        fn coalesce(kind: ValueKind, c: &[f64]) -> Result<Self> {
            expect_static(ValueKind::Vec2, kind, c)?;
            Ok(glam::Vec2::new(c[0] as f32, c[1] as f32))
        }
    }

    impl Flatten for glam::Vec3 {
        #[inline]
        fn value_kind(&self) -> ValueKind {
            ValueKind::Vec3
        }

        #[inline]
        fn flatten(&self) -> Result<Components> {
            Ok(smallvec![self.x as f64, self.y as f64, self.z as f64])
        }

        fn coalesce(kind: ValueKind, c: &[f64]) -> Result<Self> {
            expect_static(ValueKind::Vec3, kind, c)?;
            Ok(glam::Vec3::new(c[0] as f32, c[1] as f32, c[2] as f32))
        }
    }

    impl Flatten for glam::Quat {
        #[inline]
        fn value_kind(&self) -> ValueKind {
            ValueKind::Quat
        }

        #[inline]
        fn flatten(&self) -> Result<Components> {
            Ok(smallvec![
                self.x as f64,
                self.y as f64,
                self.z as f64,
                self.w as f64
            ])
        }

        fn coalesce(kind: ValueKind, c: &[f64]) -> Result<Self> {
            expect_static(ValueKind::Quat, kind, c)?;
            Ok(glam::Quat::from_xyzw(
                c[0] as f32,
                c[1] as f32,
                c[2] as f32,
                c[3] as f32,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_components_follow_documented_order() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.flatten().unwrap().as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        let c = Rgb::new(0.25, 0.5, 0.75);
        assert_eq!(c.flatten().unwrap().as_slice(), &[0.25, 0.5, 0.75]);
    }

    #[test]
    fn integer_coalesce_rounds() {
        assert_eq!(i32::coalesce(ValueKind::I32, &[4.6]).unwrap(), 5);
        assert_eq!(u8::coalesce(ValueKind::U8, &[300.0]).unwrap(), u8::MAX);
    }

    #[test]
    fn wrong_width_is_rejected() {
        let err = Vector3::coalesce(ValueKind::Vec3, &[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            AnimationError::ComponentCount {
                kind: ValueKind::Vec3,
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn static_kind_mismatch_is_rejected() {
        let err = f32::coalesce(ValueKind::Vec2, &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, AnimationError::ValueKindMismatch { .. }));
    }

    #[test]
    fn text_has_no_components() {
        let err = Value::Text("idle".into()).flatten().unwrap_err();
        assert_eq!(
            err,
            AnimationError::UnsupportedValueKind {
                kind: ValueKind::Text
            }
        );
        assert!(Value::coalesce(ValueKind::Bool, &[1.0]).is_err());
        assert!(Value::coalesce(ValueKind::I16, &[1.0]).is_err());
    }

    #[cfg(feature = "glam")]
    #[test]
    fn glam_quat_round_trips() {
        let q = glam::Quat::from_xyzw(0.0, 0.5, 0.0, 0.5);
        let c = q.flatten().unwrap();
        assert_eq!(glam::Quat::coalesce(ValueKind::Quat, &c).unwrap(), q);
    }
}
