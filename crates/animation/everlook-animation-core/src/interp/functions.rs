//! Interpolation helpers:
//! - interpolate_linear (component-wise blend)
//! - interpolate_hermite (cubic Hermite on value + tangents)
//!
//! Both take an unclamped `alpha`; values outside [0,1] extrapolate. Exact
//! keyframe hits (`alpha` of 0 or 1) return the keyframe value untouched.

use crate::flatten::{Components, Flatten};
use crate::keyframe::SplineKeyframe;
use crate::{AnimationError, Result};

/// Cubic Hermite basis weights `(h00, h10, h01, h11)` for `t`.
///
/// `h00`/`h01` weight the leaving/approaching values, `h10`/`h11` the leaving
/// out-tangent and approaching in-tangent.
#[inline]
pub fn hermite_basis(t: f64) -> (f64, f64, f64, f64) {
    let t2 = t * t;
    let t3 = t2 * t;
    (
        2.0 * t3 - 3.0 * t2 + 1.0,
        t3 - 2.0 * t2 + t,
        -2.0 * t3 + 3.0 * t2,
        t3 - t2,
    )
}

fn flatten_matching<T: Flatten>(reference: &T, other: &T) -> Result<Components> {
    if other.value_kind() != reference.value_kind() {
        return Err(AnimationError::ValueKindMismatch {
            expected: reference.value_kind(),
            actual: other.value_kind(),
        });
    }
    other.flatten()
}

/// Linear blend from `leaving` to `approaching`.
pub fn interpolate_linear<T: Flatten>(leaving: &T, approaching: &T, alpha: f32) -> Result<T> {
    if alpha == 0.0 {
        return Ok(leaving.clone());
    }
    if alpha == 1.0 {
        return Ok(approaching.clone());
    }

    let kind = leaving.value_kind();
    let a = leaving.flatten()?;
    let b = flatten_matching(leaving, approaching)?;
    let t = alpha as f64;
    let blended: Components = a
        .iter()
        .zip(b.iter())
        .map(|(a, b)| a + (b - a) * t)
        .collect();
    T::coalesce(kind, &blended)
}

/// Cubic Hermite blend across a spline segment.
///
/// Uses `leaving.value`, `leaving.out_tangent`, `approaching.value` and
/// `approaching.in_tangent`.
pub fn interpolate_hermite<T: Flatten>(
    leaving: &SplineKeyframe<T>,
    approaching: &SplineKeyframe<T>,
    alpha: f32,
) -> Result<T> {
    if alpha == 0.0 {
        return Ok(leaving.value.clone());
    }
    if alpha == 1.0 {
        return Ok(approaching.value.clone());
    }

    let kind = leaving.value.value_kind();
    let p0 = leaving.value.flatten()?;
    let p1 = flatten_matching(&leaving.value, &approaching.value)?;
    let m0 = flatten_matching(&leaving.value, &leaving.out_tangent)?;
    let m1 = flatten_matching(&leaving.value, &approaching.in_tangent)?;

    let (h00, h10, h01, h11) = hermite_basis(alpha as f64);
    let blended: Components = (0..p0.len())
        .map(|i| h00 * p0[i] + h10 * m0[i] + h01 * p1[i] + h11 * m1[i])
        .collect();
    T::coalesce(kind, &blended)
}
