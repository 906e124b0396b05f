use everlook_animation_core::{
    interpolate_linear, AnimationError, Flatten, Quaternion, Rgb, Value, ValueKind, Vector2,
    Vector3,
};

fn round_trip<T: Flatten + PartialEq + std::fmt::Debug>(value: T) {
    let kind = value.value_kind();
    let components = value.flatten().expect("flatten");
    assert_eq!(Some(components.len()), kind.component_count());
    let back = T::coalesce(kind, &components).expect("coalesce");
    assert_eq!(back, value, "{kind:?} did not round-trip");
}

#[test]
fn float_kinds_round_trip_exactly() {
    round_trip(0.1f32);
    round_trip(-1234.5678f32);
    round_trip(f32::MIN_POSITIVE);
    round_trip(0.1f64);
    round_trip(std::f64::consts::PI);
}

#[test]
fn composite_kinds_round_trip_exactly() {
    round_trip(Vector2::new(0.1, -0.2));
    round_trip(Vector3::new(1.0e-3, 2.5, -7.75));
    round_trip(Rgb::new(0.2, 0.4, 0.6));
    round_trip(Quaternion::new(0.0, 0.707_106_77, 0.0, 0.707_106_77));
    round_trip([1.5f32, 2.5]);
    round_trip([1.5f32, 2.5, 3.5]);
    round_trip([0.0f32, 0.0, 0.0, 1.0]);
}

#[test]
fn tagged_values_round_trip_through_their_kind() {
    round_trip(Value::Float(3.25));
    round_trip(Value::vec3(1.0, 2.0, 3.0));
    round_trip(Value::quat(0.0, 0.0, 0.0, 1.0));
    round_trip(Value::Rgb(Rgb::new(1.0, 0.0, 0.5)));
}

#[test]
fn integers_round_trip_across_f32_precision() {
    let limit = 1i64 << 24;
    for v in [-limit, -limit + 1, -1, 0, 1, limit - 1, limit, limit + 1] {
        round_trip(v);
        round_trip(v as i32);
    }
    for v in [0u32, 1, (1 << 24) - 1, 1 << 24, (1 << 24) + 1] {
        round_trip(v);
    }
    round_trip(i8::MIN);
    round_trip(i16::MAX);
    round_trip(u8::MAX);
    round_trip(u16::MAX);
    round_trip(u64::from(u32::MAX));
}

#[test]
fn linear_blend_hits_endpoints_exactly() {
    let a = Vector3::new(0.1, 0.2, 0.3);
    let b = Vector3::new(0.7, -0.9, 11.3);
    assert_eq!(interpolate_linear(&a, &b, 0.0).unwrap(), a);
    assert_eq!(interpolate_linear(&a, &b, 1.0).unwrap(), b);

    let q0 = Quaternion::IDENTITY;
    let q1 = Quaternion::new(0.0, 1.0, 0.0, 0.0);
    assert_eq!(interpolate_linear(&q0, &q1, 1.0).unwrap(), q1);
}

#[test]
fn linear_blend_is_component_wise() {
    let out = interpolate_linear(&Rgb::new(0.0, 1.0, 0.5), &Rgb::new(1.0, 0.0, 0.5), 0.25).unwrap();
    assert_eq!(out, Rgb::new(0.25, 0.75, 0.5));
}

#[test]
fn linear_blend_of_mismatched_kinds_fails() {
    let err = interpolate_linear(&Value::Float(0.0), &Value::vec3(1.0, 1.0, 1.0), 0.5).unwrap_err();
    assert_eq!(
        err,
        AnimationError::ValueKindMismatch {
            expected: ValueKind::F32,
            actual: ValueKind::Vec3
        }
    );
}

#[test]
fn step_only_kinds_report_no_width() {
    assert_eq!(ValueKind::Bool.component_count(), None);
    assert_eq!(ValueKind::Text.component_count(), None);
    assert_eq!(ValueKind::Quat.component_count(), Some(4));
    assert!(Value::Bool(true).flatten().is_err());
}

#[test]
fn linear_blend_midpoints() {
    assert_eq!(interpolate_linear(&0.0f32, &10.0, 0.5).unwrap(), 5.0);
    assert_eq!(
        interpolate_linear(&Vector3::ZERO, &Vector3::new(2.0, 4.0, 6.0), 0.5).unwrap(),
        Vector3::new(1.0, 2.0, 3.0)
    );
}
