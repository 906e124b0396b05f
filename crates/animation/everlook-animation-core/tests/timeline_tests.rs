use approx::assert_relative_eq;
use everlook_animation_core::{
    AnimationError, Approach, Bracket, InterpolationMode, Keyframe, Timeline, TimelineOptions,
    Value, Vector3,
};

fn scalar_timeline(mode: InterpolationMode, options: TimelineOptions) -> Timeline<f32> {
    Timeline::new(mode, vec![0, 10], vec![0.0, 100.0], options).expect("valid timeline")
}

fn hundred_ms(options: TimelineOptions) -> Timeline<f32> {
    Timeline::new(InterpolationMode::Linear, vec![0, 100], vec![0.0, 1.0], options)
        .expect("valid timeline")
}

#[test]
fn non_looping_advance_clamps_at_duration() {
    let mut t = hundred_ms(TimelineOptions::default());
    t.advance(90.0);
    t.advance(50.0);
    assert_eq!(t.position(), 100.0);
    // Terminal: further advances stay put.
    t.advance(10.0);
    assert_eq!(t.position(), 100.0);
}

#[test]
fn looping_advance_wraps_overflow() {
    let mut t = hundred_ms(TimelineOptions::looping());
    t.advance(90.0);
    t.advance(30.0);
    assert_eq!(t.position(), 20.0);
}

#[test]
fn advance_within_duration_accumulates() {
    let mut t = hundred_ms(TimelineOptions::default());
    t.advance(40.0);
    t.advance(60.0);
    assert_eq!(t.position(), 100.0);
}

#[test]
fn linear_value_at_and_between_keyframes() {
    let mut t = scalar_timeline(InterpolationMode::Linear, TimelineOptions::default());
    assert_eq!(t.value().unwrap(), 0.0);
    t.advance(5.0);
    assert_eq!(t.value().unwrap(), 50.0);
    t.advance(5.0);
    assert_eq!(t.value().unwrap(), 100.0);
}

#[test]
fn value_at_does_not_move_playhead() {
    let t = scalar_timeline(InterpolationMode::Linear, TimelineOptions::default());
    assert_eq!(t.value_at(2.5).unwrap(), 25.0);
    assert_eq!(t.position(), 0.0);
}

#[test]
fn none_mode_is_a_step_function() {
    let t = Timeline::new(
        InterpolationMode::None,
        vec![0, 10, 20],
        vec![1.0f32, 2.0, 3.0],
        TimelineOptions::default(),
    )
    .unwrap();
    for pos in [0.0, 0.1, 5.0, 9.99] {
        assert_eq!(t.value_at(pos).unwrap(), 1.0, "position {pos}");
    }
    for pos in [10.0, 15.0, 19.5] {
        assert_eq!(t.value_at(pos).unwrap(), 2.0, "position {pos}");
    }
    assert_eq!(t.value_at(20.0).unwrap(), 3.0);
}

#[test]
fn none_mode_accepts_step_only_kinds() {
    let t = Timeline::new(
        InterpolationMode::None,
        vec![0, 500],
        vec![Value::from("closed"), Value::from("open")],
        TimelineOptions::default(),
    )
    .unwrap();
    assert_eq!(t.value_at(250.0).unwrap(), Value::from("closed"));
    assert_eq!(t.value_at(500.0).unwrap(), Value::from("open"));
}

#[test]
fn linear_mode_rejects_step_only_kinds() {
    let err = Timeline::new(
        InterpolationMode::Linear,
        vec![0, 500],
        vec![Value::Bool(false), Value::Bool(true)],
        TimelineOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, AnimationError::UnsupportedValueKind { .. }));
}

#[test]
fn count_mismatch_is_rejected_at_construction() {
    let err = Timeline::new(
        InterpolationMode::Linear,
        vec![0, 10, 20],
        vec![0.0f32, 1.0],
        TimelineOptions::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        AnimationError::KeyframeCountMismatch {
            timestamps: 3,
            values: 2
        }
    );
    assert!(err.is_construction_error());
}

#[test]
fn empty_timeline_is_rejected() {
    let err = Timeline::<f32>::new(
        InterpolationMode::Linear,
        vec![],
        vec![],
        TimelineOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err, AnimationError::EmptyTimeline);
}

#[test]
fn duplicate_timestamps_are_rejected() {
    let err = Timeline::new(
        InterpolationMode::Linear,
        vec![0, 10, 10],
        vec![0.0f32, 1.0, 2.0],
        TimelineOptions::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        AnimationError::UnorderedTimestamps {
            index: 2,
            previous: 10,
            current: 10
        }
    );
}

#[test]
fn mixed_value_kinds_are_rejected() {
    let err = Timeline::new(
        InterpolationMode::Linear,
        vec![0, 10],
        vec![Value::Float(0.0), Value::vec3(0.0, 0.0, 0.0)],
        TimelineOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, AnimationError::ValueKindMismatch { .. }));
}

#[test]
fn looping_vec3_end_to_end() {
    let zero = Vector3::ZERO;
    let one = Vector3::ONE;
    let mut t = Timeline::new(
        InterpolationMode::Linear,
        vec![0, 1000, 2000],
        vec![zero, one, zero],
        TimelineOptions::looping().with_duration(2000.0),
    )
    .unwrap();

    t.advance(1250.0);
    t.advance(1250.0);
    assert_eq!(t.position(), 500.0);
    assert_eq!(t.value().unwrap(), Vector3::new(0.5, 0.5, 0.5));
}

#[test]
fn single_large_step_wraps_once() {
    let mut t = Timeline::new(
        InterpolationMode::Linear,
        vec![0, 1000, 2000],
        vec![0.0f32, 1.0, 0.0],
        TimelineOptions::looping(),
    )
    .unwrap();
    t.advance(2500.0);
    assert_eq!(t.position(), 500.0);
    assert_eq!(t.value().unwrap(), 0.5);
}

#[test]
fn segment_alpha_is_local_to_bracket() {
    let t = Timeline::new(
        InterpolationMode::Linear,
        vec![0, 1000, 2000],
        vec![0.0f32, 10.0, 30.0],
        TimelineOptions::default(),
    )
    .unwrap();
    assert_eq!(
        t.bracket_at(1500.0),
        Bracket::Segment {
            leaving: 1,
            approaching: Approach::Key(2),
            alpha: 0.5
        }
    );
    assert_eq!(t.value_at(1500.0).unwrap(), 20.0);
}

#[test]
fn non_looping_read_clamps_out_of_range_positions() {
    let t = scalar_timeline(InterpolationMode::Linear, TimelineOptions::default());
    assert_eq!(t.value_at(-5.0).unwrap(), 0.0);
    assert_eq!(t.value_at(50.0).unwrap(), 100.0);
}

#[test]
fn looping_read_wraps_positions() {
    let t = scalar_timeline(InterpolationMode::Linear, TimelineOptions::looping());
    assert_relative_eq!(t.value_at(12.5).unwrap(), 25.0);
    assert_relative_eq!(t.value_at(-2.5).unwrap(), 75.0);
}

#[test]
fn first_key_after_zero_holds_until_reached() {
    let t = Timeline::new(
        InterpolationMode::Linear,
        vec![100, 200],
        vec![1.0f32, 2.0],
        TimelineOptions::default(),
    )
    .unwrap();
    assert_eq!(t.value_at(50.0).unwrap(), 1.0);
    assert_eq!(t.value_at(150.0).unwrap(), 1.5);
}

// Trailing dead time: duration past the last key blends back towards the
// first value through a virtual key at `duration`.
#[test]
fn trailing_virtual_keyframe_blends_to_first_value() {
    let t = Timeline::new(
        InterpolationMode::Linear,
        vec![0, 1000],
        vec![0.0f32, 10.0],
        TimelineOptions::default().with_duration(2000.0),
    )
    .unwrap();
    assert_eq!(t.duration(), 2000.0);
    assert_eq!(
        t.bracket_at(1500.0),
        Bracket::Segment {
            leaving: 1,
            approaching: Approach::Virtual,
            alpha: 0.5
        }
    );
    assert_eq!(t.value_at(1000.0).unwrap(), 10.0);
    assert_eq!(t.value_at(1500.0).unwrap(), 5.0);
    // Clamped non-looping end sits exactly on the virtual key.
    assert_eq!(t.value_at(2000.0).unwrap(), 0.0);
}

#[test]
fn trailing_virtual_keyframe_with_looping() {
    let mut t = Timeline::new(
        InterpolationMode::Linear,
        vec![0, 1000],
        vec![0.0f32, 10.0],
        TimelineOptions::looping().with_duration(2000.0),
    )
    .unwrap();
    t.advance(1750.0);
    assert_eq!(t.value().unwrap(), 2.5);
    // Wraps at 2000 (not at the last key) and restarts from the first value.
    t.advance(500.0);
    assert_eq!(t.position(), 250.0);
    assert_eq!(t.value().unwrap(), 2.5);
    // The wrap point itself normalizes to 0.
    assert_eq!(t.value_at(2000.0).unwrap(), 0.0);
}

#[test]
fn trailing_virtual_keyframe_in_step_mode_holds_last() {
    let t = Timeline::new(
        InterpolationMode::None,
        vec![0, 1000],
        vec![0.0f32, 10.0],
        TimelineOptions::default().with_duration(2000.0),
    )
    .unwrap();
    assert_eq!(t.value_at(1999.0).unwrap(), 10.0);
}

#[test]
fn shorter_duration_override_truncates_playback() {
    let mut t = Timeline::new(
        InterpolationMode::Linear,
        vec![0, 1000],
        vec![0.0f32, 10.0],
        TimelineOptions::default().with_duration(500.0),
    )
    .unwrap();
    t.advance(900.0);
    assert_eq!(t.position(), 500.0);
    assert_eq!(t.value().unwrap(), 5.0);
}

#[test]
fn set_looping_switches_advance_behaviour() {
    let mut t = hundred_ms(TimelineOptions::default());
    t.set_looping(true);
    t.advance(150.0);
    assert!(t.is_looping());
    assert_eq!(t.position(), 50.0);
}

#[test]
fn from_keyframes_matches_parallel_arrays() {
    let t = Timeline::from_keyframes(
        InterpolationMode::Linear,
        vec![Keyframe::new(0, 2.0f64), Keyframe::new(40, 4.0)],
        TimelineOptions::default(),
    )
    .unwrap();
    assert_eq!(t.timestamps(), &[0, 40]);
    assert_eq!(t.value_at(10.0).unwrap(), 2.5);
    let pairs: Vec<(u32, f64)> = t.keyframes().map(|(ts, v)| (ts, *v)).collect();
    assert_eq!(pairs, vec![(0, 2.0), (40, 4.0)]);
}

#[test]
fn integer_timelines_round_blends() {
    let t = Timeline::new(
        InterpolationMode::Linear,
        vec![0, 100],
        vec![0i32, 10],
        TimelineOptions::default(),
    )
    .unwrap();
    assert_eq!(t.value_at(50.0).unwrap(), 5);
    assert_eq!(t.value_at(56.0).unwrap(), 6);
}
