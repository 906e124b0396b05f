use approx::assert_relative_eq;
use everlook_animation_core::{
    parse_clip_json, parse_clip_json_with, AnimationError, Config, InterpolationMode, Rgb, Value,
};
use everlook_test_fixtures::clips;

fn load(name: &str) -> everlook_animation_core::ClipData {
    let json = clips::json(name).expect("fixture json");
    parse_clip_json(&json).expect("clip should parse")
}

fn as_float(value: &Value) -> f32 {
    match value {
        Value::Float(v) => *v,
        other => panic!("expected float, got {other:?}"),
    }
}

#[test]
fn every_valid_fixture_parses() {
    for name in clips::keys() {
        let json = clips::json(&name).unwrap();
        let result = parse_clip_json(&json);
        if name == "broken-order" {
            assert!(result.is_err(), "{name} should be rejected");
        } else {
            assert!(result.is_ok(), "{name}: {:?}", result.err());
        }
    }
}

#[test]
fn stand_loop_wraps_all_channels() {
    let mut clip = load("stand-loop");
    assert_eq!(clip.name, "Stand");
    assert_eq!(clip.duration(), 4000.0);

    clip.advance(1250.0);
    clip.advance(1250.0);

    let root = clip.track("root").expect("root track");
    let values = root.values().unwrap();
    assert_eq!(values[0], Value::vec3(0.5, 0.5, 0.5));
    assert_eq!(values[1], Value::quat(0.0, 0.25, 0.0, 0.75));

    // The 4s glow channel has not wrapped yet.
    let glow = clip.track("glow").expect("glow track");
    let channel = glow.get(0).unwrap();
    assert_eq!(channel.position(), 2500.0);
    assert!(channel.is_looping());
}

#[test]
fn stand_loop_glow_blends_back_through_dead_time() {
    let mut clip = load("stand-loop");
    clip.advance(3000.0);
    let glow = clip.track("glow").unwrap();
    assert_eq!(glow.values().unwrap(), vec![Value::Rgb(Rgb::new(0.5, 0.5, 0.5))]);
}

#[test]
fn wing_flap_uses_tangents() {
    let mut clip = load("wing-flap");
    clip.advance(125.0);

    let left = clip.track("wing_l").unwrap();
    let right = clip.track("wing_r").unwrap();
    assert_eq!(left.get(0).unwrap().interpolation(), InterpolationMode::Hermite);
    assert_eq!(right.get(0).unwrap().interpolation(), InterpolationMode::Bezier);

    let l = as_float(&left.values().unwrap()[0]);
    let r = as_float(&right.values().unwrap()[0]);
    assert_relative_eq!(l, 0.25);
    assert_eq!(l, r);
}

#[test]
fn door_mixes_step_and_linear_channels() {
    let mut clip = load("door-open");
    clip.advance(300.0);
    let door = clip.track("door").unwrap();
    assert_eq!(
        door.values().unwrap(),
        vec![Value::from("closed"), Value::Bool(true), Value::Float(45.0)]
    );

    clip.advance(1000.0);
    let door = clip.track("door").unwrap();
    assert_eq!(
        door.values().unwrap(),
        vec![Value::from("open"), Value::Bool(true), Value::Float(90.0)]
    );
}

#[test]
fn loader_defaults_come_from_config() {
    let json = clips::json("door-open").unwrap();
    let cfg = Config {
        default_interpolation: InterpolationMode::None,
        default_looping: true,
    };
    let mut clip = parse_clip_json_with(&json, &cfg).unwrap();
    clip.advance(300.0);
    let door = clip.track("door").unwrap();
    let angle = door.get(2).unwrap();
    assert!(angle.is_looping());
    assert_eq!(angle.interpolation(), InterpolationMode::None);
    assert_eq!(angle.value().unwrap(), Value::Float(0.0));
}

#[test]
fn unordered_keys_fail_at_load() {
    let json = clips::json("broken-order").unwrap();
    let err = parse_clip_json(&json).unwrap_err();
    assert_eq!(
        err,
        AnimationError::UnorderedTimestamps {
            index: 2,
            previous: 500,
            current: 400
        }
    );
    assert_eq!(err.category(), "construction");
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let err = parse_clip_json("{ \"name\": ").unwrap_err();
    assert!(matches!(err, AnimationError::Serialization { .. }));
}

#[test]
fn unknown_fixture_is_reported() {
    assert!(clips::json("does-not-exist").is_err());
}

#[test]
fn fixtures_resolve_to_clip_documents() {
    for name in clips::keys() {
        let path = clips::path(&name).unwrap();
        assert!(path.is_file(), "{}", path.display());

        let doc: serde_json::Value = clips::load(&name).unwrap();
        assert!(doc["name"].is_string(), "{name} has no clip name");
        assert!(doc["tracks"].is_array(), "{name} has no tracks");
    }
}
