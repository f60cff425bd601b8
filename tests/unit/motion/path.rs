use super::*;

fn path() -> Path {
    Path::new("p".into(), &PathConfig::default(), 10).unwrap()
}

#[test]
fn waypoint_ids_are_generated_from_position() {
    let mut p = path();
    p.new_waypoint(Coord::new(0, 0)).unwrap();
    p.add_waypoint(Waypoint::new(Coord::new(0, 5)).with_id("mid")).unwrap();
    let last = p.new_waypoint(Coord::new(0, 9)).unwrap();
    assert_eq!(last.id(), "2");
    assert_eq!(p.waypoint_index("mid"), Some(1));
    assert_eq!(p.waypoint_index("0"), Some(0));
}

#[test]
fn generated_id_skips_taken_names() {
    let mut p = path();
    p.add_waypoint(Waypoint::new(Coord::new(0, 0)).with_id("1")).unwrap();
    let w = p.new_waypoint(Coord::new(0, 1)).unwrap();
    assert_eq!(w.id(), "2");
}

#[test]
fn duplicate_waypoint_id_is_rejected() {
    let mut p = path();
    p.add_waypoint(Waypoint::new(Coord::new(0, 0)).with_id("a")).unwrap();
    let err = p
        .add_waypoint(Waypoint::new(Coord::new(1, 1)).with_id("a"))
        .unwrap_err();
    assert!(err.to_string().contains("duplicate waypoint id"));
    assert_eq!(p.waypoints().len(), 1);
}

#[test]
fn segment_distance_is_measured_on_append() {
    let mut p = path();
    p.new_waypoint(Coord::new(0, 0)).unwrap();
    assert!(p.segments().is_empty());
    p.new_waypoint(Coord::new(3, 4)).unwrap();
    assert_eq!(p.segments().len(), 1);
    assert_eq!(p.segments()[0].distance, 5.0);
    assert_eq!(p.segments()[0].end_waypoint, 1);
    p.add_waypoint(Waypoint::new(Coord::new(3, 14)).with_controls([Coord::new(-3, 9)]))
        .unwrap();
    assert!(p.segments()[1].distance > 10.0);
    assert!(p.total_distance() > 15.0);
}

#[test]
fn traversal_starts_with_origin_leg() {
    let mut p = path();
    assert!(p.traversal_from(Coord::new(0, 0)).is_err());
    p.add_waypoint(Waypoint::new(Coord::new(0, 6)).with_controls([Coord::new(4, 3)]))
        .unwrap();
    p.new_waypoint(Coord::new(0, 10)).unwrap();
    let segs = p.traversal_from(Coord::new(0, 0)).unwrap();
    assert_eq!(segs.len(), 2);
    assert_eq!(segs[0].start, Coord::new(0, 0));
    assert_eq!(segs[0].controls.as_slice(), &[Coord::new(4, 3)]);
    assert_eq!(segs[0].end_waypoint, 0);
    assert_eq!(segs[1].start, Coord::new(0, 6));
}

#[test]
fn speed_must_be_positive() {
    assert!(Path::new("x".into(), &PathConfig::default().speed(0.0), 10).is_err());
    assert!(Path::new("x".into(), &PathConfig::default().speed(f64::NAN), 10).is_err());
    assert!(Path::new("x".into(), &PathConfig::default().speed(0.25), 10).is_ok());
}

#[test]
fn config_deserializes_with_defaults() {
    let cfg: PathConfig =
        serde_json::from_str(r#"{"speed": 2.5, "ease": "in_out_sine", "hold_time": 3}"#).unwrap();
    assert_eq!(cfg.speed, 2.5);
    assert_eq!(cfg.ease, Some(Ease::InOutSine));
    assert_eq!(cfg.hold_time, 3);
    assert!(!cfg.looping);
    assert!(serde_json::from_str::<PathConfig>(r#"{"sped": 1}"#).is_err());
}
