use super::*;
use crate::animation::scene::SceneConfig;
use crate::color::palette::ColorPair;
use crate::foundation::config::EngineConfig;
use crate::motion::path::PathConfig;

fn registries() -> (Motion, Animation, PathHandle, SceneHandle) {
    let mut motion = Motion::new(Coord::new(0, 0), &EngineConfig::default());
    let p = motion.new_path(PathConfig::with_id("p")).unwrap();
    let path = motion.path_mut(p).unwrap();
    path.new_waypoint(Coord::new(0, 1)).unwrap();
    path.new_waypoint(Coord::new(0, 2)).unwrap();
    let mut animation = Animation::new('a');
    let s = animation.new_scene(SceneConfig::with_id("s")).unwrap();
    animation
        .scene_mut(s)
        .unwrap()
        .add_frame('b', 1, ColorPair::default())
        .unwrap();
    (motion, animation, p, s)
}

#[test]
fn id_and_handle_resolve_to_same_caller() {
    let (m, a, p, s) = registries();
    let mut h = EventHandler::new();
    h.register_event(
        &m,
        &a,
        Event::PathComplete,
        EventSource::Path("p".into()),
        Action::ActivateScene(s.into()),
    )
    .unwrap();
    h.register_event(&m, &a, Event::PathComplete, EventSource::Path(p.into()), Action::SetLayer(1))
        .unwrap();
    let fired = FiredEvent::new(Event::PathComplete, Caller::Path(p));
    assert_eq!(h.action_count(&fired), 2);
    assert_eq!(
        h.actions(&fired),
        &[BoundAction::ActivateScene(s), BoundAction::SetLayer(1)]
    );
}

#[test]
fn waypoint_source_resolves_by_id() {
    let (m, a, p, _) = registries();
    let mut h = EventHandler::new();
    let source = EventSource::Waypoint {
        path: "p".into(),
        waypoint: "1".into(),
    };
    h.register_event(&m, &a, Event::SegmentExited, source, Action::SetVisibility(false))
        .unwrap();
    let fired = FiredEvent::new(Event::SegmentExited, Caller::Waypoint { path: p, waypoint: 1 });
    assert_eq!(h.action_count(&fired), 1);
    let other = FiredEvent::new(Event::SegmentEntered, Caller::Waypoint { path: p, waypoint: 1 });
    assert_eq!(h.action_count(&other), 0);
}

#[test]
fn duplicate_tuple_is_rejected() {
    let (m, a, _, _) = registries();
    let mut h = EventHandler::new();
    let reg = |h: &mut EventHandler| {
        h.register_event(
            &m,
            &a,
            Event::SceneComplete,
            EventSource::Scene("s".into()),
            Action::DeactivatePath("p".into()),
        )
    };
    reg(&mut h).unwrap();
    let err = reg(&mut h).unwrap_err();
    assert!(err.to_string().starts_with("duplicate event registration:"));
    assert_eq!(h.len(), 1);
}

#[test]
fn unknown_targets_fail_at_registration() {
    let (m, a, _, _) = registries();
    let mut h = EventHandler::new();
    let err = h
        .register_event(
            &m,
            &a,
            Event::PathHolding,
            EventSource::Path("x".into()),
            Action::ResetAppearance,
        )
        .unwrap_err();
    assert!(matches!(err, TextfxError::PathNotFound(_)));
    let err = h
        .register_event(
            &m,
            &a,
            Event::SceneActivated,
            EventSource::Scene("s".into()),
            Action::ActivatePath("x".into()),
        )
        .unwrap_err();
    assert!(matches!(err, TextfxError::PathNotFound(_)));
    assert!(h.is_empty());
}

#[test]
fn unregister_and_clear() {
    let (m, a, _, _) = registries();
    let mut h = EventHandler::new();
    let src = || EventSource::Scene("s".into());
    h.register_event(&m, &a, Event::SceneActivated, src(), Action::SetVisibility(true))
        .unwrap();
    h.register_event(&m, &a, Event::SceneComplete, src(), Action::SetVisibility(false))
        .unwrap();
    assert!(
        h.unregister_event(&m, &a, Event::SceneActivated, src(), Action::SetVisibility(true))
            .unwrap()
    );
    assert_eq!(h.len(), 1);
    h.clear();
    assert!(h.is_empty());
}

#[test]
fn callbacks_compare_by_handle_and_args() {
    let cb = Callback::new(|_, _| Ok(()), vec![serde_json::json!({"k": 1})]);
    let same = cb.clone();
    let other_fn = Callback::new(|_, _| Ok(()), vec![serde_json::json!({"k": 1})]);
    assert_eq!(cb, same);
    assert_ne!(cb, other_fn);
    assert_ne!(cb, cb.with_args(Vec::new()));
    assert!(format!("{cb:?}").contains("args"));
}

#[test]
fn event_names_serialize_snake_case() {
    assert_eq!(
        serde_json::to_string(&Event::SegmentEntered).unwrap(),
        "\"segment_entered\""
    );
    let e: Event = serde_json::from_str("\"path_holding\"").unwrap();
    assert_eq!(e, Event::PathHolding);
}
