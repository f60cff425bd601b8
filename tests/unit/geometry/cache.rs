use super::*;

#[test]
fn repeated_queries_share_one_allocation() {
    let mut cache = GeometryCache::default();
    let a = cache.circle_perimeter(Coord::new(5, 5), 3, None);
    let b = cache.circle_perimeter(Coord::new(5, 5), 3, None);
    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 1);

    let c = cache.circle_perimeter(Coord::new(5, 5), 4, None);
    assert!(!Rc::ptr_eq(&a, &c));
    assert_eq!(cache.len(), 2);
}

#[test]
fn cached_results_match_pure_functions() {
    let mut cache = GeometryCache::new(2.0, 10);
    let center = Coord::new(0, 0);
    assert_eq!(
        &*cache.circle_interior(center, 2),
        shapes::circle_interior(center, 2, 2.0).as_slice()
    );
    assert_eq!(
        &*cache.rect_perimeter(center, 4, 2).unwrap(),
        shapes::rect_perimeter(center, 4, 2).unwrap().as_slice()
    );
    let controls = [Coord::new(-5, 3)];
    assert_eq!(
        cache.bezier_length(center, &controls, Coord::new(0, 6)),
        shapes::bezier_length(center, &controls, Coord::new(0, 6), 10)
    );
}

#[test]
fn invalid_rect_is_not_cached() {
    let mut cache = GeometryCache::default();
    assert!(cache.rect_interior(Coord::new(0, 0), 0, 1).is_err());
    assert!(cache.is_empty());
}

#[test]
fn clear_drops_everything() {
    let mut cache = GeometryCache::default();
    cache.circle_interior(Coord::new(1, 1), 1);
    cache.rect_interior(Coord::new(1, 1), 2, 2).unwrap();
    cache.bezier_length(Coord::new(0, 0), &[], Coord::new(3, 4));
    assert_eq!(cache.len(), 3);
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn curve_length_agrees_with_path_segments() {
    use crate::motion::path::{Path, PathConfig, Waypoint};

    let mut cache = GeometryCache::new(2.0, 10);
    let mut path = Path::new("p".into(), &PathConfig::default(), 10).unwrap();
    let start = Coord::new(0, 0);
    let controls = [Coord::new(-4, 3), Coord::new(4, 7)];
    path.new_waypoint(start).unwrap();
    path.add_waypoint(Waypoint::new(Coord::new(0, 10)).with_controls(controls))
        .unwrap();
    assert_eq!(
        cache.bezier_length(start, &controls, Coord::new(0, 10)),
        path.segments()[0].distance
    );
}
