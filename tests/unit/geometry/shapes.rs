use super::*;

#[test]
fn line_length_is_euclidean() {
    assert_eq!(line_length(Coord::new(0, 0), Coord::new(3, 4)), 5.0);
    assert_eq!(line_length(Coord::new(2, 2), Coord::new(2, 2)), 0.0);
}

#[test]
fn scaled_distance_stretches_rows() {
    let d = scaled_distance(Point::new(0.0, 0.0), Point::new(0.0, 1.0), 2.0);
    assert_eq!(d, 2.0);
}

#[test]
fn coord_on_line_endpoints_and_midpoint() {
    let a = Coord::new(0, 0);
    let b = Coord::new(0, 10);
    assert_eq!(coord_on_line(a, b, 0.0), a);
    assert_eq!(coord_on_line(a, b, 1.0), b);
    assert_eq!(coord_on_line(a, b, 0.5), Coord::new(0, 5));
}

#[test]
fn bezier_passes_through_endpoints_for_every_order() {
    let start = Coord::new(10, 0);
    let end = Coord::new(10, 20);
    let controls = [Coord::new(0, 5), Coord::new(0, 10), Coord::new(0, 15)];
    for n in 0..=3 {
        let c = &controls[..n];
        assert_eq!(coord_on_bezier(start, c, end, 0.0), start, "order {n}");
        assert_eq!(coord_on_bezier(start, c, end, 1.0), end, "order {n}");
    }
}

#[test]
fn quadratic_midpoint_is_pulled_toward_control() {
    let p = point_on_bezier(Coord::new(10, 0), &[Coord::new(0, 10)], Coord::new(10, 20), 0.5);
    assert_eq!((p.x, p.y), (10.0, 5.0));
}

#[test]
fn de_casteljau_matches_cubic_for_four_points() {
    let s = Coord::new(0, 0);
    let e = Coord::new(8, 9);
    let c = [Coord::new(5, 1), Coord::new(-3, 7)];
    let cubic = point_on_bezier(s, &c, e, 0.3);
    let generic = {
        let mut pts = vec![s.to_point(), c[0].to_point(), c[1].to_point(), e.to_point()];
        while pts.len() > 1 {
            for i in 0..pts.len() - 1 {
                pts[i] = <Point as Lerp>::lerp(&pts[i], &pts[i + 1], 0.3);
            }
            pts.pop();
        }
        pts[0]
    };
    assert!(cubic.distance(generic) < 1e-9);
}

#[test]
fn curved_length_exceeds_chord() {
    let s = Coord::new(10, 0);
    let e = Coord::new(10, 20);
    let chord = line_length(s, e);
    let curved = bezier_length(s, &[Coord::new(0, 10)], e, 10);
    assert!(curved > chord);
    assert_eq!(bezier_length(s, &[], e, 10), chord);
}

#[test]
fn circle_perimeter_is_unique_and_stretched() {
    let center = Coord::new(10, 10);
    let pts = circle_perimeter(center, 4, None, 2.0);
    let unique: HashSet<Coord> = pts.iter().copied().collect();
    assert_eq!(unique.len(), pts.len());
    let max_dc = pts.iter().map(|c| (c.column - 10).abs()).max().unwrap();
    let max_dr = pts.iter().map(|c| (c.row - 10).abs()).max().unwrap();
    assert_eq!(max_dc, 8);
    assert_eq!(max_dr, 4);
    assert_eq!(circle_perimeter(center, 0, None, 2.0), vec![center]);
}

#[test]
fn circle_interior_contains_center_and_axes() {
    let center = Coord::new(0, 0);
    let pts: HashSet<Coord> = circle_interior(center, 3, 2.0).into_iter().collect();
    assert!(pts.contains(&center));
    assert!(pts.contains(&Coord::new(0, 6)));
    assert!(pts.contains(&Coord::new(3, 0)));
    assert!(!pts.contains(&Coord::new(0, 7)));
    assert!(!pts.contains(&Coord::new(4, 0)));
    assert!(!pts.contains(&Coord::new(3, 6)));
}

#[test]
fn rect_perimeter_and_interior() {
    let center = Coord::new(5, 5);
    let perim = rect_perimeter(center, 3, 3).unwrap();
    assert_eq!(perim.len(), 8);
    assert_eq!(perim[0], Coord::new(4, 4));
    assert!(!perim.contains(&center));
    let inner = rect_interior(center, 3, 3).unwrap();
    assert_eq!(inner.len(), 9);
    assert!(inner.contains(&center));
    assert_eq!(rect_perimeter(center, 1, 1).unwrap(), vec![center]);
}

#[test]
fn zero_area_rect_is_rejected() {
    assert!(rect_perimeter(Coord::new(0, 0), 0, 3).is_err());
    assert!(rect_interior(Coord::new(0, 0), 4, 0).is_err());
}

#[test]
fn coord_at_distance_extends_past_target() {
    let o = Coord::new(0, 0);
    assert_eq!(coord_at_distance(o, Coord::new(0, 4), 8.0), Coord::new(0, 8));
    assert_eq!(coord_at_distance(o, o, 3.0), o);
}

#[test]
fn nearest_coord_prefers_first_on_tie() {
    let t = Coord::new(0, 0);
    let got = nearest_coord(t, [Coord::new(0, 5), Coord::new(0, -2), Coord::new(2, 0)]);
    assert_eq!(got, Some(Coord::new(0, -2)));
    assert_eq!(nearest_coord(t, std::iter::empty()), None);
}

#[test]
fn normalized_distance_spans_zero_to_one() {
    let bb = BoundingBox::new(0, 4, 0, 8).unwrap();
    assert_eq!(normalized_distance_from_center(bb, Coord::new(2, 4), 2.0), 0.0);
    assert!((normalized_distance_from_center(bb, Coord::new(0, 0), 2.0) - 1.0).abs() < 1e-12);
}
