use super::*;

#[test]
fn coord_destructures_column_first() {
    let c = Coord::new(3, 7);
    assert_eq!(c.column_row(), (7, 3));
    assert_eq!(c.row_column(), (3, 7));
    let (x, y) = c.column_row();
    assert_eq!(Coord::new(y, x), c);
}

#[test]
fn coord_point_roundtrip_rounds_to_nearest_cell() {
    let p = Coord::new(2, 5).to_point();
    assert_eq!((p.x, p.y), (5.0, 2.0));
    assert_eq!(Coord::from_point(Point::new(4.6, 1.4)), Coord::new(1, 5));
}

#[test]
fn bounding_box_rejects_inverted_ranges() {
    assert!(BoundingBox::new(0, 4, 0, 9).is_ok());
    assert!(BoundingBox::new(5, 4, 0, 9).is_err());
    assert!(BoundingBox::new(0, 4, 10, 9).is_err());
}

#[test]
fn bounding_box_center_is_not_truncated() {
    let bb = BoundingBox::new(0, 3, 0, 8).unwrap();
    let c = bb.center();
    assert_eq!((c.x, c.y), (4.0, 1.5));
}

#[test]
fn bounding_box_coords_cover_area_row_major() {
    let bb = BoundingBox::new(1, 2, 4, 6).unwrap();
    let coords: Vec<Coord> = bb.coords().collect();
    assert_eq!(coords.len(), (bb.width() * bb.height()) as usize);
    assert_eq!(coords[0], Coord::new(1, 4));
    assert_eq!(coords[3], Coord::new(2, 4));
    assert!(coords.iter().all(|c| bb.contains(*c)));
}

#[test]
fn enclosing_box_spans_all_coords() {
    let bb = BoundingBox::enclosing([Coord::new(3, 1), Coord::new(-1, 8), Coord::new(2, 2)])
        .unwrap();
    assert_eq!(bb, BoundingBox::new(-1, 3, 1, 8).unwrap());
    assert!(BoundingBox::enclosing(std::iter::empty()).is_none());
}
