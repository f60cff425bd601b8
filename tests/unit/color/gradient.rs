use super::*;

const RED: Color = Color::rgb(255, 0, 0);
const GREEN: Color = Color::rgb(0, 255, 0);
const BLUE: Color = Color::rgb(0, 0, 255);

#[test]
fn per_pair_steps_produce_expected_spectrum() {
    let g = Gradient::new([RED, GREEN, BLUE], [2, 4]).unwrap();
    assert_eq!(g.len(), 2 + 4 + 1);
    let s = g.spectrum();
    assert_eq!(s[0], RED);
    assert_eq!(s[1], Color::rgb(128, 128, 0));
    assert_eq!(s[2], GREEN);
    assert_eq!(s[3], Color::rgb(0, 191, 64));
    assert_eq!(s[4], Color::rgb(0, 128, 128));
    assert_eq!(s[6], BLUE);
}

#[test]
fn boundary_colors_are_not_duplicated() {
    let g = Gradient::new([RED, GREEN, BLUE], 5).unwrap();
    assert_eq!(g.len(), 11);
    assert!(g.spectrum().windows(2).all(|w| w[0] != w[1]));
    assert_eq!(g.spectrum().iter().filter(|c| **c == GREEN).count(), 1);
}

#[test]
fn single_stop_expands_to_flat_spectrum() {
    let g = Gradient::new([RED], 6).unwrap();
    assert_eq!(g.spectrum(), &[RED; 6][..]);
    let g = Gradient::new([BLUE, BLUE, BLUE], 4).unwrap();
    assert_eq!(g.spectrum(), &[BLUE; 8][..]);
    let g = Gradient::new([GREEN], 0).unwrap();
    assert_eq!(g.spectrum(), &[GREEN][..]);
}

#[test]
fn invalid_step_configurations_fail() {
    assert!(Gradient::new(Vec::<Color>::new(), 3).is_err());
    assert!(Gradient::new([RED, GREEN, BLUE], [3]).is_err());
    assert!(Gradient::new([RED, GREEN], [3, 3]).is_err());
    assert!(Gradient::new([RED, GREEN], 0).is_err());
    assert!(Gradient::new([RED, GREEN, BLUE], [4, 0]).is_err());
}

#[test]
fn zero_step_between_equal_stops_is_allowed() {
    let g = Gradient::new([RED, RED, BLUE], [0, 2]).unwrap();
    assert_eq!(g.spectrum(), &[RED, Color::rgb(128, 0, 128), BLUE][..]);
}

#[test]
fn indexed_stops_interpolate_in_rgb() {
    let g = Gradient::new([Color::Indexed(196), Color::Indexed(21)], 2).unwrap();
    assert_eq!(g.spectrum(), &[RED, Color::rgb(128, 0, 128), BLUE][..]);
}

#[test]
fn looping_gradient_returns_toward_first_stop() {
    let g = Gradient::looping([RED, BLUE], 2).unwrap();
    assert_eq!(g.steps(), &[2, 2][..]);
    assert_eq!(
        g.spectrum(),
        &[RED, Color::rgb(128, 0, 128), BLUE, Color::rgb(128, 0, 128)][..]
    );
    assert!(g.is_looping());
}

#[test]
fn fraction_endpoints_map_to_first_and_last() {
    let g = Gradient::new([RED, GREEN, BLUE], [2, 4]).unwrap();
    assert_eq!(g.get_color_at_fraction(0.0).unwrap(), RED);
    assert_eq!(g.get_color_at_fraction(1.0).unwrap(), BLUE);
    assert!(g.get_color_at_fraction(-0.1).is_err());
    assert!(g.get_color_at_fraction(1.1).is_err());
    assert!(g.get_color_at_fraction(f64::NAN).is_err());
}

#[test]
fn fractions_give_each_color_an_equal_share() {
    let g = Gradient::new([RED, BLUE], 4).unwrap();
    let mut counts = vec![0usize; g.len()];
    for i in 0..1000 {
        let c = g.get_color_at_fraction(f64::from(i) / 999.0).unwrap();
        let idx = g.spectrum().iter().position(|s| *s == c).unwrap();
        counts[idx] += 1;
    }
    let (min, max) = (counts.iter().min().unwrap(), counts.iter().max().unwrap());
    assert!(max - min <= 2, "{counts:?}");
}

#[test]
fn horizontal_and_vertical_mappings_follow_axis() {
    let g = Gradient::new([RED, BLUE], 1).unwrap();
    let bb = BoundingBox::new(0, 2, 0, 9).unwrap();
    let mut cache = ColorMappingCache::default();

    let h = g
        .build_coordinate_color_mapping(Direction::Horizontal, bb, None, &mut cache)
        .unwrap();
    assert_eq!(h.len(), 30);
    assert_eq!(h[&Coord::new(2, 0)], RED);
    assert_eq!(h[&Coord::new(0, 9)], BLUE);

    let v = g
        .build_coordinate_color_mapping(Direction::Vertical, bb, None, &mut cache)
        .unwrap();
    assert_eq!(v[&Coord::new(0, 9)], RED);
    assert_eq!(v[&Coord::new(2, 0)], BLUE);
}

#[test]
fn radial_mapping_uses_text_center() {
    let g = Gradient::new([RED, BLUE], 9).unwrap();
    let canvas = BoundingBox::new(0, 20, 0, 40).unwrap();
    let text = BoundingBox::new(0, 2, 0, 4).unwrap();
    let mut cache = ColorMappingCache::default();
    let m = g
        .build_coordinate_color_mapping(Direction::Radial, canvas, Some(text), &mut cache)
        .unwrap();
    assert_eq!(m[&Coord::new(1, 2)], RED);
    assert_ne!(m[&Coord::new(10, 20)], RED);
    assert_eq!(m[&Coord::new(20, 40)], BLUE);
}

#[test]
fn diagonal_mapping_runs_corner_to_corner() {
    let g = Gradient::new([RED, BLUE], 3).unwrap();
    let bb = BoundingBox::new(0, 3, 0, 7).unwrap();
    let mut cache = ColorMappingCache::default();
    let m = g
        .build_coordinate_color_mapping(Direction::Diagonal, bb, None, &mut cache)
        .unwrap();
    assert_eq!(m[&Coord::new(0, 0)], RED);
    assert_eq!(m[&Coord::new(3, 7)], BLUE);
}

#[test]
fn mappings_are_cached_by_inputs() {
    let g = Gradient::new([RED, GREEN], 4).unwrap();
    let bb = BoundingBox::new(0, 4, 0, 4).unwrap();
    let mut cache = ColorMappingCache::default();
    let a = g
        .build_coordinate_color_mapping(Direction::Radial, bb, None, &mut cache)
        .unwrap();
    let b = g
        .build_coordinate_color_mapping(Direction::Radial, bb, None, &mut cache)
        .unwrap();
    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(cache.stats(), (1, 1));

    let other = Gradient::new([RED, BLUE], 4).unwrap();
    let c = other
        .build_coordinate_color_mapping(Direction::Radial, bb, None, &mut cache)
        .unwrap();
    assert!(!Rc::ptr_eq(&a, &c));
    assert_eq!(cache.len(), 2);

    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.stats(), (0, 0));
}

#[test]
fn single_cell_region_maps_to_a_valid_color() {
    let g = Gradient::new([RED, BLUE], 2).unwrap();
    let bb = BoundingBox::new(3, 3, 3, 3).unwrap();
    let mut cache = ColorMappingCache::default();
    for dir in [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
        Direction::Radial,
    ] {
        let m = g
            .build_coordinate_color_mapping(dir, bb, None, &mut cache)
            .unwrap();
        assert_eq!(m.len(), 1);
    }
}
