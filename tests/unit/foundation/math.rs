use super::*;

#[test]
fn lerp_u8_rounds_and_saturates() {
    assert_eq!(lerp_u8(0, 255, 0.5), 128);
    assert_eq!(lerp_u8(10, 20, 0.0), 10);
    assert_eq!(lerp_u8(10, 20, 1.0), 20);
    assert_eq!(lerp_u8(200, 250, 2.0), 255);
    assert_eq!(lerp_u8(50, 0, 2.0), 0);
}

#[test]
fn point_lerp_allows_overshoot() {
    let p = <Point as Lerp>::lerp(&Point::new(0.0, 0.0), &Point::new(10.0, 4.0), 1.5);
    assert_eq!((p.x, p.y), (15.0, 6.0));
}

#[test]
fn ratio_or_one_handles_zero_denominator() {
    assert_eq!(ratio_or_one(3.0, 0.0), 1.0);
    assert_eq!(ratio_or_one(1.0, 4.0), 0.25);
    assert_eq!(ratio_or_one(9.0, 4.0), 1.0);
}
