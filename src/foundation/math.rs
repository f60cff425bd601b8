use kurbo::Point;

/// Interpolation contract shared by positions and colors.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with factor `t` (not clamped; overshooting eases rely on it).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

pub(crate) fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
    let a = f64::from(a);
    let b = f64::from(b);
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}

/// Safe `num / den` that treats an empty denominator as "already done".
pub(crate) fn ratio_or_one(num: f64, den: f64) -> f64 {
    if den <= 0.0 { 1.0 } else { (num / den).clamp(0.0, 1.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
