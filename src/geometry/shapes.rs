//! Point-set and curve primitives over terminal cells.
//!
//! Terminal cells are taller than they are wide. Functions that should *look* round take an
//! `aspect` (cell height / width) and stretch the horizontal axis by it.

use crate::foundation::core::{BoundingBox, Coord, Point};
use crate::foundation::error::{TextfxError, TextfxResult};
use crate::foundation::math::Lerp;
use kurbo::{CubicBez, ParamCurve, QuadBez};
use std::collections::HashSet;
use std::f64::consts::TAU;

/// Straight-line distance between two cells.
pub fn line_length(a: Coord, b: Coord) -> f64 {
    a.to_point().distance(b.to_point())
}

/// Distance with the row axis scaled by `row_scale` (visual distance on a terminal).
pub fn scaled_distance(a: Point, b: Point, row_scale: f64) -> f64 {
    let dx = b.x - a.x;
    let dy = (b.y - a.y) * row_scale;
    dx.hypot(dy)
}

pub fn point_on_line(start: Coord, end: Coord, t: f64) -> Point {
    <Point as Lerp>::lerp(&start.to_point(), &end.to_point(), t)
}

pub fn coord_on_line(start: Coord, end: Coord, t: f64) -> Coord {
    Coord::from_point(point_on_line(start, end, t))
}

/// Evaluate the bezier curve `start -> controls... -> end` at parameter `t`.
///
/// No controls is a straight line; one control is quadratic, two are cubic; more fall back to
/// de Casteljau over all points.
pub fn point_on_bezier(start: Coord, controls: &[Coord], end: Coord, t: f64) -> Point {
    match controls {
        [] => point_on_line(start, end, t),
        [c] => QuadBez::new(start.to_point(), c.to_point(), end.to_point()).eval(t),
        [c1, c2] => CubicBez::new(
            start.to_point(),
            c1.to_point(),
            c2.to_point(),
            end.to_point(),
        )
        .eval(t),
        _ => {
            let mut pts: Vec<Point> = std::iter::once(start)
                .chain(controls.iter().copied())
                .chain(std::iter::once(end))
                .map(Coord::to_point)
                .collect();
            while pts.len() > 1 {
                for i in 0..pts.len() - 1 {
                    pts[i] = <Point as Lerp>::lerp(&pts[i], &pts[i + 1], t);
                }
                pts.pop();
            }
            pts[0]
        }
    }
}

pub fn coord_on_bezier(start: Coord, controls: &[Coord], end: Coord, t: f64) -> Coord {
    Coord::from_point(point_on_bezier(start, controls, end, t))
}

/// Arc length approximated by `samples` chords.
pub fn bezier_length(start: Coord, controls: &[Coord], end: Coord, samples: usize) -> f64 {
    if controls.is_empty() {
        return line_length(start, end);
    }
    let samples = samples.max(1);
    let mut length = 0.0;
    let mut prev = start.to_point();
    for i in 1..=samples {
        let p = point_on_bezier(start, controls, end, i as f64 / samples as f64);
        length += prev.distance(p);
        prev = p;
    }
    length
}

fn dedup_in_order(coords: impl IntoIterator<Item = Coord>) -> Vec<Coord> {
    let mut seen = HashSet::new();
    coords.into_iter().filter(|c| seen.insert(*c)).collect()
}

/// Cells on the outline of a visually round circle.
///
/// `points` overrides the number of angular samples; by default enough samples are taken to
/// leave no gaps in the stretched outline. Duplicates are removed, first occurrence wins.
pub fn circle_perimeter(
    center: Coord,
    radius: u32,
    points: Option<usize>,
    aspect: f64,
) -> Vec<Coord> {
    if radius == 0 {
        return vec![center];
    }
    let r = f64::from(radius);
    let n = points
        .unwrap_or_else(|| (TAU * r * aspect.max(1.0)).ceil() as usize)
        .max(1);
    dedup_in_order((0..n).map(|i| {
        let angle = TAU * i as f64 / n as f64;
        Coord::from_point(Point::new(
            f64::from(center.column) + r * aspect * angle.cos(),
            f64::from(center.row) + r * angle.sin(),
        ))
    }))
}

/// Cells inside a visually round circle (an ellipse `radius * aspect` wide, `radius` tall).
pub fn circle_interior(center: Coord, radius: u32, aspect: f64) -> Vec<Coord> {
    if radius == 0 {
        return vec![center];
    }
    let b = f64::from(radius);
    let a = b * aspect;
    let half_width = a.ceil() as i32;
    let half_height = radius as i32;
    let mut out = Vec::new();
    for dr in -half_height..=half_height {
        for dc in -half_width..=half_width {
            let x = f64::from(dc) / a;
            let y = f64::from(dr) / b;
            if x * x + y * y <= 1.0 {
                out.push(center.offset(dr, dc));
            }
        }
    }
    out
}

fn rect_bounds(center: Coord, width: u32, height: u32) -> TextfxResult<BoundingBox> {
    if width == 0 || height == 0 {
        return Err(TextfxError::validation(format!(
            "rectangle must have non-zero area (width {width}, height {height})"
        )));
    }
    let (w, h) = (width as i32, height as i32);
    let min_column = center.column - (w - 1) / 2;
    let min_row = center.row - (h - 1) / 2;
    BoundingBox::new(min_row, min_row + h - 1, min_column, min_column + w - 1)
}

/// Outline cells of a `width` x `height` rectangle centered on `center`, clockwise from the
/// top-left corner.
pub fn rect_perimeter(center: Coord, width: u32, height: u32) -> TextfxResult<Vec<Coord>> {
    let bb = rect_bounds(center, width, height)?;
    let top = (bb.min_column..=bb.max_column).map(|c| Coord::new(bb.min_row, c));
    let right = (bb.min_row..=bb.max_row).map(|r| Coord::new(r, bb.max_column));
    let bottom = (bb.min_column..=bb.max_column)
        .rev()
        .map(|c| Coord::new(bb.max_row, c));
    let left = (bb.min_row..=bb.max_row)
        .rev()
        .map(|r| Coord::new(r, bb.min_column));
    Ok(dedup_in_order(top.chain(right).chain(bottom).chain(left)))
}

/// Every cell of a `width` x `height` rectangle centered on `center`, row-major.
pub fn rect_interior(center: Coord, width: u32, height: u32) -> TextfxResult<Vec<Coord>> {
    Ok(rect_bounds(center, width, height)?.coords().collect())
}

/// The cell `distance` away from `origin` in the direction of `target` (may pass `target`).
pub fn coord_at_distance(origin: Coord, target: Coord, distance: f64) -> Coord {
    let len = line_length(origin, target);
    if len == 0.0 {
        return origin;
    }
    coord_on_line(origin, target, distance / len)
}

/// Closest candidate to `target`; ties keep the earliest candidate.
pub fn nearest_coord(target: Coord, candidates: impl IntoIterator<Item = Coord>) -> Option<Coord> {
    let mut best: Option<(f64, Coord)> = None;
    for c in candidates {
        let d = line_length(target, c);
        if best.is_none_or(|(bd, _)| d < bd) {
            best = Some((d, c));
        }
    }
    best.map(|(_, c)| c)
}

/// Visual distance of `c` from the center of `bounds`, normalized so the box corners are `1.0`.
pub fn normalized_distance_from_center(bounds: BoundingBox, c: Coord, aspect: f64) -> f64 {
    let center = bounds.center();
    let corner = Point::new(f64::from(bounds.max_column), f64::from(bounds.max_row));
    let max = scaled_distance(center, corner, aspect);
    if max <= 0.0 {
        return 0.0;
    }
    (scaled_distance(center, c.to_point(), aspect) / max).min(1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/shapes.rs"]
mod tests;
