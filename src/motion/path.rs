use crate::animation::ease::Ease;
use crate::foundation::core::Coord;
use crate::foundation::error::{TextfxError, TextfxResult};
use crate::geometry::shapes;
use smallvec::SmallVec;

/// Motion target: a cell plus optional bezier control points leading into it.
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    id: Option<String>,
    coord: Coord,
    controls: SmallVec<[Coord; 2]>,
    layer: Option<i32>,
}

impl Waypoint {
    pub fn new(coord: Coord) -> Self {
        Self {
            id: None,
            coord,
            controls: SmallVec::new(),
            layer: None,
        }
    }

    /// Control points of the curve arriving at this waypoint.
    pub fn with_controls(mut self, controls: impl IntoIterator<Item = Coord>) -> Self {
        self.controls = controls.into_iter().collect();
        self
    }

    /// Layer applied to the character while it travels toward this waypoint.
    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = Some(layer);
        self
    }

    /// Stable id; assigned from the waypoint's position when left unset.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn controls(&self) -> &[Coord] {
        &self.controls
    }

    pub fn layer(&self) -> Option<i32> {
        self.layer
    }
}

/// One leg of a traversal, ending at waypoint `end_waypoint`.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub start: Coord,
    pub end: Coord,
    pub controls: SmallVec<[Coord; 2]>,
    pub distance: f64,
    pub end_waypoint: usize,
}

impl Segment {
    pub(crate) fn build(start: Coord, end: &Waypoint, end_waypoint: usize, samples: usize) -> Self {
        Self {
            start,
            end: end.coord,
            controls: end.controls.clone(),
            distance: shapes::bezier_length(start, &end.controls, end.coord, samples),
            end_waypoint,
        }
    }

    /// Cell at curve parameter `t`.
    pub fn coord_at(&self, t: f64) -> Coord {
        shapes::coord_on_bezier(self.start, &self.controls, self.end, t)
    }
}

/// Settings for [`crate::motion::engine::Motion::new_path`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathConfig {
    /// Unique id within the character; generated when `None`.
    pub id: Option<String>,
    /// Distance units (cells) per tick.
    pub speed: f64,
    pub ease: Option<Ease>,
    pub layer: Option<i32>,
    /// Ticks to wait at the final waypoint before completing.
    pub hold_time: u32,
    pub looping: bool,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            id: None,
            speed: 1.0,
            ease: None,
            layer: None,
            hold_time: 0,
            looping: false,
        }
    }
}

impl PathConfig {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    pub fn layer(mut self, layer: i32) -> Self {
        self.layer = Some(layer);
        self
    }

    pub fn hold_time(mut self, ticks: u32) -> Self {
        self.hold_time = ticks;
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn validate(&self) -> TextfxResult<()> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(TextfxError::validation(format!(
                "path speed must be finite and > 0, got {}",
                self.speed
            )));
        }
        Ok(())
    }
}

/// Ordered waypoints plus the parameters that move a character through them.
#[derive(Clone, Debug)]
pub struct Path {
    id: String,
    speed: f64,
    ease: Option<Ease>,
    layer: Option<i32>,
    hold_time: u32,
    looping: bool,
    bezier_samples: usize,
    waypoints: Vec<Waypoint>,
    segments: Vec<Segment>,
}

impl Path {
    pub(crate) fn new(
        id: String,
        config: &PathConfig,
        bezier_samples: usize,
    ) -> TextfxResult<Self> {
        config.validate()?;
        Ok(Self {
            id,
            speed: config.speed,
            ease: config.ease,
            layer: config.layer,
            hold_time: config.hold_time,
            looping: config.looping,
            bezier_samples,
            waypoints: Vec::new(),
            segments: Vec::new(),
        })
    }

    /// Append a plain waypoint at `coord`.
    pub fn new_waypoint(&mut self, coord: Coord) -> TextfxResult<&Waypoint> {
        self.add_waypoint(Waypoint::new(coord))
    }

    /// Append `waypoint`, measuring the segment from the previous waypoint right away.
    pub fn add_waypoint(&mut self, mut waypoint: Waypoint) -> TextfxResult<&Waypoint> {
        let id = match waypoint.id.take() {
            Some(id) if self.waypoint_index(&id).is_some() => {
                return Err(TextfxError::validation(format!(
                    "duplicate waypoint id '{id}' in path '{}'",
                    self.id
                )));
            }
            Some(id) => id,
            None => {
                let mut n = self.waypoints.len();
                while self.waypoint_index(&n.to_string()).is_some() {
                    n += 1;
                }
                n.to_string()
            }
        };
        waypoint.id = Some(id);

        let index = self.waypoints.len();
        if let Some(prev) = self.waypoints.last() {
            let seg = Segment::build(prev.coord, &waypoint, index, self.bezier_samples);
            self.segments.push(seg);
        }
        self.waypoints.push(waypoint);
        Ok(&self.waypoints[index])
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn ease(&self) -> Option<Ease> {
        self.ease
    }

    pub fn layer(&self) -> Option<i32> {
        self.layer
    }

    pub fn hold_time(&self) -> u32 {
        self.hold_time
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn waypoint(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    pub fn waypoint_index(&self, id: &str) -> Option<usize> {
        self.waypoints.iter().position(|w| w.id() == id)
    }

    /// Segments between consecutive waypoints (one fewer than waypoints).
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Distance from the first to the last waypoint.
    pub fn total_distance(&self) -> f64 {
        self.segments.iter().map(|s| s.distance).sum()
    }

    /// Segments for one run starting at `from`: an origin leg into waypoint 0 followed by the
    /// waypoint-to-waypoint legs.
    pub(crate) fn traversal_from(&self, from: Coord) -> TextfxResult<Vec<Segment>> {
        let Some(first) = self.waypoints.first() else {
            return Err(TextfxError::validation(format!(
                "path '{}' has no waypoints",
                self.id
            )));
        };
        let mut segments = Vec::with_capacity(self.waypoints.len());
        segments.push(Segment::build(from, first, 0, self.bezier_samples));
        segments.extend(self.segments.iter().cloned());
        Ok(segments)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/path.rs"]
mod tests;
