use crate::foundation::config::EngineConfig;
use crate::foundation::core::Coord;
use crate::foundation::error::TextfxResult;
use crate::geometry::shapes;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::rc::Rc;

type CurveKey = (Coord, SmallVec<[Coord; 2]>, Coord, usize);

/// Memoized geometry queries for one effect run.
///
/// Many characters ask for the same shape every frame; results are computed once per distinct
/// input and shared through `Rc`. Single-threaded by construction; drop or [`clear`] it between
/// runs.
///
/// [`clear`]: GeometryCache::clear
#[derive(Debug)]
pub struct GeometryCache {
    aspect: f64,
    bezier_samples: usize,
    circle_perimeters: HashMap<(Coord, u32, Option<usize>), Rc<[Coord]>>,
    circle_interiors: HashMap<(Coord, u32), Rc<[Coord]>>,
    rect_perimeters: HashMap<(Coord, u32, u32), Rc<[Coord]>>,
    rect_interiors: HashMap<(Coord, u32, u32), Rc<[Coord]>>,
    curve_lengths: HashMap<CurveKey, f64>,
}

impl GeometryCache {
    pub fn new(aspect: f64, bezier_samples: usize) -> Self {
        Self {
            aspect,
            bezier_samples,
            circle_perimeters: HashMap::new(),
            circle_interiors: HashMap::new(),
            rect_perimeters: HashMap::new(),
            rect_interiors: HashMap::new(),
            curve_lengths: HashMap::new(),
        }
    }

    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self::new(cfg.cell_aspect_ratio, cfg.bezier_samples)
    }

    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    pub fn circle_perimeter(
        &mut self,
        center: Coord,
        radius: u32,
        points: Option<usize>,
    ) -> Rc<[Coord]> {
        let aspect = self.aspect;
        Rc::clone(
            self.circle_perimeters
                .entry((center, radius, points))
                .or_insert_with(|| shapes::circle_perimeter(center, radius, points, aspect).into()),
        )
    }

    pub fn circle_interior(&mut self, center: Coord, radius: u32) -> Rc<[Coord]> {
        let aspect = self.aspect;
        Rc::clone(
            self.circle_interiors
                .entry((center, radius))
                .or_insert_with(|| shapes::circle_interior(center, radius, aspect).into()),
        )
    }

    pub fn rect_perimeter(
        &mut self,
        center: Coord,
        width: u32,
        height: u32,
    ) -> TextfxResult<Rc<[Coord]>> {
        let key = (center, width, height);
        if let Some(hit) = self.rect_perimeters.get(&key) {
            return Ok(Rc::clone(hit));
        }
        let pts: Rc<[Coord]> = shapes::rect_perimeter(center, width, height)?.into();
        self.rect_perimeters.insert(key, Rc::clone(&pts));
        Ok(pts)
    }

    pub fn rect_interior(
        &mut self,
        center: Coord,
        width: u32,
        height: u32,
    ) -> TextfxResult<Rc<[Coord]>> {
        let key = (center, width, height);
        if let Some(hit) = self.rect_interiors.get(&key) {
            return Ok(Rc::clone(hit));
        }
        let pts: Rc<[Coord]> = shapes::rect_interior(center, width, height)?.into();
        self.rect_interiors.insert(key, Rc::clone(&pts));
        Ok(pts)
    }

    pub fn bezier_length(&mut self, start: Coord, controls: &[Coord], end: Coord) -> f64 {
        let samples = self.bezier_samples;
        *self
            .curve_lengths
            .entry((start, SmallVec::from_slice(controls), end, samples))
            .or_insert_with(|| shapes::bezier_length(start, controls, end, samples))
    }

    /// Number of memoized entries across all shape kinds.
    pub fn len(&self) -> usize {
        self.circle_perimeters.len()
            + self.circle_interiors.len()
            + self.rect_perimeters.len()
            + self.rect_interiors.len()
            + self.curve_lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.circle_perimeters.clear();
        self.circle_interiors.clear();
        self.rect_perimeters.clear();
        self.rect_interiors.clear();
        self.curve_lengths.clear();
    }
}

impl Default for GeometryCache {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/cache.rs"]
mod tests;
