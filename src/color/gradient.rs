use crate::color::palette::{Color, Rgb};
use crate::foundation::core::{BoundingBox, Coord, Point};
use crate::foundation::error::{TextfxError, TextfxResult};
use crate::foundation::math::{Lerp, ratio_or_one};
use crate::geometry::shapes::scaled_distance;
use std::collections::HashMap;
use std::rc::Rc;

/// Step counts between consecutive gradient stops.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Steps {
    /// Same count between every pair of stops.
    Uniform(usize),
    /// One count per pair of stops.
    PerPair(Vec<usize>),
}

impl From<usize> for Steps {
    fn from(n: usize) -> Self {
        Self::Uniform(n)
    }
}

impl From<Vec<usize>> for Steps {
    fn from(v: Vec<usize>) -> Self {
        Self::PerPair(v)
    }
}

impl<const N: usize> From<[usize; N]> for Steps {
    fn from(v: [usize; N]) -> Self {
        Self::PerPair(v.to_vec())
    }
}

/// Axis along which a spectrum is laid over a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
    /// Top-left to bottom-right.
    Diagonal,
    /// Center outward.
    Radial,
}

/// Multi-stop color spectrum.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    stops: Vec<Color>,
    steps: Vec<usize>,
    looping: bool,
    spectrum: Vec<Color>,
}

impl Gradient {
    /// Build a gradient through `stops`.
    ///
    /// Each pair `(a, b)` with `s` steps contributes `a` followed by `s - 1` interpolated colors;
    /// the final stop is appended once. A single stop (or only equal stops) yields a flat
    /// spectrum whose length is the step count.
    pub fn new(
        stops: impl IntoIterator<Item = Color>,
        steps: impl Into<Steps>,
    ) -> TextfxResult<Self> {
        Self::build(stops.into_iter().collect(), steps.into(), false)
    }

    /// Like [`Gradient::new`] with an extra transition from the last stop back to the first.
    ///
    /// The spectrum stops one step short of the first color so cycling through it is seamless.
    pub fn looping(
        stops: impl IntoIterator<Item = Color>,
        steps: impl Into<Steps>,
    ) -> TextfxResult<Self> {
        Self::build(stops.into_iter().collect(), steps.into(), true)
    }

    #[tracing::instrument(level = "debug", skip(stops))]
    fn build(stops: Vec<Color>, steps: Steps, looping: bool) -> TextfxResult<Self> {
        if stops.is_empty() {
            return Err(TextfxError::validation("Gradient needs at least one stop"));
        }

        let mut path = stops.clone();
        if looping && stops.len() > 1 {
            path.push(stops[0]);
        }
        let pairs = path.len() - 1;

        let per_pair = match (&steps, pairs) {
            (Steps::Uniform(n), 0) => vec![*n],
            (Steps::PerPair(v), 0) if v.len() == 1 => v.clone(),
            (Steps::Uniform(n), _) => vec![*n; pairs],
            (Steps::PerPair(v), _) if v.len() == pairs => v.clone(),
            (Steps::PerPair(v), _) => {
                return Err(TextfxError::validation(format!(
                    "Gradient has {pairs} stop pair(s) but {} step value(s)",
                    v.len()
                )));
            }
        };

        let degenerate = path.windows(2).all(|w| w[0] == w[1]);
        let spectrum = if degenerate {
            let len = per_pair.iter().sum::<usize>().max(1);
            vec![stops[0]; len]
        } else {
            let mut spectrum = Vec::with_capacity(per_pair.iter().sum::<usize>() + 1);
            for (pair, &s) in path.windows(2).zip(&per_pair) {
                let (a, b) = (pair[0], pair[1]);
                if s == 0 {
                    if a != b {
                        return Err(TextfxError::validation(format!(
                            "Gradient step between distinct stops {a} and {b} must be > 0"
                        )));
                    }
                    continue;
                }
                let (ra, rb) = (a.to_rgb(), b.to_rgb());
                spectrum.push(a);
                for i in 1..s {
                    let t = i as f64 / s as f64;
                    spectrum.push(Color::from(<Rgb as Lerp>::lerp(&ra, &rb, t)));
                }
            }
            if !looping {
                spectrum.push(path[pairs]);
            }
            spectrum
        };

        tracing::debug!(stops = stops.len(), len = spectrum.len(), "gradient built");
        Ok(Self {
            stops,
            steps: per_pair,
            looping,
            spectrum,
        })
    }

    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Resolved step count per stop pair.
    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn spectrum(&self) -> &[Color] {
        &self.spectrum
    }

    pub fn len(&self) -> usize {
        self.spectrum.len()
    }

    /// Always `false`: a valid gradient has at least one color.
    pub fn is_empty(&self) -> bool {
        self.spectrum.is_empty()
    }

    /// Color at `fraction` of the spectrum; each color owns an equal share of `[0, 1]`.
    pub fn get_color_at_fraction(&self, fraction: f64) -> TextfxResult<Color> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(TextfxError::validation(format!(
                "gradient fraction must be within [0, 1], got {fraction}"
            )));
        }
        Ok(self.spectrum[self.index_at(fraction)])
    }

    fn index_at(&self, fraction: f64) -> usize {
        let len = self.spectrum.len();
        ((fraction * len as f64).floor() as usize).min(len - 1)
    }

    /// Assign a spectrum color to every cell of `bounds` along `direction`.
    ///
    /// Radial distance is measured from the center of `text_bounds` when given (the text may sit
    /// anywhere on a larger canvas), otherwise from the center of `bounds`.
    pub fn build_coordinate_color_mapping(
        &self,
        direction: Direction,
        bounds: BoundingBox,
        text_bounds: Option<BoundingBox>,
        cache: &mut ColorMappingCache,
    ) -> TextfxResult<Rc<HashMap<Coord, Color>>> {
        BoundingBox::new(bounds.min_row, bounds.max_row, bounds.min_column, bounds.max_column)?;
        let key = MappingKey {
            direction,
            bounds,
            text_bounds,
            spectrum: self.spectrum.clone(),
        };
        if let Some(hit) = cache.entries.get(&key) {
            cache.hits += 1;
            return Ok(Rc::clone(hit));
        }
        cache.misses += 1;
        let mapping = Rc::new(self.compute_mapping(direction, bounds, text_bounds, cache.aspect));
        cache.entries.insert(key, Rc::clone(&mapping));
        Ok(mapping)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn compute_mapping(
        &self,
        direction: Direction,
        bounds: BoundingBox,
        text_bounds: Option<BoundingBox>,
        aspect: f64,
    ) -> HashMap<Coord, Color> {
        let row_span = f64::from(bounds.height() - 1);
        let col_span = f64::from(bounds.width() - 1);
        let center = text_bounds.unwrap_or(bounds).center();
        let max_radius = [
            Coord::new(bounds.min_row, bounds.min_column),
            Coord::new(bounds.min_row, bounds.max_column),
            Coord::new(bounds.max_row, bounds.min_column),
            Coord::new(bounds.max_row, bounds.max_column),
        ]
        .into_iter()
        .map(|corner| scaled_distance(center, corner.to_point(), aspect))
        .fold(0.0, f64::max);

        let fraction_of = |c: Coord| -> f64 {
            let dr = f64::from(c.row - bounds.min_row);
            let dc = f64::from(c.column - bounds.min_column);
            match direction {
                Direction::Horizontal => ratio_or_one(dc, col_span),
                Direction::Vertical => ratio_or_one(dr, row_span),
                Direction::Diagonal => {
                    ratio_or_one(dr * aspect + dc, row_span * aspect + col_span)
                }
                Direction::Radial => normalized_radial_fraction(center, c, max_radius, aspect),
            }
        };

        bounds
            .coords()
            .map(|c| (c, self.spectrum[self.index_at(fraction_of(c))]))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct MappingKey {
    direction: Direction,
    bounds: BoundingBox,
    text_bounds: Option<BoundingBox>,
    spectrum: Vec<Color>,
}

/// Memoized coordinate→color mappings shared by every character of an effect run.
#[derive(Debug)]
pub struct ColorMappingCache {
    aspect: f64,
    entries: HashMap<MappingKey, Rc<HashMap<Coord, Color>>>,
    hits: u64,
    misses: u64,
}

impl ColorMappingCache {
    /// `aspect` is the cell height/width ratio used for diagonal and radial mappings.
    pub fn new(aspect: f64) -> Self {
        Self {
            aspect,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn from_config(cfg: &crate::foundation::config::EngineConfig) -> Self {
        Self::new(cfg.cell_aspect_ratio)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since construction or the last [`ColorMappingCache::clear`].
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

impl Default for ColorMappingCache {
    fn default() -> Self {
        Self::from_config(&crate::foundation::config::EngineConfig::default())
    }
}

/// Radial distance helper exposed for effects that color by hand.
pub fn normalized_radial_fraction(center: Point, c: Coord, max_radius: f64, aspect: f64) -> f64 {
    if max_radius <= 0.0 {
        return 0.0;
    }
    (scaled_distance(center, c.to_point(), aspect) / max_radius).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/color/gradient.rs"]
mod tests;
