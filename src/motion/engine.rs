use crate::animation::ease::ease_or_linear;
use crate::events::handler::{Caller, Event, FiredEvent};
use crate::foundation::config::EngineConfig;
use crate::foundation::core::Coord;
use crate::foundation::error::{TextfxError, TextfxResult};
use crate::foundation::ids::{PathHandle, PathKey};
use crate::foundation::math::ratio_or_one;
use crate::motion::path::{Path, PathConfig, Segment};
use smallvec::SmallVec;
use std::collections::HashMap;

pub type FiredEvents = SmallVec<[FiredEvent; 4]>;

/// Progress of the active Path, as read by synced Scenes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionProgress {
    /// Distance traveled over total distance.
    pub distance_fraction: f64,
    /// Segments completed over total segments.
    pub step_fraction: f64,
}

#[derive(Clone, Debug)]
struct Traversal {
    handle: PathHandle,
    segments: Vec<Segment>,
    total: f64,
    traveled: f64,
    index: usize,
    index_start: f64,
    entered: bool,
    hold_remaining: Option<u32>,
}

impl Traversal {
    fn new(handle: PathHandle, segments: Vec<Segment>) -> Self {
        let total = segments.iter().map(|s| s.distance).sum();
        Self {
            handle,
            segments,
            total,
            traveled: 0.0,
            index: 0,
            index_start: 0.0,
            entered: false,
            hold_remaining: None,
        }
    }

    fn is_last(&self) -> bool {
        self.index + 1 == self.segments.len()
    }

    fn waypoint_caller(&self) -> Caller {
        Caller::Waypoint {
            path: self.handle,
            waypoint: self.segments[self.index].end_waypoint,
        }
    }
}

/// Per-character movement state and Path registry.
#[derive(Clone, Debug)]
pub struct Motion {
    paths: Vec<Path>,
    ids: HashMap<String, PathHandle>,
    current: Coord,
    previous: Coord,
    active: Option<Traversal>,
    bezier_samples: usize,
}

impl Motion {
    pub fn new(origin: Coord, cfg: &EngineConfig) -> Self {
        Self {
            paths: Vec::new(),
            ids: HashMap::new(),
            current: origin,
            previous: origin,
            active: None,
            bezier_samples: cfg.bezier_samples,
        }
    }

    /// Create and register a Path. Without an id in `config` one is generated.
    pub fn new_path(&mut self, config: PathConfig) -> TextfxResult<PathHandle> {
        let id = match config.id.clone() {
            Some(id) if self.ids.contains_key(&id) => {
                return Err(TextfxError::validation(format!("duplicate path id '{id}'")));
            }
            Some(id) => id,
            None => {
                let mut n = self.paths.len();
                while self.ids.contains_key(&n.to_string()) {
                    n += 1;
                }
                n.to_string()
            }
        };
        let path = Path::new(id.clone(), &config, self.bezier_samples)?;
        let handle = PathHandle(u32::try_from(self.paths.len()).map_err(anyhow::Error::from)?);
        self.paths.push(path);
        self.ids.insert(id, handle);
        Ok(handle)
    }

    pub fn path(&self, handle: PathHandle) -> Option<&Path> {
        self.paths.get(handle.index())
    }

    pub fn path_mut(&mut self, handle: PathHandle) -> Option<&mut Path> {
        self.paths.get_mut(handle.index())
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn resolve(&self, key: &PathKey) -> TextfxResult<PathHandle> {
        match key {
            PathKey::Id(id) => self
                .ids
                .get(id)
                .copied()
                .ok_or_else(|| TextfxError::path_not_found(id.clone())),
            PathKey::Handle(h) if h.index() < self.paths.len() => Ok(*h),
            PathKey::Handle(h) => Err(TextfxError::path_not_found(format!("#{}", h.0))),
        }
    }

    /// Path by id; a miss is [`TextfxError::PathNotFound`].
    pub fn query_path(&self, id: &str) -> TextfxResult<&Path> {
        self.find_path(id)
            .ok_or_else(|| TextfxError::path_not_found(id))
    }

    pub fn find_path(&self, id: &str) -> Option<&Path> {
        self.ids.get(id).and_then(|h| self.path(*h))
    }

    pub fn current_coord(&self) -> Coord {
        self.current
    }

    pub fn previous_coord(&self) -> Coord {
        self.previous
    }

    /// Move the character without going through a Path. An active Path continues from its own
    /// progress on the next tick.
    pub fn set_coordinate(&mut self, coord: Coord) {
        self.previous = self.current;
        self.current = coord;
    }

    pub fn active_path(&self) -> Option<PathHandle> {
        self.active.as_ref().map(|t| t.handle)
    }

    pub fn is_holding(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|t| t.hold_remaining.is_some())
    }

    /// Start `key` from the current coordinate, replacing any active Path.
    ///
    /// A Path without waypoints is rejected before any tick runs.
    pub fn activate_path(&mut self, key: impl Into<PathKey>) -> TextfxResult<FiredEvent> {
        let handle = self.resolve(&key.into())?;
        let path = &self.paths[handle.index()];
        let segments = path.traversal_from(self.current)?;
        tracing::debug!(path = path.id(), segments = segments.len(), "path activated");
        self.active = Some(Traversal::new(handle, segments));
        Ok(FiredEvent::new(Event::PathActivated, Caller::Path(handle)))
    }

    /// Deactivate `key` if it is the active Path; returns whether anything changed.
    ///
    /// A deactivated Path fires nothing until it is activated again.
    pub fn deactivate_path(&mut self, key: impl Into<PathKey>) -> TextfxResult<bool> {
        let handle = self.resolve(&key.into())?;
        if self.active_path() == Some(handle) {
            self.active = None;
            tracing::debug!(path = self.paths[handle.index()].id(), "path deactivated");
            return Ok(true);
        }
        Ok(false)
    }

    /// Drop the active Path, if any.
    pub fn deactivate(&mut self) -> Option<PathHandle> {
        self.active.take().map(|t| t.handle)
    }

    /// `None` when no Path is moving the character.
    pub fn progress(&self) -> Option<MotionProgress> {
        let t = self.active.as_ref()?;
        // A zero-length origin leg is not a step of the Path.
        let skip = usize::from(t.segments.first().is_some_and(|s| s.distance <= 0.0));
        let n = t.segments.len().saturating_sub(skip);
        let completed = if t.hold_remaining.is_some() {
            n
        } else {
            t.index.saturating_sub(skip)
        };
        Some(MotionProgress {
            distance_fraction: ratio_or_one(t.traveled, t.total),
            step_fraction: ratio_or_one(completed as f64, n as f64),
        })
    }

    /// Advance the active Path by one tick of its speed.
    pub fn step(&mut self) -> FiredEvents {
        let mut fired = FiredEvents::new();
        let Some(t) = self.active.as_mut() else {
            return fired;
        };

        if let Some(remaining) = t.hold_remaining.as_mut() {
            self.previous = self.current;
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                self.finish(&mut fired);
            }
            return fired;
        }

        let Some(path) = self.paths.get(t.handle.index()) else {
            self.active = None;
            return fired;
        };
        let (ease, hold) = (path.ease(), path.hold_time());
        t.traveled = (t.traveled + path.speed()).min(t.total);

        loop {
            if !t.entered {
                t.entered = true;
                fired.push(FiredEvent::new(Event::SegmentEntered, t.waypoint_caller()));
            }
            if t.is_last() {
                break;
            }
            let seg = &t.segments[t.index];
            if seg.distance > 0.0 && t.traveled - t.index_start <= seg.distance {
                break;
            }
            let distance = seg.distance;
            fired.push(FiredEvent::new(Event::SegmentExited, t.waypoint_caller()));
            t.index_start += distance;
            t.index += 1;
            t.entered = false;
        }

        let seg = &t.segments[t.index];
        let fraction = if seg.distance > 0.0 {
            ((t.traveled - t.index_start) / seg.distance).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let next = seg.coord_at(ease_or_linear(ease, fraction));
        let reached = t.traveled >= t.total;
        if reached {
            fired.push(FiredEvent::new(Event::SegmentExited, t.waypoint_caller()));
            if hold > 0 {
                t.hold_remaining = Some(hold);
                fired.push(FiredEvent::new(Event::PathHolding, Caller::Path(t.handle)));
            }
        }

        self.previous = self.current;
        self.current = next;
        if reached && hold == 0 {
            self.finish(&mut fired);
        }
        fired
    }

    /// End of a run: loop back to waypoint 0 or complete.
    fn finish(&mut self, fired: &mut FiredEvents) {
        let Some(handle) = self.active_path() else {
            return;
        };
        let restart = self
            .paths
            .get(handle.index())
            .filter(|p| p.is_looping())
            .and_then(|p| p.traversal_from(self.current).ok());
        match restart {
            Some(segments) => {
                tracing::trace!(path = handle.0, "path looped");
                self.active = Some(Traversal::new(handle, segments));
            }
            None => {
                tracing::debug!(path = handle.0, "path complete");
                self.active = None;
                fired.push(FiredEvent::new(Event::PathComplete, Caller::Path(handle)));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/engine.rs"]
mod tests;
