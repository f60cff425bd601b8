use crate::animation::anim::Animation;
use crate::character::EffectCharacter;
use crate::foundation::core::Coord;
use crate::foundation::error::{TextfxError, TextfxResult};
use crate::foundation::ids::{PathHandle, PathKey, SceneHandle, SceneKey};
use crate::motion::engine::Motion;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// State transitions raised by Motion and Animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    SegmentEntered,
    SegmentExited,
    PathActivated,
    PathHolding,
    PathComplete,
    SceneActivated,
    SceneComplete,
}

impl Event {
    fn source_kind(self) -> &'static str {
        match self {
            Self::SegmentEntered | Self::SegmentExited => "waypoint",
            Self::PathActivated | Self::PathHolding | Self::PathComplete => "path",
            Self::SceneActivated | Self::SceneComplete => "scene",
        }
    }
}

/// What an event registration listens to, as the user names it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventSource {
    Path(PathKey),
    /// The segment ending at `waypoint` (a waypoint id) of `path`.
    Waypoint { path: PathKey, waypoint: String },
    Scene(SceneKey),
}

impl EventSource {
    fn kind(&self) -> &'static str {
        match self {
            Self::Path(_) => "path",
            Self::Waypoint { .. } => "waypoint",
            Self::Scene(_) => "scene",
        }
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "path {p}"),
            Self::Waypoint { path, waypoint } => write!(f, "waypoint {waypoint} of path {path}"),
            Self::Scene(s) => write!(f, "scene {s}"),
        }
    }
}

/// Resolved event source, as raised by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Caller {
    Path(PathHandle),
    Waypoint { path: PathHandle, waypoint: usize },
    Scene(SceneHandle),
}

/// One event raised during a tick or an activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FiredEvent {
    pub event: Event,
    pub caller: Caller,
}

impl FiredEvent {
    pub const fn new(event: Event, caller: Caller) -> Self {
        Self { event, caller }
    }
}

pub type CallbackFn = dyn Fn(&mut EffectCharacter, &[serde_json::Value]) -> TextfxResult<()>;

/// User function invoked during dispatch with the triggering character and static arguments.
///
/// Two callbacks are equal when they share the same function handle and equal arguments.
#[derive(Clone)]
pub struct Callback {
    func: Rc<CallbackFn>,
    args: Vec<serde_json::Value>,
}

impl Callback {
    pub fn new(
        func: impl Fn(&mut EffectCharacter, &[serde_json::Value]) -> TextfxResult<()> + 'static,
        args: Vec<serde_json::Value>,
    ) -> Self {
        Self {
            func: Rc::new(func),
            args,
        }
    }

    /// Same function, different arguments.
    pub fn with_args(&self, args: Vec<serde_json::Value>) -> Self {
        Self {
            func: Rc::clone(&self.func),
            args,
        }
    }

    pub fn args(&self) -> &[serde_json::Value] {
        &self.args
    }

    pub(crate) fn invoke(&self, character: &mut EffectCharacter) -> TextfxResult<()> {
        (self.func)(character, &self.args)
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func) && self.args == other.args
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("func", &Rc::as_ptr(&self.func).cast::<()>())
            .field("args", &self.args)
            .finish()
    }
}

/// Reaction to an event, targets named by id or handle.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    ActivatePath(PathKey),
    DeactivatePath(PathKey),
    ActivateScene(SceneKey),
    DeactivateScene(SceneKey),
    SetVisibility(bool),
    SetCoordinate(Coord),
    SetLayer(i32),
    ResetAppearance,
    Callback(Callback),
}

/// [`Action`] with every target resolved against the character's registries.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum BoundAction {
    ActivatePath(PathHandle),
    DeactivatePath(PathHandle),
    ActivateScene(SceneHandle),
    DeactivateScene(SceneHandle),
    SetVisibility(bool),
    SetCoordinate(Coord),
    SetLayer(i32),
    ResetAppearance,
    Callback(Callback),
}

/// Registry of `(event, caller) -> [action]`, kept in registration order.
#[derive(Debug, Default)]
pub struct EventHandler {
    registry: HashMap<(Event, Caller), Vec<BoundAction>>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` to run whenever `event` fires for `source`.
    ///
    /// Ids are resolved now, so unknown paths, scenes or waypoints fail here rather than at
    /// dispatch. Registering the same `(event, source, action)` twice is an error and leaves
    /// the registry untouched.
    pub fn register_event(
        &mut self,
        motion: &Motion,
        animation: &Animation,
        event: Event,
        source: EventSource,
        action: Action,
    ) -> TextfxResult<()> {
        let caller = resolve_source(motion, animation, event, &source)?;
        let bound = bind(motion, animation, action)?;
        let actions = self.registry.entry((event, caller)).or_default();
        if actions.contains(&bound) {
            return Err(TextfxError::duplicate_event(format!(
                "{event:?} on {source} -> {bound:?}"
            )));
        }
        tracing::trace!(?event, %source, "event registered");
        actions.push(bound);
        Ok(())
    }

    /// Remove a registration; returns whether it existed.
    pub fn unregister_event(
        &mut self,
        motion: &Motion,
        animation: &Animation,
        event: Event,
        source: EventSource,
        action: Action,
    ) -> TextfxResult<bool> {
        let caller = resolve_source(motion, animation, event, &source)?;
        let bound = bind(motion, animation, action)?;
        let key = (event, caller);
        let Some(actions) = self.registry.get_mut(&key) else {
            return Ok(false);
        };
        let Some(pos) = actions.iter().position(|a| *a == bound) else {
            return Ok(false);
        };
        actions.remove(pos);
        if actions.is_empty() {
            self.registry.remove(&key);
        }
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.registry.clear();
    }

    /// Total number of registrations.
    pub fn len(&self) -> usize {
        self.registry.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Number of actions registered for one fired event.
    pub fn action_count(&self, fired: &FiredEvent) -> usize {
        self.registry
            .get(&(fired.event, fired.caller))
            .map_or(0, Vec::len)
    }

    pub(crate) fn actions(&self, fired: &FiredEvent) -> &[BoundAction] {
        self.registry
            .get(&(fired.event, fired.caller))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn resolve_source(
    motion: &Motion,
    animation: &Animation,
    event: Event,
    source: &EventSource,
) -> TextfxResult<Caller> {
    if event.source_kind() != source.kind() {
        return Err(TextfxError::validation(format!(
            "{event:?} is raised by a {}, not a {}",
            event.source_kind(),
            source.kind()
        )));
    }
    match source {
        EventSource::Path(key) => Ok(Caller::Path(motion.resolve(key)?)),
        EventSource::Scene(key) => Ok(Caller::Scene(animation.resolve(key)?)),
        EventSource::Waypoint { path, waypoint } => {
            let handle = motion.resolve(path)?;
            let index = motion
                .path(handle)
                .and_then(|p| p.waypoint_index(waypoint))
                .ok_or_else(|| {
                    TextfxError::validation(format!("path {path} has no waypoint '{waypoint}'"))
                })?;
            Ok(Caller::Waypoint {
                path: handle,
                waypoint: index,
            })
        }
    }
}

fn bind(motion: &Motion, animation: &Animation, action: Action) -> TextfxResult<BoundAction> {
    Ok(match action {
        Action::ActivatePath(k) => BoundAction::ActivatePath(motion.resolve(&k)?),
        Action::DeactivatePath(k) => BoundAction::DeactivatePath(motion.resolve(&k)?),
        Action::ActivateScene(k) => BoundAction::ActivateScene(animation.resolve(&k)?),
        Action::DeactivateScene(k) => BoundAction::DeactivateScene(animation.resolve(&k)?),
        Action::SetVisibility(v) => BoundAction::SetVisibility(v),
        Action::SetCoordinate(c) => BoundAction::SetCoordinate(c),
        Action::SetLayer(l) => BoundAction::SetLayer(l),
        Action::ResetAppearance => BoundAction::ResetAppearance,
        Action::Callback(cb) => BoundAction::Callback(cb),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/events/handler.rs"]
mod tests;
