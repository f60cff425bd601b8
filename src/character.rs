use crate::animation::anim::Animation;
use crate::animation::scene::{CharacterVisual, SceneConfig};
use crate::color::palette::ColorPair;
use crate::events::handler::{
    Action, BoundAction, Caller, Event, EventHandler, EventSource, FiredEvent,
};
use crate::foundation::config::{EngineConfig, LookupPolicy};
use crate::foundation::core::{CharacterId, Coord};
use crate::foundation::error::{TextfxError, TextfxResult};
use crate::foundation::ids::{PathHandle, PathKey, SceneHandle, SceneKey};
use crate::motion::engine::Motion;
use crate::motion::path::PathConfig;
use std::collections::VecDeque;

/// One animated cell: owns its Motion, Animation and event registrations.
///
/// Call [`EffectCharacter::tick`] once per frame. Motion advances first, then Animation reads
/// the updated motion progress. Events raised along the way are dispatched from a FIFO queue,
/// so actions that activate Paths or Scenes never re-enter the dispatch in progress.
#[derive(Debug)]
pub struct EffectCharacter {
    id: CharacterId,
    input_symbol: char,
    input_coord: Coord,
    motion: Motion,
    animation: Animation,
    events: EventHandler,
    visible: bool,
    layer: i32,
    lookup_policy: LookupPolicy,
    max_event_cascade: usize,
    pending: VecDeque<FiredEvent>,
    dispatching: bool,
}

impl EffectCharacter {
    pub fn new(id: CharacterId, symbol: char, coord: Coord) -> Self {
        Self::with_config(id, symbol, coord, &EngineConfig::default())
    }

    pub fn with_config(id: CharacterId, symbol: char, coord: Coord, cfg: &EngineConfig) -> Self {
        Self {
            id,
            input_symbol: symbol,
            input_coord: coord,
            motion: Motion::new(coord, cfg),
            animation: Animation::new(symbol),
            events: EventHandler::new(),
            visible: false,
            layer: 0,
            lookup_policy: cfg.lookup_policy,
            max_event_cascade: cfg.max_event_cascade,
            pending: VecDeque::new(),
            dispatching: false,
        }
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn input_symbol(&self) -> char {
        self.input_symbol
    }

    /// Position the character was provisioned at.
    pub fn input_coord(&self) -> Coord {
        self.input_coord
    }

    pub fn current_coord(&self) -> Coord {
        self.motion.current_coord()
    }

    pub fn current_visual(&self) -> &CharacterVisual {
        self.animation.current_visual()
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut Animation {
        &mut self.animation
    }

    pub fn event_handler(&self) -> &EventHandler {
        &self.events
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn layer(&self) -> i32 {
        self.layer
    }

    pub fn set_layer(&mut self, layer: i32) {
        self.layer = layer;
    }

    /// `true` while a Path or Scene is active.
    pub fn is_active(&self) -> bool {
        self.motion.active_path().is_some() || self.animation.active_scene().is_some()
    }

    pub fn new_path(&mut self, config: PathConfig) -> TextfxResult<PathHandle> {
        self.motion.new_path(config)
    }

    pub fn new_scene(&mut self, config: SceneConfig) -> TextfxResult<SceneHandle> {
        self.animation.new_scene(config)
    }

    pub fn set_coordinate(&mut self, coord: Coord) {
        self.motion.set_coordinate(coord);
    }

    pub fn set_appearance(&mut self, symbol: char, colors: ColorPair) {
        self.animation.set_appearance(symbol, colors);
    }

    pub fn reset_appearance(&mut self) {
        self.animation.reset_appearance();
    }

    pub fn activate_path(&mut self, key: impl Into<PathKey>) -> TextfxResult<()> {
        let key = key.into();
        match self.motion.activate_path(key.clone()) {
            Ok(fired) => self.raise([fired]),
            Err(e) => self.unless_ignored(e, "path", &key.to_string()),
        }
    }

    pub fn deactivate_path(&mut self, key: impl Into<PathKey>) -> TextfxResult<()> {
        let key = key.into();
        match self.motion.deactivate_path(key.clone()) {
            Ok(_) => Ok(()),
            Err(e) => self.unless_ignored(e, "path", &key.to_string()),
        }
    }

    pub fn activate_scene(&mut self, key: impl Into<SceneKey>) -> TextfxResult<()> {
        let key = key.into();
        match self.animation.activate_scene(key.clone()) {
            Ok(fired) => self.raise([fired]),
            Err(e) => self.unless_ignored(e, "scene", &key.to_string()),
        }
    }

    pub fn deactivate_scene(&mut self, key: impl Into<SceneKey>) -> TextfxResult<()> {
        let key = key.into();
        match self.animation.deactivate_scene(key.clone()) {
            Ok(_) => Ok(()),
            Err(e) => self.unless_ignored(e, "scene", &key.to_string()),
        }
    }

    fn unless_ignored(&self, err: TextfxError, kind: &str, key: &str) -> TextfxResult<()> {
        if err.is_not_found() && self.lookup_policy == LookupPolicy::Ignore {
            tracing::trace!(character = self.id.0, kind, key, "ignored unknown {kind}");
            return Ok(());
        }
        Err(err)
    }

    pub fn register_event(
        &mut self,
        event: Event,
        source: EventSource,
        action: Action,
    ) -> TextfxResult<()> {
        self.events
            .register_event(&self.motion, &self.animation, event, source, action)
    }

    pub fn unregister_event(
        &mut self,
        event: Event,
        source: EventSource,
        action: Action,
    ) -> TextfxResult<bool> {
        self.events
            .unregister_event(&self.motion, &self.animation, event, source, action)
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Advance one frame: move, dispatch motion events, animate, dispatch animation events.
    pub fn tick(&mut self) -> TextfxResult<()> {
        let moved = self.motion.step();
        self.raise(moved)?;
        if let Some(done) = self.animation.step(self.motion.progress()) {
            self.raise([done])?;
        }
        Ok(())
    }

    /// Queue events and drain the queue unless a drain is already running further up the stack.
    fn raise(&mut self, fired: impl IntoIterator<Item = FiredEvent>) -> TextfxResult<()> {
        self.pending.extend(fired);
        if self.dispatching {
            return Ok(());
        }
        self.dispatching = true;
        let result = self.drain();
        self.dispatching = false;
        if result.is_err() {
            self.pending.clear();
        }
        result
    }

    fn drain(&mut self) -> TextfxResult<()> {
        let mut processed = 0usize;
        while let Some(fired) = self.pending.pop_front() {
            processed += 1;
            if processed > self.max_event_cascade {
                return Err(TextfxError::event(format!(
                    "character {} exceeded {} events in one dispatch (last: {:?})",
                    self.id.0, self.max_event_cascade, fired.event
                )));
            }
            self.react(&fired);
            let actions = self.events.actions(&fired).to_vec();
            if !actions.is_empty() {
                tracing::trace!(
                    character = self.id.0,
                    event = ?fired.event,
                    actions = actions.len(),
                    "dispatch"
                );
            }
            for action in actions {
                self.perform(action)?;
            }
        }
        Ok(())
    }

    /// Layer overrides carried by Paths, Waypoints and Scenes.
    fn react(&mut self, fired: &FiredEvent) {
        let layer = match (fired.event, fired.caller) {
            (Event::PathActivated, Caller::Path(h)) => self.motion.path(h).and_then(|p| p.layer()),
            (Event::SegmentEntered, Caller::Waypoint { path, waypoint }) => self
                .motion
                .path(path)
                .and_then(|p| p.waypoint(waypoint))
                .and_then(|w| w.layer()),
            (Event::SceneActivated, Caller::Scene(h)) => {
                self.animation.scene(h).and_then(|s| s.layer())
            }
            _ => None,
        };
        if let Some(layer) = layer {
            self.layer = layer;
        }
    }

    fn perform(&mut self, action: BoundAction) -> TextfxResult<()> {
        match action {
            BoundAction::ActivatePath(h) => {
                let fired = self.motion.activate_path(h)?;
                self.pending.push_back(fired);
            }
            BoundAction::DeactivatePath(h) => {
                self.motion.deactivate_path(h)?;
            }
            BoundAction::ActivateScene(h) => {
                let fired = self.animation.activate_scene(h)?;
                self.pending.push_back(fired);
            }
            BoundAction::DeactivateScene(h) => {
                self.animation.deactivate_scene(h)?;
            }
            BoundAction::SetVisibility(v) => self.visible = v,
            BoundAction::SetCoordinate(c) => self.motion.set_coordinate(c),
            BoundAction::SetLayer(l) => self.layer = l,
            BoundAction::ResetAppearance => self.animation.reset_appearance(),
            BoundAction::Callback(cb) => cb.invoke(self)?,
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/character/character.rs"]
mod tests;
