use crate::animation::scene::{CharacterVisual, Scene, SceneConfig};
use crate::color::palette::ColorPair;
use crate::events::handler::{Caller, Event, FiredEvent};
use crate::foundation::error::{TextfxError, TextfxResult};
use crate::foundation::ids::{SceneHandle, SceneKey};
use crate::motion::engine::MotionProgress;
use std::collections::HashMap;

/// Per-character appearance state and Scene registry.
#[derive(Clone, Debug)]
pub struct Animation {
    scenes: Vec<Scene>,
    ids: HashMap<String, SceneHandle>,
    active: Option<SceneHandle>,
    input_symbol: char,
    current: CharacterVisual,
}

impl Animation {
    pub fn new(input_symbol: char) -> Self {
        Self {
            scenes: Vec::new(),
            ids: HashMap::new(),
            active: None,
            input_symbol,
            current: CharacterVisual::plain(input_symbol),
        }
    }

    /// Create and register a Scene. Without an id in `config` one is generated.
    pub fn new_scene(&mut self, config: SceneConfig) -> TextfxResult<SceneHandle> {
        let id = match config.id.clone() {
            Some(id) if self.ids.contains_key(&id) => {
                return Err(TextfxError::validation(format!("duplicate scene id '{id}'")));
            }
            Some(id) => id,
            None => {
                let mut n = self.scenes.len();
                while self.ids.contains_key(&n.to_string()) {
                    n += 1;
                }
                n.to_string()
            }
        };
        let handle = SceneHandle(u32::try_from(self.scenes.len()).map_err(anyhow::Error::from)?);
        self.scenes.push(Scene::new(id.clone(), &config));
        self.ids.insert(id, handle);
        Ok(handle)
    }

    pub fn scene(&self, handle: SceneHandle) -> Option<&Scene> {
        self.scenes.get(handle.index())
    }

    pub fn scene_mut(&mut self, handle: SceneHandle) -> Option<&mut Scene> {
        self.scenes.get_mut(handle.index())
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn resolve(&self, key: &SceneKey) -> TextfxResult<SceneHandle> {
        match key {
            SceneKey::Id(id) => self
                .ids
                .get(id)
                .copied()
                .ok_or_else(|| TextfxError::scene_not_found(id.clone())),
            SceneKey::Handle(h) if h.index() < self.scenes.len() => Ok(*h),
            SceneKey::Handle(h) => Err(TextfxError::scene_not_found(format!("#{}", h.0))),
        }
    }

    /// Scene by id; a miss is [`TextfxError::SceneNotFound`].
    pub fn query_scene(&self, id: &str) -> TextfxResult<&Scene> {
        self.find_scene(id)
            .ok_or_else(|| TextfxError::scene_not_found(id))
    }

    pub fn find_scene(&self, id: &str) -> Option<&Scene> {
        self.ids.get(id).and_then(|h| self.scene(*h))
    }

    pub fn active_scene(&self) -> Option<SceneHandle> {
        self.active
    }

    pub fn current_visual(&self) -> &CharacterVisual {
        &self.current
    }

    pub fn input_symbol(&self) -> char {
        self.input_symbol
    }

    /// Make `key` the active Scene, rewound to its first frame, which is shown immediately.
    pub fn activate_scene(&mut self, key: impl Into<SceneKey>) -> TextfxResult<FiredEvent> {
        let handle = self.resolve(&key.into())?;
        let scene = &mut self.scenes[handle.index()];
        self.current = scene.activate()?;
        tracing::debug!(scene = scene.id(), "scene activated");
        self.active = Some(handle);
        Ok(FiredEvent::new(Event::SceneActivated, Caller::Scene(handle)))
    }

    /// Deactivate `key` if it is the active Scene; returns whether anything changed.
    pub fn deactivate_scene(&mut self, key: impl Into<SceneKey>) -> TextfxResult<bool> {
        let handle = self.resolve(&key.into())?;
        if self.active == Some(handle) {
            self.active = None;
            tracing::debug!(scene = self.scenes[handle.index()].id(), "scene deactivated");
            return Ok(true);
        }
        Ok(false)
    }

    pub fn deactivate(&mut self) -> Option<SceneHandle> {
        self.active.take()
    }

    /// Rewind a Scene without changing which Scene is active.
    pub fn reset_scene(&mut self, key: impl Into<SceneKey>) -> TextfxResult<()> {
        let handle = self.resolve(&key.into())?;
        self.scenes[handle.index()].reset_scene();
        Ok(())
    }

    /// Advance the active Scene. `progress` is the owning Motion's state after this tick's
    /// movement; synced Scenes read it, others ignore it.
    pub fn step(&mut self, progress: Option<MotionProgress>) -> Option<FiredEvent> {
        let handle = self.active?;
        let scene = self.scenes.get_mut(handle.index())?;
        if scene.frames().is_empty() {
            return None;
        }
        let step = scene.advance(progress);
        self.current = step.visual;
        if !step.finished {
            return None;
        }
        tracing::debug!(scene = scene.id(), "scene complete");
        self.active = None;
        Some(FiredEvent::new(Event::SceneComplete, Caller::Scene(handle)))
    }

    /// Override the visual directly. The next Scene step replaces it.
    pub fn set_appearance(&mut self, symbol: char, colors: ColorPair) {
        self.current = CharacterVisual::new(symbol, colors);
    }

    pub fn set_visual(&mut self, visual: CharacterVisual) {
        self.current = visual;
    }

    /// Back to the input symbol with terminal default colors.
    pub fn reset_appearance(&mut self) {
        self.current = CharacterVisual::plain(self.input_symbol);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
