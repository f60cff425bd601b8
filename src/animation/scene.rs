use crate::animation::ease::Ease;
use crate::color::gradient::Gradient;
use crate::color::palette::{Color, ColorPair};
use crate::foundation::error::{TextfxError, TextfxResult};
use crate::motion::engine::MotionProgress;

/// Terminal text attributes carried by a visual.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Formatting {
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub blink: bool,
    pub reverse: bool,
    pub hidden: bool,
    pub strike: bool,
}

/// What a character looks like on one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CharacterVisual {
    pub symbol: char,
    #[serde(default)]
    pub colors: ColorPair,
    #[serde(default)]
    pub formatting: Formatting,
}

impl CharacterVisual {
    pub const fn new(symbol: char, colors: ColorPair) -> Self {
        Self {
            symbol,
            colors,
            formatting: Formatting {
                bold: false,
                dim: false,
                italic: false,
                underline: false,
                blink: false,
                reverse: false,
                hidden: false,
                strike: false,
            },
        }
    }

    /// `symbol` with terminal default colors.
    pub const fn plain(symbol: char) -> Self {
        Self::new(symbol, ColorPair::new(None, None))
    }

    pub fn with_formatting(mut self, formatting: Formatting) -> Self {
        self.formatting = formatting;
        self
    }
}

/// A visual shown for `duration` ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub visual: CharacterVisual,
    pub duration: u32,
}

/// How a Scene picks its frame each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Elapsed ticks.
    #[default]
    None,
    /// Fraction of Path distance traveled.
    Distance,
    /// Fraction of Path segments completed.
    Step,
}

/// Settings for [`crate::animation::anim::Animation::new_scene`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Unique id within the character; generated when `None`.
    pub id: Option<String>,
    pub ease: Option<Ease>,
    pub sync: SyncMode,
    pub looping: bool,
    pub layer: Option<i32>,
}

impl SceneConfig {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    pub fn sync(mut self, sync: SyncMode) -> Self {
        self.sync = sync;
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn layer(mut self, layer: i32) -> Self {
        self.layer = Some(layer);
        self
    }
}

/// Result of advancing a Scene by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SceneStep {
    pub visual: CharacterVisual,
    pub finished: bool,
}

/// Ordered frames plus the rules for playing them.
#[derive(Clone, Debug)]
pub struct Scene {
    id: String,
    ease: Option<Ease>,
    sync: SyncMode,
    looping: bool,
    layer: Option<i32>,
    frames: Vec<Frame>,
    frame_index: usize,
    ticks_in_frame: u32,
    played_frames: usize,
    easing_current_step: u32,
}

impl Scene {
    pub(crate) fn new(id: String, config: &SceneConfig) -> Self {
        Self {
            id,
            ease: config.ease,
            sync: config.sync,
            looping: config.looping,
            layer: config.layer,
            frames: Vec::new(),
            frame_index: 0,
            ticks_in_frame: 0,
            played_frames: 0,
            easing_current_step: 0,
        }
    }

    pub fn add_frame(
        &mut self,
        symbol: char,
        duration: u32,
        colors: ColorPair,
    ) -> TextfxResult<()> {
        self.add_visual(CharacterVisual::new(symbol, colors), duration)
    }

    pub fn add_visual(&mut self, visual: CharacterVisual, duration: u32) -> TextfxResult<()> {
        if duration == 0 {
            return Err(TextfxError::validation(format!(
                "frame duration must be >= 1 in scene '{}'",
                self.id
            )));
        }
        self.frames.push(Frame { visual, duration });
        Ok(())
    }

    /// Append one frame per step of the longer of `symbols` and the gradient spectra.
    ///
    /// Indices are spread evenly (`i * len / n`), so every symbol and every spectrum color
    /// shows up at least once.
    pub fn apply_gradient_to_symbols(
        &mut self,
        symbols: &[char],
        duration: u32,
        fg: Option<&Gradient>,
        bg: Option<&Gradient>,
    ) -> TextfxResult<()> {
        if symbols.is_empty() {
            return Err(TextfxError::validation(format!(
                "scene '{}' needs at least one symbol",
                self.id
            )));
        }
        if duration == 0 {
            return Err(TextfxError::validation(format!(
                "frame duration must be >= 1 in scene '{}'",
                self.id
            )));
        }
        let spectrum_len = |g: Option<&Gradient>| g.map_or(0, Gradient::len);
        let n = symbols.len().max(spectrum_len(fg)).max(spectrum_len(bg));
        let pick = |g: Option<&Gradient>, i: usize| -> Option<Color> {
            g.map(|g| g.spectrum()[i * g.len() / n])
        };
        for i in 0..n {
            let symbol = symbols[i * symbols.len() / n];
            let colors = ColorPair::new(pick(fg, i), pick(bg, i));
            self.frames.push(Frame {
                visual: CharacterVisual::new(symbol, colors),
                duration,
            });
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn ease(&self) -> Option<Ease> {
        self.ease
    }

    pub fn sync(&self) -> SyncMode {
        self.sync
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn layer(&self) -> Option<i32> {
        self.layer
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Sum of all frame durations in ticks.
    pub fn total_duration(&self) -> u32 {
        self.frames.iter().map(|f| f.duration).sum()
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn easing_current_step(&self) -> u32 {
        self.easing_current_step
    }

    /// Frames fully played in the current run.
    pub fn played_frames(&self) -> usize {
        self.played_frames
    }

    pub fn reset_scene(&mut self) {
        self.frame_index = 0;
        self.ticks_in_frame = 0;
        self.played_frames = 0;
        self.easing_current_step = 0;
    }

    /// Rewind and return the first visual. Showing it does not count as playing a frame.
    pub(crate) fn activate(&mut self) -> TextfxResult<CharacterVisual> {
        let Some(first) = self.frames.first() else {
            return Err(TextfxError::validation(format!(
                "scene '{}' has no frames",
                self.id
            )));
        };
        let visual = first.visual;
        self.reset_scene();
        Ok(visual)
    }

    pub(crate) fn advance(&mut self, progress: Option<MotionProgress>) -> SceneStep {
        match self.sync {
            SyncMode::None if self.ease.is_some() => self.advance_eased(),
            SyncMode::None => self.advance_ticks(),
            SyncMode::Distance => self.advance_synced(progress.map(|p| p.distance_fraction)),
            SyncMode::Step => self.advance_synced(progress.map(|p| p.step_fraction)),
        }
    }

    fn advance_ticks(&mut self) -> SceneStep {
        let frame = self.frames[self.frame_index];
        self.ticks_in_frame += 1;
        if self.ticks_in_frame >= frame.duration {
            self.ticks_in_frame = 0;
            self.played_frames += 1;
            if self.frame_index + 1 < self.frames.len() {
                self.frame_index += 1;
            } else if self.looping {
                self.frame_index = 0;
                self.played_frames = 0;
            }
        }
        SceneStep {
            visual: frame.visual,
            finished: !self.looping && self.played_frames >= self.frames.len(),
        }
    }

    fn advance_eased(&mut self) -> SceneStep {
        let total = self.total_duration().max(1);
        let ratio = f64::from(self.easing_current_step.min(total)) / f64::from(total);
        let eased = self.ease.map_or(ratio, |e| e.apply(ratio)).clamp(0.0, 1.0);
        self.frame_index = self.frame_at_tick(eased * f64::from(total));
        let visual = self.frames[self.frame_index].visual;
        self.easing_current_step = (self.easing_current_step + 1).min(total);
        let done = self.easing_current_step >= total;
        if done && self.looping {
            self.easing_current_step = 0;
        }
        SceneStep {
            visual,
            finished: done && !self.looping,
        }
    }

    /// Frame whose cumulative duration range contains `position`.
    fn frame_at_tick(&self, position: f64) -> usize {
        let mut end = 0.0;
        for (i, f) in self.frames.iter().enumerate() {
            end += f64::from(f.duration);
            if position < end {
                return i;
            }
        }
        self.frames.len() - 1
    }

    fn advance_synced(&mut self, fraction: Option<f64>) -> SceneStep {
        let last = self.frames.len() - 1;
        match fraction {
            Some(f) if f < 1.0 => {
                let eased = self.ease.map_or(f, |e| e.apply(f));
                let index = (last as f64 * eased).round().clamp(0.0, last as f64);
                self.frame_index = index as usize;
                SceneStep {
                    visual: self.frames[self.frame_index].visual,
                    finished: false,
                }
            }
            _ => {
                self.frame_index = last;
                SceneStep {
                    visual: self.frames[last].visual,
                    finished: !self.looping,
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scene.rs"]
mod tests;
