use crate::foundation::error::{TextfxError, TextfxResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// What to do when a Path or Scene id does not resolve during activation/deactivation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupPolicy {
    /// Fail with `PathNotFound` / `SceneNotFound`.
    #[default]
    Strict,
    /// Treat the miss as a no-op.
    Ignore,
}

/// Engine-wide tunables shared by every character of an effect run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Height/width ratio of a terminal cell.
    pub cell_aspect_ratio: f64,
    /// Sample count used to measure curved segments.
    pub bezier_samples: usize,
    pub lookup_policy: LookupPolicy,
    /// Maximum events drained by a single dispatch before it is considered runaway.
    pub max_event_cascade: usize,
    /// Seed for randomized graph algorithms.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cell_aspect_ratio: 2.0,
            bezier_samples: 10,
            lookup_policy: LookupPolicy::Strict,
            max_event_cascade: 1024,
            seed: 0,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> TextfxResult<()> {
        if !self.cell_aspect_ratio.is_finite() || self.cell_aspect_ratio <= 0.0 {
            return Err(TextfxError::config("cell_aspect_ratio must be finite and > 0"));
        }
        if self.bezier_samples == 0 {
            return Err(TextfxError::config("bezier_samples must be > 0"));
        }
        if self.max_event_cascade == 0 {
            return Err(TextfxError::config("max_event_cascade must be > 0"));
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> TextfxResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| TextfxError::config(format!("parse engine config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> TextfxResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| TextfxError::config(format!("parse engine config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    #[tracing::instrument]
    pub fn from_path(path: &Path) -> TextfxResult<Self> {
        let f = File::open(path).map_err(|e| {
            TextfxError::config(format!("open engine config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
