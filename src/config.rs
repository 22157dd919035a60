use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;

use crate::assets::store::FailurePolicy;
use crate::foundation::error::{ScrubError, ScrubResult};
use crate::render::fit::FitConfig;
use crate::sequence::{DEFAULT_BASE_DIR, DEFAULT_FRAME_COUNT, SequenceDescriptor};
use crate::session::scroll_sequence::RenderOptions;

/// JSON-loadable settings for one scroll sequence. Every field is optional.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequenceConfig {
    /// Directory prefix of the frame locators.
    pub base_dir: String,
    /// Sequence length.
    pub frame_count: usize,
    /// Contain-fit tunables.
    pub fit: FitConfig,
    /// Size the canvas in device pixels instead of logical pixels.
    pub hidpi: bool,
    /// Behaviour on failed frame loads.
    pub failure_policy: FailurePolicy,
    /// Straight-alpha RGBA the canvas is cleared to.
    pub clear_rgba: [u8; 4],
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            base_dir: DEFAULT_BASE_DIR.to_string(),
            frame_count: DEFAULT_FRAME_COUNT,
            fit: FitConfig::default(),
            hidpi: false,
            failure_policy: FailurePolicy::default(),
            clear_rgba: [0, 0, 0, 0],
        }
    }
}

impl SequenceConfig {
    /// Parse and validate JSON text.
    pub fn from_json_str(json: &str) -> ScrubResult<Self> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| ScrubError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_path(path: &Path) -> ScrubResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ScrubError::serde(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> ScrubResult<()> {
        if self.frame_count == 0 {
            return Err(ScrubError::validation("frame_count must be >= 1"));
        }
        self.fit.validate()
    }

    /// Sequence described by this config.
    pub fn descriptor(&self) -> ScrubResult<SequenceDescriptor> {
        SequenceDescriptor::new(self.base_dir.clone(), self.frame_count)
    }

    /// Drawing options described by this config.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            fit: self.fit,
            hidpi: self.hidpi,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
