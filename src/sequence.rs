use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ScrubError, ScrubResult};

/// Number of frames in the stock sequence.
pub const DEFAULT_FRAME_COUNT: usize = 96;
/// Directory the stock sequence is served from.
pub const DEFAULT_BASE_DIR: &str = "/slide";

const FRAME_PREFIX: &str = "ezgif-frame-";
const FRAME_EXT: &str = "jpg";

/// Immutable description of an image sequence: how many frames and where they live.
///
/// Frame files follow `{base_dir}/ezgif-frame-{n:03}.jpg` for `n` in `1..=frame_count`. This
/// naming is shared with the asset pipeline that exports the stills.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceDescriptor {
    base_dir: String,
    frame_count: usize,
}

impl SequenceDescriptor {
    /// Build a descriptor. `frame_count` must be at least 1.
    pub fn new(base_dir: impl Into<String>, frame_count: usize) -> ScrubResult<Self> {
        if frame_count == 0 {
            return Err(ScrubError::validation(
                "sequence frame_count must be >= 1",
            ));
        }
        let base_dir = base_dir.into();
        let base_dir = base_dir.trim_end_matches(['/', '\\']).to_string();
        Ok(Self {
            base_dir,
            frame_count,
        })
    }

    /// Base directory with trailing separators removed.
    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    /// Sequence length `N`.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Last valid playback index (`N - 1`).
    pub fn last_index(&self) -> FrameIndex {
        FrameIndex(self.frame_count - 1)
    }

    /// Locator for the 1-based frame `number`.
    pub fn locator(&self, number: usize) -> ScrubResult<String> {
        if number == 0 || number > self.frame_count {
            return Err(ScrubError::validation(format!(
                "frame number {number} outside 1..={}",
                self.frame_count
            )));
        }
        Ok(format_locator(&self.base_dir, number))
    }

    /// Locator for the 0-based playback index.
    pub fn locator_for(&self, index: FrameIndex) -> ScrubResult<String> {
        self.locator(index.locator_number())
    }

    /// All locators in playback order.
    pub fn locators(&self) -> impl Iterator<Item = (FrameIndex, String)> + '_ {
        (0..self.frame_count).map(|i| {
            let index = FrameIndex(i);
            (index, format_locator(&self.base_dir, index.locator_number()))
        })
    }
}

impl Default for SequenceDescriptor {
    fn default() -> Self {
        Self {
            base_dir: DEFAULT_BASE_DIR.to_string(),
            frame_count: DEFAULT_FRAME_COUNT,
        }
    }
}

fn format_locator(base_dir: &str, number: usize) -> String {
    format!("{base_dir}/{FRAME_PREFIX}{number:03}.{FRAME_EXT}")
}

#[cfg(test)]
#[path = "../tests/unit/sequence.rs"]
mod tests;
