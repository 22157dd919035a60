use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::assets::decode::{PreparedFrame, decode_frame};
use crate::foundation::error::{ScrubError, ScrubResult};

/// Host capability that fetches and decodes one frame resource.
///
/// Implementations are called from worker threads, one call per frame, in no particular order.
pub trait FrameLoader: Send + Sync {
    /// Fetch and decode the resource at `locator`.
    fn load(&self, locator: &str) -> ScrubResult<PreparedFrame>;
}

impl<F> FrameLoader for F
where
    F: Fn(&str) -> ScrubResult<PreparedFrame> + Send + Sync,
{
    fn load(&self, locator: &str) -> ScrubResult<PreparedFrame> {
        self(locator)
    }
}

/// Loads frames from a directory standing in for the web root.
#[derive(Clone, Debug)]
pub struct FsFrameLoader {
    root: PathBuf,
}

impl FsFrameLoader {
    /// Serve locators relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path for `locator`.
    pub fn resolve(&self, locator: &str) -> ScrubResult<PathBuf> {
        let norm = normalize_locator(locator)?;
        Ok(self.root.join(norm))
    }
}

impl FrameLoader for FsFrameLoader {
    #[tracing::instrument(level = "trace", skip(self))]
    fn load(&self, locator: &str) -> ScrubResult<PreparedFrame> {
        let path = self.resolve(locator)?;
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read frame '{}'", path.display()))
            .map_err(|e| ScrubError::load(format!("{e:#}")))?;
        decode_frame(&bytes)
    }
}

/// Normalize a URL-style locator into a relative, `/`-separated path.
///
/// A leading `/` means "web root" and is dropped. `..` segments are rejected.
pub fn normalize_locator(locator: &str) -> ScrubResult<String> {
    let s = locator.replace('\\', "/");
    if s.is_empty() {
        return Err(ScrubError::validation("frame locator must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ScrubError::validation(
                "frame locators must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ScrubError::validation(
            "frame locator must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
