use crate::foundation::error::{ScrubError, ScrubResult};

pub use kurbo::{Point, Rect, Size};

/// 0-based playback index into a frame sequence.
///
/// The storage locator of frame `FrameIndex(i)` uses the 1-based number `i + 1`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub usize);

impl FrameIndex {
    /// The first visual frame.
    pub const FIRST: Self = Self(0);

    /// 1-based number used by the locator scheme.
    pub fn locator_number(self) -> usize {
        self.0 + 1
    }
}

/// Viewport dimensions in logical (CSS) pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportSize {
    /// Logical width.
    pub width: f64,
    /// Logical height.
    pub height: f64,
}

impl ViewportSize {
    /// Create a viewport size, rejecting negative or non-finite extents.
    pub fn new(width: f64, height: f64) -> ScrubResult<Self> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(ScrubError::validation(format!(
                "viewport size must be finite and non-negative, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }
}

/// Pixel dimensions of a drawable surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Pixel size backing `viewport` at the given device pixel ratio.
    ///
    /// Non-finite or non-positive ratios fall back to `1.0`.
    pub fn from_viewport(viewport: ViewportSize, device_pixel_ratio: f64) -> Self {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            width: to_px(viewport.width * dpr),
            height: to_px(viewport.height * dpr),
        }
    }

    /// Return `true` when either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Size as floating point geometry.
    pub fn to_size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Number of bytes needed for tightly packed RGBA8 pixels.
    pub fn rgba8_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

fn to_px(v: f64) -> u32 {
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    v.round().min(f64::from(u32::MAX)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
