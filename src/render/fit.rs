use crate::foundation::core::{Point, Rect, Size};
use crate::foundation::error::{ScrubError, ScrubResult};

/// Viewport width (logical px) below which the narrow-screen shrink applies.
pub const DEFAULT_MOBILE_BREAKPOINT: f64 = 768.0;
/// Extra shrink applied on narrow viewports so the subject is not clipped at the edges.
pub const DEFAULT_MOBILE_SCALE: f64 = 0.8;

/// Tunables for [`contain_fit`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FitConfig {
    /// Viewports strictly narrower than this use `mobile_scale`.
    pub mobile_breakpoint: f64,
    /// Multiplier on the contain ratio for narrow viewports.
    pub mobile_scale: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            mobile_scale: DEFAULT_MOBILE_SCALE,
        }
    }
}

impl FitConfig {
    /// Reject non-finite or non-positive tunables.
    pub fn validate(&self) -> ScrubResult<()> {
        if !self.mobile_breakpoint.is_finite() || self.mobile_breakpoint < 0.0 {
            return Err(ScrubError::validation(
                "fit.mobile_breakpoint must be finite and >= 0",
            ));
        }
        if !self.mobile_scale.is_finite() || self.mobile_scale <= 0.0 {
            return Err(ScrubError::validation(
                "fit.mobile_scale must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Scale factor for a viewport of logical width `viewport_width`.
    pub fn scale_factor(&self, viewport_width: f64) -> f64 {
        if viewport_width < self.mobile_breakpoint {
            self.mobile_scale
        } else {
            1.0
        }
    }
}

/// Where and how large an image lands on a canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Uniform image-to-canvas scale.
    pub ratio: f64,
    /// Destination rectangle in canvas pixels.
    pub dest: Rect,
}

impl Placement {
    /// Left offset.
    pub fn dx(&self) -> f64 {
        self.dest.x0
    }

    /// Top offset.
    pub fn dy(&self) -> f64 {
        self.dest.y0
    }

    /// Drawn size.
    pub fn size(&self) -> Size {
        self.dest.size()
    }
}

/// Scale `image` uniformly to fit inside `canvas`, multiply by `scale_factor`, and center it.
///
/// Returns `None` for an image with a zero or non-finite side.
pub fn contain_fit(canvas: Size, image: Size, scale_factor: f64) -> Option<Placement> {
    if !(image.width > 0.0 && image.height > 0.0) || !image.is_finite() {
        return None;
    }
    let ratio = (canvas.width / image.width).min(canvas.height / image.height) * scale_factor;
    let drawn = Size::new(image.width * ratio, image.height * ratio);
    let origin = Point::new(
        (canvas.width - drawn.width) / 2.0,
        (canvas.height - drawn.height) / 2.0,
    );
    Some(Placement {
        ratio,
        dest: Rect::from_origin_size(origin, drawn),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/fit.rs"]
mod tests;
