use crate::foundation::core::ViewportSize;

/// Read access to the host's document and viewport state.
///
/// Values are read fresh on every event; implementations must not cache on the caller's behalf.
pub trait ViewportQuery {
    /// Current vertical scroll offset in logical pixels.
    fn scroll_offset(&self) -> f64;
    /// Total scrollable document height in logical pixels.
    fn scroll_height(&self) -> f64;
    /// Visible viewport size in logical pixels.
    fn viewport_size(&self) -> ViewportSize;
    /// Physical pixels per logical pixel.
    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }

    /// Distance the document can scroll (`scroll_height - viewport height`). May be `<= 0`.
    fn scrollable_extent(&self) -> f64 {
        self.scroll_height() - self.viewport_size().height
    }

    /// Read everything at once.
    fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            scroll_offset: self.scroll_offset(),
            scroll_height: self.scroll_height(),
            viewport: self.viewport_size(),
            device_pixel_ratio: self.device_pixel_ratio(),
        }
    }
}

/// A point-in-time read of [`ViewportQuery`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportSnapshot {
    /// Vertical scroll offset.
    pub scroll_offset: f64,
    /// Document scroll height.
    pub scroll_height: f64,
    /// Viewport size.
    pub viewport: ViewportSize,
    /// Device pixel ratio.
    pub device_pixel_ratio: f64,
}

impl ViewportSnapshot {
    /// Snapshot with a device pixel ratio of 1.
    pub fn new(scroll_offset: f64, scroll_height: f64, viewport: ViewportSize) -> Self {
        Self {
            scroll_offset,
            scroll_height,
            viewport,
            device_pixel_ratio: 1.0,
        }
    }
}

impl ViewportQuery for ViewportSnapshot {
    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn scroll_height(&self) -> f64 {
        self.scroll_height
    }

    fn viewport_size(&self) -> ViewportSize {
        self.viewport
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/viewport.rs"]
mod tests;
