use crate::foundation::core::FrameIndex;

/// Map a scroll offset onto a frame of an `frame_count`-long sequence.
///
/// `extent` is the scrollable distance (`scroll_height - viewport_height`). A non-positive or
/// non-finite extent means the page cannot scroll and always yields frame 0.
///
/// The index is `ceil(offset / extent * frame_count)` clamped to `[0, frame_count - 1]`. `ceil`
/// advances to the next frame as soon as any part of its scroll band is entered.
pub fn frame_index_for_scroll(offset: f64, extent: f64, frame_count: usize) -> FrameIndex {
    if frame_count == 0 || !extent.is_finite() || extent <= 0.0 || offset.is_nan() {
        return FrameIndex::FIRST;
    }
    let last = frame_count - 1;
    // Multiply first so band edges land on exact integers.
    let raw = (offset * frame_count as f64 / extent).ceil();
    if raw <= 0.0 {
        return FrameIndex::FIRST;
    }
    FrameIndex(raw.min(last as f64) as usize)
}

/// Normalized scroll progress in `[0, 1]`, or `None` when the page cannot scroll.
pub fn scroll_fraction(offset: f64, extent: f64) -> Option<f64> {
    if !extent.is_finite() || extent <= 0.0 || offset.is_nan() {
        return None;
    }
    Some((offset / extent).clamp(0.0, 1.0))
}

#[cfg(test)]
#[path = "../../tests/unit/render/mapping.rs"]
mod tests;
