//! Pure placement math plus the drawable surfaces it feeds.

/// Aspect-preserving "contain" placement.
pub mod fit;
/// Scroll position to frame index.
pub mod mapping;
/// Single-slot redraw coalescing.
pub mod schedule;
/// Drawable surfaces.
pub mod surface;
