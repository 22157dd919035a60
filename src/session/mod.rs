//! The scroll-driven sequence component and a headless host to drive it.

/// Headless host for tests, demos and offline rendering.
pub mod host;
/// The component: preload, map scroll, paint.
pub mod scroll_sequence;
