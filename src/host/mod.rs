//! Capabilities the embedding environment provides: viewport state and event listeners.

/// Listener registration with scoped removal.
pub mod events;
/// Viewport/document queries.
pub mod viewport;
