//! Frame assets: decoding, loading and the preload store.
//!
//! The store front-loads all IO and decoding so drawing stays IO-free.

/// Image decoding into premultiplied RGBA8.
pub mod decode;
/// Loader capability and the filesystem implementation.
pub mod loader;
/// Preload store with readiness tracking.
pub mod store;
