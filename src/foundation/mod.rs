/// Shared value types used across the crate.
pub mod core;
/// Error type and result alias.
pub mod error;
