//! Scroll-linked image-sequence playback.
//!
//! A fixed sequence of pre-rendered stills is preloaded; afterwards the scroll position of a host
//! document picks which still is shown on a viewport-sized canvas, giving a "scrubbable video"
//! without any video decoding.
//!
//! - Describe the sequence with a [`SequenceDescriptor`] (or load a [`SequenceConfig`])
//! - Mount a [`ScrollSequence`] with a [`FrameLoader`] and a [`Surface`]
//! - Feed it host events and display-refresh ticks (see [`SimulatedHost`])
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Frame decoding, loading and preload tracking.
pub mod assets;
/// JSON configuration.
pub mod config;
/// Host capabilities: viewport queries and listeners.
pub mod host;
/// Placement math and drawable surfaces.
pub mod render;
/// Sequence descriptors and the frame locator scheme.
pub mod sequence;
/// The scroll-driven component.
pub mod session;

pub use crate::foundation::core::{FrameIndex, Point, Rect, Size, SurfaceSize, ViewportSize};
pub use crate::foundation::error::{ScrubError, ScrubResult};

pub use crate::assets::decode::{PreparedFrame, decode_frame};
pub use crate::assets::loader::{FrameLoader, FsFrameLoader, normalize_locator};
pub use crate::assets::store::{FailurePolicy, FrameStore, LoadEvent, LoadState, LoadStatus};
pub use crate::config::SequenceConfig;
pub use crate::host::events::{EventKind, ListenerId, ListenerRegistry, Subscription};
pub use crate::host::viewport::{ViewportQuery, ViewportSnapshot};
pub use crate::render::fit::{FitConfig, Placement, contain_fit};
pub use crate::render::mapping::{frame_index_for_scroll, scroll_fraction};
pub use crate::render::schedule::RedrawSlot;
pub use crate::render::surface::{CpuSurface, FrameRGBA, RecordingSurface, Surface, SurfaceOp};
pub use crate::sequence::{DEFAULT_BASE_DIR, DEFAULT_FRAME_COUNT, SequenceDescriptor};
pub use crate::session::host::SimulatedHost;
pub use crate::session::scroll_sequence::{Presentation, RenderOptions, ScrollSequence};
