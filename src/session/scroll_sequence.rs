use std::sync::Arc;

use crate::assets::loader::FrameLoader;
use crate::assets::store::{FrameStore, LoadStatus};
use crate::config::SequenceConfig;
use crate::foundation::core::{FrameIndex, SurfaceSize};
use crate::foundation::error::ScrubResult;
use crate::host::events::{EventKind, ListenerId, ListenerRegistry, Subscription};
use crate::host::viewport::ViewportQuery;
use crate::render::fit::{FitConfig, contain_fit};
use crate::render::mapping::frame_index_for_scroll;
use crate::render::schedule::RedrawSlot;
use crate::render::surface::Surface;

/// Drawing options for a [`ScrollSequence`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderOptions {
    /// Contain-fit tunables.
    pub fit: FitConfig,
    /// Size the canvas in device pixels.
    pub hidpi: bool,
}

/// What the component currently shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Presentation {
    /// Frames still loading; a placeholder is shown and the canvas is untouched.
    Loading {
        /// Frames completed.
        completed: usize,
        /// Sequence length.
        total: usize,
    },
    /// The canvas is live.
    Canvas {
        /// Canvas pixel size.
        size: SurfaceSize,
    },
    /// Torn down.
    Disposed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Loading,
    Active,
    Disposed,
}

#[derive(Debug)]
struct Listeners {
    scroll: Subscription,
    resize: Subscription,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct DrawKey {
    index: FrameIndex,
    size: SurfaceSize,
    scale: f64,
}

/// A canvas that shows the frame of a preloaded image sequence matching the scroll position.
///
/// Lifecycle: frames load in the background while [`ScrollSequence::poll`] reports the loading
/// placeholder. On the poll that observes readiness the canvas is sized to the viewport, frame 0
/// is drawn, and scroll/resize listeners are registered. Scroll events only record the target
/// frame; painting happens on [`ScrollSequence::on_refresh`], at most once per tick.
/// [`ScrollSequence::dispose`] (or drop) unregisters the listeners, cancels outstanding loads and
/// releases the frames; every entry point is a no-op afterwards.
#[derive(Debug)]
pub struct ScrollSequence<S: Surface> {
    options: RenderOptions,
    store: FrameStore,
    surface: Option<S>,
    registry: ListenerRegistry,
    listeners: Option<Listeners>,
    slot: RedrawSlot,
    current: FrameIndex,
    last_drawn: Option<DrawKey>,
    phase: Phase,
}

impl<S: Surface> ScrollSequence<S> {
    /// Wrap an existing store. Listeners are registered on `registry` once the store is ready.
    pub fn new(
        store: FrameStore,
        surface: S,
        registry: ListenerRegistry,
        options: RenderOptions,
    ) -> Self {
        Self {
            options,
            store,
            surface: Some(surface),
            registry,
            listeners: None,
            slot: RedrawSlot::new(),
            current: FrameIndex::FIRST,
            last_drawn: None,
            phase: Phase::Loading,
        }
    }

    /// Build the store from `config` and start loading every frame through `loader`.
    pub fn mount(
        config: &SequenceConfig,
        loader: Arc<dyn FrameLoader>,
        surface: S,
        registry: ListenerRegistry,
    ) -> ScrubResult<Self> {
        config.validate()?;
        let mut store = FrameStore::new(config.descriptor()?, config.failure_policy);
        store.initiate(loader);
        Ok(Self::new(store, surface, registry, config.render_options()))
    }

    /// Consume load completions; activate on the call that observes readiness.
    ///
    /// Returns `true` only on that call.
    pub fn poll(&mut self, viewport: &dyn ViewportQuery) -> bool {
        if self.phase != Phase::Loading {
            return false;
        }
        self.store.pump();
        if !self.store.is_ready() {
            return false;
        }
        self.activate(viewport);
        true
    }

    fn activate(&mut self, viewport: &dyn ViewportQuery) {
        let size = self.canvas_size(viewport);
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(size);
        }
        tracing::debug!(
            width = size.width,
            height = size.height,
            status = ?self.store.status(),
            "scroll sequence active"
        );
        self.current = FrameIndex::FIRST;
        self.paint(FrameIndex::FIRST, viewport);
        self.listeners = Some(Listeners {
            scroll: self.registry.subscribe(EventKind::Scroll),
            resize: self.registry.subscribe(EventKind::Resize),
        });
        self.phase = Phase::Active;
    }

    /// Deliver a host event addressed to listener `id`. Unknown or stale ids are ignored.
    pub fn dispatch(&mut self, id: ListenerId, viewport: &dyn ViewportQuery) {
        let Some(listeners) = self.listeners.as_ref() else {
            return;
        };
        if id == listeners.scroll.id() {
            self.handle_scroll(viewport);
        } else if id == listeners.resize.id() {
            self.handle_resize(viewport);
        }
    }

    /// Recompute the target frame from the current scroll position and request a redraw.
    pub fn handle_scroll(&mut self, viewport: &dyn ViewportQuery) {
        if self.phase != Phase::Active {
            return;
        }
        let index = frame_index_for_scroll(
            viewport.scroll_offset(),
            viewport.scrollable_extent(),
            self.store.descriptor().frame_count(),
        );
        self.current = index;
        if !self.slot.request(index) {
            tracing::trace!(index = index.0, "redraw coalesced");
        }
    }

    /// Resize the canvas to the viewport, then behave like a scroll event.
    pub fn handle_resize(&mut self, viewport: &dyn ViewportQuery) {
        if self.phase != Phase::Active {
            return;
        }
        let size = self.canvas_size(viewport);
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(size);
        }
        // A resize resets the canvas, so the next paint must not be skipped.
        self.last_drawn = None;
        self.handle_scroll(viewport);
    }

    /// Display-refresh tick: paint the pending frame, if any. Returns `true` if something was drawn.
    pub fn on_refresh(&mut self, viewport: &dyn ViewportQuery) -> bool {
        let Some(index) = self.slot.take() else {
            return false;
        };
        if self.phase != Phase::Active {
            return false;
        }
        self.paint(index, viewport)
    }

    #[tracing::instrument(level = "trace", skip_all, fields(index = index.0))]
    fn paint(&mut self, index: FrameIndex, viewport: &dyn ViewportQuery) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let Some((shown, frame)) = self.store.frame_for_display(index) else {
            return false;
        };
        let size = surface.size();
        let scale = self.options.fit.scale_factor(viewport.viewport_size().width);
        let key = DrawKey { index, size, scale };
        if self.last_drawn == Some(key) {
            tracing::trace!("frame already on canvas");
            return false;
        }

        let Some(placement) = contain_fit(size.to_size(), frame.size(), scale) else {
            return false;
        };
        surface.clear();
        if let Err(err) = surface.draw_frame(frame, &placement) {
            tracing::warn!(index = index.0, %err, "frame draw failed");
            self.last_drawn = None;
            return false;
        }
        if shown != index {
            tracing::debug!(requested = index.0, shown = shown.0, "substituted nearest frame");
        }
        self.last_drawn = Some(key);
        true
    }

    /// Tear down: unregister listeners, drop pending redraws, cancel loads, release frames.
    ///
    /// Idempotent.
    pub fn dispose(&mut self) {
        if self.phase == Phase::Disposed {
            return;
        }
        self.phase = Phase::Disposed;
        self.listeners = None;
        self.slot.cancel();
        self.store.release();
        self.surface = None;
        self.last_drawn = None;
        tracing::debug!("scroll sequence disposed");
    }

    fn canvas_size(&self, viewport: &dyn ViewportQuery) -> SurfaceSize {
        let dpr = if self.options.hidpi {
            viewport.device_pixel_ratio()
        } else {
            1.0
        };
        SurfaceSize::from_viewport(viewport.viewport_size(), dpr)
    }

    /// What is currently shown.
    pub fn presentation(&self) -> Presentation {
        match self.phase {
            Phase::Loading => {
                let state = self.store.load_state();
                Presentation::Loading {
                    completed: state.completed(),
                    total: state.total(),
                }
            }
            Phase::Active => Presentation::Canvas {
                size: self.surface.as_ref().map(|s| s.size()).unwrap_or_default(),
            },
            Phase::Disposed => Presentation::Disposed,
        }
    }

    /// `true` between activation and disposal.
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Last frame index computed from the scroll position.
    pub fn current_index(&self) -> FrameIndex {
        self.current
    }

    /// Frame waiting for the next refresh tick.
    pub fn pending_redraw(&self) -> Option<FrameIndex> {
        self.slot.pending()
    }

    /// Load progress of the underlying store.
    pub fn load_status(&self) -> LoadStatus {
        self.store.status()
    }

    /// The frame store.
    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    /// The canvas, until disposal.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Mutable canvas access, until disposal.
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }
}

impl<S: Surface> Drop for ScrollSequence<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/scroll_sequence.rs"]
mod tests;
