use crate::foundation::core::ViewportSize;
use crate::host::events::{EventKind, ListenerRegistry};
use crate::host::viewport::{ViewportQuery, ViewportSnapshot};
use crate::render::surface::Surface;
use crate::session::scroll_sequence::ScrollSequence;

/// In-process stand-in for a browser window.
///
/// Owns the viewport state and listener table, clamps scrolling to the document like a browser
/// does, and fans events out to whichever listeners are registered at the time.
#[derive(Debug)]
pub struct SimulatedHost {
    viewport: ViewportSnapshot,
    registry: ListenerRegistry,
    ticks: u64,
}

impl SimulatedHost {
    /// Host with the given initial viewport state.
    pub fn new(viewport: ViewportSnapshot) -> Self {
        Self {
            viewport,
            registry: ListenerRegistry::new(),
            ticks: 0,
        }
    }

    /// Shared handle to the host's listener table.
    pub fn registry(&self) -> ListenerRegistry {
        self.registry.clone()
    }

    /// Current viewport state.
    pub fn viewport(&self) -> &ViewportSnapshot {
        &self.viewport
    }

    /// Refresh ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Scroll to `offset` (clamped to the document) and fire a scroll event.
    pub fn scroll_to<S: Surface>(&mut self, offset: f64, seq: &mut ScrollSequence<S>) {
        let max = self.viewport.scrollable_extent().max(0.0);
        self.viewport.scroll_offset = if offset.is_finite() {
            offset.clamp(0.0, max)
        } else {
            0.0
        };
        self.emit(EventKind::Scroll, seq);
    }

    /// Resize the viewport and fire a resize event.
    pub fn resize<S: Surface>(&mut self, viewport: ViewportSize, seq: &mut ScrollSequence<S>) {
        self.viewport.viewport = viewport;
        let max = self.viewport.scrollable_extent().max(0.0);
        self.viewport.scroll_offset = self.viewport.scroll_offset.clamp(0.0, max);
        self.emit(EventKind::Resize, seq);
    }

    /// Change the document height without firing an event.
    pub fn set_scroll_height(&mut self, scroll_height: f64) {
        self.viewport.scroll_height = scroll_height;
    }

    /// Change the device pixel ratio without firing an event.
    pub fn set_device_pixel_ratio(&mut self, dpr: f64) {
        self.viewport.device_pixel_ratio = dpr;
    }

    /// Deliver one event of `kind` to every listener registered for it.
    pub fn emit<S: Surface>(&mut self, kind: EventKind, seq: &mut ScrollSequence<S>) {
        for id in self.registry.listeners(kind) {
            seq.dispatch(id, &self.viewport);
        }
    }

    /// One display refresh: feed load completions, then run the pending redraw.
    ///
    /// Returns `true` if the canvas was drawn during this tick.
    pub fn tick<S: Surface>(&mut self, seq: &mut ScrollSequence<S>) -> bool {
        self.ticks += 1;
        let activated = seq.poll(&self.viewport);
        seq.on_refresh(&self.viewport) || activated
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/host.rs"]
mod tests;
