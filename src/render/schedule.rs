use crate::foundation::core::FrameIndex;

/// At most one outstanding redraw request, consumed by the display-refresh tick.
///
/// Requests made while one is already pending replace its target; the tick always paints the
/// latest requested frame exactly once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RedrawSlot {
    pending: Option<FrameIndex>,
    coalesced: u64,
}

impl RedrawSlot {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for `index` to be painted on the next tick.
    ///
    /// Returns `true` when this opened the slot and `false` when it was merged into a pending
    /// request.
    pub fn request(&mut self, index: FrameIndex) -> bool {
        let was_empty = self.pending.replace(index).is_none();
        if !was_empty {
            self.coalesced = self.coalesced.saturating_add(1);
        }
        was_empty
    }

    /// Consume the pending request, if any.
    pub fn take(&mut self) -> Option<FrameIndex> {
        self.pending.take()
    }

    /// Drop any pending request.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Target of the pending request.
    pub fn pending(&self) -> Option<FrameIndex> {
        self.pending
    }

    /// How many requests were merged into an already pending one.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/schedule.rs"]
mod tests;
