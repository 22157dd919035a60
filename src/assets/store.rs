use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
    mpsc::{self, Receiver, RecvTimeoutError, Sender},
};
use std::time::{Duration, Instant};

use crate::assets::decode::PreparedFrame;
use crate::assets::loader::FrameLoader;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ScrubError, ScrubResult};
use crate::sequence::SequenceDescriptor;

/// What to do when a frame fails to load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// A failed frame never counts as complete; the sequence stays loading forever.
    #[default]
    Stall,
    /// A failed frame counts as complete and is substituted by its nearest loaded neighbour.
    Degrade,
}

/// Completion message emitted by a load task.
#[derive(Debug)]
pub enum LoadEvent {
    /// Frame `index` decoded successfully.
    Loaded {
        /// Playback index.
        index: FrameIndex,
        /// Decoded pixels.
        frame: PreparedFrame,
    },
    /// Frame `index` could not be fetched or decoded.
    Failed {
        /// Playback index.
        index: FrameIndex,
        /// Rendered error message.
        error: String,
    },
}

impl LoadEvent {
    /// Playback index the event refers to.
    pub fn index(&self) -> FrameIndex {
        match self {
            Self::Loaded { index, .. } | Self::Failed { index, .. } => *index,
        }
    }
}

/// Externally visible readiness of a sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    /// Still waiting on completions.
    Loading {
        /// Completions counted so far.
        completed: usize,
        /// Sequence length.
        total: usize,
    },
    /// Every frame loaded.
    Ready,
    /// Every frame completed but some failed (only under [`FailurePolicy::Degrade`]).
    Partial {
        /// Indices that failed, ascending.
        failed: Vec<FrameIndex>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    Pending,
    Loaded,
    Failed,
}

/// Completion counter plus a latch that flips to ready exactly once.
///
/// Each index holds a single outcome, so duplicate or late signals never advance the counter
/// and never reset readiness. A load that succeeds after an earlier failure replaces the failure.
#[derive(Clone, Debug)]
pub struct LoadState {
    policy: FailurePolicy,
    outcomes: Vec<Outcome>,
    completed: usize,
    ready: bool,
}

impl LoadState {
    /// Fresh state for a sequence of `total` frames.
    pub fn new(total: usize, policy: FailurePolicy) -> Self {
        Self {
            policy,
            outcomes: vec![Outcome::Pending; total],
            completed: 0,
            ready: false,
        }
    }

    /// Record a successful load. Returns `true` only on the call that made the state ready.
    pub fn record_loaded(&mut self, index: FrameIndex) -> bool {
        let Some(outcome) = self.outcomes.get_mut(index.0) else {
            return false;
        };
        let newly_counted = match *outcome {
            Outcome::Loaded => return false,
            Outcome::Pending => true,
            Outcome::Failed => self.policy == FailurePolicy::Stall,
        };
        *outcome = Outcome::Loaded;
        newly_counted && self.count()
    }

    /// Record a failed load. Returns `true` only on the call that made the state ready.
    ///
    /// Ignored for an index that already completed.
    pub fn record_failed(&mut self, index: FrameIndex) -> bool {
        let Some(outcome) = self.outcomes.get_mut(index.0) else {
            return false;
        };
        if *outcome != Outcome::Pending {
            return false;
        }
        *outcome = Outcome::Failed;
        match self.policy {
            FailurePolicy::Stall => false,
            FailurePolicy::Degrade => self.count(),
        }
    }

    fn count(&mut self) -> bool {
        self.completed += 1;
        if !self.ready && self.completed == self.outcomes.len() {
            self.ready = true;
            return true;
        }
        false
    }

    /// Number of distinct completions counted.
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Sequence length.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// `true` once every frame has completed. Never reverts.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Indices whose latest outcome is a failure, ascending.
    pub fn failed(&self) -> Vec<FrameIndex> {
        self.outcomes
            .iter()
            .enumerate()
            .filter(|(_, o)| **o == Outcome::Failed)
            .map(|(i, _)| FrameIndex(i))
            .collect()
    }

    /// `true` when no further completions can arrive that would make the state ready.
    pub fn is_settled(&self) -> bool {
        match self.policy {
            FailurePolicy::Stall => self.ready || !self.outcomes.contains(&Outcome::Pending),
            FailurePolicy::Degrade => self.ready,
        }
    }

    /// Snapshot for callers.
    pub fn status(&self) -> LoadStatus {
        if !self.ready {
            return LoadStatus::Loading {
                completed: self.completed,
                total: self.total(),
            };
        }
        let failed = self.failed();
        if failed.is_empty() {
            LoadStatus::Ready
        } else {
            LoadStatus::Partial { failed }
        }
    }
}

/// Owns the frames of one sequence and tracks their preload.
///
/// Load tasks run on the `rayon` pool and report back over a channel; only [`FrameStore::pump`]
/// (or [`FrameStore::deliver`]) mutates the counter, on the owning thread.
#[derive(Debug)]
pub struct FrameStore {
    descriptor: SequenceDescriptor,
    frames: Vec<Option<PreparedFrame>>,
    state: LoadState,
    tx: Sender<LoadEvent>,
    rx: Receiver<LoadEvent>,
    cancel: Arc<AtomicBool>,
    released: bool,
}

impl FrameStore {
    /// Empty store for `descriptor`; nothing is fetched until [`FrameStore::initiate`].
    pub fn new(descriptor: SequenceDescriptor, policy: FailurePolicy) -> Self {
        let total = descriptor.frame_count();
        let (tx, rx) = mpsc::channel();
        Self {
            descriptor,
            frames: vec![None; total],
            state: LoadState::new(total, policy),
            tx,
            rx,
            cancel: Arc::new(AtomicBool::new(false)),
            released: false,
        }
    }

    /// Start one asynchronous load per frame and return immediately.
    ///
    /// Completions arrive out of order; call [`FrameStore::pump`] to consume them.
    #[tracing::instrument(skip(self, loader), fields(frames = self.descriptor.frame_count()))]
    pub fn initiate(&mut self, loader: Arc<dyn FrameLoader>) {
        if self.released {
            return;
        }
        for (index, locator) in self.descriptor.locators() {
            let tx = self.tx.clone();
            let loader = Arc::clone(&loader);
            let cancel = Arc::clone(&self.cancel);
            rayon::spawn(move || {
                if cancel.load(Ordering::Acquire) {
                    return;
                }
                let event = match loader.load(&locator) {
                    Ok(frame) => LoadEvent::Loaded { index, frame },
                    Err(err) => LoadEvent::Failed {
                        index,
                        error: format!("{locator}: {err}"),
                    },
                };
                if cancel.load(Ordering::Acquire) {
                    return;
                }
                // The store may already be gone.
                let _ = tx.send(event);
            });
        }
    }

    /// Apply one completion. Returns `true` if this event made the store ready.
    pub fn deliver(&mut self, event: LoadEvent) -> bool {
        if self.released {
            return false;
        }
        match event {
            LoadEvent::Loaded { index, frame } => {
                let Some(slot) = self.frames.get_mut(index.0) else {
                    tracing::warn!(index = index.0, "completion for unknown frame ignored");
                    return false;
                };
                if slot.is_none() {
                    *slot = Some(frame);
                }
                let flipped = self.state.record_loaded(index);
                if flipped {
                    tracing::debug!(frames = self.state.total(), "sequence ready");
                }
                flipped
            }
            LoadEvent::Failed { index, error } => {
                tracing::warn!(index = index.0, %error, "frame failed to load");
                let flipped = self.state.record_failed(index);
                if flipped {
                    tracing::debug!(failed = self.state.failed().len(), "sequence ready (partial)");
                }
                flipped
            }
        }
    }

    /// Drain completions that have already arrived without blocking.
    ///
    /// Returns `true` if readiness was reached during this call.
    pub fn pump(&mut self) -> bool {
        let mut flipped = false;
        while let Ok(event) = self.rx.try_recv() {
            flipped |= self.deliver(event);
        }
        flipped
    }

    /// Block until the store is ready, can no longer become ready, or `timeout` elapses.
    pub fn wait_ready(&mut self, timeout: Duration) -> ScrubResult<LoadStatus> {
        if self.released {
            return Err(ScrubError::load("frame store was released"));
        }
        let deadline = Instant::now() + timeout;
        while !self.state.is_settled() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(event) => {
                    self.deliver(event);
                }
                Err(RecvTimeoutError::Timeout) => {
                    return Err(ScrubError::load(format!(
                        "timed out after {timeout:?} with {}/{} frames loaded",
                        self.state.completed(),
                        self.state.total()
                    )));
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        if !self.state.is_ready() {
            return Err(ScrubError::load(format!(
                "{} of {} frames failed to load; sequence cannot become ready",
                self.state.failed().len(),
                self.state.total()
            )));
        }
        Ok(self.state.status())
    }

    /// Cancel queued loads and drop every frame. Later completions are ignored.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.cancel.store(true, Ordering::Release);
        self.released = true;
        self.frames.iter_mut().for_each(|f| *f = None);
        while self.rx.try_recv().is_ok() {}
    }

    /// `true` after [`FrameStore::release`].
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// `true` once every frame completed.
    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// Readiness snapshot.
    pub fn status(&self) -> LoadStatus {
        self.state.status()
    }

    /// Counter state.
    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    /// Sequence this store loads.
    pub fn descriptor(&self) -> &SequenceDescriptor {
        &self.descriptor
    }

    /// Frame at `index`, if it loaded.
    pub fn frame(&self, index: FrameIndex) -> Option<&PreparedFrame> {
        self.frames.get(index.0)?.as_ref()
    }

    /// Frame to show for `index`: the frame itself, or the nearest loaded one.
    ///
    /// Ties prefer the earlier frame.
    pub fn frame_for_display(&self, index: FrameIndex) -> Option<(FrameIndex, &PreparedFrame)> {
        if let Some(f) = self.frame(index) {
            return Some((index, f));
        }
        let len = self.frames.len();
        for d in 1..len {
            if let Some(i) = index.0.checked_sub(d)
                && let Some(f) = self.frame(FrameIndex(i))
            {
                return Some((FrameIndex(i), f));
            }
            if index.0 + d < len
                && let Some(f) = self.frame(FrameIndex(index.0 + d))
            {
                return Some((FrameIndex(index.0 + d), f));
            }
        }
        None
    }
}

impl Drop for FrameStore {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
