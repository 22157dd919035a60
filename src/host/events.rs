use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Host events a sequence listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// Document scrolled.
    Scroll,
    /// Viewport resized.
    Resize,
}

/// Stable handle of one registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug, Default)]
struct Registry {
    next: u64,
    live: BTreeMap<ListenerId, EventKind>,
}

/// The host's listener table. Cloning shares the same table.
///
/// Registration hands out a [`Subscription`]; dropping it removes exactly the listener it added.
#[derive(Clone, Debug, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<Registry>>,
}

impl ListenerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `kind`.
    pub fn subscribe(&self, kind: EventKind) -> Subscription {
        let mut reg = self.inner.borrow_mut();
        let id = ListenerId(reg.next);
        reg.next += 1;
        reg.live.insert(id, kind);
        Subscription {
            id,
            kind,
            registry: self.clone(),
        }
    }

    fn remove(&self, id: ListenerId) -> bool {
        self.inner.borrow_mut().live.remove(&id).is_some()
    }

    /// `true` while `id` is registered.
    pub fn is_live(&self, id: ListenerId) -> bool {
        self.inner.borrow().live.contains_key(&id)
    }

    /// Listeners registered for `kind`, in registration order.
    pub fn listeners(&self, kind: EventKind) -> Vec<ListenerId> {
        self.inner
            .borrow()
            .live
            .iter()
            .filter(|(_, k)| **k == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Number of live listeners.
    pub fn len(&self) -> usize {
        self.inner.borrow().live.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Guard for one registered listener.
#[derive(Debug)]
#[must_use = "dropping a Subscription unregisters the listener"]
pub struct Subscription {
    id: ListenerId,
    kind: EventKind,
    registry: ListenerRegistry,
}

impl Subscription {
    /// Handle the host will deliver events to.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Event kind listened for.
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.registry.remove(self.id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/events.rs"]
mod tests;
