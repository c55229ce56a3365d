//! Notification events and the bubbling hub.
//!
//! Every container carries an [`EventHub`]. Mutating operations emit a
//! *before* event prior to any change and an *after* event once the change is
//! complete. Bubbling is explicit re-subscription: when a child container is
//! created its hub is linked upstream to the parent's hub, so an emission runs
//! the local listeners first and is then re-emitted at every ancestor level,
//! transitively up to the timeline. Removing a listener at one level never
//! affects another level; the upstream links are internal and not removable.

use std::cell::RefCell;
use std::rc::Rc;

/// The child kind a notification concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Group,
    Track,
    Composition,
    Clip,
    Effect,
    Transition,
}

/// A notification raised by a container mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEvent {
    /// Raised before the container mutates.
    Adding {
        kind: ItemKind,
        container: Option<String>,
    },
    /// Raised after mutation and any nested notifications are complete.
    /// Carries the new item's name and resolved priority (-1 for kinds that
    /// carry no priority) alongside its immediate container's name.
    Added {
        kind: ItemKind,
        container: Option<String>,
        name: Option<String>,
        priority: i32,
    },
}

impl TimelineEvent {
    pub fn kind(&self) -> ItemKind {
        match self {
            TimelineEvent::Adding { kind, .. } | TimelineEvent::Added { kind, .. } => *kind,
        }
    }

    pub fn is_after(&self) -> bool {
        matches!(self, TimelineEvent::Added { .. })
    }
}

/// Handle returned by [`EventHub::subscribe`], used to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(&TimelineEvent)>;

struct HubInner {
    listeners: Vec<(ListenerId, Listener)>,
    upstream: Vec<EventHub>,
    next_id: u64,
}

/// Per-container listener list with explicit upstream bubbling links.
///
/// The hub is a cheap clonable handle; clones share the same listener list.
/// The model is single-threaded, so interior mutability via `Rc<RefCell>` is
/// sufficient and the hub is deliberately not `Send`.
#[derive(Clone)]
pub struct EventHub {
    inner: Rc<RefCell<HubInner>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(HubInner {
                listeners: Vec::new(),
                upstream: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Register a listener at this level. Returns an id for removal.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&TimelineEvent) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener registered at this level.
    /// Returns false if the id is unknown. Bubbling links are unaffected.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(lid, _)| *lid != id);
        inner.listeners.len() != before
    }

    /// Link this hub so its emissions are re-emitted at `parent`.
    /// Called once, internally, when a child container is created.
    pub(crate) fn bubble_to(&self, parent: &EventHub) {
        self.inner.borrow_mut().upstream.push(parent.clone());
    }

    /// Run local listeners, then re-emit at every upstream hub.
    ///
    /// A listener may subscribe or unsubscribe on this hub from inside its
    /// callback; such changes take effect from the next emission.
    pub(crate) fn emit(&self, event: &TimelineEvent) {
        // Dispatch from a snapshot so listener callbacks are free to mutate
        // the listener list without re-borrowing the hub.
        let (listeners, upstream) = {
            let inner = self.inner.borrow();
            (inner.listeners.clone(), inner.upstream.clone())
        };
        for (_, listener) in &listeners {
            listener(event);
        }
        for parent in &upstream {
            parent.emit(event);
        }
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("EventHub")
            .field("listeners", &inner.listeners.len())
            .field("upstream", &inner.upstream.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn collect(hub: &EventHub) -> Rc<RefCell<Vec<TimelineEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        hub.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        seen
    }

    fn added(kind: ItemKind) -> TimelineEvent {
        TimelineEvent::Added {
            kind,
            container: None,
            name: None,
            priority: 0,
        }
    }

    #[test]
    fn test_local_emission() {
        let hub = EventHub::new();
        let seen = collect(&hub);

        hub.emit(&added(ItemKind::Track));
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].kind(), ItemKind::Track);
    }

    #[test]
    fn test_bubbling_chain() {
        let root = EventHub::new();
        let mid = EventHub::new();
        let leaf = EventHub::new();
        mid.bubble_to(&root);
        leaf.bubble_to(&mid);

        let at_root = collect(&root);
        let at_mid = collect(&mid);
        let at_leaf = collect(&leaf);

        leaf.emit(&added(ItemKind::Effect));

        // One emission at every level of the chain
        assert_eq!(at_leaf.borrow().len(), 1);
        assert_eq!(at_mid.borrow().len(), 1);
        assert_eq!(at_root.borrow().len(), 1);
    }

    #[test]
    fn test_unsubscribe_affects_one_level_only() {
        let root = EventHub::new();
        let leaf = EventHub::new();
        leaf.bubble_to(&root);

        let at_root = collect(&root);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = leaf.subscribe(move |e: &TimelineEvent| sink.borrow_mut().push(e.clone()));

        assert!(leaf.unsubscribe(id));
        assert!(!leaf.unsubscribe(id));

        leaf.emit(&added(ItemKind::Clip));
        assert_eq!(seen.borrow().len(), 0);
        // Bubbling to the root still works after local removal
        assert_eq!(at_root.borrow().len(), 1);
    }

    #[test]
    fn test_one_shot_listener_unsubscribes_itself_during_emit() {
        let hub = EventHub::new();
        let fired = Rc::new(RefCell::new(0u32));

        let count = fired.clone();
        let own_id: Rc<RefCell<Option<ListenerId>>> = Rc::new(RefCell::new(None));
        let slot = own_id.clone();
        let handle = hub.clone();
        let id = hub.subscribe(move |_| {
            *count.borrow_mut() += 1;
            if let Some(id) = slot.borrow_mut().take() {
                assert!(handle.unsubscribe(id));
            }
        });
        *own_id.borrow_mut() = Some(id);

        hub.emit(&added(ItemKind::Clip));
        hub.emit(&added(ItemKind::Clip));

        // Fired once, then removed itself
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn test_listener_subscribed_during_emit_runs_from_next_emission() {
        let hub = EventHub::new();
        let late = Rc::new(RefCell::new(0u32));

        let count = late.clone();
        let handle = hub.clone();
        let armed = Rc::new(RefCell::new(false));
        let once = armed.clone();
        hub.subscribe(move |_| {
            if !*once.borrow() {
                *once.borrow_mut() = true;
                let count = count.clone();
                handle.subscribe(move |_| *count.borrow_mut() += 1);
            }
        });

        hub.emit(&added(ItemKind::Track));
        assert_eq!(*late.borrow(), 0);
        hub.emit(&added(ItemKind::Track));
        assert_eq!(*late.borrow(), 1);
    }
}
