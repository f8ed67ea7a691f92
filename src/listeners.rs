use hashlink::LinkedHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Receives gesture notifications from a [`crate::service::MouseGestures`]
/// session.
pub trait MouseGesturesListener: Send + Sync {
    /// Called after every symbol appended to the gesture in progress.
    fn gesture_movement_recognized(&self, gesture: &str);

    /// Called once when an interaction ends with a non-empty gesture.
    fn process_gesture(&self, gesture: &str);
}

/// Handle returned by [`ListenerRegistry::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Listeners keyed by subscription handle, kept in registration order.
///
/// Registration may happen from any thread. Notification works on a snapshot,
/// so a listener can add or remove listeners while it is being called.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: AtomicU64,
    listeners: Mutex<LinkedHashMap<ListenerId, Arc<dyn MouseGesturesListener>>>,
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.len())
            .finish()
    }
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, listener: Arc<dyn MouseGesturesListener>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        match self.listeners.lock() {
            Ok(mut guard) => {
                guard.insert(id, listener);
            }
            Err(err) => tracing::error!(?err, "failed to lock gesture listeners"),
        }
        id
    }

    pub fn remove(&self, id: ListenerId) -> bool {
        match self.listeners.lock() {
            Ok(mut guard) => guard.remove(&id).is_some(),
            Err(err) => {
                tracing::error!(?err, "failed to lock gesture listeners");
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn fire_gesture_movement_recognized(&self, gesture: &str) {
        for listener in self.snapshot() {
            listener.gesture_movement_recognized(gesture);
        }
    }

    pub fn fire_process_gesture(&self, gesture: &str) {
        for listener in self.snapshot() {
            listener.process_gesture(gesture);
        }
    }

    fn snapshot(&self) -> Vec<Arc<dyn MouseGesturesListener>> {
        match self.listeners.lock() {
            Ok(guard) => guard.values().cloned().collect(),
            Err(err) => {
                tracing::error!(?err, "failed to lock gesture listeners");
                Vec::new()
            }
        }
    }
}
