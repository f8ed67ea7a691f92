use crate::db::{format_display_gesture, BindingLookup, GestureBinding, SharedBindingTable};
use crate::listeners::MouseGesturesListener;
use anyhow::anyhow;
use hashlink::LinkedHashMap;
use std::sync::Arc;

pub const UNKNOWN_GESTURE: &str = "unknown gesture";

/// Host actions that gestures can be bound to.
pub trait ActionCatalog: Send + Sync {
    fn is_valid_action_path(&self, path: &[String]) -> bool;
    fn invoke(&self, path: &[String]) -> anyhow::Result<()>;
}

/// Receives the live status text while a gesture is being drawn.
pub trait StatusSink: Send + Sync {
    fn set_status(&self, text: &str);
}

type ActionHandler = Box<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

/// In-memory [`ActionCatalog`] keeping actions in registration order.
#[derive(Default)]
pub struct ActionRegistry {
    actions: LinkedHashMap<Vec<String>, ActionHandler>,
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.actions.keys()).finish()
    }
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `path`, replacing any previous handler.
    pub fn register<I, S, F>(&mut self, path: I, handler: F)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let path: Vec<String> = path.into_iter().map(Into::into).collect();
        self.actions.replace(path, Box::new(handler));
    }

    pub fn paths(&self) -> impl Iterator<Item = &[String]> {
        self.actions.keys().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl ActionCatalog for ActionRegistry {
    fn is_valid_action_path(&self, path: &[String]) -> bool {
        !path.is_empty() && self.actions.contains_key(path)
    }

    fn invoke(&self, path: &[String]) -> anyhow::Result<()> {
        let handler = self
            .actions
            .get(path)
            .ok_or_else(|| anyhow!("unknown action {}", path.join(" -> ")))?;
        handler()
    }
}

/// Status line for a gesture: the binding when there is one, otherwise the
/// gesture marked as unknown.
pub fn status_text(bindings: &dyn BindingLookup, gesture: &str) -> String {
    match bindings.lookup(gesture) {
        Some(path) => GestureBinding::new(gesture, path.to_vec()).display_string(),
        None => format!("{} {UNKNOWN_GESTURE}", format_display_gesture(gesture)),
    }
}

/// Listener resolving completed gestures through the binding table and
/// invoking the bound action.
pub struct GestureDispatcher {
    bindings: SharedBindingTable,
    catalog: Arc<dyn ActionCatalog>,
    status: Option<Arc<dyn StatusSink>>,
}

impl GestureDispatcher {
    pub fn new(bindings: SharedBindingTable, catalog: Arc<dyn ActionCatalog>) -> Self {
        Self {
            bindings,
            catalog,
            status: None,
        }
    }

    pub fn with_status(mut self, status: Arc<dyn StatusSink>) -> Self {
        self.status = Some(status);
        self
    }

    fn action_for(&self, gesture: &str) -> Option<Vec<String>> {
        match self.bindings.lock() {
            Ok(guard) => guard.lookup(gesture).map(<[String]>::to_vec),
            Err(err) => {
                tracing::error!(?err, "failed to lock gesture bindings");
                None
            }
        }
    }

    fn set_status(&self, text: &str) {
        if let Some(status) = &self.status {
            status.set_status(text);
        }
    }
}

impl MouseGesturesListener for GestureDispatcher {
    fn gesture_movement_recognized(&self, gesture: &str) {
        if self.status.is_none() {
            return;
        }
        let text = match self.bindings.lock() {
            Ok(guard) => status_text(&*guard, gesture),
            Err(err) => {
                tracing::error!(?err, "failed to lock gesture bindings");
                return;
            }
        };
        self.set_status(&text);
    }

    fn process_gesture(&self, gesture: &str) {
        match self.action_for(gesture) {
            Some(path) => {
                tracing::debug!(%gesture, ?path, "invoking gesture action");
                if let Err(err) = self.catalog.invoke(&path) {
                    tracing::warn!(%gesture, ?path, ?err, "gesture action failed");
                }
            }
            None => tracing::debug!(%gesture, "no action bound to gesture"),
        }
        self.set_status("");
    }
}
