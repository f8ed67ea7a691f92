use crate::actions::ActionCatalog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

pub const ACTION_PATH_SEPARATOR: &str = " -> ";

/// Ordered display labels identifying a host action, e.g. `["Edit", "Copy"]`.
pub type ActionPath = Vec<String>;

/// A gesture string bound to an action path.
///
/// Bindings sort by gesture first, then by action path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureBinding {
    pub gesture: String,
    pub action_path: ActionPath,
}

impl GestureBinding {
    pub fn new(gesture: impl Into<String>, action_path: ActionPath) -> Self {
        Self {
            gesture: gesture.into(),
            action_path,
        }
    }

    /// `"L,R (Edit -> Copy)"`
    pub fn display_string(&self) -> String {
        format!(
            "{} ({})",
            format_display_gesture(&self.gesture),
            self.action_path.join(ACTION_PATH_SEPARATOR)
        )
    }
}

/// Render a gesture for humans by separating its symbols with commas.
pub fn format_display_gesture(gesture: &str) -> String {
    let symbols: Vec<String> = gesture.chars().map(String::from).collect();
    symbols.join(",")
}

pub trait BindingLookup {
    fn lookup(&self, gesture: &str) -> Option<&[String]>;
}

/// Gesture to action path bindings, at most one per gesture, kept sorted by
/// gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingTable {
    bindings: BTreeMap<String, ActionPath>,
}

pub type SharedBindingTable = Arc<Mutex<BindingTable>>;

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later bindings for the same gesture replace earlier ones.
    pub fn from_bindings(bindings: impl IntoIterator<Item = GestureBinding>) -> Self {
        let mut table = Self::new();
        for binding in bindings {
            table.insert(binding);
        }
        table
    }

    /// Insert a binding, returning the action path it replaced.
    pub fn insert(&mut self, binding: GestureBinding) -> Option<ActionPath> {
        self.bindings.insert(binding.gesture, binding.action_path)
    }

    pub fn remove(&mut self, gesture: &str) -> Option<ActionPath> {
        self.bindings.remove(gesture)
    }

    pub fn get(&self, gesture: &str) -> Option<GestureBinding> {
        self.bindings
            .get_key_value(gesture)
            .map(|(gesture, path)| GestureBinding::new(gesture.clone(), path.clone()))
    }

    pub fn bindings(&self) -> Vec<GestureBinding> {
        self.bindings
            .iter()
            .map(|(gesture, path)| GestureBinding::new(gesture.clone(), path.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Drop bindings whose action path the catalog does not know. Returns the
    /// number of bindings removed.
    pub fn retain_valid(&mut self, catalog: &dyn ActionCatalog) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|gesture, path| {
            let valid = catalog.is_valid_action_path(path);
            if !valid {
                tracing::warn!(%gesture, ?path, "dropping binding to unknown action");
            }
            valid
        });
        before - self.bindings.len()
    }
}

impl BindingLookup for BindingTable {
    fn lookup(&self, gesture: &str) -> Option<&[String]> {
        self.bindings.get(gesture).map(Vec::as_slice)
    }
}
