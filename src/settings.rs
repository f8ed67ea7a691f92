use crate::actions::ActionCatalog;
use crate::db::{BindingTable, GestureBinding};
use crate::movements::{Movements, DEFAULT_MOVEMENTS};
use crate::service::{MouseButton, MouseGestureConfig};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

pub const SETTINGS_FILE: &str = "mouse_gestures.json";
pub const SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_SETTINGS_GRID_SIZE: i32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MouseGestureSettings {
    pub schema_version: u32,
    pub grid_size: i32,
    pub diagonal_enabled: bool,
    pub wheel_enabled: bool,
    pub trigger_button: MouseButton,
    pub movements: String,
    pub debug_logging: bool,
    pub gesture_actions: Vec<GestureBinding>,
}

impl Default for MouseGestureSettings {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            grid_size: DEFAULT_SETTINGS_GRID_SIZE,
            diagonal_enabled: false,
            wheel_enabled: false,
            trigger_button: MouseButton::Right,
            movements: DEFAULT_MOVEMENTS.to_string(),
            debug_logging: false,
            gesture_actions: Vec::new(),
        }
    }
}

impl MouseGestureSettings {
    pub fn config(&self) -> MouseGestureConfig {
        MouseGestureConfig {
            grid_size: self.grid_size,
            diagonal_enabled: self.diagonal_enabled,
            wheel_enabled: self.wheel_enabled,
            trigger_button: self.trigger_button,
        }
    }

    pub fn movements(&self) -> Movements {
        Movements::new(&self.movements)
    }

    /// Bindings as a table, without the ones the catalog cannot invoke.
    pub fn binding_table(&self, catalog: &dyn ActionCatalog) -> BindingTable {
        let mut table = BindingTable::from_bindings(self.gesture_actions.iter().cloned());
        let dropped = table.retain_valid(catalog);
        if dropped > 0 {
            tracing::warn!(dropped, "ignored gesture bindings to unknown actions");
        }
        table
    }

    pub fn set_bindings(&mut self, table: &BindingTable) {
        self.gesture_actions = table.bindings();
    }

    pub fn is_modified(&self, table: &BindingTable) -> bool {
        BindingTable::from_bindings(self.gesture_actions.iter().cloned()) != *table
    }
}

/// Load settings from `path`.
///
/// A missing or blank file yields the defaults. Any other read failure is an
/// error so that a later save cannot overwrite bindings that were never read.
pub fn load_settings(path: impl AsRef<Path>) -> anyhow::Result<MouseGestureSettings> {
    let path = path.as_ref();
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no gesture settings file, using defaults");
            return Ok(MouseGestureSettings::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading {}", path.display()));
        }
    };
    if content.trim().is_empty() {
        return Ok(MouseGestureSettings::default());
    }
    let settings: MouseGestureSettings = serde_json::from_str(&content)
        .with_context(|| format!("parsing gesture settings {}", path.display()))?;
    if settings.schema_version != SCHEMA_VERSION {
        bail!(
            "Unsupported mouse gesture settings schema version {} in {}",
            settings.schema_version,
            path.display()
        );
    }
    Ok(settings)
}

/// Write `settings` as pretty JSON, stamping the current schema version.
pub fn save_settings(
    path: impl AsRef<Path>,
    settings: &MouseGestureSettings,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let settings = MouseGestureSettings {
        schema_version: SCHEMA_VERSION,
        ..settings.clone()
    };
    let json = serde_json::to_string_pretty(&settings)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        bindings = settings.gesture_actions.len(),
        "saved gesture settings"
    );
    Ok(())
}
