use crate::actions::status_text;
use crate::db::{BindingLookup, BindingTable};
use crate::listeners::MouseGesturesListener;
use crate::service::PointerEvent;
use crate::settings::SETTINGS_FILE;
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Replay a recorded pointer trace through the gesture recognizer.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "mouse_gestures", about, version, max_term_width = 80)]
pub struct Args {
    /// Force debug logging regardless of the settings file.
    #[arg(long)]
    pub debug: bool,
    /// Settings file with the alphabet, recognizer options and bindings.
    #[arg(long, default_value = SETTINGS_FILE)]
    pub settings: PathBuf,
    /// JSON array of pointer events.
    pub trace: PathBuf,
}

pub fn load_trace(path: impl AsRef<Path>) -> anyhow::Result<Vec<PointerEvent>> {
    let path = path.as_ref();
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing trace {}", path.display()))
}

/// Prints gesture progress to stdout.
pub struct PrintListener {
    bindings: BindingTable,
}

impl PrintListener {
    pub fn new(bindings: BindingTable) -> Self {
        Self { bindings }
    }
}

impl MouseGesturesListener for PrintListener {
    fn gesture_movement_recognized(&self, gesture: &str) {
        println!("partial  {}", status_text(&self.bindings, gesture));
    }

    fn process_gesture(&self, gesture: &str) {
        match self.bindings.lookup(gesture) {
            Some(path) => println!("gesture  {gesture} -> {}", path.join(" -> ")),
            None => println!("gesture  {gesture} (unbound)"),
        }
    }
}
