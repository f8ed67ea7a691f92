pub mod actions;
pub mod cli;
pub mod db;
pub mod editor;
pub mod engine;
pub mod listeners;
pub mod logging;
pub mod movements;
pub mod service;
pub mod settings;

pub use actions::{ActionCatalog, ActionRegistry, GestureDispatcher, StatusSink};
pub use db::{format_display_gesture, BindingLookup, BindingTable, GestureBinding};
pub use engine::{GestureRecognizer, Point};
pub use listeners::{ListenerId, MouseGesturesListener};
pub use movements::{Move, Movements};
pub use service::{ButtonMask, EventOutcome, MouseButton, MouseGestures, PointerEvent};
