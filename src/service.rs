use crate::engine::{GestureRecognizer, Point, DEFAULT_GRID_SIZE};
use crate::listeners::{ListenerId, ListenerRegistry, MouseGesturesListener};
use crate::movements::Movements;
use serde::{Deserialize, Serialize};
use std::ops::BitOr;
use std::sync::Arc;

/// Set of pointer buttons attached to an event.
///
/// For presses and moves these are the held buttons. Releases and clicks carry
/// the button that went up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ButtonMask(pub u32);

impl ButtonMask {
    pub const NONE: ButtonMask = ButtonMask(0);
    pub const LEFT: ButtonMask = ButtonMask(1 << 0);
    pub const MIDDLE: ButtonMask = ButtonMask(1 << 1);
    pub const RIGHT: ButtonMask = ButtonMask(1 << 2);

    pub fn contains(self, other: ButtonMask) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ButtonMask {
    type Output = ButtonMask;

    fn bitor(self, rhs: ButtonMask) -> ButtonMask {
        ButtonMask(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Middle,
    #[default]
    Right,
}

impl MouseButton {
    pub fn mask(self) -> ButtonMask {
        match self {
            MouseButton::Left => ButtonMask::LEFT,
            MouseButton::Middle => ButtonMask::MIDDLE,
            MouseButton::Right => ButtonMask::RIGHT,
        }
    }
}

/// Raw pointer input in a single absolute coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Pressed {
        position: Point,
        buttons: ButtonMask,
    },
    Moved {
        position: Point,
        buttons: ButtonMask,
        #[serde(default)]
        timestamp_ms: u64,
    },
    /// `buttons` must include the released button, otherwise the event does
    /// not match the trigger and the interaction is not ended.
    Released {
        position: Point,
        buttons: ButtonMask,
    },
    /// Same button convention as `Released`.
    Clicked {
        position: Point,
        buttons: ButtonMask,
    },
    Wheel {
        position: Point,
        rotation: i32,
        buttons: ButtonMask,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Pressed { position, .. }
            | PointerEvent::Moved { position, .. }
            | PointerEvent::Released { position, .. }
            | PointerEvent::Clicked { position, .. }
            | PointerEvent::Wheel { position, .. } => position,
        }
    }

    pub fn buttons(&self) -> ButtonMask {
        match *self {
            PointerEvent::Pressed { buttons, .. }
            | PointerEvent::Moved { buttons, .. }
            | PointerEvent::Released { buttons, .. }
            | PointerEvent::Clicked { buttons, .. }
            | PointerEvent::Wheel { buttons, .. } => buttons,
        }
    }

    fn ends_interaction(&self) -> bool {
        matches!(
            self,
            PointerEvent::Released { .. } | PointerEvent::Clicked { .. }
        )
    }
}

/// Result of feeding one event to a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// The host should not process the event any further.
    pub consumed: bool,
    /// Gesture completed by this event.
    pub gesture: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseGestureConfig {
    pub grid_size: i32,
    pub diagonal_enabled: bool,
    pub wheel_enabled: bool,
    pub trigger_button: MouseButton,
}

impl Default for MouseGestureConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            diagonal_enabled: false,
            wheel_enabled: false,
            trigger_button: MouseButton::Right,
        }
    }
}

/// A gesture session: filters pointer events, drives the recognizer and
/// notifies listeners.
///
/// Events must be fed from a single thread. Listener registration goes through
/// a shared [`ListenerRegistry`] and may happen from anywhere.
#[derive(Debug)]
pub struct MouseGestures {
    config: MouseGestureConfig,
    recognizer: GestureRecognizer,
    listeners: Arc<ListenerRegistry>,
    running: bool,
}

impl Default for MouseGestures {
    fn default() -> Self {
        Self::new(Movements::default())
    }
}

impl MouseGestures {
    pub fn new(movements: Movements) -> Self {
        Self::with_config(movements, MouseGestureConfig::default())
    }

    pub fn with_config(movements: Movements, config: MouseGestureConfig) -> Self {
        Self {
            config,
            recognizer: GestureRecognizer::with_options(
                movements,
                config.grid_size,
                config.diagonal_enabled,
            ),
            listeners: Arc::new(ListenerRegistry::new()),
            running: true,
        }
    }

    pub fn movements(&self) -> &Movements {
        self.recognizer.movements()
    }

    pub fn config(&self) -> &MouseGestureConfig {
        &self.config
    }

    pub fn recognizer(&self) -> &GestureRecognizer {
        &self.recognizer
    }

    pub fn update_config(&mut self, config: MouseGestureConfig) {
        if self.config == config {
            return;
        }
        tracing::debug!(?config, "mouse gesture config updated");
        self.config = config;
        self.recognizer.set_grid_size(config.grid_size);
        self.recognizer.set_diagonal_enabled(config.diagonal_enabled);
    }

    pub fn set_grid_size(&mut self, grid_size: i32) {
        self.update_config(MouseGestureConfig {
            grid_size,
            ..self.config
        });
    }

    pub fn set_diagonal_enabled(&mut self, diagonal_enabled: bool) {
        self.update_config(MouseGestureConfig {
            diagonal_enabled,
            ..self.config
        });
    }

    pub fn set_wheel_enabled(&mut self, wheel_enabled: bool) {
        self.update_config(MouseGestureConfig {
            wheel_enabled,
            ..self.config
        });
    }

    pub fn set_trigger_button(&mut self, trigger_button: MouseButton) {
        self.update_config(MouseGestureConfig {
            trigger_button,
            ..self.config
        });
    }

    pub fn add_listener(&self, listener: Arc<dyn MouseGesturesListener>) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Shared registry, for registering listeners from other threads.
    pub fn listeners(&self) -> Arc<ListenerRegistry> {
        Arc::clone(&self.listeners)
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.recognizer.clear();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn process_event(&mut self, event: PointerEvent) -> EventOutcome {
        if !self.running || !event.buttons().contains(self.config.trigger_button.mask()) {
            return EventOutcome::default();
        }

        if let PointerEvent::Wheel { rotation, .. } = event {
            if self.config.wheel_enabled && self.recognizer.feed_wheel(rotation).is_some() {
                self.fire_gesture_movement_recognized();
            }
        }
        if self.recognizer.feed_point(event.position()).is_some() {
            self.fire_gesture_movement_recognized();
        }

        if !event.ends_interaction() {
            return EventOutcome::default();
        }

        if !self.recognizer.is_gesture_recognized() {
            self.recognizer.clear();
            return EventOutcome::default();
        }

        let gesture = self.recognizer.gesture();
        self.recognizer.clear();
        tracing::debug!(%gesture, "mouse gesture completed");
        self.listeners.fire_process_gesture(&gesture);
        EventOutcome {
            consumed: true,
            gesture: Some(gesture),
        }
    }

    fn fire_gesture_movement_recognized(&self) {
        let gesture = self.recognizer.gesture();
        self.listeners.fire_gesture_movement_recognized(&gesture);
    }
}
