use mouse_gestures::engine::Point;
use mouse_gestures::listeners::{ListenerId, ListenerRegistry, MouseGesturesListener};
use mouse_gestures::movements::Movements;
use mouse_gestures::service::{
    ButtonMask, EventOutcome, MouseButton, MouseGestureConfig, MouseGestures, PointerEvent,
};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Recorded {
    Partial(String, String),
    Process(String, String),
}

struct RecordingListener {
    name: &'static str,
    events: Arc<Mutex<Vec<Recorded>>>,
}

impl MouseGesturesListener for RecordingListener {
    fn gesture_movement_recognized(&self, gesture: &str) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(Recorded::Partial(self.name.into(), gesture.into()));
        }
    }

    fn process_gesture(&self, gesture: &str) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(Recorded::Process(self.name.into(), gesture.into()));
        }
    }
}

fn recorder(
    name: &'static str,
    events: &Arc<Mutex<Vec<Recorded>>>,
) -> Arc<dyn MouseGesturesListener> {
    Arc::new(RecordingListener {
        name,
        events: Arc::clone(events),
    })
}

fn pressed(x: i32, y: i32) -> PointerEvent {
    PointerEvent::Pressed {
        position: Point::new(x, y),
        buttons: ButtonMask::RIGHT,
    }
}

fn moved(x: i32, y: i32) -> PointerEvent {
    PointerEvent::Moved {
        position: Point::new(x, y),
        buttons: ButtonMask::RIGHT,
        timestamp_ms: 0,
    }
}

fn released(x: i32, y: i32) -> PointerEvent {
    PointerEvent::Released {
        position: Point::new(x, y),
        buttons: ButtonMask::RIGHT,
    }
}

fn wheel(x: i32, y: i32, rotation: i32) -> PointerEvent {
    PointerEvent::Wheel {
        position: Point::new(x, y),
        rotation,
        buttons: ButtonMask::RIGHT,
    }
}

fn session(grid_size: i32) -> MouseGestures {
    MouseGestures::with_config(
        Movements::default(),
        MouseGestureConfig {
            grid_size,
            ..MouseGestureConfig::default()
        },
    )
}

#[test]
fn right_then_down_gesture_consumes_release() {
    let mut session = session(30);
    let events = Arc::new(Mutex::new(Vec::new()));
    session.add_listener(recorder("a", &events));

    assert_eq!(session.process_event(pressed(100, 100)), EventOutcome::default());
    assert!(!session.process_event(moved(140, 100)).consumed);
    assert!(!session.process_event(moved(140, 140)).consumed);
    let outcome = session.process_event(released(140, 140));

    assert!(outcome.consumed);
    assert_eq!(outcome.gesture.as_deref(), Some("RD"));
    assert!(!session.recognizer().is_gesture_recognized());
    assert_eq!(session.recognizer().last_point(), None);
    assert_eq!(
        *events.lock().unwrap(),
        vec![
            Recorded::Partial("a".into(), "R".into()),
            Recorded::Partial("a".into(), "RD".into()),
            Recorded::Process("a".into(), "RD".into()),
        ]
    );
}

#[test]
fn release_without_gesture_is_not_consumed() {
    let mut session = session(50);
    let events = Arc::new(Mutex::new(Vec::new()));
    session.add_listener(recorder("a", &events));

    session.process_event(pressed(0, 0));
    session.process_event(moved(10, 10));
    let outcome = session.process_event(released(10, 10));

    assert_eq!(outcome, EventOutcome::default());
    assert!(events.lock().unwrap().is_empty());
    assert_eq!(session.recognizer().last_point(), None);
}

#[test]
fn click_ends_interaction_too() {
    let mut session = session(20);
    session.process_event(pressed(0, 0));
    session.process_event(moved(0, -30));
    let outcome = session.process_event(PointerEvent::Clicked {
        position: Point::new(0, -30),
        buttons: ButtonMask::RIGHT,
    });

    assert!(outcome.consumed);
    assert_eq!(outcome.gesture.as_deref(), Some("U"));
}

#[test]
fn events_without_trigger_button_are_ignored() {
    let mut session = session(20);
    session.process_event(PointerEvent::Pressed {
        position: Point::new(0, 0),
        buttons: ButtonMask::LEFT,
    });
    session.process_event(PointerEvent::Moved {
        position: Point::new(100, 0),
        buttons: ButtonMask::LEFT,
        timestamp_ms: 5,
    });
    assert_eq!(session.recognizer().last_point(), None);

    let outcome = session.process_event(PointerEvent::Released {
        position: Point::new(100, 0),
        buttons: ButtonMask::LEFT,
    });
    assert_eq!(outcome, EventOutcome::default());
}

#[test]
fn release_must_carry_the_released_button() {
    let mut session = session(20);
    session.process_event(pressed(0, 0));
    session.process_event(moved(30, 0));

    let outcome = session.process_event(PointerEvent::Released {
        position: Point::new(30, 0),
        buttons: ButtonMask::NONE,
    });
    assert_eq!(outcome, EventOutcome::default());
    assert_eq!(session.recognizer().gesture(), "R");

    let outcome = session.process_event(released(30, 0));
    assert!(outcome.consumed);
    assert_eq!(outcome.gesture.as_deref(), Some("R"));
}

#[test]
fn extra_buttons_do_not_block_trigger() {
    let mut session = session(20);
    session.process_event(pressed(0, 0));
    session.process_event(PointerEvent::Moved {
        position: Point::new(-50, 0),
        buttons: ButtonMask::RIGHT | ButtonMask::LEFT,
        timestamp_ms: 5,
    });
    assert_eq!(session.recognizer().gesture(), "L");
}

#[test]
fn trigger_button_is_configurable() {
    let mut session = session(20);
    session.set_trigger_button(MouseButton::Middle);
    session.process_event(pressed(0, 0));
    assert_eq!(session.recognizer().last_point(), None);

    session.process_event(PointerEvent::Pressed {
        position: Point::new(0, 0),
        buttons: ButtonMask::MIDDLE,
    });
    assert_eq!(session.recognizer().last_point(), Some(Point::new(0, 0)));
}

#[test]
fn wheel_is_ignored_unless_enabled() {
    let mut session = session(50);
    session.process_event(pressed(0, 0));
    session.process_event(wheel(0, 0, -1));
    assert_eq!(session.recognizer().gesture(), "");

    session.set_wheel_enabled(true);
    session.process_event(wheel(0, 0, -1));
    session.process_event(wheel(0, 0, -1));
    session.process_event(wheel(0, 0, 1));
    let outcome = session.process_event(released(0, 0));
    assert_eq!(outcome.gesture.as_deref(), Some("++-"));
}

#[test]
fn wheel_event_position_is_also_tracked() {
    let mut session = session(50);
    session.set_wheel_enabled(true);
    session.process_event(pressed(0, 0));
    session.process_event(wheel(80, 0, 1));
    assert_eq!(session.recognizer().gesture(), "-R");
}

#[test]
fn listeners_fire_in_registration_order_and_can_be_removed() {
    let mut session = session(20);
    let events = Arc::new(Mutex::new(Vec::new()));
    let first = session.add_listener(recorder("first", &events));
    session.add_listener(recorder("second", &events));

    session.process_event(pressed(0, 0));
    session.process_event(moved(30, 0));
    assert_eq!(
        *events.lock().unwrap(),
        vec![
            Recorded::Partial("first".into(), "R".into()),
            Recorded::Partial("second".into(), "R".into()),
        ]
    );

    assert!(session.remove_listener(first));
    assert!(!session.remove_listener(first));
    events.lock().unwrap().clear();
    session.process_event(released(30, 0));
    assert_eq!(
        *events.lock().unwrap(),
        vec![Recorded::Process("second".into(), "R".into())]
    );
}

#[test]
fn listeners_can_be_registered_from_another_thread() {
    let mut session = session(20);
    let events = Arc::new(Mutex::new(Vec::new()));
    let registry = session.listeners();
    let listener = recorder("remote", &events);
    std::thread::spawn(move || {
        registry.add(listener);
    })
    .join()
    .unwrap();

    session.process_event(pressed(0, 0));
    session.process_event(moved(0, 30));
    assert_eq!(
        *events.lock().unwrap(),
        vec![Recorded::Partial("remote".into(), "D".into())]
    );
}

/// Registers `pending` with the registry the first time it is notified.
struct AddingListener {
    registry: Arc<ListenerRegistry>,
    pending: Mutex<Option<Arc<dyn MouseGesturesListener>>>,
    events: Arc<Mutex<Vec<Recorded>>>,
}

impl AddingListener {
    fn register_pending(&self) {
        let pending = self.pending.lock().ok().and_then(|mut guard| guard.take());
        if let Some(listener) = pending {
            self.registry.add(listener);
        }
    }
}

impl MouseGesturesListener for AddingListener {
    fn gesture_movement_recognized(&self, gesture: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Recorded::Partial("adder".into(), gesture.into()));
        self.register_pending();
    }

    fn process_gesture(&self, gesture: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Recorded::Process("adder".into(), gesture.into()));
    }
}

/// Removes itself from the registry on its first notification.
struct OneShotListener {
    registry: Arc<ListenerRegistry>,
    id: Mutex<Option<ListenerId>>,
    events: Arc<Mutex<Vec<Recorded>>>,
}

impl MouseGesturesListener for OneShotListener {
    fn gesture_movement_recognized(&self, gesture: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Recorded::Partial("once".into(), gesture.into()));
        if let Some(id) = self.id.lock().unwrap().take() {
            assert!(self.registry.remove(id));
        }
    }

    fn process_gesture(&self, gesture: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Recorded::Process("once".into(), gesture.into()));
    }
}

#[test]
fn listener_added_during_notification_fires_from_next_one() {
    let mut session = session(30);
    let events = Arc::new(Mutex::new(Vec::new()));
    session.add_listener(Arc::new(AddingListener {
        registry: session.listeners(),
        pending: Mutex::new(Some(recorder("rec", &events))),
        events: Arc::clone(&events),
    }));

    session.process_event(pressed(100, 100));
    session.process_event(moved(140, 100));
    session.process_event(moved(140, 140));
    let outcome = session.process_event(released(140, 140));

    assert_eq!(outcome.gesture.as_deref(), Some("RD"));
    assert_eq!(session.listeners().len(), 2);
    assert_eq!(
        *events.lock().unwrap(),
        vec![
            Recorded::Partial("adder".into(), "R".into()),
            Recorded::Partial("adder".into(), "RD".into()),
            Recorded::Partial("rec".into(), "RD".into()),
            Recorded::Process("adder".into(), "RD".into()),
            Recorded::Process("rec".into(), "RD".into()),
        ]
    );
}

#[test]
fn listener_can_remove_itself_while_notified() {
    let mut session = session(30);
    let events = Arc::new(Mutex::new(Vec::new()));
    let once = Arc::new(OneShotListener {
        registry: session.listeners(),
        id: Mutex::new(None),
        events: Arc::clone(&events),
    });
    let id = session.add_listener(once.clone());
    *once.id.lock().unwrap() = Some(id);
    session.add_listener(recorder("rec", &events));

    session.process_event(pressed(0, 0));
    session.process_event(moved(40, 0));
    session.process_event(moved(40, 40));
    session.process_event(released(40, 40));

    assert_eq!(session.listeners().len(), 1);
    assert!(!session.remove_listener(id));
    assert_eq!(
        *events.lock().unwrap(),
        vec![
            Recorded::Partial("once".into(), "R".into()),
            Recorded::Partial("rec".into(), "R".into()),
            Recorded::Partial("rec".into(), "RD".into()),
            Recorded::Process("rec".into(), "RD".into()),
        ]
    );
}

#[test]
fn stopped_session_ignores_events() {
    let mut session = session(20);
    session.process_event(pressed(0, 0));
    session.process_event(moved(30, 0));
    session.stop();
    session.stop();
    assert!(!session.is_running());
    assert_eq!(session.recognizer().gesture(), "");

    session.process_event(pressed(0, 0));
    assert_eq!(session.process_event(released(100, 0)), EventOutcome::default());

    session.start();
    session.start();
    assert!(session.is_running());
    session.process_event(pressed(0, 0));
    assert_eq!(
        session.process_event(released(100, 0)).gesture.as_deref(),
        Some("R")
    );
}

#[test]
fn config_changes_reach_the_recognizer() {
    let mut session = MouseGestures::default();
    assert_eq!(session.config().grid_size, 50);
    session.set_grid_size(10);
    session.set_diagonal_enabled(true);
    assert_eq!(session.recognizer().grid_size(), 10);
    assert!(session.recognizer().diagonal_enabled());

    session.process_event(pressed(0, 0));
    session.process_event(moved(20, 20));
    assert_eq!(session.recognizer().gesture(), "3");
}

#[test]
fn pointer_events_deserialize_from_json() {
    let events: Vec<PointerEvent> = serde_json::from_str(
        r#"[
            {"type": "pressed", "position": {"x": 0, "y": 0}, "buttons": 4},
            {"type": "moved", "position": {"x": 60, "y": 0}, "buttons": 4},
            {"type": "wheel", "position": {"x": 60, "y": 0}, "rotation": -1, "buttons": 4},
            {"type": "released", "position": {"x": 60, "y": 0}, "buttons": 4}
        ]"#,
    )
    .unwrap();

    assert_eq!(events.len(), 4);
    assert_eq!(events[1], moved(60, 0));
    assert_eq!(events[2], wheel(60, 0, -1));
}
