use crate::movements::{Move, Movements};
use serde::{Deserialize, Serialize};

/// tan(22.5°), lower bound of the diagonal band.
pub const TAN_22_5: f32 = 0.41421357;
/// tan(67.5°), upper bound of the diagonal band.
pub const TAN_67_5: f32 = 2.4142137;
pub const DEFAULT_GRID_SIZE: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from(value: (i32, i32)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizerState {
    Idle,
    Tracking,
}

/// Classify a move from `|dx| / |dy|` and the signs of the deltas.
pub fn classify_tangent(abs_tangent: f32, dx: i32, dy: i32, diagonal: bool) -> Move {
    let vertical = if dy < 0 { Move::Up } else { Move::Down };
    let horizontal = if dx < 0 { Move::Left } else { Move::Right };

    if !diagonal {
        return if abs_tangent < 1.0 {
            vertical
        } else {
            horizontal
        };
    }

    if abs_tangent < TAN_22_5 {
        vertical
    } else if abs_tangent < TAN_67_5 {
        match (dx < 0, dy < 0) {
            (true, true) => Move::UpLeft,
            (false, true) => Move::UpRight,
            (true, false) => Move::DownLeft,
            (false, false) => Move::DownRight,
        }
    } else {
        horizontal
    }
}

/// Classify a displacement. Returns `None` for a zero move.
pub fn direction_from_delta(dx: i32, dy: i32, diagonal: bool) -> Option<Move> {
    if dx == 0 && dy == 0 {
        return None;
    }
    let abs_x = dx.unsigned_abs() as f32;
    let abs_y = dy.unsigned_abs() as f32;
    // Pure horizontal moves never divide by zero.
    let abs_tangent = if abs_y == 0.0 {
        f32::INFINITY
    } else {
        abs_x / abs_y
    };
    Some(classify_tangent(abs_tangent, dx, dy, diagonal))
}

/// Per-session state machine turning pointer samples into gesture symbols.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    movements: Movements,
    grid_size: i32,
    diagonal_enabled: bool,
    last_point: Option<Point>,
    symbols: Vec<char>,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(Movements::default())
    }
}

impl GestureRecognizer {
    pub fn new(movements: Movements) -> Self {
        Self {
            movements,
            grid_size: DEFAULT_GRID_SIZE,
            diagonal_enabled: false,
            last_point: None,
            symbols: Vec::new(),
        }
    }

    pub fn with_options(movements: Movements, grid_size: i32, diagonal_enabled: bool) -> Self {
        Self {
            grid_size,
            diagonal_enabled,
            ..Self::new(movements)
        }
    }

    pub fn movements(&self) -> &Movements {
        &self.movements
    }

    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    pub fn set_grid_size(&mut self, grid_size: i32) {
        self.grid_size = grid_size;
    }

    pub fn diagonal_enabled(&self) -> bool {
        self.diagonal_enabled
    }

    pub fn set_diagonal_enabled(&mut self, diagonal_enabled: bool) {
        self.diagonal_enabled = diagonal_enabled;
    }

    pub fn state(&self) -> RecognizerState {
        if self.last_point.is_none() && self.symbols.is_empty() {
            RecognizerState::Idle
        } else {
            RecognizerState::Tracking
        }
    }

    pub fn last_point(&self) -> Option<Point> {
        self.last_point
    }

    /// Feed one pointer position. Returns the symbol appended to the gesture,
    /// if any.
    pub fn feed_point(&mut self, point: impl Into<Point>) -> Option<char> {
        let point = point.into();
        let last = match self.last_point {
            Some(last) => last,
            None => {
                self.last_point = Some(point);
                return None;
            }
        };

        let dx = point.x.saturating_sub(last.x);
        let dy = point.y.saturating_sub(last.y);
        let within_grid = |delta: i32| i64::from(delta).abs() < i64::from(self.grid_size);
        if within_grid(dx) && within_grid(dy) {
            return None;
        }

        let mv = direction_from_delta(dx, dy, self.diagonal_enabled)?;
        let appended = self.save_move(self.movements.symbol(mv));
        self.last_point = Some(point);
        appended
    }

    /// Feed a wheel rotation: negative is wheel-up, positive wheel-down.
    pub fn feed_wheel(&mut self, rotation: i32) -> Option<char> {
        let mv = match rotation.signum() {
            -1 => Move::WheelUp,
            1 => Move::WheelDown,
            _ => return None,
        };
        self.save_move(self.movements.symbol(mv))
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn gesture(&self) -> String {
        self.symbols.iter().collect()
    }

    pub fn is_gesture_recognized(&self) -> bool {
        !self.symbols.is_empty()
    }

    pub fn clear(&mut self) {
        self.last_point = None;
        self.symbols.clear();
    }

    fn save_move(&mut self, symbol: char) -> Option<char> {
        // Repeated directions collapse, repeated wheel turns do not.
        if !self.movements.is_wheel_symbol(symbol) && self.symbols.last() == Some(&symbol) {
            return None;
        }
        self.symbols.push(symbol);
        tracing::debug!(%symbol, gesture = %self.gesture(), "gesture movement recognized");
        Some(symbol)
    }
}
