use std::collections::HashSet;

/// Spec string for the built-in alphabet.
///
/// Positions are read as left, right, up, down, down-left, down-right,
/// up-left, up-right, wheel-up and wheel-down.
pub const DEFAULT_MOVEMENTS: &str = "LRUD1379+-";
pub const MOVEMENT_COUNT: usize = 10;

/// Every kind of move the recognizer can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    WheelUp,
    WheelDown,
}

impl Move {
    pub const DIRECTIONS: [Move; 8] = [
        Move::Left,
        Move::Right,
        Move::Up,
        Move::Down,
        Move::UpLeft,
        Move::UpRight,
        Move::DownLeft,
        Move::DownRight,
    ];

    pub fn is_wheel(self) -> bool {
        matches!(self, Move::WheelUp | Move::WheelDown)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovementsError {
    WrongLength { len: usize },
    DuplicateSymbol { symbol: char },
}

impl std::fmt::Display for MovementsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovementsError::WrongLength { len } => write!(
                f,
                "movement symbols should contain {MOVEMENT_COUNT} chars, got {len}"
            ),
            MovementsError::DuplicateSymbol { symbol } => {
                write!(f, "movement symbol '{symbol}' is used twice")
            }
        }
    }
}

impl std::error::Error for MovementsError {}

/// Character assigned to each [`Move`]. All ten symbols are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Movements {
    left: char,
    right: char,
    up: char,
    down: char,
    up_left: char,
    up_right: char,
    down_left: char,
    down_right: char,
    wheel_up: char,
    wheel_down: char,
}

impl Default for Movements {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Movements {
    pub const DEFAULT: Movements = Movements {
        left: 'L',
        right: 'R',
        up: 'U',
        down: 'D',
        up_left: '7',
        up_right: '9',
        down_left: '1',
        down_right: '3',
        wheel_up: '+',
        wheel_down: '-',
    };

    /// Build an alphabet from a spec string, falling back to
    /// [`Movements::DEFAULT`] when the string is malformed.
    pub fn new(spec: &str) -> Self {
        match Self::try_new(spec) {
            Ok(movements) => movements,
            Err(err) => {
                tracing::warn!(%err, spec, "invalid movement symbols, using defaults");
                Self::DEFAULT
            }
        }
    }

    pub fn try_new(spec: &str) -> Result<Self, MovementsError> {
        let chars: Vec<char> = spec.chars().collect();
        if chars.len() != MOVEMENT_COUNT {
            return Err(MovementsError::WrongLength { len: chars.len() });
        }
        let mut used = HashSet::with_capacity(MOVEMENT_COUNT);
        for &symbol in &chars {
            if !used.insert(symbol) {
                return Err(MovementsError::DuplicateSymbol { symbol });
            }
        }
        Ok(Self {
            left: chars[0],
            right: chars[1],
            up: chars[2],
            down: chars[3],
            down_left: chars[4],
            down_right: chars[5],
            up_left: chars[6],
            up_right: chars[7],
            wheel_up: chars[8],
            wheel_down: chars[9],
        })
    }

    pub fn left(&self) -> char {
        self.left
    }

    pub fn right(&self) -> char {
        self.right
    }

    pub fn up(&self) -> char {
        self.up
    }

    pub fn down(&self) -> char {
        self.down
    }

    pub fn up_left(&self) -> char {
        self.up_left
    }

    pub fn up_right(&self) -> char {
        self.up_right
    }

    pub fn down_left(&self) -> char {
        self.down_left
    }

    pub fn down_right(&self) -> char {
        self.down_right
    }

    pub fn wheel_up(&self) -> char {
        self.wheel_up
    }

    pub fn wheel_down(&self) -> char {
        self.wheel_down
    }

    pub fn symbol(&self, mv: Move) -> char {
        match mv {
            Move::Left => self.left,
            Move::Right => self.right,
            Move::Up => self.up,
            Move::Down => self.down,
            Move::UpLeft => self.up_left,
            Move::UpRight => self.up_right,
            Move::DownLeft => self.down_left,
            Move::DownRight => self.down_right,
            Move::WheelUp => self.wheel_up,
            Move::WheelDown => self.wheel_down,
        }
    }

    pub fn move_for(&self, symbol: char) -> Option<Move> {
        Move::DIRECTIONS
            .into_iter()
            .chain([Move::WheelUp, Move::WheelDown])
            .find(|mv| self.symbol(*mv) == symbol)
    }

    pub fn is_wheel_symbol(&self, symbol: char) -> bool {
        symbol == self.wheel_up || symbol == self.wheel_down
    }

    /// Directional symbols only, in [`Move::DIRECTIONS`] order.
    pub fn directional(&self) -> [char; 8] {
        Move::DIRECTIONS.map(|mv| self.symbol(mv))
    }

    /// Render back to the positional spec string accepted by [`Movements::new`].
    pub fn to_spec(&self) -> String {
        [
            self.left,
            self.right,
            self.up,
            self.down,
            self.down_left,
            self.down_right,
            self.up_left,
            self.up_right,
            self.wheel_up,
            self.wheel_down,
        ]
        .iter()
        .collect()
    }
}
