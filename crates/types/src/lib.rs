//! Shared types and constants for the falling-block engine and its collaborators.
//!
//! Everything here is plain data with no external dependencies, so the same
//! definitions can be used by the core rules, the terminal front-end, the
//! audio layer and the headless JSON mode.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, y grows downward)
//! - **Spawn position**: column `BOARD_WIDTH / 2`, row 0
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Driver polling cadence (~60 FPS) |
//! | `BASE_FALL_MS` | 1000 | Fall interval at level 1 |
//! | `MIN_FALL_MS` | 100 | Floor for the fall interval |
//! | `KEY_REPEAT_DELAY_MS` | 170 | Hold time before a key starts repeating |
//! | `KEY_REPEAT_INTERVAL_MS` | 50 | Interval between repeats of a held key |
//!
//! The fall interval at level `n` is `max(100, round(1000 * 0.9^(n - 1)))` ms.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, Signal, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::from_index(3), PieceKind::O);
//!
//! assert_eq!(GameAction::from_str("togglePause"), Some(GameAction::TogglePause));
//! assert_eq!(Signal::GameOver.as_str(), "gameover");
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Default spawn column for a new piece's pivot
pub const SPAWN_COLUMN: i8 = (BOARD_WIDTH / 2) as i8;

/// Spawn row for a new piece's pivot
pub const SPAWN_ROW: i8 = 0;

/// Driver polling cadence in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Fall interval at level 1
pub const BASE_FALL_MS: u32 = 1000;

/// Fall interval never drops below this
pub const MIN_FALL_MS: u32 = 100;

/// Per-level multiplier applied to the fall interval
pub const FALL_DECAY: f64 = 0.9;

/// Cleared lines needed per level step
pub const LINES_PER_LEVEL: u32 = 10;

/// Hold time before a held movement key starts repeating
pub const KEY_REPEAT_DELAY_MS: u32 = 170;

/// Interval between repeats of a held movement key
pub const KEY_REPEAT_INTERVAL_MS: u32 = 50;

/// Line clear scoring table, indexed by the number of rows cleared at once.
///
/// Points are multiplied by the level the clear happened on. Counts outside the
/// table score nothing.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];


/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **J**: Blue
/// - **L**: Orange (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Green
/// - **T**: Purple
/// - **Z**: Red (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Kind at position `index` of [`PieceKind::ALL`].
    ///
    /// # Panics
    ///
    /// Panics if `index >= 7`. An out-of-range kind is a caller bug, not a
    /// runtime condition.
    pub fn from_index(index: usize) -> Self {
        match Self::ALL.get(index) {
            Some(kind) => *kind,
            None => panic!("piece index out of range: {index}"),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter, as shown in the side panel.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }

    /// Display color as `(r, g, b)`.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0, 255, 255),
            PieceKind::J => (0, 0, 255),
            PieceKind::L => (255, 165, 0),
            PieceKind::O => (255, 255, 0),
            PieceKind::S => (0, 255, 0),
            PieceKind::T => (128, 0, 128),
            PieceKind::Z => (255, 0, 0),
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Discrete input intents accepted by the game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down (never locks)
    SoftDrop,
    /// Rotate piece 90° around its pivot
    Rotate,
    /// Pause or resume
    TogglePause,
    /// Start a fresh session
    Reset,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "togglepause" | "pause" => Some(GameAction::TogglePause),
            "reset" | "restart" => Some(GameAction::Reset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::TogglePause => "togglePause",
            GameAction::Reset => "reset",
        }
    }
}

/// Side-effect notifications emitted by the session for presentation layers.
///
/// The core never acts on these itself; a collaborator (usually audio) drains
/// and interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Move,
    Rotate,
    Drop,
    Clear,
    GameOver,
    MusicStart,
    MusicStop,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Move => "move",
            Signal::Rotate => "rotate",
            Signal::Drop => "drop",
            Signal::Clear => "clear",
            Signal::GameOver => "gameover",
            Signal::MusicStart => "musicStart",
            Signal::MusicStop => "musicStop",
        }
    }
}

/// Lifecycle of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Running,
    Paused,
    GameOver,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Running => "running",
            SessionState::Paused => "paused",
            SessionState::GameOver => "gameOver",
        }
    }
}
