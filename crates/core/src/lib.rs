//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the game rules and nothing else. It has no dependencies on
//! UI, audio, or I/O, and it never reads a clock: the caller passes the
//! current time into every time-dependent operation.
//!
//! - **Deterministic**: same seed and same inputs produce the same game
//! - **Testable**: every rule is reachable from plain unit tests
//! - **Allocation-free hot path**: ticks, moves and snapshots do not allocate
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven tetromino shapes and pivot rotation
//! - [`board`]: 10x20 grid with collision checks and row clearing
//! - [`rng`]: seeded uniform piece selection
//! - [`scoring`]: line clear points, levels and fall speed
//! - [`session`]: the `Running` / `Paused` / `GameOver` state machine
//! - [`snapshot`]: read-only frame state for renderers
//!
//! # Game Rules
//!
//! - **Randomizer**: each piece is drawn uniformly from the seven kinds
//! - **Rotation**: 90° turn around the pivot, rejected if it does not fit (no wall kicks)
//! - **Gravity**: the piece falls one row once more than the fall interval has passed
//! - **Locking**: a piece locks when gravity finds it resting; soft drop never locks
//! - **Scoring**: 100 / 300 / 500 / 800 for 1-4 rows, times the current level
//! - **Levels**: one level per 10 lines, fall interval shrinks by 10% per level (min 100ms)
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameSession, SessionConfig};
//! use blockfall_types::{GameAction, Signal};
//!
//! let mut game = GameSession::new(SessionConfig::default(), 0);
//!
//! game.apply_action(GameAction::MoveRight, 0);
//! game.apply_action(GameAction::Rotate, 0);
//!
//! // Gravity only acts once more than 1000ms have passed at level 1.
//! assert!(!game.tick(1000));
//! assert!(game.tick(1001));
//!
//! assert_eq!(game.take_signals().first(), Some(&Signal::MusicStart));
//! ```

pub mod board;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use pieces::{canonical_shape, rotate_shape, MinoOffset, PieceShape, Tetromino};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{fall_interval_ms, level_for_lines, line_clear_score};
pub use session::{GameSession, SessionConfig, SIGNAL_CAPACITY};
pub use snapshot::{GameSnapshot, PieceSnapshot};
