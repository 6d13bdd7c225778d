//! Game session - the timed-fall state machine
//!
//! Owns the board, the current and next piece, score/level progression and the
//! `Running` / `Paused` / `GameOver` lifecycle. Time never comes from a clock
//! in here: callers pass a monotonic `now_ms` into [`GameSession::tick`] and
//! [`GameSession::soft_drop`], which keeps every run reproducible.
//!
//! Presentation side effects (sounds, music) are queued as [`Signal`]s and
//! drained by the driver with [`GameSession::take_signals`].

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::pieces::Tetromino;
use crate::rng::PieceQueue;
use crate::scoring::{fall_interval_ms, level_for_lines, line_clear_score};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::*;

/// Pending signals kept between drains; the oldest is dropped on overflow.
pub const SIGNAL_CAPACITY: usize = 32;

/// Session construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Seed for the uniform piece randomizer.
    pub seed: u32,
    /// Column new pieces spawn at.
    pub spawn_column: i8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            spawn_column: SPAWN_COLUMN,
        }
    }
}

/// Complete game session state
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    current: Tetromino,
    next: Tetromino,
    queue: PieceQueue,
    score: u32,
    lines: u32,
    level: u32,
    fall_interval_ms: u32,
    last_fall_ms: u64,
    state: SessionState,
    signals: ArrayVec<Signal, SIGNAL_CAPACITY>,
}

impl GameSession {
    /// Start a session with uniform random pieces from `config.seed`.
    pub fn new(config: SessionConfig, now_ms: u64) -> Self {
        Self::with_queue(config, PieceQueue::new(config.seed), now_ms)
    }

    /// Start a session that draws its pieces from `queue`.
    pub fn with_queue(config: SessionConfig, mut queue: PieceQueue, now_ms: u64) -> Self {
        assert!(
            (0..BOARD_WIDTH as i8).contains(&config.spawn_column),
            "spawn column must be on the board, got {}",
            config.spawn_column
        );
        let current = Tetromino::spawn(queue.draw(), config.spawn_column);
        let next = Tetromino::spawn(queue.draw(), config.spawn_column);
        let mut session = Self {
            config,
            board: Board::new(),
            current,
            next,
            queue,
            score: 0,
            lines: 0,
            level: 1,
            fall_interval_ms: BASE_FALL_MS,
            last_fall_ms: now_ms,
            state: SessionState::Running,
            signals: ArrayVec::new(),
        };
        session.begin();
        session
    }

    /// Throw the current game away and start over on an empty board.
    ///
    /// Works from any state. The piece randomizer keeps its position.
    pub fn reset(&mut self, now_ms: u64) {
        self.board.clear();
        self.current = self.spawn_next_kind();
        self.next = self.spawn_next_kind();
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.fall_interval_ms = BASE_FALL_MS;
        self.last_fall_ms = now_ms;
        self.state = SessionState::Running;
        self.begin();
    }

    fn begin(&mut self) {
        self.emit(Signal::MusicStart);
        // Only reachable with a spawn column that does not fit the board.
        if !self.board.is_valid_position(&self.current, 0, 0) {
            self.enter_game_over();
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    pub fn last_fall_ms(&self) -> u64 {
        self.last_fall_ms
    }

    pub fn seed(&self) -> u32 {
        self.queue.seed()
    }

    pub fn current(&self) -> &Tetromino {
        &self.current
    }

    pub fn next(&self) -> &Tetromino {
        &self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access, for setting up positions (puzzles, tests).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Signals emitted since the last drain, oldest first.
    pub fn pending_signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Drain the pending signals.
    pub fn take_signals(&mut self) -> ArrayVec<Signal, SIGNAL_CAPACITY> {
        std::mem::take(&mut self.signals)
    }

    fn emit(&mut self, signal: Signal) {
        if self.signals.is_full() {
            self.signals.remove(0);
        }
        self.signals.push(signal);
    }

    fn spawn_next_kind(&mut self) -> Tetromino {
        Tetromino::spawn(self.queue.draw(), self.config.spawn_column)
    }

    /// Gravity step. Once more than a fall interval has passed since the last
    /// fall, the current piece moves down a row, or locks if it cannot.
    ///
    /// Returns true if the piece moved or locked.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        if now_ms.saturating_sub(self.last_fall_ms) <= self.fall_interval_ms as u64 {
            return false;
        }

        if self.board.is_valid_position(&self.current, 0, 1) {
            self.current.y += 1;
        } else {
            self.lock_piece();
        }
        self.last_fall_ms = now_ms;
        true
    }

    /// Shift the current piece one column. `dx` must be -1 or 1.
    pub fn move_by(&mut self, dx: i8) -> bool {
        assert!(dx == -1 || dx == 1, "horizontal move must be one column, got {dx}");
        if self.state != SessionState::Running {
            return false;
        }
        if !self.board.is_valid_position(&self.current, dx, 0) {
            return false;
        }
        self.current.x += dx;
        self.emit(Signal::Move);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.move_by(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_by(1)
    }

    /// Rotate in place. Rejected (no change, no signal) if the rotated
    /// offsets do not fit.
    pub fn rotate(&mut self) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        let candidate = self.current.rotated();
        if !self.board.fits(&candidate, self.current.x, self.current.y) {
            return false;
        }
        self.current.shape = candidate;
        self.emit(Signal::Rotate);
        true
    }

    /// Manual one-row drop. Restarts the fall timer on success.
    ///
    /// Never locks: a resting piece only locks from [`GameSession::tick`].
    pub fn soft_drop(&mut self, now_ms: u64) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        if !self.board.is_valid_position(&self.current, 0, 1) {
            return false;
        }
        self.current.y += 1;
        self.last_fall_ms = now_ms;
        true
    }

    /// Switch between `Running` and `Paused`. No effect after game over.
    pub fn toggle_pause(&mut self) -> bool {
        self.state = match self.state {
            SessionState::Running => SessionState::Paused,
            SessionState::Paused => SessionState::Running,
            SessionState::GameOver => return false,
        };
        true
    }

    /// Merge the current piece into the board, clear rows, score them and
    /// promote the next piece. Ends the game if the new piece does not fit.
    pub fn lock_piece(&mut self) {
        if self.state != SessionState::Running {
            return;
        }

        self.board.add_piece(&self.current);
        self.emit(Signal::Drop);

        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            self.lines += cleared as u32;
            self.score = self
                .score
                .saturating_add(line_clear_score(cleared, self.level));
            self.update_level();
            self.emit(Signal::Clear);
        }

        let next = self.spawn_next_kind();
        self.current = std::mem::replace(&mut self.next, next);

        if !self.board.is_valid_position(&self.current, 0, 0) {
            self.enter_game_over();
        }
    }

    fn enter_game_over(&mut self) {
        self.state = SessionState::GameOver;
        self.emit(Signal::GameOver);
        self.emit(Signal::MusicStop);
    }

    fn update_level(&mut self) {
        let new_level = level_for_lines(self.lines);
        if new_level > self.level {
            self.level = new_level;
            self.fall_interval_ms = fall_interval_ms(self.level);
        }
    }

    /// Pivot row the current piece would come to rest on if dropped straight down.
    pub fn ghost_y(&self) -> Option<i8> {
        if self.state == SessionState::GameOver {
            return None;
        }
        let mut drop: i8 = 0;
        while self.board.is_valid_position(&self.current, 0, drop + 1) {
            drop += 1;
        }
        Some(self.current.y + drop)
    }

    /// Apply an input intent. Returns true if the session changed.
    pub fn apply_action(&mut self, action: GameAction, now_ms: u64) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(now_ms),
            GameAction::Rotate => self.rotate(),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Reset => {
                self.reset(now_ms);
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.current = Some(PieceSnapshot::from(self.current));
        out.next = Some(PieceSnapshot::from(self.next));
        out.ghost_y = self.ghost_y();
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.fall_interval_ms = self.fall_interval_ms;
        out.paused = self.is_paused();
        out.game_over = self.is_game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default(), 0)
    }
}
