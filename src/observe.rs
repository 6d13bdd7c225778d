//! Headless observation stream.
//!
//! Drives a [`GameSession`] on a simulated clock and writes one JSON line per
//! step that produced signals, followed by a summary line. Useful for
//! scripted runs and for diffing behaviour between builds.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::core::{GameSession, GameSnapshot, PieceSnapshot, SessionConfig};
use crate::types::{GameAction, SessionState, Signal, TICK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObservationType {
    #[serde(rename = "step")]
    Step,
    #[serde(rename = "summary")]
    Summary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceObservation {
    pub kind: &'static str,
    pub x: i8,
    pub y: i8,
    pub cells: [[i8; 2]; 4],
}

impl From<&PieceSnapshot> for PieceObservation {
    fn from(piece: &PieceSnapshot) -> Self {
        Self {
            kind: piece.kind.as_str(),
            x: piece.x,
            y: piece.y,
            cells: piece.cells().map(|(x, y)| [x, y]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepObservation {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub step: u64,
    pub ts: u64,
    pub state: &'static str,
    pub signals: Vec<&'static str>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub fall_interval_ms: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<PieceObservation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ghost_y: Option<i8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<&'static str>,
}

impl StepObservation {
    pub fn new(step: u64, ts: u64, snap: &GameSnapshot, signals: &[Signal]) -> Self {
        Self {
            msg_type: ObservationType::Step,
            step,
            ts,
            state: state_of(snap).as_str(),
            signals: signals.iter().map(Signal::as_str).collect(),
            score: snap.score,
            level: snap.level,
            lines: snap.lines,
            fall_interval_ms: snap.fall_interval_ms,
            current: snap.current.as_ref().map(PieceObservation::from),
            ghost_y: snap.ghost_y,
            next: snap.next.map(|p| p.kind.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryObservation {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub steps: u64,
    pub ts: u64,
    pub seed: u32,
    pub state: &'static str,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// Top row first; `.` is empty, otherwise the locked piece's letter.
    pub board: Vec<String>,
}

impl SummaryObservation {
    pub fn new(steps: u64, ts: u64, seed: u32, snap: &GameSnapshot) -> Self {
        Self {
            msg_type: ObservationType::Summary,
            steps,
            ts,
            seed,
            state: state_of(snap).as_str(),
            score: snap.score,
            level: snap.level,
            lines: snap.lines,
            board: board_rows(snap),
        }
    }
}

pub fn state_of(snap: &GameSnapshot) -> SessionState {
    if snap.game_over {
        SessionState::GameOver
    } else if snap.paused {
        SessionState::Paused
    } else {
        SessionState::Running
    }
}

pub fn board_rows(snap: &GameSnapshot) -> Vec<String> {
    snap.board
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.map_or('.', |kind| kind.as_str().chars().next().unwrap_or('?')))
                .collect()
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessConfig {
    pub seed: u32,
    pub steps: u64,
    /// Applied in a loop, one every `every` steps.
    pub actions: Vec<GameAction>,
    pub every: u64,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            steps: 1000,
            actions: Vec::new(),
            every: 10,
        }
    }
}

/// Run a session for `config.steps` steps of `TICK_MS` each, stopping early
/// on game over.
pub fn run_headless<W: Write>(config: &HeadlessConfig, out: &mut W) -> Result<SummaryObservation> {
    let session = SessionConfig {
        seed: config.seed,
        ..SessionConfig::default()
    };
    let mut game = GameSession::new(session, 0);
    run_session(&mut game, config, out)
}

/// Same as [`run_headless`] but for a session the caller built.
pub fn run_session<W: Write>(
    game: &mut GameSession,
    config: &HeadlessConfig,
    out: &mut W,
) -> Result<SummaryObservation> {
    let mut snap = GameSnapshot::default();
    let mut script = config.actions.iter().copied().cycle();
    let mut steps = 0;
    let mut now = 0;

    for step in 1..=config.steps {
        steps = step;
        now = step * TICK_MS as u64;

        if config.every > 0 && step % config.every == 0 {
            if let Some(action) = script.next() {
                game.apply_action(action, now);
            }
        }
        game.tick(now);

        let signals = game.take_signals();
        if signals.is_empty() {
            continue;
        }
        game.snapshot_into(&mut snap);
        write_line(out, &StepObservation::new(step, now, &snap, &signals))?;

        if game.is_game_over() {
            break;
        }
    }

    game.snapshot_into(&mut snap);
    let summary = SummaryObservation::new(steps, now, game.seed(), &snap);
    write_line(out, &summary)?;
    Ok(summary)
}

fn write_line<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}
