//! Blockfall terminal runner (default binary).
//!
//! Interactive play in the terminal by default; `headless` runs a simulated
//! session and prints JSON lines instead.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::audio::{self, Player, SoundManager};
use blockfall::core::{GameSession, GameSnapshot, SessionConfig};
use blockfall::input::{should_quit, KeyRepeat};
use blockfall::observe::{run_headless, HeadlessConfig};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, Signal, TICK_MS};

#[derive(Parser, Debug)]
#[command(name = "blockfall", version, about = "Terminal falling-block puzzle game")]
struct Cli {
    /// Seed for the piece randomizer (defaults to the system clock)
    #[arg(long, global = true)]
    seed: Option<u32>,

    /// Directory holding the sound effects and music
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Disable audio
    #[arg(long)]
    mute: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a simulated session without a terminal, printing JSON lines
    Headless {
        /// Number of simulated steps of 16ms each
        #[arg(long, default_value_t = 1000)]
        steps: u64,

        /// Comma-separated actions applied in a loop (e.g. moveLeft,rotate,softDrop)
        #[arg(long, value_delimiter = ',', value_parser = parse_action)]
        actions: Vec<GameAction>,

        /// Steps between scripted actions
        #[arg(long, default_value_t = 10)]
        every: u64,
    },
}

fn parse_action(s: &str) -> Result<GameAction, String> {
    GameAction::from_str(s.trim()).ok_or_else(|| format!("unknown action: {s}"))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(clock_seed);

    match cli.command {
        Some(Command::Headless {
            steps,
            actions,
            every,
        }) => {
            let config = HeadlessConfig {
                seed,
                steps,
                actions,
                every,
            };
            run_headless(&config, &mut io::stdout().lock())?;
            Ok(())
        }
        None => {
            // Open audio first so its warnings land on the normal screen.
            let mut sound = audio::open(&cli.assets, cli.mute);

            let mut term = TerminalRenderer::new();
            term.enter()?;

            let result = run(&mut term, &mut sound, seed);

            // Always try to restore terminal state.
            let _ = term.exit();
            result
        }
    }
}

fn run(
    term: &mut TerminalRenderer,
    sound: &mut SoundManager<Box<dyn Player>>,
    seed: u32,
) -> Result<()> {
    let start = Instant::now();
    let now_ms = || start.elapsed().as_millis() as u64;

    let config = SessionConfig {
        seed,
        ..SessionConfig::default()
    };
    let mut game = GameSession::new(config, now_ms());

    let view = GameView::default();
    let mut keys = KeyRepeat::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        sound.handle_all(game.take_signals());

        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            sound.handle(Signal::MusicStop);
                            return Ok(());
                        }
                        if let Some(action) = keys.handle_key_press(key.code) {
                            game.apply_action(action, now_ms());
                        }
                    }
                    // Held keys repeat through `KeyRepeat`.
                    KeyEventKind::Repeat => {}
                    KeyEventKind::Release => keys.handle_key_release(key.code),
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            let elapsed = last_tick.elapsed().as_millis() as u32;
            last_tick = Instant::now();

            let now = now_ms();
            for action in keys.update(elapsed) {
                game.apply_action(action, now);
            }
            game.tick(now);
        }
    }
}
