//! Key-repeat handling for held keys.
//!
//! A press emits its action right away. While a movement, soft-drop or rotate
//! key stays held, the action repeats every `interval` after an initial
//! `delay`. Terminals that never report key releases are handled with a
//! timeout since the last press of a held key, and presses arriving slower
//! than terminal auto-repeat count as new taps.

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::map::action_for_code;
use crate::types::{GameAction, KEY_REPEAT_DELAY_MS, KEY_REPEAT_INTERVAL_MS};

/// Maximum repeats produced by a single [`KeyRepeat::update`].
pub const MAX_REPEATS_PER_UPDATE: usize = 32;

// Without release events a short timeout keeps one tap from turning into a
// sustained hold. It must stay below the repeat delay so a single tap never
// repeats.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

// Terminal auto-repeat sends presses of a held key every 30-40ms. A longer gap
// between two presses of the same key is a second tap.
const AUTOREPEAT_MAX_GAP_MS: u32 = 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HeldKey {
    action: Option<GameAction>,
    held_ms: u32,
    repeat_acc_ms: u32,
    since_press_ms: u32,
}

impl HeldKey {
    /// Returns the action on a fresh press, `None` for terminal auto-repeat of
    /// the held key.
    fn press(&mut self, action: GameAction) -> Option<GameAction> {
        if self.action == Some(action) && self.since_press_ms <= AUTOREPEAT_MAX_GAP_MS {
            self.since_press_ms = 0;
            return None;
        }
        *self = Self {
            action: Some(action),
            ..Self::default()
        };
        Some(action)
    }

    fn release_if(&mut self, action: GameAction) {
        if self.action == Some(action) {
            *self = Self::default();
        }
    }

    fn advance(
        &mut self,
        elapsed_ms: u32,
        timing: &KeyTiming,
        out: &mut ArrayVec<GameAction, MAX_REPEATS_PER_UPDATE>,
    ) {
        let Some(action) = self.action else {
            return;
        };

        self.since_press_ms = self.since_press_ms.saturating_add(elapsed_ms);
        if self.since_press_ms > timing.release_timeout_ms {
            *self = Self::default();
            return;
        }

        let prev = self.held_ms;
        self.held_ms = self.held_ms.saturating_add(elapsed_ms);
        if self.held_ms < timing.delay_ms {
            return;
        }

        let excess = if prev < timing.delay_ms {
            self.held_ms - timing.delay_ms
        } else {
            elapsed_ms
        };
        self.repeat_acc_ms = self.repeat_acc_ms.saturating_add(excess);

        while self.repeat_acc_ms >= timing.interval_ms {
            let _ = out.try_push(action);
            self.repeat_acc_ms -= timing.interval_ms;
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct KeyTiming {
    delay_ms: u32,
    interval_ms: u32,
    release_timeout_ms: u32,
}

/// Tracks held keys and turns them into repeated actions.
#[derive(Debug, Clone)]
pub struct KeyRepeat {
    horizontal: HeldKey,
    down: HeldKey,
    rotate: HeldKey,
    timing: KeyTiming,
}

impl KeyRepeat {
    pub fn new() -> Self {
        Self::with_config(KEY_REPEAT_DELAY_MS, KEY_REPEAT_INTERVAL_MS)
    }

    pub fn with_config(delay_ms: u32, interval_ms: u32) -> Self {
        Self {
            horizontal: HeldKey::default(),
            down: HeldKey::default(),
            rotate: HeldKey::default(),
            timing: KeyTiming {
                delay_ms,
                interval_ms: interval_ms.max(1),
                release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            },
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timing.release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.timing.release_timeout_ms
    }

    fn slot(&mut self, action: GameAction) -> Option<&mut HeldKey> {
        match action {
            GameAction::MoveLeft | GameAction::MoveRight => Some(&mut self.horizontal),
            GameAction::SoftDrop => Some(&mut self.down),
            GameAction::Rotate => Some(&mut self.rotate),
            GameAction::TogglePause | GameAction::Reset => None,
        }
    }

    /// Handle a key press. Returns the action to apply now, if any.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let action = action_for_code(code)?;
        match self.slot(action) {
            Some(held) => held.press(action),
            None => Some(action),
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        let Some(action) = action_for_code(code) else {
            return;
        };
        if let Some(held) = self.slot(action) {
            held.release_if(action);
        }
    }

    /// Advance held keys by `elapsed_ms` and collect due repeats.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, MAX_REPEATS_PER_UPDATE> {
        let mut actions = ArrayVec::new();
        let timing = self.timing;
        self.horizontal.advance(elapsed_ms, &timing, &mut actions);
        self.down.advance(elapsed_ms, &timing, &mut actions);
        self.rotate.advance(elapsed_ms, &timing, &mut actions);
        actions
    }

    pub fn reset(&mut self) {
        self.horizontal = HeldKey::default();
        self.down = HeldKey::default();
        self.rotate = HeldKey::default();
    }
}

impl Default for KeyRepeat {
    fn default() -> Self {
        Self::new()
    }
}
