//! Playback backends.

use std::path::Path;

use anyhow::Result;

use crate::assets::SoundEffect;

/// A sound output device.
///
/// Implementations report failures; [`crate::SoundManager`] decides to drop them.
pub trait Player {
    fn play_effect(&mut self, effect: SoundEffect, path: &Path) -> Result<()>;

    /// Start looping `path`, replacing any music already playing.
    fn start_music(&mut self, path: &Path) -> Result<()>;

    fn stop_music(&mut self);
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn play_effect(&mut self, effect: SoundEffect, path: &Path) -> Result<()> {
        (**self).play_effect(effect, path)
    }

    fn start_music(&mut self, path: &Path) -> Result<()> {
        (**self).start_music(path)
    }

    fn stop_music(&mut self) {
        (**self).stop_music()
    }
}

/// Plays nothing. Used when muted or when no audio device is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Player for Silent {
    fn play_effect(&mut self, _effect: SoundEffect, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn start_music(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn stop_music(&mut self) {}
}
