//! Routes session signals to a [`Player`].

use crate::assets::{SoundAssets, SoundEffect};
use crate::player::Player;
use crate::types::Signal;

/// Turns [`Signal`]s into effect and music playback.
///
/// Every failure degrades to silence: missing files are skipped and
/// backend errors are dropped.
pub struct SoundManager<P: Player> {
    player: P,
    assets: SoundAssets,
    music_playing: bool,
}

impl<P: Player> SoundManager<P> {
    /// Reports each discovery warning once on stderr.
    pub fn new(player: P, assets: SoundAssets) -> Self {
        for warning in assets.warnings() {
            eprintln!("warning: {warning}");
        }
        Self {
            player,
            assets,
            music_playing: false,
        }
    }

    pub fn handle(&mut self, signal: Signal) {
        match signal {
            Signal::MusicStart => self.start_music(),
            Signal::MusicStop => self.stop_music(),
            other => {
                let Some(effect) = SoundEffect::for_signal(other) else {
                    return;
                };
                if let Some(path) = self.assets.effect(effect) {
                    let _ = self.player.play_effect(effect, path);
                }
            }
        }
    }

    pub fn handle_all(&mut self, signals: impl IntoIterator<Item = Signal>) {
        for signal in signals {
            self.handle(signal);
        }
    }

    fn start_music(&mut self) {
        let Some(path) = self.assets.music() else {
            return;
        };
        self.music_playing = self.player.start_music(path).is_ok();
    }

    fn stop_music(&mut self) {
        if self.music_playing {
            self.player.stop_music();
            self.music_playing = false;
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn assets(&self) -> &SoundAssets {
        &self.assets
    }

    pub fn player(&self) -> &P {
        &self.player
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use anyhow::{bail, Result};

    use super::*;
    use crate::assets::tests::scratch_dir;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Played {
        Effect(SoundEffect),
        MusicStart(PathBuf),
        MusicStop,
    }

    #[derive(Default)]
    struct Recorder {
        played: Vec<Played>,
        fail: bool,
    }

    impl Player for Recorder {
        fn play_effect(&mut self, effect: SoundEffect, _path: &Path) -> Result<()> {
            if self.fail {
                bail!("device lost");
            }
            self.played.push(Played::Effect(effect));
            Ok(())
        }

        fn start_music(&mut self, path: &Path) -> Result<()> {
            if self.fail {
                bail!("device lost");
            }
            self.played.push(Played::MusicStart(path.to_path_buf()));
            Ok(())
        }

        fn stop_music(&mut self) {
            self.played.push(Played::MusicStop);
        }
    }

    fn full_assets(name: &str) -> (PathBuf, SoundAssets) {
        let dir = scratch_dir(name);
        for effect in SoundEffect::ALL {
            fs::write(dir.join(effect.file_name()), b"x").unwrap();
        }
        fs::write(dir.join("music.mp3"), b"x").unwrap();
        let assets = SoundAssets::discover(&dir);
        assert!(assets.warnings().is_empty());
        (dir, assets)
    }

    #[test]
    fn routes_signals_in_order() {
        let (dir, assets) = full_assets("routes");
        let mut sound = SoundManager::new(Recorder::default(), assets);

        sound.handle_all([
            Signal::MusicStart,
            Signal::Move,
            Signal::Drop,
            Signal::Clear,
            Signal::GameOver,
            Signal::MusicStop,
        ]);

        assert_eq!(
            sound.player().played,
            vec![
                Played::MusicStart(dir.join("music.mp3")),
                Played::Effect(SoundEffect::Move),
                Played::Effect(SoundEffect::Drop),
                Played::Effect(SoundEffect::Clear),
                Played::Effect(SoundEffect::GameOver),
                Played::MusicStop,
            ]
        );
        assert!(!sound.is_music_playing());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_assets_are_skipped() {
        let assets = SoundAssets::discover("/nonexistent/blockfall/assets");
        let mut sound = SoundManager::new(Recorder::default(), assets);

        sound.handle_all([Signal::MusicStart, Signal::Rotate, Signal::MusicStop]);
        assert!(sound.player().played.is_empty());
        assert!(!sound.is_music_playing());
    }

    #[test]
    fn backend_errors_are_swallowed() {
        let (dir, assets) = full_assets("errors");
        let recorder = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let mut sound = SoundManager::new(recorder, assets);

        sound.handle(Signal::MusicStart);
        sound.handle(Signal::Rotate);
        assert!(!sound.is_music_playing());

        // Stopping music that never started does not reach the player.
        sound.handle(Signal::MusicStop);
        assert!(sound.player().played.is_empty());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn boxed_silent_player() {
        let (dir, assets) = full_assets("silent");
        let player: Box<dyn Player> = Box::new(crate::Silent);
        let mut sound = SoundManager::new(player, assets);
        sound.handle(Signal::MusicStart);
        assert!(sound.is_music_playing());
        sound.handle(Signal::MusicStop);
        assert!(!sound.is_music_playing());
        let _ = fs::remove_dir_all(&dir);
    }
}
