//! Sound asset discovery.

use std::path::{Path, PathBuf};

use crate::types::Signal;

/// Looked up in order; the first one present is used as the music loop.
pub const MUSIC_CANDIDATES: [&str; 3] = ["music.ogg", "music.mp3", "music.wav"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Move,
    Rotate,
    Drop,
    Clear,
    GameOver,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 5] = [
        SoundEffect::Move,
        SoundEffect::Rotate,
        SoundEffect::Drop,
        SoundEffect::Clear,
        SoundEffect::GameOver,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SoundEffect::Move => "move.wav",
            SoundEffect::Rotate => "rotate.wav",
            SoundEffect::Drop => "drop.wav",
            SoundEffect::Clear => "clear.wav",
            SoundEffect::GameOver => "gameover.wav",
        }
    }

    /// The effect a session signal plays. Music signals have none.
    pub fn for_signal(signal: Signal) -> Option<Self> {
        match signal {
            Signal::Move => Some(SoundEffect::Move),
            Signal::Rotate => Some(SoundEffect::Rotate),
            Signal::Drop => Some(SoundEffect::Drop),
            Signal::Clear => Some(SoundEffect::Clear),
            Signal::GameOver => Some(SoundEffect::GameOver),
            Signal::MusicStart | Signal::MusicStop => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Which sound files exist under an assets directory.
///
/// Discovery never fails: anything missing is recorded as a warning and
/// later skipped at playback.
#[derive(Debug, Clone, Default)]
pub struct SoundAssets {
    effects: [Option<PathBuf>; 5],
    music: Option<PathBuf>,
    warnings: Vec<String>,
}

impl SoundAssets {
    pub fn discover(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut assets = Self::default();

        for effect in SoundEffect::ALL {
            let path = dir.join(effect.file_name());
            if path.is_file() {
                assets.effects[effect.index()] = Some(path);
            } else {
                assets
                    .warnings
                    .push(format!("sound file not found: {}", path.display()));
            }
        }

        assets.music = MUSIC_CANDIDATES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file());
        if assets.music.is_none() {
            assets.warnings.push(format!(
                "no music file found in {} ({})",
                dir.display(),
                MUSIC_CANDIDATES.join(", ")
            ));
        }

        assets
    }

    pub fn effect(&self, effect: SoundEffect) -> Option<&Path> {
        self.effects[effect.index()].as_deref()
    }

    pub fn music(&self) -> Option<&Path> {
        self.music.as_deref()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
