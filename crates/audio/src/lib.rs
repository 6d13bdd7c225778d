//! Sound collaborator for blockfall.
//!
//! Plays the effect matching each [`types::Signal`] and loops background
//! music between `MusicStart` and `MusicStop`. Audio is strictly optional:
//! without the `rodio` feature, or when no output device opens, everything
//! routes to [`Silent`].

pub mod assets;
pub mod manager;
pub mod player;
#[cfg(feature = "rodio")]
pub mod rodio_player;

use std::path::Path;

pub use blockfall_types as types;

pub use assets::{SoundAssets, SoundEffect, MUSIC_CANDIDATES};
pub use manager::SoundManager;
pub use player::{Player, Silent};
#[cfg(feature = "rodio")]
pub use rodio_player::RodioPlayer;

/// Open the best available backend for `assets_dir`.
///
/// Never fails; a device error is reported once and audio stays silent.
pub fn open(assets_dir: &Path, mute: bool) -> SoundManager<Box<dyn Player>> {
    if mute {
        return SoundManager::new(Box::new(Silent), SoundAssets::default());
    }
    match open_device() {
        Ok(player) => SoundManager::new(player, SoundAssets::discover(assets_dir)),
        Err(err) => {
            eprintln!("warning: audio disabled: {err}");
            SoundManager::new(Box::new(Silent), SoundAssets::default())
        }
    }
}

#[cfg(feature = "rodio")]
fn open_device() -> anyhow::Result<Box<dyn Player>> {
    Ok(Box::new(RodioPlayer::try_new()?))
}

#[cfg(not(feature = "rodio"))]
fn open_device() -> anyhow::Result<Box<dyn Player>> {
    anyhow::bail!("built without the `rodio` feature")
}
