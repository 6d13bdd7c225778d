//! Sound playback on the default output device through rodio.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::assets::SoundEffect;
use crate::player::Player;

const MUSIC_VOLUME: f32 = 0.5;

/// Default output device via rodio.
///
/// Effects are read once and kept in memory; music streams from disk.
pub struct RodioPlayer {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    effects: HashMap<SoundEffect, Arc<[u8]>>,
    music: Option<Sink>,
}

impl RodioPlayer {
    pub fn try_new() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            effects: HashMap::new(),
            music: None,
        })
    }

    fn effect_bytes(&mut self, effect: SoundEffect, path: &Path) -> Result<Arc<[u8]>> {
        if let Some(bytes) = self.effects.get(&effect) {
            return Ok(Arc::clone(bytes));
        }
        let bytes: Arc<[u8]> = std::fs::read(path)
            .with_context(|| format!("reading {}", path.display()))?
            .into();
        self.effects.insert(effect, Arc::clone(&bytes));
        Ok(bytes)
    }
}

impl Player for RodioPlayer {
    fn play_effect(&mut self, effect: SoundEffect, path: &Path) -> Result<()> {
        let bytes = self.effect_bytes(effect, path)?;
        let source = Decoder::new(Cursor::new(bytes))?;
        let sink = Sink::try_new(&self.handle)?;
        sink.append(source);
        sink.detach();
        Ok(())
    }

    fn start_music(&mut self, path: &Path) -> Result<()> {
        self.stop_music();
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let source = Decoder::new(BufReader::new(file))?.repeat_infinite();
        let sink = Sink::try_new(&self.handle)?;
        sink.set_volume(MUSIC_VOLUME);
        sink.append(source);
        self.music = Some(sink);
        Ok(())
    }

    fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
        }
    }
}
