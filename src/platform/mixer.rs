use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Result};
use sdl2::mixer::{self, Channel, Chunk, InitFlag, Sdl2MixerContext, DEFAULT_FORMAT};
use strum::IntoEnumIterator;
use tracing::{trace, warn};

use crate::audio::{AudioBackend, Loop, Sound};

const FREQUENCY: i32 = 44100;
const CHANNELS: i32 = 8;
/// 256 is the minimum on emscripten.
const CHUNK_SIZE: i32 = 256;
const VOLUME: i32 = 48;

/// Plays clips through SDL2_mixer, one channel per playing clip.
pub struct SdlAudio {
    _context: Sdl2MixerContext,
    chunks: HashMap<Sound, Chunk>,
    channels: HashMap<Sound, Channel>,
}

impl SdlAudio {
    /// Opens the audio device and loads `<dir>/<Sound>.ogg` for every clip. Missing clips
    /// are skipped with a warning and stay silent.
    pub fn new(dir: &Path) -> Result<Self> {
        mixer::open_audio(FREQUENCY, DEFAULT_FORMAT, 1, CHUNK_SIZE).map_err(|e| anyhow!(e))?;
        mixer::allocate_channels(CHANNELS);
        Channel::all().set_volume(VOLUME);
        let context = mixer::init(InitFlag::OGG).map_err(|e| anyhow!(e))?;

        let mut chunks = HashMap::new();
        for sound in Sound::iter() {
            let path = dir.join(format!("{}.ogg", sound.as_ref()));
            match Chunk::from_file(&path) {
                Ok(chunk) => {
                    chunks.insert(sound, chunk);
                }
                Err(e) => warn!(sound = sound.as_ref(), path = %path.display(), error = %e, "Could not load clip"),
            }
        }

        Ok(Self {
            _context: context,
            chunks,
            channels: HashMap::new(),
        })
    }

    fn start(&mut self, sound: Sound, loops: i32) {
        let Some(chunk) = self.chunks.get(&sound) else {
            return;
        };
        match Channel::all().play(chunk, loops) {
            Ok(channel) => {
                trace!(sound = sound.as_ref(), ?channel, "Clip started");
                self.channels.insert(sound, channel);
            }
            Err(e) => warn!(sound = sound.as_ref(), error = %e, "Could not play clip"),
        }
    }
}

impl AudioBackend for SdlAudio {
    fn play(&mut self, sound: Sound) {
        self.start(sound, 0);
    }

    fn play_looped(&mut self, sound: Sound, repeat: Loop) {
        // SDL counts extra plays, -1 meaning forever
        let loops = match repeat {
            Loop::Times(n) => n.saturating_sub(1) as i32,
            Loop::Forever => -1,
        };
        self.start(sound, loops);
    }

    fn stop(&mut self, sound: Sound) {
        if let Some(channel) = self.channels.remove(&sound) {
            channel.halt();
        }
    }

    fn stop_all(&mut self) {
        Channel::all().halt();
        self.channels.clear();
    }

    fn is_playing(&self, sound: Sound) -> bool {
        self.channels.get(&sound).is_some_and(|c| c.is_playing())
    }
}
