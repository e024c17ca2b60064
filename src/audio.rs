//! This module decides when audio clips play; the device itself sits behind [`AudioBackend`].
use smallvec::SmallVec;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
pub enum Sound {
    BonusEaten,
    ExtraLife,
    GameReady,
    GhostEaten,
    GhostReturning,
    Intermission1,
    Intermission2,
    Intermission3,
    PacmanDeath,
    PacmanMunch,
    PacmanPower,
    Siren1,
    Siren2,
    Siren3,
    Siren4,
}

impl Sound {
    pub const SIRENS: [Sound; 4] = [Sound::Siren1, Sound::Siren2, Sound::Siren3, Sound::Siren4];

    /// The siren of a scatter phase (0-based).
    pub fn siren(index: u8) -> Option<Sound> {
        Self::SIRENS.get(index as usize).copied()
    }

    /// The music of an intermission (1-based).
    pub fn intermission(number: u8) -> Option<Sound> {
        match number {
            1 => Some(Sound::Intermission1),
            2 => Some(Sound::Intermission2),
            3 => Some(Sound::Intermission3),
            _ => None,
        }
    }
}

/// How often a looped clip plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loop {
    Times(u32),
    Forever,
}

/// An audio device able to play the game's clips.
pub trait AudioBackend {
    fn play(&mut self, sound: Sound);

    fn play_looped(&mut self, sound: Sound, repeat: Loop);

    fn stop(&mut self, sound: Sound);

    fn stop_all(&mut self);

    fn is_playing(&self, sound: Sound) -> bool;
}

/// A backend for when there is no audio device.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn play(&mut self, _sound: Sound) {}

    fn play_looped(&mut self, _sound: Sound, _repeat: Loop) {}

    fn stop(&mut self, _sound: Sound) {}

    fn stop_all(&mut self) {}

    fn is_playing(&self, _sound: Sound) -> bool {
        false
    }
}

/// Front for an [`AudioBackend`] that honors mute and silent modes and remembers the loops
/// it started, so a scene can stop them when it ends.
///
/// Muting is driven by the game (attract mode), silence by the player. Either one stops
/// everything that is playing and suppresses any later playback.
pub struct SoundManager {
    backend: Box<dyn AudioBackend>,
    muted: bool,
    silent: bool,
    active_loops: SmallVec<[Sound; 4]>,
}

impl std::fmt::Debug for SoundManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundManager")
            .field("muted", &self.muted)
            .field("silent", &self.silent)
            .field("active_loops", &self.active_loops)
            .finish_non_exhaustive()
    }
}

impl Default for SoundManager {
    fn default() -> Self {
        Self::new(Box::new(NullAudio))
    }
}

impl SoundManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            muted: false,
            silent: false,
            active_loops: SmallVec::new(),
        }
    }

    fn is_audible(&self) -> bool {
        !self.muted && !self.silent
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        if self.muted != muted {
            debug!(muted, "Sound mute changed");
        }
        self.muted = muted;
        if muted {
            self.stop_all();
        }
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn set_silent(&mut self, silent: bool) {
        self.silent = silent;
        if silent {
            self.stop_all();
        }
    }

    /// Plays a clip once.
    pub fn play(&mut self, sound: Sound) {
        if !self.is_audible() {
            trace!(sound = sound.as_ref(), "Skipping clip while muted");
            return;
        }
        trace!(sound = sound.as_ref(), "Playing clip");
        self.backend.play(sound);
    }

    /// Plays a clip repeatedly and tracks it as an active loop.
    pub fn play_looped(&mut self, sound: Sound, repeat: Loop) {
        if !self.is_audible() {
            trace!(sound = sound.as_ref(), "Skipping loop while muted");
            return;
        }
        if let Loop::Times(0) = repeat {
            warn!(sound = sound.as_ref(), "Ignoring loop with zero repetitions");
            return;
        }
        trace!(sound = sound.as_ref(), ?repeat, "Looping clip");
        self.backend.play_looped(sound, repeat);
        if !self.active_loops.contains(&sound) {
            self.active_loops.push(sound);
        }
    }

    pub fn ensure_playing(&mut self, sound: Sound) {
        if !self.is_playing(sound) {
            self.play(sound);
        }
    }

    pub fn ensure_loop(&mut self, sound: Sound, repeat: Loop) {
        if !self.is_playing(sound) {
            self.play_looped(sound, repeat);
        }
    }

    pub fn stop(&mut self, sound: Sound) {
        self.backend.stop(sound);
        self.active_loops.retain(|s| *s != sound);
    }

    pub fn stop_all(&mut self) {
        self.backend.stop_all();
        self.active_loops.clear();
    }

    /// Stops every loop started through this manager, leaving one-shot clips alone.
    pub fn stop_loops(&mut self) {
        for sound in std::mem::take(&mut self.active_loops) {
            self.backend.stop(sound);
        }
    }

    pub fn is_playing(&self, sound: Sound) -> bool {
        self.backend.is_playing(sound)
    }

    pub fn active_loops(&self) -> &[Sound] {
        &self.active_loops
    }

    /// Stops any siren and loops the one for `index`.
    pub fn start_siren(&mut self, index: u8) {
        let Some(siren) = Sound::siren(index) else {
            warn!(index, "No siren for scatter phase");
            return;
        };
        self.stop_sirens();
        self.play_looped(siren, Loop::Forever);
        debug!(siren = siren.as_ref(), "Siren started");
    }

    /// Starts the siren for `index` unless some siren is already wailing.
    pub fn ensure_siren_started(&mut self, index: u8) {
        if !Sound::SIRENS.iter().any(|s| self.is_playing(*s)) {
            self.start_siren(index);
        }
    }

    pub fn stop_sirens(&mut self) {
        for siren in Sound::SIRENS {
            if self.is_playing(siren) {
                self.stop(siren);
                debug!(siren = siren.as_ref(), "Siren stopped");
            }
        }
    }

    /// Every clip currently audible, for diagnostics.
    pub fn playing(&self) -> impl Iterator<Item = Sound> + '_ {
        Sound::iter().filter(|s| self.is_playing(*s))
    }
}
