use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::audio::{AudioBackend, SoundManager};
use crate::config::UiConfig;
use crate::error::GameResult;
use crate::events::GameEvent;
use crate::formatter;
use crate::game::GameController;
use crate::render::RenderSurface;
use crate::scene::{SceneContext, SceneId, SceneManager};
use crate::texture::sprite::SpriteSheet;

#[cfg(not(target_os = "emscripten"))]
fn sleep(value: Duration) {
    spin_sleep::sleep(value);
}

#[cfg(target_os = "emscripten")]
fn sleep(value: Duration) {
    std::thread::sleep(value);
}

/// Paces the tick loop at a fixed frame rate.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_time: Duration,
    frame_start: Instant,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame_time: Duration::from_secs(1) / target_fps.max(1),
            frame_start: Instant::now(),
        }
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Sleeps out the rest of the current frame and starts the next one.
    ///
    /// Returns how far the frame overran its budget, zero when on schedule.
    pub fn wait(&mut self) -> Duration {
        let elapsed = self.frame_start.elapsed();
        let overrun = elapsed.saturating_sub(self.frame_time);
        if overrun.is_zero() {
            sleep(self.frame_time - elapsed);
        } else {
            warn!(behind = ?overrun, "Tick loop behind schedule");
        }
        self.frame_start = Instant::now();
        overrun
    }
}

/// The front-end as a whole: scenes, sounds and sprites, driven one tick at a time by the
/// host loop.
pub struct PacManGameUi {
    scenes: SceneManager,
    sounds: SoundManager,
    sprites: Box<dyn SpriteSheet>,
    config: UiConfig,
}

impl PacManGameUi {
    pub fn new(config: UiConfig, sprites: Box<dyn SpriteSheet>, audio: Box<dyn AudioBackend>) -> Self {
        Self::with_scenes(config, sprites, audio, SceneManager::with_default_scenes())
    }

    pub fn with_scenes(
        config: UiConfig,
        sprites: Box<dyn SpriteSheet>,
        audio: Box<dyn AudioBackend>,
        scenes: SceneManager,
    ) -> Self {
        let mut sounds = SoundManager::new(audio);
        sounds.set_silent(config.muted);
        info!(variant = config.variant.as_ref(), muted = config.muted, "Game UI created");
        Self {
            scenes,
            sounds,
            sprites,
            config,
        }
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn sounds(&self) -> &SoundManager {
        &self.sounds
    }

    pub fn sounds_mut(&mut self) -> &mut SoundManager {
        &mut self.sounds
    }

    pub fn current_scene(&self) -> Option<SceneId> {
        self.scenes.current_id()
    }

    /// One UI tick: the events raised since the last tick (which may switch scenes), then
    /// the current scene's update, then rendering.
    pub fn tick(
        &mut self,
        controller: &mut dyn GameController,
        events: &[GameEvent],
        ticks: u32,
        surface: &mut dyn RenderSurface,
    ) -> GameResult<()> {
        let mut ctx = SceneContext {
            controller,
            sounds: &mut self.sounds,
            sprites: self.sprites.as_ref(),
            config: &self.config,
        };

        if self.scenes.current_id().is_none() {
            let state = ctx.game().state;
            debug!(state = state.as_ref(), "Selecting first scene");
            self.scenes.update_scene(&mut ctx, state, false)?;
        }
        for &event in events {
            self.scenes.on_game_event(&mut ctx, event)?;
        }
        self.scenes.update(&mut ctx, ticks)?;

        let game = ctx.controller.game();
        self.scenes.render(game, self.sprites.as_ref(), surface)?;
        formatter::increment_tick();
        Ok(())
    }

    pub fn restart_intro(&mut self, controller: &mut dyn GameController) -> GameResult<()> {
        let mut ctx = SceneContext {
            controller,
            sounds: &mut self.sounds,
            sprites: self.sprites.as_ref(),
            config: &self.config,
        };
        self.scenes.restart_intro(&mut ctx)
    }
}
