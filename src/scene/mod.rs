//! Scenes: one presentation unit per high-level game state.
//!
//! A scene owns the animation sets of everything it draws and the timers that only matter
//! on screen. It never decides when it is shown; the [`manager::SceneManager`] switches scenes
//! in reaction to the controller's state changes.
//!
//! Per tick a scene sees events first, then [`GameScene::update`] where every animation is
//! advanced, then [`GameScene::render`] which only reads.

pub mod boot;
pub mod credit;
pub mod intermission;
pub mod intro;
pub mod manager;
pub mod play;

use crate::audio::SoundManager;
use crate::config::UiConfig;
use crate::error::GameResult;
use crate::events::{GameEvent, GameStateChange};
use crate::game::{GameController, GameModel};
use crate::render::RenderSurface;
use crate::texture::sprite::SpriteSheet;

pub use boot::BootScene;
pub use credit::CreditScene;
pub use intermission::IntermissionScene;
pub use intro::IntroScene;
pub use manager::{SceneId, SceneManager};
pub use play::PlayScene;

/// Collaborators a scene may use while it is current.
pub struct SceneContext<'a> {
    pub controller: &'a mut dyn GameController,
    pub sounds: &'a mut SoundManager,
    pub sprites: &'a dyn SpriteSheet,
    pub config: &'a UiConfig,
}

impl SceneContext<'_> {
    pub fn game(&self) -> &GameModel {
        self.controller.game()
    }
}

pub trait GameScene {
    fn name(&self) -> &'static str;

    /// Binds the scene to the current game; animation sets are (re)built here.
    fn set_context(&mut self, _ctx: &mut SceneContext<'_>) -> GameResult<()> {
        Ok(())
    }

    /// Called each time the scene becomes current.
    fn init(&mut self, _ctx: &mut SceneContext<'_>) -> GameResult<()> {
        Ok(())
    }

    fn update(&mut self, _ctx: &mut SceneContext<'_>, _ticks: u32) -> GameResult<()> {
        Ok(())
    }

    /// Called when another scene takes over. Loops started while current must not outlive it.
    fn end(&mut self, ctx: &mut SceneContext<'_>) {
        ctx.sounds.stop_loops();
    }

    fn on_game_state_change(&mut self, _ctx: &mut SceneContext<'_>, _change: GameStateChange) -> GameResult<()> {
        Ok(())
    }

    fn on_game_event(&mut self, ctx: &mut SceneContext<'_>, event: GameEvent) -> GameResult<()> {
        match event {
            GameEvent::StateChange(change) => self.on_game_state_change(ctx, change),
            _ => Ok(()),
        }
    }

    fn render(&self, game: &GameModel, sprites: &dyn SpriteSheet, surface: &mut dyn RenderSurface) -> GameResult<()>;
}
