use glam::IVec2;

use crate::constants::{t, sec_to_ticks};
use crate::error::GameResult;
use crate::game::GameModel;
use crate::render::{self, Color, Font, RenderSurface};
use crate::scene::{GameScene, SceneContext};
use crate::texture::sprite::SpriteSheet;

/// The power-on screen: blank, then the score line once the self-test is "done".
#[derive(Debug, Default)]
pub struct BootScene {
    ticks: u64,
}

impl GameScene for BootScene {
    fn name(&self) -> &'static str {
        "boot"
    }

    fn init(&mut self, ctx: &mut SceneContext<'_>) -> GameResult<()> {
        self.ticks = 0;
        ctx.sounds.stop_all();
        Ok(())
    }

    fn update(&mut self, _ctx: &mut SceneContext<'_>, ticks: u32) -> GameResult<()> {
        self.ticks += ticks as u64;
        Ok(())
    }

    fn render(&self, game: &GameModel, _sprites: &dyn SpriteSheet, surface: &mut dyn RenderSurface) -> GameResult<()> {
        surface.clear(Color::BLACK)?;
        if self.ticks < sec_to_ticks(1) / 2 {
            return Ok(());
        }
        render::draw_scores(surface, game, true)?;
        surface.draw_text("MEMORY  OK", Color::PALE, Font::Arcade, IVec2::new(t(8), t(18)))?;
        Ok(())
    }
}
