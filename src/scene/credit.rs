use glam::{IVec2, Vec2};

use crate::constants::{t, HTS};
use crate::entity::{Direction, GhostId};
use crate::error::GameResult;
use crate::game::{GameModel, GameVariant};
use crate::render::{self, Color, Font, RenderSurface};
use crate::scene::GameScene;
use crate::texture::sprite::{SpriteKey, SpriteSheet};

/// "PUSH START BUTTON" after a coin went in.
#[derive(Debug, Default)]
pub struct CreditScene;

impl GameScene for CreditScene {
    fn name(&self) -> &'static str {
        "credit"
    }

    fn render(&self, game: &GameModel, sprites: &dyn SpriteSheet, surface: &mut dyn RenderSurface) -> GameResult<()> {
        surface.clear(Color::BLACK)?;
        render::draw_scores(surface, game, true)?;

        match game.variant {
            GameVariant::PacMan => {
                let orange = sprites.ghost_color(GhostId::Clyde);
                let cyan = sprites.ghost_color(GhostId::Inky);
                surface.draw_text("PUSH START BUTTON", orange, Font::Arcade, IVec2::new(t(6), t(17)))?;
                surface.draw_text("1 PLAYER ONLY", cyan, Font::Arcade, IVec2::new(t(8), t(21)))?;
                surface.draw_text("BONUS PAC-MAN FOR 10000", Color::PINK, Font::Arcade, IVec2::new(t(1), t(25)))?;
                surface.draw_text("PTS", Color::PINK, Font::ArcadeSmall, IVec2::new(t(25), t(25)))?;
                render::draw_copyright(surface, game.variant, IVec2::new(t(4), t(29)))?;
                render::draw_level_counter(surface, sprites, &game.level_counter)?;
            }
            GameVariant::MsPacMan => {
                let orange = sprites.ghost_color(GhostId::Clyde);
                surface.draw_text("PUSH START BUTTON", orange, Font::Arcade, IVec2::new(t(6), t(16)))?;
                surface.draw_text("1 PLAYER ONLY", orange, Font::Arcade, IVec2::new(t(8), t(18)))?;
                surface.draw_text("ADDITIONAL    AT 10000", orange, Font::Arcade, IVec2::new(t(2), t(25)))?;
                let icon = sprites.sprite(SpriteKey::PacMunching(Direction::Right), 0)?;
                render::draw_sprite_centered(surface, icon, Vec2::new((t(13) + HTS) as f32, (t(24) - 2) as f32))?;
                surface.draw_text("PTS", orange, Font::ArcadeSmall, IVec2::new(t(25), t(25)))?;
                render::draw_copyright(surface, game.variant, IVec2::new(t(6), t(28)))?;
            }
        }

        render::draw_credit(surface, game.credit)
    }
}
