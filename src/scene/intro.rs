use glam::{IVec2, UVec2, Vec2};
use tracing::debug;

use crate::animation::{GhostAnimationKey, GhostAnimations, PacAnimations};
use crate::constants::{t, sec_to_ticks, TS};
use crate::entity::{Direction, GhostId};
use crate::error::GameResult;
use crate::game::{GameModel, GameVariant, IntroPhase, IntroView, MarqueeView};
use crate::render::{self, Color, Font, RenderSurface};
use crate::scene::{GameScene, SceneContext};
use crate::texture::sprite::{SpriteKey, SpriteSheet};

/// Attract-mode intro of either variant.
///
/// Pac-Man presents the ghost gallery and a chase; Ms. Pac-Man parades her cast under a
/// blinking marquee. Movement and phases come from the controller's [`IntroView`].
#[derive(Debug, Default)]
pub struct IntroScene {
    pac: Option<PacAnimations>,
    ghosts: Vec<GhostAnimations>,
    last_phase: Option<IntroPhase>,
}

impl IntroScene {
    fn animate_actors(&mut self, intro: &IntroView, ticks: u32) -> GameResult<()> {
        if let Some(pac) = self.pac.as_mut() {
            pac.animate(&intro.pac, ticks)?;
        }

        for (anims, ghost) in self.ghosts.iter_mut().zip(intro.ghosts.iter()) {
            // Blue ghosts freeze in place while the chase pauses
            if intro.phase == IntroPhase::ChasingGhosts && ghost.bounty == 0 {
                let blue = anims.set_mut().require_mut(GhostAnimationKey::Blue)?;
                blue.ensure_running();
                if !ghost.actor.is_moving() {
                    blue.stop();
                }
            }
            anims.animate(ghost, ticks)?;
        }
        Ok(())
    }

    fn draw_hud(&self, game: &GameModel, sprites: &dyn SpriteSheet, surface: &mut dyn RenderSurface) -> GameResult<()> {
        render::draw_scores(surface, game, true)?;
        render::draw_credit(surface, game.credit)?;
        render::draw_level_counter(surface, sprites, &game.level_counter)
    }

    fn draw_guys(&self, intro: &IntroView, offset: i32, surface: &mut dyn RenderSurface) -> GameResult<()> {
        for (i, (anims, ghost)) in self.ghosts.iter().zip(intro.ghosts.iter()).enumerate() {
            let mut actor = ghost.actor;
            // Pinky and Inky jitter while the pack is chasing
            if i == 1 || i == 2 {
                actor.position.x += offset as f32;
            }
            render::draw_entity(surface, &actor, Some(anims.current_frame(ghost)?))?;
        }
        if let Some(pac) = &self.pac {
            render::draw_entity(surface, &intro.pac.actor, Some(pac.current_frame(&intro.pac)?))?;
        }
        Ok(())
    }

    fn draw_gallery(
        &self,
        intro: &IntroView,
        variant: GameVariant,
        sprites: &dyn SpriteSheet,
        surface: &mut dyn RenderSurface,
    ) -> GameResult<()> {
        surface.draw_text("CHARACTER", Color::PALE, Font::Arcade, IVec2::new(t(6), t(6)))?;
        surface.draw_text("/", Color::PALE, Font::Arcade, IVec2::new(t(16), t(6)))?;
        surface.draw_text("NICKNAME", Color::PALE, Font::Arcade, IVec2::new(t(18), t(6)))?;

        for (id, entry) in GhostId::ALL.into_iter().zip(intro.gallery.iter()) {
            if !entry.picture_visible {
                continue;
            }
            let tile_y = 7 + 3 * id.as_usize() as i32;
            let picture = sprites.sprite(SpriteKey::GhostColor(id, Direction::Right), 0)?;
            render::draw_sprite_centered(surface, picture, Vec2::new(t(3) as f32, t(tile_y) as f32))?;

            let color = sprites.ghost_color(id);
            if entry.character_visible {
                let text = format!("-{}", id.character());
                surface.draw_text(&text, color, Font::Arcade, IVec2::new(t(6), t(tile_y + 1)))?;
            }
            if entry.nickname_visible {
                let text = format!("\"{}\"", id.nickname(variant));
                surface.draw_text(&text, color, Font::Arcade, IVec2::new(t(17), t(tile_y + 1)))?;
            }
        }
        Ok(())
    }

    fn draw_points(
        &self,
        intro: &IntroView,
        tile: IVec2,
        sprites: &dyn SpriteSheet,
        surface: &mut dyn RenderSurface,
    ) -> GameResult<()> {
        let food = sprites.maze_food_color(1);
        surface.fill_rect(food, IVec2::new(t(tile.x) + 6, t(tile.y - 1) + 2), UVec2::splat(2))?;
        if intro.blinking_on {
            surface.fill_oval(food, IVec2::new(t(tile.x), t(tile.y + 1) - 2), UVec2::splat(10))?;
        }
        surface.draw_text("10", Color::PALE, Font::Arcade, IVec2::new(t(tile.x + 2), t(tile.y)))?;
        surface.draw_text("50", Color::PALE, Font::Arcade, IVec2::new(t(tile.x + 2), t(tile.y + 2)))?;
        surface.draw_text("PTS", Color::PALE, Font::ArcadeSmall, IVec2::new(t(tile.x + 5), t(tile.y)))?;
        surface.draw_text("PTS", Color::PALE, Font::ArcadeSmall, IVec2::new(t(tile.x + 5), t(tile.y + 2)))?;
        Ok(())
    }

    fn draw_energizer(&self, sprites: &dyn SpriteSheet, surface: &mut dyn RenderSurface) -> GameResult<()> {
        surface.fill_oval(sprites.maze_food_color(1), IVec2::new(t(3), t(20)), UVec2::splat(TS as u32))?;
        Ok(())
    }

    fn render_pacman(
        &self,
        game: &GameModel,
        intro: &IntroView,
        sprites: &dyn SpriteSheet,
        surface: &mut dyn RenderSurface,
    ) -> GameResult<()> {
        let points_tile = IVec2::new(11, 25);
        let copyright_at = IVec2::new(t(3), t(32));

        self.draw_hud(game, sprites, surface)?;
        self.draw_gallery(intro, game.variant, sprites, surface)?;

        match intro.phase {
            IntroPhase::Start | IntroPhase::PresentingGhosts | IntroPhase::PresentingPac => {}
            IntroPhase::ShowingPoints => {
                self.draw_points(intro, points_tile, sprites, surface)?;
                if intro.phase_ticks > sec_to_ticks(1) {
                    self.draw_energizer(sprites, surface)?;
                    render::draw_copyright(surface, game.variant, copyright_at)?;
                }
            }
            IntroPhase::ChasingPac => {
                self.draw_points(intro, points_tile, sprites, surface)?;
                render::draw_copyright(surface, game.variant, copyright_at)?;
                if intro.blinking_on {
                    self.draw_energizer(sprites, surface)?;
                }
                let offset = if intro.phase_ticks % 5 < 2 { 0 } else { -1 };
                self.draw_guys(intro, offset, surface)?;
            }
            IntroPhase::ChasingGhosts => {
                self.draw_points(intro, points_tile, sprites, surface)?;
                render::draw_copyright(surface, game.variant, copyright_at)?;
                self.draw_guys(intro, 0, surface)?;
            }
            IntroPhase::ReadyToPlay => {
                self.draw_points(intro, points_tile, sprites, surface)?;
                self.draw_guys(intro, 0, surface)?;
            }
        }
        Ok(())
    }

    fn draw_marquee(&self, marquee: &MarqueeView, surface: &mut dyn RenderSurface) -> GameResult<()> {
        for (i, &on) in marquee.bulbs.iter().enumerate() {
            let i = i as i32;
            let color = if on { Color::PALE } else { Color::RED };
            let at = match i {
                0..=33 => IVec2::new(60 + 4 * i, 148),
                34..=48 => IVec2::new(192, 280 - 4 * i),
                49..=81 => IVec2::new(384 - 4 * i, 88),
                _ => IVec2::new(60, 4 * i - 236),
            };
            surface.fill_rect(color, at, UVec2::splat(2))?;
        }
        Ok(())
    }

    fn render_ms_pacman(
        &self,
        game: &GameModel,
        intro: &IntroView,
        sprites: &dyn SpriteSheet,
        surface: &mut dyn RenderSurface,
    ) -> GameResult<()> {
        render::draw_scores(surface, game, true)?;

        if let Some(marquee) = &intro.marquee {
            let title = marquee.title_position;
            surface.draw_text("\"MS PAC-MAN\"", Color::ORANGE, Font::Arcade, title)?;
            self.draw_marquee(marquee, surface)?;

            match intro.phase {
                IntroPhase::PresentingGhosts => {
                    if marquee.ghost_index == 0 {
                        surface.draw_text("WITH", Color::WHITE, Font::Arcade, IVec2::new(title.x, marquee.stop_y + t(3)))?;
                    }
                    if let Some(&id) = GhostId::ALL.get(marquee.ghost_index) {
                        let name = id.nickname(game.variant);
                        let x = t(14 - name.len() as i32 / 2);
                        surface.draw_text(name, sprites.ghost_color(id), Font::Arcade, IVec2::new(x, marquee.stop_y + t(6)))?;
                    }
                }
                IntroPhase::PresentingPac | IntroPhase::ReadyToPlay => {
                    surface.draw_text("STARRING", Color::WHITE, Font::Arcade, IVec2::new(title.x, marquee.stop_y + t(3)))?;
                    surface.draw_text("MS PAC-MAN", Color::YELLOW, Font::Arcade, IVec2::new(title.x, marquee.stop_y + t(6)))?;
                }
                _ => {}
            }
        }

        self.draw_guys(intro, 0, surface)?;
        render::draw_copyright(surface, game.variant, IVec2::new(t(6), t(28)))?;
        render::draw_credit(surface, game.credit)?;
        if game.has_credit() {
            render::draw_level_counter(surface, sprites, &game.level_counter)?;
        }
        Ok(())
    }
}

impl GameScene for IntroScene {
    fn name(&self) -> &'static str {
        "intro"
    }

    fn set_context(&mut self, ctx: &mut SceneContext<'_>) -> GameResult<()> {
        self.pac = Some(PacAnimations::new(ctx.sprites)?);
        self.ghosts = GhostId::ALL
            .into_iter()
            .map(|id| GhostAnimations::new(id, ctx.sprites))
            .collect::<GameResult<_>>()?;
        Ok(())
    }

    fn init(&mut self, _ctx: &mut SceneContext<'_>) -> GameResult<()> {
        self.last_phase = None;
        if let Some(pac) = self.pac.as_mut() {
            pac.ensure_running();
        }
        self.ghosts.iter_mut().for_each(GhostAnimations::ensure_running);
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>, ticks: u32) -> GameResult<()> {
        let Some(intro) = &ctx.game().intro else {
            return Ok(());
        };

        if self.last_phase != Some(intro.phase) {
            debug!(from = ?self.last_phase, to = intro.phase.as_ref(), "Intro phase changed");
            if self.last_phase == Some(IntroPhase::ChasingPac) && intro.phase == IntroPhase::ChasingGhosts {
                for anims in &mut self.ghosts {
                    anims.set_mut().select(GhostAnimationKey::Blue)?;
                }
            }
            self.last_phase = Some(intro.phase);
        }

        self.animate_actors(intro, ticks)
    }

    fn render(&self, game: &GameModel, sprites: &dyn SpriteSheet, surface: &mut dyn RenderSurface) -> GameResult<()> {
        surface.clear(Color::BLACK)?;
        let Some(intro) = &game.intro else {
            return Ok(());
        };

        match game.variant {
            GameVariant::PacMan => self.render_pacman(game, intro, sprites, surface),
            GameVariant::MsPacMan => self.render_ms_pacman(game, intro, sprites, surface),
        }
    }
}
