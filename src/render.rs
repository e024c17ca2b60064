//! Sprite placement and HUD drawing on top of an abstract [`RenderSurface`].
use glam::{IVec2, UVec2, Vec2};

use crate::constants::{t, HTS, MAX_LIVES_DISPLAYED, TS};
use crate::entity::{Actor, Bonus};
use crate::error::{ConfigurationError, GameResult, TextureError};
use crate::events::GameState;
use crate::game::{GameModel, GameVariant};
use crate::texture::sprite::{Sprite, SpriteKey, SpriteSheet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const ORANGE: Color = Color::rgb(255, 200, 0);
    /// The off-white of the arcade HUD text.
    pub const PALE: Color = Color::rgb(222, 222, 255);
    pub const PINK: Color = Color::rgb(255, 184, 174);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Font {
    /// 8px arcade font.
    #[default]
    Arcade,
    /// 6px arcade font, used for "PTS".
    ArcadeSmall,
    /// Small bold sans-serif for the extra-lives label.
    Label,
}

/// Where frames end up. Text positions are baselines, everything else is top-left.
pub trait RenderSurface {
    fn clear(&mut self, color: Color) -> Result<(), TextureError>;

    fn draw_sprite(&mut self, sprite: Sprite, at: IVec2) -> Result<(), TextureError>;

    fn draw_text(&mut self, text: &str, color: Color, font: Font, at: IVec2) -> Result<(), TextureError>;

    fn fill_rect(&mut self, color: Color, at: IVec2, size: UVec2) -> Result<(), TextureError>;

    fn fill_oval(&mut self, color: Color, at: IVec2, size: UVec2) -> Result<(), TextureError>;
}

/// Top-left pixel that centers `sprite` over the tile box at `position`.
pub fn sprite_offset(position: Vec2, sprite: Sprite) -> IVec2 {
    let dx = HTS - sprite.width() as i32 / 2;
    let dy = HTS - sprite.height() as i32 / 2;
    IVec2::new((position.x + dx as f32) as i32, (position.y + dy as f32) as i32)
}

pub fn draw_sprite_centered(surface: &mut dyn RenderSurface, sprite: Sprite, position: Vec2) -> GameResult<()> {
    surface.draw_sprite(sprite, sprite_offset(position, sprite))?;
    Ok(())
}

/// Draws an actor's sprite unless the actor is hidden or has nothing to show.
pub fn draw_entity(surface: &mut dyn RenderSurface, actor: &Actor, sprite: Option<Sprite>) -> GameResult<()> {
    match sprite {
        Some(sprite) if actor.is_visible() => draw_sprite_centered(surface, sprite, actor.position.trunc()),
        _ => Ok(()),
    }
}

/// Draws a bonus shifted down by `dy` pixels (the jump of a moving bonus).
pub fn draw_bonus(surface: &mut dyn RenderSurface, bonus: &Bonus, sprite: Option<Sprite>, dy: i32) -> GameResult<()> {
    let mut actor = bonus.actor;
    actor.position.y += dy as f32;
    draw_entity(surface, &actor, sprite)
}

pub fn draw_scores(surface: &mut dyn RenderSurface, game: &GameModel, show_high_score_only: bool) -> GameResult<()> {
    let labels_y = t(1) + 2;
    let values_y = t(2) + 3;
    let font = Font::Arcade;

    surface.draw_text("SCORE", Color::PALE, font, IVec2::new(t(1), labels_y))?;
    surface.draw_text("HIGH SCORE", Color::PALE, font, IVec2::new(t(15), labels_y))?;

    if show_high_score_only {
        surface.draw_text("00", Color::PALE, font, IVec2::new(t(6), values_y))?;
    } else {
        let points = format!("{:7}", game.score.points);
        let level = format!("L{}", game.score.level_number);
        surface.draw_text(&points, Color::PALE, font, IVec2::new(t(1), values_y))?;
        surface.draw_text(&level, Color::PALE, font, IVec2::new(t(9), values_y))?;
    }

    if game.high_score.points > 0 {
        let points = format!("{:7}", game.high_score.points);
        let level = format!("L{}", game.high_score.level_number);
        surface.draw_text(&points, Color::PALE, font, IVec2::new(t(15), values_y))?;
        surface.draw_text(&level, Color::PALE, font, IVec2::new(t(23), values_y))?;
    } else {
        surface.draw_text("00", Color::PALE, font, IVec2::new(t(20), values_y))?;
    }
    Ok(())
}

pub fn draw_credit(surface: &mut dyn RenderSurface, credit: u32) -> GameResult<()> {
    let text = format!("CREDIT  {credit}");
    surface.draw_text(&text, Color::PALE, Font::Arcade, IVec2::new(t(2), t(36) - 2))?;
    Ok(())
}

/// Up to five life icons at the bottom left, then a "+N" label for the rest.
pub fn draw_lives_counter(surface: &mut dyn RenderSurface, sprites: &dyn SpriteSheet, game: &GameModel) -> GameResult<()> {
    let lives = game.lives_displayed();
    if lives == 0 {
        return Ok(());
    }

    let origin = IVec2::new(t(2), t(34));
    let icon = sprites.sprite(SpriteKey::LifeIcon, 0)?;
    for i in 0..lives.min(MAX_LIVES_DISPLAYED) {
        surface.draw_sprite(icon, origin + IVec2::new(t(2 * i as i32), 0))?;
    }

    if lives > MAX_LIVES_DISPLAYED {
        let text = format!("+{}", lives - MAX_LIVES_DISPLAYED);
        surface.draw_text(&text, Color::YELLOW, Font::Label, origin + IVec2::new(t(10), t(1) - 2))?;
    }
    Ok(())
}

/// Bonus symbols of recent levels, right to left from tile 24.
pub fn draw_level_counter(surface: &mut dyn RenderSurface, sprites: &dyn SpriteSheet, counter: &[u8]) -> GameResult<()> {
    let symbols = sprites.require(SpriteKey::BonusSymbols)?;
    let mut x = t(24);
    for &symbol in counter {
        let sprite = symbols
            .get(symbol as usize)
            .copied()
            .ok_or(ConfigurationError::MissingSprite(SpriteKey::BonusSymbols))?;
        surface.draw_sprite(sprite, IVec2::new(x, t(34)))?;
        x -= t(2);
    }
    Ok(())
}

/// "READY!" or "GAME OVER" below the ghost house; other states draw nothing.
pub fn draw_game_state(surface: &mut dyn RenderSurface, state: GameState) -> GameResult<()> {
    match state {
        GameState::Ready => {
            surface.draw_text("READY!", Color::YELLOW, Font::Arcade, IVec2::new(t(11), t(21)))?;
        }
        GameState::GameOver => {
            surface.draw_text("GAME", Color::RED, Font::Arcade, IVec2::new(t(9), t(21)))?;
            surface.draw_text("OVER", Color::RED, Font::Arcade, IVec2::new(t(15), t(21)))?;
        }
        _ => {}
    }
    Ok(())
}

pub fn draw_copyright(surface: &mut dyn RenderSurface, variant: GameVariant, at: IVec2) -> GameResult<()> {
    match variant {
        GameVariant::PacMan => {
            surface.draw_text("\u{00A9} 1980 MIDWAY MFG.CO.", Color::PINK, Font::Arcade, at)?;
        }
        GameVariant::MsPacMan => {
            surface.draw_text("\u{00A9}", Color::RED, Font::Arcade, at + IVec2::new(0, 2))?;
            surface.draw_text("MIDWAY MFG CO", Color::RED, Font::Arcade, at + IVec2::new(t(2), 0))?;
            surface.draw_text("1980/1981", Color::RED, Font::Arcade, at + IVec2::new(t(3), t(2)))?;
        }
    }
    Ok(())
}

/// Blanks eaten pellets out of the full maze image.
pub fn hide_eaten_food(surface: &mut dyn RenderSurface, game: &GameModel) -> GameResult<()> {
    for tile in &game.eaten_food {
        surface.fill_rect(Color::BLACK, *tile * TS, UVec2::splat(TS as u32))?;
    }
    Ok(())
}
