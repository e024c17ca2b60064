use glam::U16Vec2;
use smallvec::SmallVec;

use crate::entity::{Direction, GhostId};
use crate::error::ConfigurationError;
use crate::render::Color;

/// A rectangular region of the sprite sheet.
///
/// The front-end never looks inside a sprite; it only needs the size to center it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sprite {
    pub pos: U16Vec2,
    pub size: U16Vec2,
}

impl Sprite {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            pos: U16Vec2::new(x, y),
            size: U16Vec2::new(width, height),
        }
    }

    pub fn width(&self) -> u16 {
        self.size.x
    }

    pub fn height(&self) -> u16 {
        self.size.y
    }
}

/// Symbolic names for the frame lists an asset provider must know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    /// Pac-Man or Ms. Pac-Man munching while heading in a direction.
    PacMunching(Direction),
    PacDying,
    /// Single full-face frame used as the lives counter icon.
    LifeIcon,
    GhostColor(GhostId, Direction),
    GhostEyes(Direction),
    GhostBlue,
    GhostFlashing,
    /// Bounty numbers in the order 200, 400, 800, 1600.
    BountyNumbers,
    /// One frame per bonus symbol.
    BonusSymbols,
    /// One frame per bonus symbol, showing its value.
    BonusValues,
    /// Full maze and its flashing counterpart for a maze number.
    MazeFull(u8),
    MazeFlashing(u8),
    /// Pac-Man as Ms. Pac-Man's partner in her intermissions.
    HusbandMunching(Direction),
    /// Huge Pac-Man of the first Pac-Man intermission.
    BigPacMunching,
}

/// Asset provider consulted while building animations and drawing the HUD.
pub trait SpriteSheet {
    /// Frames for a key, or `None` when the sheet does not carry it.
    fn frames(&self, key: SpriteKey) -> Option<SmallVec<[Sprite; 4]>>;

    fn ghost_color(&self, id: GhostId) -> Color;

    fn maze_food_color(&self, maze_number: u8) -> Color;

    /// Maze shown at a level, starting from 1.
    fn maze_number(&self, level_number: u32) -> u8;

    /// Like [`SpriteSheet::frames`] but a missing key is a configuration error.
    fn require(&self, key: SpriteKey) -> Result<SmallVec<[Sprite; 4]>, ConfigurationError> {
        match self.frames(key) {
            Some(frames) if !frames.is_empty() => Ok(frames),
            _ => Err(ConfigurationError::MissingSprite(key)),
        }
    }

    /// A single frame of a list.
    fn sprite(&self, key: SpriteKey, index: usize) -> Result<Sprite, ConfigurationError> {
        self.require(key)?
            .get(index)
            .copied()
            .ok_or(ConfigurationError::MissingSprite(key))
    }
}
