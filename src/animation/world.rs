use crate::constants::MAZE_FLASH_TICKS;
use crate::error::GameResult;
use crate::texture::animated::FrameSequence;
use crate::texture::blinking::Pulse;
use crate::texture::sprite::{Sprite, SpriteKey, SpriteSheet};

/// Energizer blinking and the end-of-level maze flashing.
#[derive(Debug, Clone)]
pub struct WorldAnimations {
    maze_number: u8,
    num_flashes: u32,
    energizer: Pulse,
    maze_flashing: FrameSequence<Sprite>,
}

impl WorldAnimations {
    pub fn new(
        sprites: &dyn SpriteSheet,
        level_number: u32,
        num_flashes: u32,
        energizer_blink_ticks: u32,
    ) -> GameResult<Self> {
        let maze_number = sprites.maze_number(level_number);
        let full = sprites.sprite(SpriteKey::MazeFull(maze_number), 0)?;
        let flashing = sprites.sprite(SpriteKey::MazeFlashing(maze_number), 0)?;

        let mut maze_flashing = FrameSequence::new([full, flashing], MAZE_FLASH_TICKS)?;
        if num_flashes > 0 {
            maze_flashing.set_repeat_count(num_flashes)?;
        }

        Ok(Self {
            maze_number,
            num_flashes,
            energizer: Pulse::new(energizer_blink_ticks)?,
            maze_flashing,
        })
    }

    pub fn maze_number(&self) -> u8 {
        self.maze_number
    }

    pub fn energizer(&self) -> &Pulse {
        &self.energizer
    }

    pub fn energizer_mut(&mut self) -> &mut Pulse {
        &mut self.energizer
    }

    pub fn maze_flashing(&self) -> &FrameSequence<Sprite> {
        &self.maze_flashing
    }

    pub fn start_maze_flashing(&mut self) {
        self.maze_flashing.restart();
    }

    /// A level without flashes counts as done right away.
    pub fn is_maze_flashing_complete(&self) -> bool {
        self.num_flashes == 0 || self.maze_flashing.is_complete()
    }

    /// The full maze, or the current flashing frame while flashing.
    pub fn maze_sprite(&self) -> Sprite {
        if self.maze_flashing.is_running() {
            *self.maze_flashing.current_frame()
        } else {
            *self.maze_flashing.frame_at(0).unwrap_or_else(|| self.maze_flashing.current_frame())
        }
    }

    pub fn update(&mut self, ticks: u32) {
        self.energizer.tick(ticks);
        self.maze_flashing.advance(ticks);
    }

    pub fn reset(&mut self) {
        self.energizer.reset();
        self.maze_flashing.reset();
    }
}
