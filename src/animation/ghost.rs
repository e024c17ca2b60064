use strum_macros::IntoStaticStr;

use crate::animation::{Animation, AnimationSet};
use crate::constants::BOUNTY_VALUES;
use crate::entity::{Ghost, GhostId, GhostState};
use crate::error::{AnimationError, ConfigurationError, GameResult};
use crate::texture::animated::FrameSequence;
use crate::texture::directional::DirectionalSequence;
use crate::texture::sprite::{Sprite, SpriteKey, SpriteSheet};

const COLOR_FRAME_TICKS: u32 = 8;
const BLUE_FRAME_TICKS: u32 = 8;
const FLASHING_FRAME_TICKS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum GhostAnimationKey {
    Color,
    Eyes,
    Blue,
    Flashing,
    Value,
}

/// Position of a bounty in the number sprite list.
pub fn bounty_index(value: u32) -> Result<usize, ConfigurationError> {
    BOUNTY_VALUES
        .iter()
        .position(|&v| v == value)
        .ok_or(ConfigurationError::UnmappedBountyValue(value))
}

/// The animations of one ghost and the rules choosing between them.
#[derive(Debug, Clone)]
pub struct GhostAnimations {
    set: AnimationSet<GhostAnimationKey, Sprite>,
}

impl GhostAnimations {
    pub fn new(id: GhostId, sprites: &dyn SpriteSheet) -> GameResult<Self> {
        let color = DirectionalSequence::try_from_fn(|dir| -> GameResult<_> {
            let frames = sprites.require(SpriteKey::GhostColor(id, dir))?;
            Ok(FrameSequence::new(frames, COLOR_FRAME_TICKS)?.repeat_forever())
        })?;
        let eyes = DirectionalSequence::try_from_fn(|dir| -> GameResult<_> {
            let frames = sprites.require(SpriteKey::GhostEyes(dir))?;
            Ok(FrameSequence::new(frames, COLOR_FRAME_TICKS)?.repeat_forever())
        })?;
        let blue = FrameSequence::new(sprites.require(SpriteKey::GhostBlue)?, BLUE_FRAME_TICKS)?.repeat_forever();
        let flashing = FrameSequence::new(sprites.require(SpriteKey::GhostFlashing)?, FLASHING_FRAME_TICKS)?;
        let values = FrameSequence::new(sprites.require(SpriteKey::BountyNumbers)?, 1)?;

        let mut set = AnimationSet::new()
            .with(GhostAnimationKey::Color, color)
            .with(GhostAnimationKey::Eyes, eyes)
            .with(GhostAnimationKey::Blue, blue)
            .with(GhostAnimationKey::Flashing, flashing)
            .with(GhostAnimationKey::Value, values);
        set.select(GhostAnimationKey::Color)?;

        Ok(Self { set })
    }

    pub fn set(&self) -> &AnimationSet<GhostAnimationKey, Sprite> {
        &self.set
    }

    pub fn set_mut(&mut self) -> &mut AnimationSet<GhostAnimationKey, Sprite> {
        &mut self.set
    }

    /// The animation a ghost in this state should show, highest priority first.
    pub fn resolve(&self, ghost: &Ghost) -> Result<GhostAnimationKey, ConfigurationError> {
        if ghost.bounty != 0 {
            bounty_index(ghost.bounty)?;
            return Ok(GhostAnimationKey::Value);
        }

        let key = match ghost.state {
            GhostState::Dead | GhostState::EnteringHouse => GhostAnimationKey::Eyes,
            GhostState::Frightened if self.is_flashing() => GhostAnimationKey::Flashing,
            GhostState::Frightened => GhostAnimationKey::Blue,
            GhostState::Locked if ghost.actor.looks_frightened() => GhostAnimationKey::Blue,
            _ => GhostAnimationKey::Color,
        };
        Ok(key)
    }

    /// The sprite for the ghost right now, without touching any sequence.
    pub fn current_frame(&self, ghost: &Ghost) -> Result<Sprite, ConfigurationError> {
        let key = self.resolve(ghost)?;
        let animation = self.set.require(key)?;

        let sprite = match key {
            GhostAnimationKey::Value => {
                let index = bounty_index(ghost.bounty)?;
                *single(animation, key)?
                    .frame_at(index)
                    .ok_or(ConfigurationError::UnmappedBountyValue(ghost.bounty))?
            }
            _ => *animation.sequence(ghost.actor.wish_dir).current_frame(),
        };
        Ok(sprite)
    }

    /// Selects the animation for the ghost's state and advances it by `ticks`.
    ///
    /// Returns the sprite to draw this tick.
    pub fn animate(&mut self, ghost: &Ghost, ticks: u32) -> Result<Sprite, ConfigurationError> {
        let key = self.resolve(ghost)?;
        self.set.select(key)?;

        let advance = match key {
            GhostAnimationKey::Value => false,
            GhostAnimationKey::Eyes | GhostAnimationKey::Flashing => true,
            GhostAnimationKey::Blue => ghost.is(GhostState::Frightened) || ghost.actor.is_moving(),
            GhostAnimationKey::Color => ghost.actor.is_moving(),
        };
        if advance {
            self.set.require_mut(key)?.sequence_mut(ghost.actor.wish_dir).advance(ticks);
        }

        self.current_frame(ghost)
    }

    /// Starts flashing `num_flashes` times, spread over `total_ticks`.
    ///
    /// The frame duration is truncated; a flash count of zero or a total too short for a
    /// single tick per frame is rejected.
    pub fn start_flashing(&mut self, num_flashes: u32, total_ticks: u64) -> GameResult<()> {
        if num_flashes == 0 {
            return Err(AnimationError::InvalidRepeatCount(0).into());
        }
        let flashing = self.flashing_mut()?;
        let frame_ticks = total_ticks / (num_flashes as u64 * flashing.frame_count() as u64);
        flashing.set_frame_duration(frame_ticks)?;
        flashing.set_repeat_count(num_flashes)?;
        flashing.restart();
        Ok(())
    }

    pub fn is_flashing(&self) -> bool {
        self.flashing().is_some_and(FrameSequence::is_running)
    }

    pub fn flashing(&self) -> Option<&FrameSequence<Sprite>> {
        match self.set.get(GhostAnimationKey::Flashing)? {
            Animation::Single(seq) => Some(seq),
            Animation::Directional(_) => None,
        }
    }

    fn flashing_mut(&mut self) -> Result<&mut FrameSequence<Sprite>, ConfigurationError> {
        let key = GhostAnimationKey::Flashing;
        match self.set.require_mut(key)? {
            Animation::Single(seq) => Ok(seq),
            Animation::Directional(_) => Err(ConfigurationError::UnknownAnimationKey(key.into())),
        }
    }

    /// Blue again, from the first frame; any flashing in progress is dropped.
    pub fn restart_blue(&mut self) -> Result<(), ConfigurationError> {
        self.flashing_mut()?.reset();
        self.set.require_mut(GhostAnimationKey::Blue)?.restart();
        Ok(())
    }

    /// Keeps the looping animations playing. Flashing only ever runs through
    /// [`GhostAnimations::start_flashing`].
    pub fn ensure_running(&mut self) {
        for key in [GhostAnimationKey::Color, GhostAnimationKey::Eyes, GhostAnimationKey::Blue] {
            if let Some(animation) = self.set.get_mut(key) {
                animation.ensure_running();
            }
        }
    }

    pub fn stop_all(&mut self) {
        self.set.stop_all();
    }

    /// Stopped color animation and nothing else; what a ghost looks like at level start.
    pub fn reset(&mut self) {
        self.set.reset_all();
        // Color is always present
        let _ = self.set.select(GhostAnimationKey::Color);
    }
}

fn single(animation: &Animation<Sprite>, key: GhostAnimationKey) -> Result<&FrameSequence<Sprite>, ConfigurationError> {
    match animation {
        Animation::Single(seq) => Ok(seq),
        Animation::Directional(_) => Err(ConfigurationError::UnknownAnimationKey(key.into())),
    }
}
