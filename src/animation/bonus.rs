use strum_macros::IntoStaticStr;

use crate::animation::{Animation, AnimationSet};
use crate::constants::BONUS_JUMP_TICKS;
use crate::entity::{Bonus, BonusState};
use crate::error::{ConfigurationError, GameResult};
use crate::texture::animated::FrameSequence;
use crate::texture::sprite::{Sprite, SpriteKey, SpriteSheet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum BonusAnimationKey {
    Symbol,
    Value,
}

/// Symbol and value sprites of the bonus, plus the vertical bob of a moving bonus.
#[derive(Debug, Clone)]
pub struct BonusAnimations {
    set: AnimationSet<BonusAnimationKey, Sprite>,
    jump: FrameSequence<i32>,
}

impl BonusAnimations {
    pub fn new(sprites: &dyn SpriteSheet) -> GameResult<Self> {
        let symbols = FrameSequence::new(sprites.require(SpriteKey::BonusSymbols)?, 1)?;
        let values = FrameSequence::new(sprites.require(SpriteKey::BonusValues)?, 1)?;
        let jump = FrameSequence::new([2, -2], BONUS_JUMP_TICKS)?.repeat_forever();

        Ok(Self {
            set: AnimationSet::new()
                .with(BonusAnimationKey::Symbol, symbols)
                .with(BonusAnimationKey::Value, values),
            jump,
        })
    }

    pub fn set(&self) -> &AnimationSet<BonusAnimationKey, Sprite> {
        &self.set
    }

    pub fn resolve(bonus: &Bonus) -> Option<BonusAnimationKey> {
        match bonus.state {
            BonusState::Inactive => None,
            BonusState::Edible => Some(BonusAnimationKey::Symbol),
            BonusState::Eaten => Some(BonusAnimationKey::Value),
        }
    }

    /// The sprite for the bonus symbol in its current state; inactive bonuses have none.
    pub fn current_frame(&self, bonus: &Bonus) -> Result<Option<Sprite>, ConfigurationError> {
        let Some(key) = Self::resolve(bonus) else {
            return Ok(None);
        };
        let sprite = match self.set.require(key)? {
            Animation::Single(seq) => seq.frame_at(bonus.symbol as usize).copied(),
            Animation::Directional(seqs) => seqs.get(bonus.actor.move_dir).frame_at(bonus.symbol as usize).copied(),
        };
        sprite
            .map(Some)
            .ok_or(ConfigurationError::MissingSprite(match key {
                BonusAnimationKey::Symbol => SpriteKey::BonusSymbols,
                BonusAnimationKey::Value => SpriteKey::BonusValues,
            }))
    }

    /// Tracks the bonus state; the jump only plays while a moving bonus is edible.
    pub fn update(&mut self, bonus: &Bonus, ticks: u32) -> Result<(), ConfigurationError> {
        match Self::resolve(bonus) {
            Some(key) => self.set.select(key)?,
            None => self.set.deselect(),
        }

        if bonus.moving && bonus.state == BonusState::Edible {
            self.jump.ensure_running();
            self.jump.advance(ticks);
        }
        Ok(())
    }

    /// Vertical draw offset of the bonus, zero unless it is bobbing.
    pub fn jump_offset(&self, bonus: &Bonus) -> i32 {
        if bonus.moving && bonus.state == BonusState::Edible && self.jump.is_running() {
            *self.jump.current_frame()
        } else {
            0
        }
    }

    pub fn restart_jump(&mut self) {
        self.jump.restart();
    }

    pub fn reset_jump(&mut self) {
        self.jump.reset();
    }

    pub fn jump(&self) -> &FrameSequence<i32> {
        &self.jump
    }
}
