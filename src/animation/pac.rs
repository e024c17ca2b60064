use strum_macros::IntoStaticStr;

use crate::animation::AnimationSet;
use crate::entity::{Direction, Pac};
use crate::error::{ConfigurationError, GameResult};
use crate::texture::animated::FrameSequence;
use crate::texture::directional::DirectionalSequence;
use crate::texture::sprite::{Sprite, SpriteKey, SpriteSheet};

const MUNCHING_FRAME_TICKS: u32 = 2;
const DYING_FRAME_TICKS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum PacAnimationKey {
    Munching,
    Dying,
}

/// Munching per direction and the one-shot dying sequence.
#[derive(Debug, Clone)]
pub struct PacAnimations {
    set: AnimationSet<PacAnimationKey, Sprite>,
}

impl PacAnimations {
    pub fn new(sprites: &dyn SpriteSheet) -> GameResult<Self> {
        let munching = munching(sprites, SpriteKey::PacMunching)?;
        let dying = FrameSequence::new(sprites.require(SpriteKey::PacDying)?, DYING_FRAME_TICKS)?;

        Ok(Self::from_set(
            AnimationSet::new()
                .with(PacAnimationKey::Munching, munching)
                .with(PacAnimationKey::Dying, dying),
        )?)
    }

    /// Wraps a prepared set, which must hold both keys.
    pub fn from_set(mut set: AnimationSet<PacAnimationKey, Sprite>) -> Result<Self, ConfigurationError> {
        set.require(PacAnimationKey::Dying)?;
        set.select(PacAnimationKey::Munching)?;
        Ok(Self { set })
    }

    /// Swaps in the husband munching frames of the Ms. Pac-Man cutscenes.
    pub fn use_husband_munching(&mut self, sprites: &dyn SpriteSheet) -> GameResult<()> {
        let husband = munching(sprites, SpriteKey::HusbandMunching)?;
        self.set.insert(PacAnimationKey::Munching, husband);
        self.set.select(PacAnimationKey::Munching)?;
        Ok(())
    }

    pub fn set(&self) -> &AnimationSet<PacAnimationKey, Sprite> {
        &self.set
    }

    pub fn set_mut(&mut self) -> &mut AnimationSet<PacAnimationKey, Sprite> {
        &mut self.set
    }

    pub fn resolve(&self, pac: &Pac) -> PacAnimationKey {
        if pac.actor.is_killed() {
            PacAnimationKey::Dying
        } else {
            PacAnimationKey::Munching
        }
    }

    pub fn current_frame(&self, pac: &Pac) -> Result<Sprite, ConfigurationError> {
        let key = self.resolve(pac);
        Ok(*self.set.require(key)?.sequence(pac.actor.move_dir).current_frame())
    }

    /// Dying plays on regardless of motion; munching only moves with Pac-Man.
    pub fn animate(&mut self, pac: &Pac, ticks: u32) -> Result<Sprite, ConfigurationError> {
        let key = self.resolve(pac);
        self.set.select(key)?;

        let advance = match key {
            PacAnimationKey::Dying => true,
            PacAnimationKey::Munching => pac.actor.is_moving() && !pac.actor.is_stuck(),
        };
        if advance {
            self.set.require_mut(key)?.sequence_mut(pac.actor.move_dir).advance(ticks);
        }

        self.current_frame(pac)
    }

    /// Munching running, dying rewound; the state at the start of a life.
    pub fn refresh(&mut self) -> Result<(), ConfigurationError> {
        self.set.require_mut(PacAnimationKey::Munching)?.ensure_running();
        self.set.require_mut(PacAnimationKey::Dying)?.reset();
        self.set.select(PacAnimationKey::Munching)
    }

    pub fn start_dying(&mut self) -> Result<(), ConfigurationError> {
        self.set.select(PacAnimationKey::Dying)?;
        self.set.require_mut(PacAnimationKey::Dying)?.restart();
        Ok(())
    }

    pub fn is_dying_complete(&self) -> bool {
        self.set
            .get(PacAnimationKey::Dying)
            .is_some_and(|a| a.sequence(Default::default()).is_complete())
    }

    pub fn ensure_running(&mut self) {
        if let Some(munching) = self.set.get_mut(PacAnimationKey::Munching) {
            munching.ensure_running();
        }
    }

    pub fn stop_all(&mut self) {
        self.set.stop_all();
    }
}

fn munching(sprites: &dyn SpriteSheet, key: fn(Direction) -> SpriteKey) -> GameResult<DirectionalSequence<Sprite>> {
    DirectionalSequence::try_from_fn(|dir| -> GameResult<_> {
        let frames = sprites.require(key(dir))?;
        Ok(FrameSequence::new(frames, MUNCHING_FRAME_TICKS)?.repeat_forever())
    })
}
