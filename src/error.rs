//! Centralized error types for the Pac-Man front-end.
//!
//! Every fallible operation in the crate eventually surfaces as a [`GameError`].
//! Configuration errors are never recovered from: a missing animation key, sprite,
//! bounty value or scene means the assets and the wiring disagree.

use crate::events::GameState;
use crate::texture::sprite::SpriteKey;

/// Main error type for the front-end.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Settings error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

impl From<figment::Error> for GameError {
    fn from(error: figment::Error) -> Self {
        GameError::Config(Box::new(error))
    }
}

/// A required mapping is missing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Unknown animation key: {0}")]
    UnknownAnimationKey(&'static str),

    #[error("No value sprite for bounty {0}")]
    UnmappedBountyValue(u32),

    #[error("Sprite sheet has no frames for {0:?}")]
    MissingSprite(SpriteKey),

    #[error("No scene found for game state {0:?}")]
    NoSceneForState(GameState),

    #[error("No intermission number available for game state {0:?}")]
    NoIntermissionNumber(GameState),
}

/// Timing parameters of a frame sequence that cannot be honored.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationError {
    #[error("A frame sequence needs at least one frame")]
    EmptySequence,

    #[error("Frame duration must be positive, got {0}")]
    InvalidFrameDuration(u64),

    #[error("Repeat count must be positive, got {0}")]
    InvalidRepeatCount(u32),
}

/// Errors raised by a render surface.
#[derive(thiserror::Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadFailed(String),

    #[error("Rendering failed: {0}")]
    RenderFailed(String),
}

/// Result type for front-end operations.
pub type GameResult<T> = Result<T, GameError>;
