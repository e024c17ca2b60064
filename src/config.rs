use figment::{providers::Env, Figment};
use serde::Deserialize;

use crate::constants::{DEATH_ANIMATION_DELAY, ENERGIZER_BLINK_TICKS, TICKS_PER_SECOND};
use crate::error::{GameError, GameResult};
use crate::game::GameVariant;

/// Environment variable prefix for every setting, e.g. `PACMAN_UI_MUTED=true`.
pub const ENV_PREFIX: &str = "PACMAN_UI_";

const MAX_SCALE: u32 = 8;

/// Front-end settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    /// Game variant shown at start-up
    pub variant: GameVariant,
    /// Start with all audio silenced
    pub muted: bool,
    /// Integer window scale
    pub scale: u32,
    /// Frame rate the tick loop is paced at
    pub target_fps: u32,
    /// Ticks between Pac-Man getting caught and the dying animation
    pub death_animation_delay: u32,
    /// Ticks between energizer blinks
    pub energizer_blink_ticks: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            variant: GameVariant::PacMan,
            muted: false,
            scale: 2,
            target_fps: TICKS_PER_SECOND,
            death_animation_delay: DEATH_ANIMATION_DELAY,
            energizer_blink_ticks: ENERGIZER_BLINK_TICKS,
        }
    }
}

/// Raw settings as read from the environment, validated into [`UiConfig`]
#[derive(Debug, Deserialize)]
struct RawUiConfig {
    #[serde(default)]
    variant: GameVariant,
    #[serde(default)]
    muted: bool,
    #[serde(default = "default_scale")]
    scale: u32,
    #[serde(default = "default_target_fps")]
    target_fps: u32,
    #[serde(default = "default_death_animation_delay")]
    death_animation_delay: u32,
    #[serde(default = "default_energizer_blink_ticks")]
    energizer_blink_ticks: u32,
}

impl TryFrom<RawUiConfig> for UiConfig {
    type Error = GameError;

    fn try_from(raw: RawUiConfig) -> Result<Self, Self::Error> {
        if !(1..=MAX_SCALE).contains(&raw.scale) {
            return Err(GameError::InvalidSetting {
                name: "scale",
                reason: format!("must be between 1 and {MAX_SCALE}, got {}", raw.scale),
            });
        }
        if raw.target_fps == 0 {
            return Err(GameError::InvalidSetting {
                name: "target_fps",
                reason: "must be positive".into(),
            });
        }
        if raw.energizer_blink_ticks == 0 {
            return Err(GameError::InvalidSetting {
                name: "energizer_blink_ticks",
                reason: "must be positive".into(),
            });
        }

        Ok(UiConfig {
            variant: raw.variant,
            muted: raw.muted,
            scale: raw.scale,
            target_fps: raw.target_fps,
            death_animation_delay: raw.death_animation_delay,
            energizer_blink_ticks: raw.energizer_blink_ticks,
        })
    }
}

fn default_scale() -> u32 {
    UiConfig::default().scale
}

fn default_target_fps() -> u32 {
    TICKS_PER_SECOND
}

fn default_death_animation_delay() -> u32 {
    DEATH_ANIMATION_DELAY
}

fn default_energizer_blink_ticks() -> u32 {
    ENERGIZER_BLINK_TICKS
}

impl UiConfig {
    /// Extracts settings from any figment; unset keys fall back to defaults.
    pub fn extract(figment: Figment) -> GameResult<Self> {
        let raw: RawUiConfig = figment.extract()?;
        raw.try_into()
    }
}

/// Loads settings from `PACMAN_UI_*` environment variables.
pub fn load_config() -> GameResult<UiConfig> {
    UiConfig::extract(Figment::new().merge(Env::prefixed(ENV_PREFIX)))
}
