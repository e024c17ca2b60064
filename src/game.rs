//! The slice of the game the front-end gets to see.
//!
//! The simulation lives elsewhere. Each tick it hands over a [`GameModel`] snapshot through a
//! [`GameController`], and the only things the front-end may ask back are to expire the
//! state timer and to hide the ghosts.

use glam::{IVec2, Vec2};
use serde::Deserialize;
use smallvec::SmallVec;
use strum_macros::AsRefStr;

use crate::constants::t;
use crate::entity::{Actor, Bonus, Direction, Ghost, GhostId, GhostState, Pac};
use crate::events::GameState;
use crate::texture::sprite::SpriteKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, Deserialize)]
pub enum GameVariant {
    #[default]
    #[serde(rename = "pacman")]
    PacMan,
    #[serde(rename = "ms_pacman")]
    MsPacMan,
}

/// Progress of a countdown owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerProgress {
    pub duration: u64,
    pub elapsed: u64,
    pub running: bool,
}

impl TimerProgress {
    pub const fn new(duration: u64, elapsed: u64, running: bool) -> Self {
        Self {
            duration,
            elapsed,
            running,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.duration.saturating_sub(self.elapsed)
    }

    /// At least half of the duration has passed while the timer runs.
    pub fn is_half_expired(&self) -> bool {
        self.running && self.duration > 0 && self.elapsed * 2 >= self.duration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub points: u32,
    pub level_number: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr)]
pub enum IntroPhase {
    #[default]
    Start,
    PresentingGhosts,
    ShowingPoints,
    ChasingPac,
    ChasingGhosts,
    /// Ms. Pac-Man herself walks in under the marquee.
    PresentingPac,
    ReadyToPlay,
}

/// What part of a ghost's gallery row has appeared so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GalleryEntry {
    pub picture_visible: bool,
    pub character_visible: bool,
    pub nickname_visible: bool,
}

/// The blinking bulbs framing the Ms. Pac-Man title.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarqueeView {
    pub title_position: IVec2,
    /// Line where the presented actor stops walking.
    pub stop_y: i32,
    /// Ghost currently being introduced.
    pub ghost_index: usize,
    pub bulbs: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntroView {
    pub phase: IntroPhase,
    pub phase_ticks: u64,
    pub pac: Pac,
    pub ghosts: [Ghost; 4],
    pub gallery: [GalleryEntry; 4],
    /// Phase of the blinking energizer in the points legend.
    pub blinking_on: bool,
    pub marquee: Option<MarqueeView>,
}

impl Default for IntroView {
    fn default() -> Self {
        Self {
            phase: IntroPhase::Start,
            phase_ticks: 0,
            pac: Pac::default(),
            ghosts: default_ghosts(),
            gallery: Default::default(),
            blinking_on: true,
            marquee: None,
        }
    }
}

/// A static sprite placed by a cutscene (a torn sheet, a stork, a heart).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prop {
    pub key: SpriteKey,
    pub frame: usize,
    pub position: Vec2,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CutsceneView {
    pub pacs: SmallVec<[Pac; 2]>,
    pub ghosts: SmallVec<[Ghost; 2]>,
    /// The huge Pac-Man of the first Pac-Man intermission.
    pub big_pac: Option<Pac>,
    pub props: SmallVec<[Prop; 4]>,
}

/// Everything drawn or reacted to, as of the current tick.
#[derive(Debug, Clone, PartialEq)]
pub struct GameModel {
    pub variant: GameVariant,
    pub state: GameState,
    pub state_ticks: u64,
    pub pac: Pac,
    pub ghosts: [Ghost; 4],
    pub bonus: Option<Bonus>,
    pub score: Score,
    pub high_score: Score,
    pub credit: u32,
    pub lives: u32,
    pub one_less_life_displayed: bool,
    pub level_number: u32,
    /// Bonus symbols of recent levels, most recent first.
    pub level_counter: SmallVec<[u8; 7]>,
    pub num_flashes: u32,
    /// Intermission played after the current level, if any.
    pub intermission_number: Option<u8>,
    pub intermission_test_number: u8,
    pub attract_mode: bool,
    pub game_running: bool,
    pub power_timer: TimerProgress,
    pub eaten_food: Vec<IVec2>,
    pub energizer_tiles: Vec<IVec2>,
    pub intro: Option<IntroView>,
    pub cutscene: Option<CutsceneView>,
}

impl GameModel {
    pub fn new(variant: GameVariant) -> Self {
        Self {
            variant,
            state: GameState::Boot,
            state_ticks: 0,
            pac: Pac {
                actor: Actor::new(Vec2::new(t(13) as f32, t(26) as f32), Direction::Left),
            },
            ghosts: default_ghosts(),
            bonus: None,
            score: Score::default(),
            high_score: Score::default(),
            credit: 0,
            lives: 3,
            one_less_life_displayed: false,
            level_number: 1,
            level_counter: SmallVec::new(),
            num_flashes: 5,
            intermission_number: None,
            intermission_test_number: 1,
            attract_mode: false,
            game_running: false,
            power_timer: TimerProgress::default(),
            eaten_food: Vec::new(),
            energizer_tiles: Vec::new(),
            intro: None,
            cutscene: None,
        }
    }

    pub fn ghosts_in(&self, state: GhostState) -> impl Iterator<Item = &Ghost> + '_ {
        self.ghosts.iter().filter(move |g| g.is(state))
    }

    pub fn has_credit(&self) -> bool {
        self.credit > 0
    }

    /// Lives shown in the lives counter.
    pub fn lives_displayed(&self) -> u32 {
        if self.one_less_life_displayed {
            self.lives.saturating_sub(1)
        } else {
            self.lives
        }
    }

    pub fn is_food_eaten(&self, tile: IVec2) -> bool {
        self.eaten_food.contains(&tile)
    }
}

fn default_ghosts() -> [Ghost; 4] {
    GhostId::ALL.map(|id| Ghost::new(id, Actor::new(Vec2::ZERO, Direction::Left)))
}

/// The game controller, as seen from the front-end.
pub trait GameController {
    fn game(&self) -> &GameModel;

    /// Ends the current state right away; the controller moves on at its next update.
    fn expire_state_timer(&mut self);

    fn hide_ghosts(&mut self);
}
