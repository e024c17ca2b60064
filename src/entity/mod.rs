//! Read-only views of the actors the game model exposes each tick.
//!
//! The front-end never moves an actor. It only looks at where an actor is, where it
//! is heading, and what it is doing, and picks a sprite accordingly.

pub mod direction;

use bitflags::bitflags;
use glam::Vec2;
use strum_macros::AsRefStr;

use crate::game::GameVariant;

pub use direction::Direction;

bitflags! {
    /// Discrete display flags attached to an actor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ActorFlags: u8 {
        const VISIBLE = 1 << 0;
        /// Blocked by a wall; movement intent exists but the actor does not move.
        const STUCK = 1 << 1;
        const KILLED = 1 << 2;
        /// A locked ghost drawn as frightened while the power timer runs.
        const LOOKS_FRIGHTENED = 1 << 3;
    }
}

/// Position, motion and flags shared by every creature on screen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Actor {
    /// Top-left of the actor's tile box, in pixels.
    pub position: Vec2,
    pub velocity: Vec2,
    pub move_dir: Direction,
    pub wish_dir: Direction,
    pub flags: ActorFlags,
}

impl Actor {
    pub fn new(position: Vec2, dir: Direction) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            move_dir: dir,
            wish_dir: dir,
            flags: ActorFlags::VISIBLE,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.flags.contains(ActorFlags::VISIBLE)
    }

    pub fn is_stuck(&self) -> bool {
        self.flags.contains(ActorFlags::STUCK)
    }

    pub fn is_killed(&self) -> bool {
        self.flags.contains(ActorFlags::KILLED)
    }

    pub fn looks_frightened(&self) -> bool {
        self.flags.contains(ActorFlags::LOOKS_FRIGHTENED)
    }

    pub fn is_moving(&self) -> bool {
        self.velocity != Vec2::ZERO
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.flags.set(ActorFlags::VISIBLE, visible);
    }
}

/// The four ghosts, in the order the original arcade numbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
pub enum GhostId {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl GhostId {
    pub const ALL: [GhostId; 4] = [GhostId::Blinky, GhostId::Pinky, GhostId::Inky, GhostId::Clyde];

    pub const fn as_usize(self) -> usize {
        self as usize
    }

    /// The character name shown in the Pac-Man intro gallery.
    pub const fn character(self) -> &'static str {
        match self {
            GhostId::Blinky => "SHADOW",
            GhostId::Pinky => "SPEEDY",
            GhostId::Inky => "BASHFUL",
            GhostId::Clyde => "POKEY",
        }
    }

    /// The upper-case nickname; the orange ghost is called Sue in Ms. Pac-Man.
    pub const fn nickname(self, variant: GameVariant) -> &'static str {
        match (self, variant) {
            (GhostId::Blinky, _) => "BLINKY",
            (GhostId::Pinky, _) => "PINKY",
            (GhostId::Inky, _) => "INKY",
            (GhostId::Clyde, GameVariant::PacMan) => "CLYDE",
            (GhostId::Clyde, GameVariant::MsPacMan) => "SUE",
        }
    }
}

/// Behavioral mode of a ghost as far as its looks are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr)]
pub enum GhostState {
    #[default]
    Locked,
    LeavingHouse,
    HuntingPac,
    Frightened,
    /// Eaten, eyes returning to the house.
    Dead,
    EnteringHouse,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ghost {
    pub id: GhostId,
    pub actor: Actor,
    pub state: GhostState,
    /// Points shown in place of the ghost right after it was eaten; zero otherwise.
    pub bounty: u32,
}

impl Ghost {
    pub fn new(id: GhostId, actor: Actor) -> Self {
        Self {
            id,
            actor,
            state: GhostState::Locked,
            bounty: 0,
        }
    }

    pub fn is(&self, state: GhostState) -> bool {
        self.state == state
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pac {
    pub actor: Actor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr)]
pub enum BonusState {
    #[default]
    Inactive,
    Edible,
    Eaten,
}

/// A fruit (Pac-Man) or wandering fruit (Ms. Pac-Man).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bonus {
    /// Index into the bonus symbol and value sprite lists.
    pub symbol: u8,
    pub state: BonusState,
    pub actor: Actor,
    /// Ms. Pac-Man fruit travels through the maze and bobs while doing so.
    pub moving: bool,
}
