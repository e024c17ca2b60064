use pacman_ui::animation::ghost::bounty_index;
use pacman_ui::animation::{GhostAnimationKey, GhostAnimations};
use pacman_ui::entity::{ActorFlags, Direction, GhostId, GhostState};
use pacman_ui::error::{AnimationError, ConfigurationError, GameError};
use pacman_ui::texture::sprite::SpriteKey;
use pretty_assertions::assert_eq;

mod common;

use common::{frame, ghost, moving, FakeSpriteSheet};

fn blinky(sprites: &FakeSpriteSheet) -> GhostAnimations {
    let mut anims = GhostAnimations::new(GhostId::Blinky, sprites).unwrap();
    anims.ensure_running();
    anims
}

fn flashing_duration(anims: &GhostAnimations) -> u32 {
    anims.flashing().unwrap().frame_duration()
}

#[test]
fn test_flashing_duration_spreads_over_total() {
    let sprites = FakeSpriteSheet::new().with_frames(SpriteKey::GhostFlashing, 4);
    let mut anims = blinky(&sprites);

    anims.start_flashing(2, 120).unwrap();
    assert_eq!(flashing_duration(&anims), 15);
    assert!(anims.is_flashing());
}

#[test]
fn test_flashing_runs_its_cycles() {
    let sprites = FakeSpriteSheet::new().with_frames(SpriteKey::GhostFlashing, 2);
    let mut anims = blinky(&sprites);
    let frightened = ghost(GhostId::Blinky, GhostState::Frightened);

    anims.start_flashing(5, 200).unwrap();
    assert_eq!(flashing_duration(&anims), 20);

    for _ in 0..100 {
        anims.animate(&frightened, 1).unwrap();
    }
    let flashing = anims.flashing().unwrap();
    assert_eq!(flashing.completed_cycles(), 2);
    assert_eq!(flashing.frame_index(), 1);
    assert_eq!(anims.current_frame(&frightened).unwrap(), frame(SpriteKey::GhostFlashing, 1));
}

#[test]
fn test_flashing_ends_back_in_blue() {
    let sprites = FakeSpriteSheet::new().with_frames(SpriteKey::GhostFlashing, 2);
    let mut anims = blinky(&sprites);
    let frightened = ghost(GhostId::Blinky, GhostState::Frightened);

    anims.start_flashing(1, 2).unwrap();
    anims.animate(&frightened, 2).unwrap();
    assert!(!anims.is_flashing());
    assert_eq!(anims.resolve(&frightened), Ok(GhostAnimationKey::Blue));
}

#[test]
fn test_invalid_flashing_parameters() {
    let sprites = FakeSpriteSheet::new();
    let mut anims = blinky(&sprites);

    let zero_flashes = anims.start_flashing(0, 100);
    assert!(matches!(
        zero_flashes,
        Err(GameError::Animation(AnimationError::InvalidRepeatCount(0)))
    ));

    // 4 frames, 5 flashes: 10 ticks are not enough for one tick per frame
    let too_short = anims.start_flashing(5, 10);
    assert!(matches!(
        too_short,
        Err(GameError::Animation(AnimationError::InvalidFrameDuration(0)))
    ));
    assert!(!anims.is_flashing());
}

#[test]
fn test_bounty_has_priority_over_state() {
    let sprites = FakeSpriteSheet::new();
    let mut anims = blinky(&sprites);

    for state in [GhostState::Frightened, GhostState::Dead, GhostState::EnteringHouse] {
        let mut eaten = ghost(GhostId::Blinky, state);
        eaten.bounty = 400;
        assert_eq!(anims.resolve(&eaten), Ok(GhostAnimationKey::Value));
        assert_eq!(anims.animate(&eaten, 10).unwrap(), frame(SpriteKey::BountyNumbers, 1));
    }
}

#[test]
fn test_unmapped_bounty_fails() {
    let sprites = FakeSpriteSheet::new();
    let anims = blinky(&sprites);
    let mut eaten = ghost(GhostId::Blinky, GhostState::Dead);
    eaten.bounty = 300;

    assert_eq!(anims.resolve(&eaten), Err(ConfigurationError::UnmappedBountyValue(300)));
    assert_eq!(bounty_index(1600), Ok(3));
}

#[test]
fn test_dead_ghost_shows_eyes_for_wish_direction() {
    let sprites = FakeSpriteSheet::new();
    let mut anims = blinky(&sprites);
    let mut dead = ghost(GhostId::Blinky, GhostState::Dead);
    dead.actor.wish_dir = Direction::Up;

    assert_eq!(anims.animate(&dead, 0).unwrap(), frame(SpriteKey::GhostEyes(Direction::Up), 0));
    assert_eq!(anims.set().selected(), Some(GhostAnimationKey::Eyes));

    // Eyes keep moving even when the velocity is zero
    anims.animate(&dead, 8).unwrap();
    assert_eq!(anims.current_frame(&dead).unwrap(), frame(SpriteKey::GhostEyes(Direction::Up), 1));
}

#[test]
fn test_color_only_advances_while_moving() {
    let sprites = FakeSpriteSheet::new();
    let mut anims = blinky(&sprites);
    let mut hunting = ghost(GhostId::Blinky, GhostState::HuntingPac);

    anims.animate(&hunting, 8).unwrap();
    assert_eq!(
        anims.current_frame(&hunting).unwrap(),
        frame(SpriteKey::GhostColor(GhostId::Blinky, Direction::Left), 0)
    );

    moving(&mut hunting.actor, Direction::Right);
    anims.animate(&hunting, 8).unwrap();
    assert_eq!(
        anims.current_frame(&hunting).unwrap(),
        frame(SpriteKey::GhostColor(GhostId::Blinky, Direction::Right), 1)
    );
}

#[test]
fn test_frightened_blue_advances_without_velocity() {
    let sprites = FakeSpriteSheet::new();
    let mut anims = blinky(&sprites);
    let frightened = ghost(GhostId::Blinky, GhostState::Frightened);

    anims.animate(&frightened, 8).unwrap();
    assert_eq!(anims.current_frame(&frightened).unwrap(), frame(SpriteKey::GhostBlue, 1));
}

#[test]
fn test_locked_ghost_looks_frightened() {
    let sprites = FakeSpriteSheet::new();
    let mut anims = blinky(&sprites);
    let mut locked = ghost(GhostId::Blinky, GhostState::Locked);
    locked.actor.flags |= ActorFlags::LOOKS_FRIGHTENED;

    assert_eq!(anims.resolve(&locked), Ok(GhostAnimationKey::Blue));
    anims.animate(&locked, 8).unwrap();
    assert_eq!(anims.current_frame(&locked).unwrap(), frame(SpriteKey::GhostBlue, 0));

    locked.actor.flags.remove(ActorFlags::LOOKS_FRIGHTENED);
    assert_eq!(anims.resolve(&locked), Ok(GhostAnimationKey::Color));
}

#[test]
fn test_current_frame_does_not_advance() {
    let sprites = FakeSpriteSheet::new();
    let anims = blinky(&sprites);
    let frightened = ghost(GhostId::Blinky, GhostState::Frightened);

    let first = anims.current_frame(&frightened).unwrap();
    for _ in 0..10 {
        assert_eq!(anims.current_frame(&frightened).unwrap(), first);
    }
}

#[test]
fn test_restart_blue_cancels_flashing() {
    let sprites = FakeSpriteSheet::new();
    let mut anims = blinky(&sprites);
    anims.start_flashing(2, 80).unwrap();
    assert!(anims.is_flashing());

    anims.restart_blue().unwrap();
    assert!(!anims.is_flashing());
    let frightened = ghost(GhostId::Blinky, GhostState::Frightened);
    assert_eq!(anims.current_frame(&frightened).unwrap(), frame(SpriteKey::GhostBlue, 0));
}

#[test]
fn test_missing_sprite_fails_construction() {
    let sprites = FakeSpriteSheet::new().without(SpriteKey::GhostEyes(Direction::Down));
    let result = GhostAnimations::new(GhostId::Pinky, &sprites);
    assert!(matches!(
        result,
        Err(GameError::Configuration(ConfigurationError::MissingSprite(SpriteKey::GhostEyes(
            Direction::Down
        ))))
    ));
}
