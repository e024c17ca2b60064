use glam::{IVec2, UVec2};
use pacman_ui::audio::{Loop, Sound};
use pacman_ui::entity::{ActorFlags, Bonus, BonusState, Direction, GhostId, GhostState};
use pacman_ui::events::{GameEvent, GameState};
use pacman_ui::game::{GameVariant, TimerProgress};
use pacman_ui::render::Color;
use pacman_ui::scene::{GameScene, PlayScene};
use pacman_ui::texture::sprite::SpriteKey;
use pretty_assertions::assert_eq;

mod common;

use common::{frame, AudioCall, DrawOp, Harness, RecordingSurface};

fn play_scene(harness: &mut Harness) -> PlayScene {
    let mut scene = PlayScene::default();
    scene.set_context(&mut harness.ctx()).unwrap();
    scene.init(&mut harness.ctx()).unwrap();
    scene
}

fn enter(scene: &mut PlayScene, harness: &mut Harness, state: GameState) {
    let event = harness.controller.enter(state);
    scene.on_game_event(&mut harness.ctx(), event).unwrap();
}

fn send(scene: &mut PlayScene, harness: &mut Harness, event: GameEvent) {
    scene.on_game_event(&mut harness.ctx(), event).unwrap();
}

fn tick(scene: &mut PlayScene, harness: &mut Harness, count: u32) {
    for _ in 0..count {
        scene.update(&mut harness.ctx(), 1).unwrap();
        harness.controller.game.state_ticks += 1;
    }
}

fn render(scene: &PlayScene, harness: &Harness) -> RecordingSurface {
    let mut surface = RecordingSurface::default();
    scene
        .render(&harness.controller.game, &harness.sprites, &mut surface)
        .unwrap();
    surface
}

#[test]
fn test_ready_plays_jingle_for_new_game() {
    let mut harness = Harness::new(GameVariant::PacMan);
    let mut scene = play_scene(&mut harness);

    enter(&mut scene, &mut harness, GameState::Ready);
    assert!(harness.audio_calls().contains(&AudioCall::Play(Sound::GameReady)));

    // Not again once the game runs
    harness.clear_audio();
    harness.controller.game.game_running = true;
    enter(&mut scene, &mut harness, GameState::Ready);
    assert!(!harness.audio_calls().contains(&AudioCall::Play(Sound::GameReady)));
}

#[test]
fn test_attract_mode_is_muted() {
    let mut harness = Harness::new(GameVariant::PacMan);
    harness.controller.game.attract_mode = true;
    let mut scene = play_scene(&mut harness);

    enter(&mut scene, &mut harness, GameState::Ready);
    send(&mut scene, &mut harness, GameEvent::PlayerFindsFood);
    send(&mut scene, &mut harness, GameEvent::ScatterPhaseStarted(0));

    assert!(harness.sounds.is_muted());
    assert!(harness
        .audio_calls()
        .iter()
        .all(|call| matches!(call, AudioCall::StopAll)));
}

#[test]
fn test_death_animation_starts_after_delay() {
    let mut harness = Harness::new(GameVariant::PacMan);
    harness.controller.game.game_running = true;
    let mut scene = play_scene(&mut harness);

    enter(&mut scene, &mut harness, GameState::Hunting);
    harness.sounds.start_siren(0);
    enter(&mut scene, &mut harness, GameState::PacmanDying);
    harness.controller.game.pac.actor.flags |= ActorFlags::KILLED;
    assert!(!harness.is_playing(Sound::Siren1));
    assert!(scene.is_death_pending());

    tick(&mut scene, &mut harness, 59);
    assert_eq!(harness.controller.ghosts_hidden, 0);
    assert!(!harness.is_playing(Sound::PacmanDeath));

    tick(&mut scene, &mut harness, 1);
    assert_eq!(harness.controller.ghosts_hidden, 1);
    assert!(harness.is_playing(Sound::PacmanDeath));
    assert!(!scene.is_death_pending());

    // Eleven frames of eight ticks, one of them already played
    tick(&mut scene, &mut harness, 11 * 8 - 2);
    assert!(!scene.pac().unwrap().is_dying_complete());
    tick(&mut scene, &mut harness, 1);
    assert!(scene.pac().unwrap().is_dying_complete());
}

#[test]
fn test_level_complete_flashes_maze() {
    let mut harness = Harness::new(GameVariant::PacMan);
    harness.controller.game.num_flashes = 2;
    let mut scene = play_scene(&mut harness);

    enter(&mut scene, &mut harness, GameState::LevelComplete);
    tick(&mut scene, &mut harness, 120);
    assert_eq!(harness.controller.ghosts_hidden, 0);

    tick(&mut scene, &mut harness, 1);
    assert_eq!(harness.controller.ghosts_hidden, 1);

    tick(&mut scene, &mut harness, 60);
    assert!(scene.world().unwrap().maze_flashing().is_running());

    // Two flashes of two 10-tick frames, the first tick spent at the 3 s mark
    tick(&mut scene, &mut harness, 39);
    assert_eq!(harness.controller.expired, 0);
    tick(&mut scene, &mut harness, 1);
    assert!(scene.world().unwrap().is_maze_flashing_complete());
    assert_eq!(harness.controller.expired, 1);
}

#[test]
fn test_level_without_flashes_ends_at_once() {
    let mut harness = Harness::new(GameVariant::PacMan);
    harness.controller.game.num_flashes = 0;
    let mut scene = play_scene(&mut harness);

    enter(&mut scene, &mut harness, GameState::LevelComplete);
    tick(&mut scene, &mut harness, 1);
    assert_eq!(harness.controller.expired, 1);
}

#[test]
fn test_frightened_ghosts_flash_at_half_power() {
    let mut harness = Harness::new(GameVariant::PacMan);
    let mut scene = play_scene(&mut harness);
    enter(&mut scene, &mut harness, GameState::Hunting);

    let game = &mut harness.controller.game;
    game.num_flashes = 5;
    game.ghosts[0].state = GhostState::Frightened;
    game.ghosts[1].state = GhostState::Frightened;
    game.power_timer = TimerProgress::new(600, 299, true);
    send(&mut scene, &mut harness, GameEvent::PlayerGainsPower);

    tick(&mut scene, &mut harness, 1);
    assert!(!scene.ghost(GhostId::Blinky).unwrap().is_flashing());

    harness.controller.game.power_timer = TimerProgress::new(600, 300, true);
    tick(&mut scene, &mut harness, 1);
    let blinky = scene.ghost(GhostId::Blinky).unwrap();
    assert!(blinky.is_flashing());
    // 300 ticks left, 5 flashes of 4 frames
    assert_eq!(blinky.flashing().unwrap().frame_duration(), 15);
    assert!(scene.ghost(GhostId::Pinky).unwrap().is_flashing());
    assert!(!scene.ghost(GhostId::Inky).unwrap().is_flashing());

    // Once per power phase
    harness.controller.game.power_timer = TimerProgress::new(600, 450, true);
    tick(&mut scene, &mut harness, 1);
    assert_eq!(scene.ghost(GhostId::Blinky).unwrap().flashing().unwrap().frame_duration(), 15);
}

#[test]
fn test_short_power_phase_flashes_one_tick_per_frame() {
    let mut harness = Harness::new(GameVariant::PacMan);
    let mut scene = play_scene(&mut harness);
    enter(&mut scene, &mut harness, GameState::Hunting);

    let game = &mut harness.controller.game;
    game.num_flashes = 5;
    game.ghosts[0].state = GhostState::Frightened;
    game.ghosts[3].state = GhostState::Frightened;
    send(&mut scene, &mut harness, GameEvent::PlayerGainsPower);

    // 15 ticks left cannot fit 5 flashes of 4 frames
    for elapsed in 15..20 {
        harness.controller.game.power_timer = TimerProgress::new(30, elapsed, true);
        tick(&mut scene, &mut harness, 1);
    }

    for id in [GhostId::Blinky, GhostId::Clyde] {
        let flashing = scene.ghost(id).unwrap().flashing().unwrap();
        assert!(flashing.is_running());
        assert_eq!(flashing.frame_duration(), 1);
        assert_eq!(flashing.frame_index(), 1);
        assert_eq!(flashing.completed_cycles(), 1);
    }
}

#[test]
fn test_gaining_power_restarts_blue() {
    let mut harness = Harness::new(GameVariant::PacMan);
    let mut scene = play_scene(&mut harness);
    enter(&mut scene, &mut harness, GameState::Hunting);

    harness.controller.game.ghosts[2].state = GhostState::Frightened;
    harness.controller.game.power_timer = TimerProgress::new(100, 60, true);
    tick(&mut scene, &mut harness, 1);
    assert!(scene.ghost(GhostId::Inky).unwrap().is_flashing());

    send(&mut scene, &mut harness, GameEvent::PlayerGainsPower);
    assert!(!scene.ghost(GhostId::Inky).unwrap().is_flashing());
    assert!(harness.is_playing(Sound::PacmanPower));
}

#[test]
fn test_scatter_phases_switch_sirens() {
    let mut harness = Harness::new(GameVariant::PacMan);
    let mut scene = play_scene(&mut harness);
    enter(&mut scene, &mut harness, GameState::Hunting);
    harness.clear_audio();

    send(&mut scene, &mut harness, GameEvent::ScatterPhaseStarted(0));
    send(&mut scene, &mut harness, GameEvent::ScatterPhaseStarted(1));
    assert_eq!(
        harness.audio_calls(),
        [
            AudioCall::Loop(Sound::Siren1, Loop::Forever),
            AudioCall::Stop(Sound::Siren1),
            AudioCall::Loop(Sound::Siren2, Loop::Forever),
        ]
    );
}

#[test]
fn test_event_clips() {
    let mut harness = Harness::new(GameVariant::PacMan);
    let mut scene = play_scene(&mut harness);
    enter(&mut scene, &mut harness, GameState::Hunting);
    harness.clear_audio();

    send(&mut scene, &mut harness, GameEvent::PlayerFindsFood);
    send(&mut scene, &mut harness, GameEvent::BonusEaten);
    send(&mut scene, &mut harness, GameEvent::ExtraLife);
    send(&mut scene, &mut harness, GameEvent::PlayerGainsPower);
    send(&mut scene, &mut harness, GameEvent::PlayerLosesPower);

    assert_eq!(
        harness.audio_calls(),
        [
            AudioCall::Play(Sound::PacmanMunch),
            AudioCall::Play(Sound::BonusEaten),
            AudioCall::Play(Sound::ExtraLife),
            AudioCall::Loop(Sound::PacmanPower, Loop::Forever),
            AudioCall::Stop(Sound::PacmanPower),
        ]
    );
}

#[test]
fn test_ghost_returning_loop() {
    let mut harness = Harness::new(GameVariant::PacMan);
    let mut scene = play_scene(&mut harness);
    enter(&mut scene, &mut harness, GameState::Hunting);

    enter(&mut scene, &mut harness, GameState::GhostDying);
    assert!(harness.audio_calls().contains(&AudioCall::Play(Sound::GhostEaten)));

    harness.controller.game.ghosts[3].state = GhostState::Dead;
    enter(&mut scene, &mut harness, GameState::Hunting);
    assert!(harness.is_playing(Sound::GhostReturning));

    // Still one dead ghost around
    send(&mut scene, &mut harness, GameEvent::GhostEntersHouse);
    assert!(harness.is_playing(Sound::GhostReturning));

    harness.controller.game.ghosts[3].state = GhostState::EnteringHouse;
    send(&mut scene, &mut harness, GameEvent::GhostEntersHouse);
    assert!(!harness.is_playing(Sound::GhostReturning));
}

#[test]
fn test_render_hunting() {
    let mut harness = Harness::new(GameVariant::PacMan);
    let mut scene = play_scene(&mut harness);
    harness.controller.game.game_running = true;
    harness.controller.game.eaten_food = vec![IVec2::new(2, 4)];
    enter(&mut scene, &mut harness, GameState::Hunting);
    tick(&mut scene, &mut harness, 1);

    let surface = render(&scene, &harness);
    assert_eq!(surface.ops[0], DrawOp::Clear(Color::BLACK));
    assert_eq!(surface.ops[1], DrawOp::Sprite(frame(SpriteKey::MazeFull(1), 0), IVec2::new(0, 24)));
    assert!(surface
        .ops
        .contains(&DrawOp::Rect(Color::BLACK, IVec2::new(16, 32), UVec2::splat(8))));
    assert!(surface.has_text("SCORE"));
    assert!(!surface.has_text("READY!"));
    assert!(surface.has_sprite(frame(SpriteKey::LifeIcon, 0)));
    assert!(surface.has_sprite(frame(SpriteKey::PacMunching(Direction::Left), 0)));
}

#[test]
fn test_render_state_text() {
    let mut harness = Harness::new(GameVariant::PacMan);
    let mut scene = play_scene(&mut harness);

    enter(&mut scene, &mut harness, GameState::Ready);
    assert!(render(&scene, &harness).has_text("READY!"));

    harness.controller.game.attract_mode = true;
    enter(&mut scene, &mut harness, GameState::Hunting);
    let surface = render(&scene, &harness);
    assert!(surface.has_text("GAME"));
    assert!(surface.has_text("OVER"));
}

#[test]
fn test_energizers_blink() {
    let mut harness = Harness::new(GameVariant::PacMan);
    let mut scene = play_scene(&mut harness);
    let energizer = IVec2::new(1, 6);
    harness.controller.game.energizer_tiles = vec![energizer];
    let hidden = DrawOp::Rect(Color::BLACK, energizer * 8, UVec2::splat(8));

    enter(&mut scene, &mut harness, GameState::Hunting);
    assert!(!render(&scene, &harness).ops.contains(&hidden));

    tick(&mut scene, &mut harness, 10);
    assert!(render(&scene, &harness).ops.contains(&hidden));

    tick(&mut scene, &mut harness, 10);
    assert!(!render(&scene, &harness).ops.contains(&hidden));
}

#[test]
fn test_wandering_bonus_is_drawn_with_jump() {
    let mut harness = Harness::new(GameVariant::MsPacMan);
    let mut scene = play_scene(&mut harness);
    let mut bonus = Bonus {
        symbol: 2,
        state: BonusState::Edible,
        moving: true,
        ..Default::default()
    };
    bonus.actor.set_visible(true);
    harness.controller.game.bonus = Some(bonus);

    enter(&mut scene, &mut harness, GameState::Hunting);
    send(&mut scene, &mut harness, GameEvent::BonusActivated);
    tick(&mut scene, &mut harness, 1);

    let sprite = frame(SpriteKey::BonusSymbols, 2);
    let surface = render(&scene, &harness);
    assert!(surface.ops.contains(&DrawOp::Sprite(sprite, IVec2::new(-4, -2))));
}
