#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use glam::{IVec2, UVec2, Vec2};
use pacman_ui::audio::{AudioBackend, Loop, Sound, SoundManager};
use pacman_ui::config::UiConfig;
use pacman_ui::entity::{Actor, Direction, Ghost, GhostId, GhostState, Pac};
use pacman_ui::error::{GameResult, TextureError};
use pacman_ui::events::{GameEvent, GameState, GameStateChange};
use pacman_ui::game::{GameController, GameModel, GameVariant};
use pacman_ui::render::{Color, Font, RenderSurface};
use pacman_ui::scene::{GameScene, SceneContext};
use pacman_ui::texture::sprite::{Sprite, SpriteKey, SpriteSheet};
use smallvec::SmallVec;

/// Row of the fake atlas a key's frames live on, so frames of different keys never compare equal.
fn row(key: SpriteKey) -> u16 {
    let dir = |d: Direction| d.as_usize() as u16;
    match key {
        SpriteKey::PacMunching(d) => dir(d),
        SpriteKey::PacDying => 4,
        SpriteKey::LifeIcon => 5,
        SpriteKey::GhostColor(id, d) => 6 + id.as_usize() as u16 * 4 + dir(d),
        SpriteKey::GhostEyes(d) => 22 + dir(d),
        SpriteKey::GhostBlue => 26,
        SpriteKey::GhostFlashing => 27,
        SpriteKey::BountyNumbers => 28,
        SpriteKey::BonusSymbols => 29,
        SpriteKey::BonusValues => 30,
        SpriteKey::MazeFull(n) => 31 + n as u16 * 2,
        SpriteKey::MazeFlashing(n) => 32 + n as u16 * 2,
        SpriteKey::HusbandMunching(d) => 50 + dir(d),
        SpriteKey::BigPacMunching => 54,
    }
}

fn default_frame_count(key: SpriteKey) -> usize {
    match key {
        SpriteKey::PacMunching(_) | SpriteKey::HusbandMunching(_) => 3,
        SpriteKey::PacDying => 11,
        SpriteKey::LifeIcon | SpriteKey::MazeFull(_) | SpriteKey::MazeFlashing(_) => 1,
        SpriteKey::GhostFlashing | SpriteKey::BountyNumbers => 4,
        SpriteKey::BonusSymbols | SpriteKey::BonusValues => 8,
        _ => 2,
    }
}

/// Sprite `index` of `key` in the fake atlas.
pub fn frame(key: SpriteKey, index: usize) -> Sprite {
    Sprite::new(index as u16 * 16, row(key) * 16, 16, 16)
}

/// A sprite sheet with every key present unless told otherwise.
#[derive(Debug, Default)]
pub struct FakeSpriteSheet {
    counts: HashMap<SpriteKey, usize>,
    missing: HashSet<SpriteKey>,
}

impl FakeSpriteSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frames(mut self, key: SpriteKey, count: usize) -> Self {
        self.counts.insert(key, count);
        self
    }

    pub fn without(mut self, key: SpriteKey) -> Self {
        self.missing.insert(key);
        self
    }
}

impl SpriteSheet for FakeSpriteSheet {
    fn frames(&self, key: SpriteKey) -> Option<SmallVec<[Sprite; 4]>> {
        if self.missing.contains(&key) {
            return None;
        }
        let count = self.counts.get(&key).copied().unwrap_or_else(|| default_frame_count(key));
        Some((0..count).map(|i| frame(key, i)).collect())
    }

    fn ghost_color(&self, id: GhostId) -> Color {
        match id {
            GhostId::Blinky => Color::RED,
            GhostId::Pinky => Color::PINK,
            GhostId::Inky => Color::rgb(0, 255, 255),
            GhostId::Clyde => Color::ORANGE,
        }
    }

    fn maze_food_color(&self, _maze_number: u8) -> Color {
        Color::PINK
    }

    fn maze_number(&self, level_number: u32) -> u8 {
        match level_number {
            0..=2 => 1,
            3..=5 => 2,
            _ => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCall {
    Play(Sound),
    Loop(Sound, Loop),
    Stop(Sound),
    StopAll,
}

#[derive(Debug, Default)]
pub struct AudioLog {
    pub calls: Vec<AudioCall>,
    pub playing: HashSet<Sound>,
}

/// An audio backend sharing its call log with the test.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub log: Rc<RefCell<AudioLog>>,
}

impl RecordingAudio {
    pub fn new() -> (Self, Rc<RefCell<AudioLog>>) {
        let audio = Self::default();
        let log = audio.log.clone();
        (audio, log)
    }
}

impl AudioBackend for RecordingAudio {
    fn play(&mut self, sound: Sound) {
        let mut log = self.log.borrow_mut();
        log.calls.push(AudioCall::Play(sound));
        log.playing.insert(sound);
    }

    fn play_looped(&mut self, sound: Sound, repeat: Loop) {
        let mut log = self.log.borrow_mut();
        log.calls.push(AudioCall::Loop(sound, repeat));
        log.playing.insert(sound);
    }

    fn stop(&mut self, sound: Sound) {
        let mut log = self.log.borrow_mut();
        log.calls.push(AudioCall::Stop(sound));
        log.playing.remove(&sound);
    }

    fn stop_all(&mut self) {
        let mut log = self.log.borrow_mut();
        log.calls.push(AudioCall::StopAll);
        log.playing.clear();
    }

    fn is_playing(&self, sound: Sound) -> bool {
        self.log.borrow().playing.contains(&sound)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Color),
    Sprite(Sprite, IVec2),
    Text(String, Color, IVec2),
    Rect(Color, IVec2, UVec2),
    Oval(Color, IVec2, UVec2),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(text, ..) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn sprites(&self) -> Vec<(Sprite, IVec2)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Sprite(sprite, at) => Some((*sprite, *at)),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, text: &str) -> bool {
        self.texts().contains(&text)
    }

    pub fn has_sprite(&self, sprite: Sprite) -> bool {
        self.sprites().iter().any(|(s, _)| *s == sprite)
    }
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self, color: Color) -> Result<(), TextureError> {
        self.ops.push(DrawOp::Clear(color));
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: Sprite, at: IVec2) -> Result<(), TextureError> {
        self.ops.push(DrawOp::Sprite(sprite, at));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, color: Color, _font: Font, at: IVec2) -> Result<(), TextureError> {
        self.ops.push(DrawOp::Text(text.to_string(), color, at));
        Ok(())
    }

    fn fill_rect(&mut self, color: Color, at: IVec2, size: UVec2) -> Result<(), TextureError> {
        self.ops.push(DrawOp::Rect(color, at, size));
        Ok(())
    }

    fn fill_oval(&mut self, color: Color, at: IVec2, size: UVec2) -> Result<(), TextureError> {
        self.ops.push(DrawOp::Oval(color, at, size));
        Ok(())
    }
}

/// A controller whose model the test edits directly.
#[derive(Debug)]
pub struct ScriptedController {
    pub game: GameModel,
    pub expired: u32,
    pub ghosts_hidden: u32,
}

impl ScriptedController {
    pub fn new(variant: GameVariant) -> Self {
        Self {
            game: GameModel::new(variant),
            expired: 0,
            ghosts_hidden: 0,
        }
    }

    /// Moves to `state` and returns the matching event.
    pub fn enter(&mut self, state: GameState) -> GameEvent {
        let change = GameStateChange::new(self.game.state, state);
        self.game.state = state;
        self.game.state_ticks = 0;
        GameEvent::StateChange(change)
    }
}

impl GameController for ScriptedController {
    fn game(&self) -> &GameModel {
        &self.game
    }

    fn expire_state_timer(&mut self) {
        self.expired += 1;
    }

    fn hide_ghosts(&mut self) {
        self.ghosts_hidden += 1;
        for ghost in &mut self.game.ghosts {
            ghost.actor.set_visible(false);
        }
    }
}

/// Everything a [`SceneContext`] borrows, owned in one place.
pub struct Harness {
    pub controller: ScriptedController,
    pub sounds: SoundManager,
    pub sprites: FakeSpriteSheet,
    pub config: UiConfig,
    pub audio: Rc<RefCell<AudioLog>>,
}

impl Harness {
    pub fn new(variant: GameVariant) -> Self {
        Self::with_sprites(variant, FakeSpriteSheet::new())
    }

    pub fn with_sprites(variant: GameVariant, sprites: FakeSpriteSheet) -> Self {
        let (backend, audio) = RecordingAudio::new();
        Self {
            controller: ScriptedController::new(variant),
            sounds: SoundManager::new(Box::new(backend)),
            sprites,
            config: UiConfig::default(),
            audio,
        }
    }

    pub fn ctx(&mut self) -> SceneContext<'_> {
        SceneContext {
            controller: &mut self.controller,
            sounds: &mut self.sounds,
            sprites: &self.sprites,
            config: &self.config,
        }
    }

    pub fn game_mut(&mut self) -> &mut GameModel {
        &mut self.controller.game
    }

    pub fn audio_calls(&self) -> Vec<AudioCall> {
        self.audio.borrow().calls.clone()
    }

    pub fn clear_audio(&self) {
        self.audio.borrow_mut().calls.clear();
    }

    pub fn is_playing(&self, sound: Sound) -> bool {
        self.audio.borrow().playing.contains(&sound)
    }
}

/// A scene logging its lifecycle calls as `"<hook>:<name>"`.
pub struct LoggingScene {
    pub name: &'static str,
    pub log: Rc<RefCell<Vec<String>>>,
}

impl LoggingScene {
    pub fn boxed(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Box<dyn GameScene> {
        Box::new(Self {
            name,
            log: log.clone(),
        })
    }

    fn record(&self, hook: &str) {
        self.log.borrow_mut().push(format!("{hook}:{}", self.name));
    }
}

impl GameScene for LoggingScene {
    fn name(&self) -> &'static str {
        self.name
    }

    fn set_context(&mut self, _ctx: &mut SceneContext<'_>) -> GameResult<()> {
        self.record("context");
        Ok(())
    }

    fn init(&mut self, _ctx: &mut SceneContext<'_>) -> GameResult<()> {
        self.record("init");
        Ok(())
    }

    fn update(&mut self, _ctx: &mut SceneContext<'_>, _ticks: u32) -> GameResult<()> {
        self.record("update");
        Ok(())
    }

    fn end(&mut self, ctx: &mut SceneContext<'_>) {
        self.record("end");
        ctx.sounds.stop_loops();
    }

    fn on_game_event(&mut self, _ctx: &mut SceneContext<'_>, event: GameEvent) -> GameResult<()> {
        self.record(&format!("event({})", event.as_ref()));
        Ok(())
    }

    fn render(&self, _game: &GameModel, _sprites: &dyn SpriteSheet, _surface: &mut dyn RenderSurface) -> GameResult<()> {
        self.record("render");
        Ok(())
    }
}

pub fn moving(actor: &mut Actor, dir: Direction) {
    actor.move_dir = dir;
    actor.wish_dir = dir;
    actor.velocity = Vec2::from(dir);
}

pub fn ghost(id: GhostId, state: GhostState) -> Ghost {
    let mut ghost = Ghost::new(id, Actor::new(Vec2::new(100.0, 100.0), Direction::Left));
    ghost.state = state;
    ghost
}

pub fn pac() -> Pac {
    Pac {
        actor: Actor::new(Vec2::new(104.0, 208.0), Direction::Left),
    }
}
