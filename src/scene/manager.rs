use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::{ConfigurationError, GameResult};
use crate::events::{GameEvent, GameState};
use crate::game::{GameModel, GameVariant};
use crate::render::RenderSurface;
use crate::scene::{
    BootScene, CreditScene, GameScene, IntermissionScene, IntroScene, PlayScene, SceneContext,
};
use crate::texture::sprite::SpriteSheet;

/// Which scene a game state is shown by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Boot,
    Intro,
    Credit,
    /// Intermission number, 1 to 3.
    Intermission(u8),
    Play,
}

impl SceneId {
    /// Maps a controller state to a scene. Intermissions take their number from the game.
    pub fn for_state(state: GameState, game: &GameModel) -> Result<SceneId, ConfigurationError> {
        let id = match state {
            GameState::Boot => SceneId::Boot,
            GameState::Intro => SceneId::Intro,
            GameState::Credit => SceneId::Credit,
            GameState::Intermission => {
                let number = game
                    .intermission_number
                    .ok_or(ConfigurationError::NoIntermissionNumber(state))?;
                SceneId::Intermission(number)
            }
            GameState::IntermissionTest => SceneId::Intermission(game.intermission_test_number),
            _ => SceneId::Play,
        };
        Ok(id)
    }
}

type SceneKey = (GameVariant, SceneId);

/// Keeps exactly one scene current and swaps scenes as the controller changes state.
#[derive(Default)]
pub struct SceneManager {
    scenes: HashMap<SceneKey, Box<dyn GameScene>>,
    current: Option<SceneKey>,
}

impl SceneManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// A manager with the built-in scenes of both variants registered.
    pub fn with_default_scenes() -> Self {
        let mut manager = Self::new();
        for variant in [GameVariant::PacMan, GameVariant::MsPacMan] {
            manager.register(variant, SceneId::Boot, Box::new(BootScene::default()));
            manager.register(variant, SceneId::Intro, Box::new(IntroScene::default()));
            manager.register(variant, SceneId::Credit, Box::new(CreditScene));
            for number in 1..=3 {
                manager.register(variant, SceneId::Intermission(number), Box::new(IntermissionScene::new(number)));
            }
            manager.register(variant, SceneId::Play, Box::new(PlayScene::default()));
        }
        manager
    }

    pub fn register(&mut self, variant: GameVariant, id: SceneId, scene: Box<dyn GameScene>) {
        self.scenes.insert((variant, id), scene);
    }

    pub fn current_id(&self) -> Option<SceneId> {
        self.current.map(|(_, id)| id)
    }

    pub fn current_scene(&self) -> Option<&dyn GameScene> {
        self.current.and_then(|key| self.scenes.get(&key)).map(|scene| scene.as_ref())
    }

    /// Makes the scene for `state` current.
    ///
    /// Nothing happens when that scene already is current, unless `forced`, in which case it
    /// is ended and initialized again.
    pub fn update_scene(&mut self, ctx: &mut SceneContext<'_>, state: GameState, forced: bool) -> GameResult<()> {
        let game = ctx.game();
        let id = SceneId::for_state(state, game)?;
        let key = (game.variant, id);
        if !self.scenes.contains_key(&key) {
            return Err(ConfigurationError::NoSceneForState(state).into());
        }

        if self.current == Some(key) && !forced {
            return Ok(());
        }
        self.switch_to(ctx, key)
    }

    fn switch_to(&mut self, ctx: &mut SceneContext<'_>, key: SceneKey) -> GameResult<()> {
        if let Some(previous) = self.current.take() {
            if let Some(scene) = self.scenes.get_mut(&previous) {
                debug!(scene = scene.name(), "Ending scene");
                scene.end(ctx);
            }
        }

        let scene = self
            .scenes
            .get_mut(&key)
            .ok_or(ConfigurationError::NoSceneForState(ctx.game().state))?;
        info!(scene = scene.name(), variant = key.0.as_ref(), "Scene changed");
        scene.set_context(ctx)?;
        scene.init(ctx)?;
        self.current = Some(key);
        Ok(())
    }

    /// Switches scenes as the event demands, then hands the event to the current scene.
    pub fn on_game_event(&mut self, ctx: &mut SceneContext<'_>, event: GameEvent) -> GameResult<()> {
        match event {
            GameEvent::StateChange(change) => self.update_scene(ctx, change.new, false)?,
            GameEvent::UnspecifiedChange => {
                let state = ctx.game().state;
                self.update_scene(ctx, state, true)?;
            }
            _ => {}
        }

        if let Some(scene) = self.current.and_then(|key| self.scenes.get_mut(&key)) {
            scene.on_game_event(ctx, event)?;
        }
        Ok(())
    }

    /// Ends whatever is shown and starts the intro from scratch.
    pub fn restart_intro(&mut self, ctx: &mut SceneContext<'_>) -> GameResult<()> {
        let key = (ctx.game().variant, SceneId::Intro);
        if !self.scenes.contains_key(&key) {
            return Err(ConfigurationError::NoSceneForState(GameState::Intro).into());
        }
        self.switch_to(ctx, key)
    }

    pub fn update(&mut self, ctx: &mut SceneContext<'_>, ticks: u32) -> GameResult<()> {
        match self.current.and_then(|key| self.scenes.get_mut(&key)) {
            Some(scene) => scene.update(ctx, ticks),
            None => Ok(()),
        }
    }

    pub fn render(&self, game: &GameModel, sprites: &dyn SpriteSheet, surface: &mut dyn RenderSurface) -> GameResult<()> {
        match self.current_scene() {
            Some(scene) => scene.render(game, sprites, surface),
            None => Ok(()),
        }
    }
}
