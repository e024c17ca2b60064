use glam::{IVec2, UVec2};
use tracing::{debug, info, warn};

use crate::animation::{BonusAnimations, GhostAnimations, PacAnimations, WorldAnimations};
use crate::audio::{Loop, Sound};
use crate::constants::{sec_to_ticks, MAZE_OFFSET_Y, TS};
use crate::entity::{GhostId, GhostState};
use crate::error::GameResult;
use crate::events::{GameEvent, GameState, GameStateChange};
use crate::game::GameModel;
use crate::render::{self, Color, RenderSurface};
use crate::scene::{GameScene, SceneContext};
use crate::texture::sprite::SpriteSheet;

/// True when `mark` falls inside the last `ticks` ticks up to `now`.
fn reached(now: u64, mark: u64, ticks: u32) -> bool {
    now >= mark && now < mark + ticks.max(1) as u64
}

/// The maze, the actors and the HUD, for every state between "READY!" and "GAME OVER".
#[derive(Debug, Default)]
pub struct PlayScene {
    pac: Option<PacAnimations>,
    ghosts: Vec<GhostAnimations>,
    bonus: Option<BonusAnimations>,
    world: Option<WorldAnimations>,
    /// Level the world animations were built for.
    world_level: u32,
    /// Ticks left until the dying animation starts.
    death_delay: Option<u32>,
    /// Frightened ghosts were told to flash during the current power phase.
    flashing_started: bool,
}

impl PlayScene {
    pub fn world(&self) -> Option<&WorldAnimations> {
        self.world.as_ref()
    }

    pub fn pac(&self) -> Option<&PacAnimations> {
        self.pac.as_ref()
    }

    pub fn ghost(&self, id: GhostId) -> Option<&GhostAnimations> {
        self.ghosts.get(id.as_usize())
    }

    pub fn bonus(&self) -> Option<&BonusAnimations> {
        self.bonus.as_ref()
    }

    pub fn is_death_pending(&self) -> bool {
        self.death_delay.is_some()
    }

    /// Rebuilds the world animations when the level moved on, since the maze may have changed.
    fn sync_level(&mut self, ctx: &SceneContext<'_>) -> GameResult<()> {
        let game = ctx.game();
        if self.world.is_some() && self.world_level == game.level_number {
            return Ok(());
        }
        self.world = Some(WorldAnimations::new(
            ctx.sprites,
            game.level_number,
            game.num_flashes,
            ctx.config.energizer_blink_ticks,
        )?);
        self.world_level = game.level_number;
        debug!(level = game.level_number, "World animations rebuilt");
        Ok(())
    }

    fn reset_actors(&mut self) -> GameResult<()> {
        if let Some(pac) = self.pac.as_mut() {
            pac.refresh()?;
        }
        self.ghosts.iter_mut().for_each(GhostAnimations::reset);
        Ok(())
    }

    fn update_death(&mut self, ctx: &mut SceneContext<'_>, ticks: u32) -> GameResult<()> {
        let Some(remaining) = self.death_delay else {
            return Ok(());
        };
        if remaining > ticks {
            self.death_delay = Some(remaining - ticks);
            return Ok(());
        }

        self.death_delay = None;
        ctx.controller.hide_ghosts();
        if ctx.game().game_running {
            ctx.sounds.play(Sound::PacmanDeath);
        }
        if let Some(pac) = self.pac.as_mut() {
            pac.start_dying()?;
        }
        info!("Pac-Man dying animation started");
        Ok(())
    }

    fn update_level_complete(&mut self, ctx: &mut SceneContext<'_>, ticks: u32) {
        let Some(world) = self.world.as_mut() else {
            return;
        };
        let state_ticks = ctx.game().state_ticks;

        if world.is_maze_flashing_complete() {
            ctx.controller.expire_state_timer();
        } else if reached(state_ticks, sec_to_ticks(2), ticks) {
            ctx.controller.hide_ghosts();
        } else if reached(state_ticks, sec_to_ticks(3), ticks) {
            world.start_maze_flashing();
        }
    }

    /// Frightened ghosts start flashing once the power timer is half gone, for the time left.
    fn update_power_flashing(&mut self, game: &GameModel) -> GameResult<()> {
        if !game.power_timer.running {
            self.flashing_started = false;
            return Ok(());
        }
        if self.flashing_started || !game.power_timer.is_half_expired() || game.num_flashes == 0 {
            return Ok(());
        }

        self.flashing_started = true;
        let remaining = game.power_timer.remaining();
        for ghost in game.ghosts_in(GhostState::Frightened) {
            let Some(anims) = self.ghosts.get_mut(ghost.id.as_usize()) else {
                continue;
            };
            // Every flashing frame lasts at least one tick, even when that outlasts the power
            let frames = anims.flashing().map_or(1, |seq| seq.frame_count() as u64);
            let total = remaining.max(game.num_flashes as u64 * frames);
            if let Err(e) = anims.start_flashing(game.num_flashes, total) {
                warn!(ghost = ghost.id.as_ref(), error = %e, "Could not start flashing");
            }
        }
        debug!(remaining, "Frightened ghosts flashing");
        Ok(())
    }

    fn animate_actors(&mut self, game: &GameModel, ticks: u32) -> GameResult<()> {
        if let Some(pac) = self.pac.as_mut() {
            pac.animate(&game.pac, ticks)?;
        }
        for ghost in &game.ghosts {
            if let Some(anims) = self.ghosts.get_mut(ghost.id.as_usize()) {
                anims.animate(ghost, ticks)?;
            }
        }
        if let (Some(anims), Some(bonus)) = (self.bonus.as_mut(), &game.bonus) {
            anims.update(bonus, ticks)?;
        }
        Ok(())
    }

    fn draw_maze(&self, game: &GameModel, surface: &mut dyn RenderSurface) -> GameResult<()> {
        let Some(world) = &self.world else {
            return Ok(());
        };
        surface.draw_sprite(world.maze_sprite(), IVec2::new(0, MAZE_OFFSET_Y))?;
        if world.maze_flashing().is_running() {
            return Ok(());
        }

        render::hide_eaten_food(surface, game)?;
        if !world.energizer().is_on() {
            for &tile in &game.energizer_tiles {
                if !game.is_food_eaten(tile) {
                    surface.fill_rect(Color::BLACK, tile * TS, UVec2::splat(TS as u32))?;
                }
            }
        }
        Ok(())
    }
}

impl GameScene for PlayScene {
    fn name(&self) -> &'static str {
        "play"
    }

    fn set_context(&mut self, ctx: &mut SceneContext<'_>) -> GameResult<()> {
        let sprites = ctx.sprites;
        self.pac = Some(PacAnimations::new(sprites)?);
        self.ghosts = GhostId::ALL
            .into_iter()
            .map(|id| GhostAnimations::new(id, sprites))
            .collect::<GameResult<_>>()?;
        self.bonus = Some(BonusAnimations::new(sprites)?);
        self.world = None;
        self.sync_level(ctx)
    }

    fn init(&mut self, ctx: &mut SceneContext<'_>) -> GameResult<()> {
        self.death_delay = None;
        self.flashing_started = false;
        let attract_mode = ctx.game().attract_mode;
        ctx.sounds.set_muted(attract_mode);
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>, ticks: u32) -> GameResult<()> {
        let state = ctx.game().state;
        match state {
            GameState::LevelComplete => self.update_level_complete(ctx, ticks),
            GameState::LevelStarting => ctx.controller.expire_state_timer(),
            GameState::PacmanDying => self.update_death(ctx, ticks)?,
            _ => {}
        }

        let game = ctx.controller.game();
        self.update_power_flashing(game)?;
        self.animate_actors(game, ticks)?;
        if let Some(world) = self.world.as_mut() {
            world.update(ticks);
        }
        Ok(())
    }

    fn on_game_state_change(&mut self, ctx: &mut SceneContext<'_>, change: GameStateChange) -> GameResult<()> {
        let attract_mode = ctx.game().attract_mode;
        ctx.sounds.set_muted(attract_mode);

        match change.new {
            GameState::Ready => {
                self.sync_level(ctx)?;
                if let Some(world) = self.world.as_mut() {
                    world.reset();
                }
                self.reset_actors()?;
                if let Some(bonus) = self.bonus.as_mut() {
                    bonus.reset_jump();
                }
                ctx.sounds.stop_all();
                if !attract_mode && !ctx.game().game_running {
                    ctx.sounds.set_muted(false);
                    ctx.sounds.play(Sound::GameReady);
                }
            }
            GameState::Hunting => {
                if let Some(world) = self.world.as_mut() {
                    world.energizer_mut().restart();
                }
                if let Some(pac) = self.pac.as_mut() {
                    pac.ensure_running();
                }
                self.ghosts.iter_mut().for_each(GhostAnimations::ensure_running);
            }
            GameState::PacmanDying => {
                ctx.sounds.stop_all();
                self.death_delay = Some(ctx.config.death_animation_delay);
            }
            GameState::GhostDying => {
                if let Some(world) = self.world.as_mut() {
                    world.energizer_mut().restart();
                }
                ctx.sounds.play(Sound::GhostEaten);
            }
            GameState::LevelStarting => self.sync_level(ctx)?,
            GameState::LevelComplete => {
                if let Some(pac) = self.pac.as_mut() {
                    pac.refresh()?;
                }
                if let Some(world) = self.world.as_mut() {
                    world.reset();
                }
                ctx.sounds.stop_all();
            }
            GameState::GameOver => {
                if let Some(world) = self.world.as_mut() {
                    world.energizer_mut().stop();
                }
                ctx.sounds.stop_all();
            }
            _ => {}
        }

        if change.old == GameState::GhostDying && ctx.game().ghosts_in(GhostState::Dead).next().is_some() {
            ctx.sounds.ensure_loop(Sound::GhostReturning, Loop::Forever);
        }
        Ok(())
    }

    fn on_game_event(&mut self, ctx: &mut SceneContext<'_>, event: GameEvent) -> GameResult<()> {
        let attract_mode = ctx.game().attract_mode;
        ctx.sounds.set_muted(attract_mode);

        match event {
            GameEvent::StateChange(change) => return self.on_game_state_change(ctx, change),
            GameEvent::ScatterPhaseStarted(phase) => ctx.sounds.start_siren(phase),
            GameEvent::PlayerGainsPower => {
                self.flashing_started = false;
                let game = ctx.controller.game();
                for ghost in game.ghosts_in(GhostState::Frightened) {
                    if let Some(anims) = self.ghosts.get_mut(ghost.id.as_usize()) {
                        anims.restart_blue()?;
                    }
                }
                ctx.sounds.ensure_loop(Sound::PacmanPower, Loop::Forever);
            }
            GameEvent::PlayerLosesPower => ctx.sounds.stop(Sound::PacmanPower),
            GameEvent::PlayerFindsFood => ctx.sounds.ensure_playing(Sound::PacmanMunch),
            GameEvent::BonusActivated => {
                if let Some(bonus) = self.bonus.as_mut() {
                    bonus.restart_jump();
                }
            }
            GameEvent::BonusEaten => {
                if let Some(bonus) = self.bonus.as_mut() {
                    bonus.reset_jump();
                }
                ctx.sounds.play(Sound::BonusEaten);
            }
            GameEvent::ExtraLife => ctx.sounds.play(Sound::ExtraLife),
            GameEvent::GhostReturnsHome => ctx.sounds.ensure_loop(Sound::GhostReturning, Loop::Forever),
            GameEvent::GhostEntersHouse => {
                if ctx.game().ghosts_in(GhostState::Dead).next().is_none() {
                    ctx.sounds.stop(Sound::GhostReturning);
                }
            }
            GameEvent::LevelStarting => self.sync_level(ctx)?,
            GameEvent::UnspecifiedChange => {}
        }
        Ok(())
    }

    fn render(&self, game: &GameModel, sprites: &dyn SpriteSheet, surface: &mut dyn RenderSurface) -> GameResult<()> {
        surface.clear(Color::BLACK)?;
        self.draw_maze(game, surface)?;

        if game.attract_mode {
            render::draw_game_state(surface, GameState::GameOver)?;
        } else {
            render::draw_game_state(surface, game.state)?;
            render::draw_level_counter(surface, sprites, &game.level_counter)?;
        }

        if let (Some(anims), Some(bonus)) = (&self.bonus, &game.bonus) {
            let sprite = anims.current_frame(bonus)?;
            render::draw_bonus(surface, bonus, sprite, anims.jump_offset(bonus))?;
        }
        if let Some(pac) = &self.pac {
            render::draw_entity(surface, &game.pac.actor, Some(pac.current_frame(&game.pac)?))?;
        }
        for ghost in &game.ghosts {
            match self.ghosts.get(ghost.id.as_usize()) {
                Some(anims) => render::draw_entity(surface, &ghost.actor, Some(anims.current_frame(ghost)?))?,
                None => warn!(ghost = ghost.id.as_ref(), "No animations for ghost"),
            }
        }

        if game.game_running {
            render::draw_scores(surface, game, false)?;
            render::draw_lives_counter(surface, sprites, game)
        } else {
            render::draw_scores(surface, game, true)
        }
    }
}
