use tracing::warn;

use crate::animation::{GhostAnimations, PacAnimations};
use crate::audio::{Loop, Sound};
use crate::entity::GhostId;
use crate::error::GameResult;
use crate::game::{GameModel, GameVariant};
use crate::render::{self, Color, RenderSurface};
use crate::scene::{GameScene, SceneContext};
use crate::texture::animated::FrameSequence;
use crate::texture::sprite::{Sprite, SpriteKey, SpriteSheet};

const BIG_PAC_FRAME_TICKS: u32 = 3;

/// One of the three cutscenes between levels.
///
/// The choreography belongs to the controller's cutscene view; the scene animates whoever is
/// on stage and keeps the intermission music looping until it ends.
#[derive(Debug)]
pub struct IntermissionScene {
    number: u8,
    music: Option<Sound>,
    pacs: Vec<PacAnimations>,
    ghosts: Vec<GhostAnimations>,
    big_pac: Option<FrameSequence<Sprite>>,
}

impl IntermissionScene {
    pub fn new(number: u8) -> Self {
        Self {
            number,
            music: None,
            pacs: Vec::new(),
            ghosts: Vec::new(),
            big_pac: None,
        }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    fn music_loops(variant: GameVariant) -> Loop {
        match variant {
            GameVariant::PacMan => Loop::Times(2),
            GameVariant::MsPacMan => Loop::Times(1),
        }
    }
}

impl GameScene for IntermissionScene {
    fn name(&self) -> &'static str {
        match self.number {
            1 => "intermission-1",
            2 => "intermission-2",
            _ => "intermission-3",
        }
    }

    fn set_context(&mut self, ctx: &mut SceneContext<'_>) -> GameResult<()> {
        let sprites = ctx.sprites;
        let variant = ctx.game().variant;

        let lead = PacAnimations::new(sprites)?;
        let mut partner = PacAnimations::new(sprites)?;
        if variant == GameVariant::MsPacMan && sprites.frames(SpriteKey::HusbandMunching(Default::default())).is_some() {
            partner.use_husband_munching(sprites)?;
        }
        self.pacs = vec![lead, partner];

        self.ghosts = GhostId::ALL
            .into_iter()
            .map(|id| GhostAnimations::new(id, sprites))
            .collect::<GameResult<_>>()?;

        self.big_pac = match sprites.frames(SpriteKey::BigPacMunching) {
            Some(frames) => Some(FrameSequence::new(frames, BIG_PAC_FRAME_TICKS)?.repeat_forever()),
            None => None,
        };
        Ok(())
    }

    fn init(&mut self, ctx: &mut SceneContext<'_>) -> GameResult<()> {
        self.pacs.iter_mut().for_each(PacAnimations::ensure_running);
        self.ghosts.iter_mut().for_each(GhostAnimations::ensure_running);
        if let Some(big_pac) = self.big_pac.as_mut() {
            big_pac.restart();
        }

        self.music = Sound::intermission(self.number);
        match self.music {
            Some(music) => ctx.sounds.play_looped(music, Self::music_loops(ctx.game().variant)),
            None => warn!(number = self.number, "No music for intermission"),
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>, ticks: u32) -> GameResult<()> {
        let Some(cutscene) = &ctx.game().cutscene else {
            return Ok(());
        };

        for (anims, pac) in self.pacs.iter_mut().zip(cutscene.pacs.iter()) {
            anims.animate(pac, ticks)?;
        }
        for ghost in &cutscene.ghosts {
            match self.ghosts.get_mut(ghost.id.as_usize()) {
                Some(anims) => {
                    anims.animate(ghost, ticks)?;
                }
                None => warn!(ghost = ghost.id.as_ref(), "No animations for cutscene ghost"),
            }
        }
        if let (Some(big_pac), Some(_)) = (self.big_pac.as_mut(), cutscene.big_pac) {
            big_pac.advance(ticks);
        }
        Ok(())
    }

    fn end(&mut self, ctx: &mut SceneContext<'_>) {
        if let Some(music) = self.music.take() {
            ctx.sounds.stop(music);
        }
        ctx.sounds.stop_loops();
    }

    fn render(&self, game: &GameModel, sprites: &dyn SpriteSheet, surface: &mut dyn RenderSurface) -> GameResult<()> {
        surface.clear(Color::BLACK)?;
        let Some(cutscene) = &game.cutscene else {
            return Ok(());
        };

        for prop in &cutscene.props {
            let sprite = sprites.sprite(prop.key, prop.frame)?;
            render::draw_sprite_centered(surface, sprite, prop.position)?;
        }
        for ghost in &cutscene.ghosts {
            if let Some(anims) = self.ghosts.get(ghost.id.as_usize()) {
                render::draw_entity(surface, &ghost.actor, Some(anims.current_frame(ghost)?))?;
            }
        }
        for (anims, pac) in self.pacs.iter().zip(cutscene.pacs.iter()) {
            render::draw_entity(surface, &pac.actor, Some(anims.current_frame(pac)?))?;
        }
        if let (Some(big_pac), Some(pac)) = (&self.big_pac, &cutscene.big_pac) {
            render::draw_entity(surface, &pac.actor, Some(*big_pac.current_frame()))?;
        }

        if game.variant == GameVariant::PacMan {
            render::draw_level_counter(surface, sprites, &game.level_counter)?;
        }
        Ok(())
    }
}
