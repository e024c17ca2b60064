use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Result};
use glam::{IVec2, UVec2};
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::image::LoadTexture;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::ttf::Font as TtfFont;
use sdl2::video::{Window, WindowContext};

use crate::error::TextureError;
use crate::render::{Color, Font, RenderSurface};
use crate::texture::sprite::Sprite;

impl From<Color> for sdl2::pixels::Color {
    fn from(color: Color) -> Self {
        sdl2::pixels::Color::RGB(color.r, color.g, color.b)
    }
}

fn render_failed(e: impl ToString) -> TextureError {
    TextureError::RenderFailed(e.to_string())
}

/// A window canvas drawing sprites out of a single atlas texture.
pub struct SdlSurface {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    atlas: Texture,
    fonts: HashMap<Font, TtfFont<'static, 'static>>,
}

impl SdlSurface {
    /// Loads the sprite atlas image for `canvas`. Text is only drawn in fonts added later.
    pub fn new(canvas: Canvas<Window>, atlas_path: &Path) -> Result<Self> {
        let texture_creator = canvas.texture_creator();
        let atlas = texture_creator
            .load_texture(atlas_path)
            .map_err(|e| anyhow!("Failed to load atlas {}: {e}", atlas_path.display()))?;
        Ok(Self {
            canvas,
            texture_creator,
            atlas,
            fonts: HashMap::new(),
        })
    }

    pub fn add_font(&mut self, font: Font, ttf: TtfFont<'static, 'static>) {
        self.fonts.insert(font, ttf);
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas<Window> {
        &mut self.canvas
    }

    pub fn present(&mut self) {
        self.canvas.present();
    }
}

impl RenderSurface for SdlSurface {
    fn clear(&mut self, color: Color) -> Result<(), TextureError> {
        self.canvas.set_draw_color(color);
        self.canvas.clear();
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: Sprite, at: IVec2) -> Result<(), TextureError> {
        let (w, h) = (sprite.width() as u32, sprite.height() as u32);
        let src = Rect::new(sprite.pos.x as i32, sprite.pos.y as i32, w, h);
        let dst = Rect::new(at.x, at.y, w, h);
        self.canvas.copy(&self.atlas, Some(src), Some(dst)).map_err(render_failed)
    }

    fn draw_text(&mut self, text: &str, color: Color, font: Font, at: IVec2) -> Result<(), TextureError> {
        let Some(ttf) = self.fonts.get(&font) else {
            return Err(TextureError::RenderFailed(format!("Font {font:?} not loaded")));
        };
        let surface = ttf.render(text).solid(color).map_err(render_failed)?;
        let texture = self
            .texture_creator
            .create_texture_from_surface(&surface)
            .map_err(render_failed)?;

        let dst = Rect::new(at.x, at.y - ttf.ascent(), surface.width(), surface.height());
        let result = self.canvas.copy(&texture, None, Some(dst)).map_err(render_failed);
        // Textures are not freed on drop with unsafe_textures
        unsafe { texture.destroy() };
        result
    }

    fn fill_rect(&mut self, color: Color, at: IVec2, size: UVec2) -> Result<(), TextureError> {
        self.canvas.set_draw_color(color);
        self.canvas
            .fill_rect(Rect::new(at.x, at.y, size.x, size.y))
            .map_err(render_failed)
    }

    fn fill_oval(&mut self, color: Color, at: IVec2, size: UVec2) -> Result<(), TextureError> {
        let rx = (size.x / 2) as i16;
        let ry = (size.y / 2) as i16;
        self.canvas
            .filled_ellipse(at.x as i16 + rx, at.y as i16 + ry, rx, ry, sdl2::pixels::Color::from(color))
            .map_err(render_failed)
    }
}
