//! Animation, scene and audio front-end for Pac-Man and Ms. Pac-Man.
//!
//! The crate turns game model snapshots into sprites, scene switches and sound cues. The
//! simulation, the window and the asset files are supplied by the host through the
//! [`game::GameController`], [`render::RenderSurface`], [`texture::sprite::SpriteSheet`]
//! and [`audio::AudioBackend`] traits.

pub mod animation;
pub mod app;
pub mod audio;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod logging;
#[cfg(all(feature = "sdl", not(target_os = "emscripten")))]
pub mod platform;
pub mod render;
pub mod scene;
pub mod texture;
