//! SDL2 implementations of the rendering and audio seams.
//!
//! Only built with the `sdl` feature; the rest of the crate never depends on SDL.

mod canvas;
mod mixer;

pub use canvas::SdlSurface;
pub use mixer::SdlAudio;
