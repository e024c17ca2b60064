pub mod animated;
pub mod blinking;
pub mod directional;
pub mod sprite;
