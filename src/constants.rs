//! This module contains all the constants used by the front-end.

use std::time::Duration;

use glam::UVec2;

/// Ticks per second of the host game loop.
pub const TICKS_PER_SECOND: u32 = 60;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of each tile, in pixels.
pub const TS: i32 = 8;
/// Half the size of a tile, in pixels.
pub const HTS: i32 = TS / 2;

/// The size of the screen, in tiles.
pub const TILES: UVec2 = UVec2::new(28, 36);
/// The unscaled size of the screen, in pixels.
pub const CANVAS_SIZE: UVec2 = UVec2::new(TILES.x * TS as u32, TILES.y * TS as u32);

/// Vertical offset of the maze image, in pixels.
pub const MAZE_OFFSET_Y: i32 = 3 * TS;

/// The bounty values a ghost can display after being eaten, in display order.
pub const BOUNTY_VALUES: [u32; 4] = [200, 400, 800, 1600];

/// Delay between Pac-Man getting caught and the dying animation starting.
pub const DEATH_ANIMATION_DELAY: u32 = 60;

/// Interval between energizer blinks.
pub const ENERGIZER_BLINK_TICKS: u32 = 10;

/// Ticks per frame of the maze flashing at the end of a level.
pub const MAZE_FLASH_TICKS: u32 = 10;

/// Ticks per frame of the moving bonus' jump.
pub const BONUS_JUMP_TICKS: u32 = 10;

/// Most life icons drawn before switching to a "+N" label.
pub const MAX_LIVES_DISPLAYED: u32 = 5;

/// Converts a tile coordinate into pixels.
pub const fn t(tiles: i32) -> i32 {
    tiles * TS
}

/// Converts seconds into ticks of the host game loop.
pub const fn sec_to_ticks(seconds: u32) -> u64 {
    seconds as u64 * TICKS_PER_SECOND as u64
}
