use std::num::NonZeroU32;

use crate::error::AnimationError;

/// An on/off toggle flipping every `interval_ticks`, used for energizers and the
/// 1UP label.
#[derive(Debug, Clone)]
pub struct Pulse {
    interval_ticks: NonZeroU32,
    tick_timer: u32,
    is_on: bool,
    running: bool,
}

impl Pulse {
    pub fn new(interval_ticks: u32) -> Result<Self, AnimationError> {
        let interval_ticks =
            NonZeroU32::new(interval_ticks).ok_or(AnimationError::InvalidFrameDuration(interval_ticks as u64))?;
        Ok(Self {
            interval_ticks,
            tick_timer: 0,
            is_on: true,
            running: false,
        })
    }

    pub fn tick(&mut self, delta_ticks: u32) {
        if !self.running {
            return;
        }

        self.tick_timer += delta_ticks;

        let complete_intervals = self.tick_timer / self.interval_ticks;
        self.tick_timer = self.tick_timer % self.interval_ticks;

        // Toggling twice is a no-op
        if complete_intervals % 2 == 1 {
            self.is_on = !self.is_on;
        }
    }

    /// Starts over in the "on" phase.
    pub fn restart(&mut self) {
        self.tick_timer = 0;
        self.is_on = true;
        self.running = true;
    }

    /// Freezes the pulse in whatever phase it is in.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Back to "on", not running.
    pub fn reset(&mut self) {
        self.tick_timer = 0;
        self.is_on = true;
        self.running = false;
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval_ticks(&self) -> u32 {
        self.interval_ticks.get()
    }
}
