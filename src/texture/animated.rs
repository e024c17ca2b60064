use std::num::NonZeroU32;

use smallvec::SmallVec;

use crate::error::AnimationError;

/// How many times a frame sequence plays before it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Times(NonZeroU32),
    Forever,
}

impl Repeat {
    /// A sequence that plays exactly once.
    pub const ONCE: Repeat = Repeat::Times(NonZeroU32::MIN);
}

/// A timed, possibly looping list of frames.
///
/// Frames are opaque to the sequence: sprites for most animations, plain pixel offsets
/// for the bonus jump. Time is measured in ticks of the host game loop and banked, so
/// advancing by several ticks at once yields the same frame as advancing one tick at a time.
#[derive(Debug, Clone)]
pub struct FrameSequence<T> {
    frames: SmallVec<[T; 4]>,
    frame_duration: NonZeroU32,
    repeat: Repeat,
    current_frame: usize,
    time_bank: u32,
    completed_cycles: u32,
    running: bool,
    complete: bool,
}

impl<T> FrameSequence<T> {
    /// Creates a stopped sequence that plays once.
    pub fn new(frames: impl IntoIterator<Item = T>, frame_duration: u32) -> Result<Self, AnimationError> {
        let frames: SmallVec<[T; 4]> = frames.into_iter().collect();
        if frames.is_empty() {
            return Err(AnimationError::EmptySequence);
        }
        let frame_duration =
            NonZeroU32::new(frame_duration).ok_or(AnimationError::InvalidFrameDuration(frame_duration as u64))?;

        Ok(Self {
            frames,
            frame_duration,
            repeat: Repeat::ONCE,
            current_frame: 0,
            time_bank: 0,
            completed_cycles: 0,
            running: false,
            complete: false,
        })
    }

    /// A single frame that never changes.
    pub fn single(frame: T) -> Self {
        let mut frames = SmallVec::new();
        frames.push(frame);
        Self {
            frames,
            frame_duration: NonZeroU32::MIN,
            repeat: Repeat::Forever,
            current_frame: 0,
            time_bank: 0,
            completed_cycles: 0,
            running: false,
            complete: false,
        }
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn repeat_forever(self) -> Self {
        self.with_repeat(Repeat::Forever)
    }

    pub fn set_frame_duration(&mut self, ticks: u64) -> Result<(), AnimationError> {
        self.frame_duration = u32::try_from(ticks)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(AnimationError::InvalidFrameDuration(ticks))?;
        Ok(())
    }

    pub fn set_repeat_count(&mut self, count: u32) -> Result<(), AnimationError> {
        let count = NonZeroU32::new(count).ok_or(AnimationError::InvalidRepeatCount(count))?;
        self.repeat = Repeat::Times(count);
        Ok(())
    }

    /// Rewinds to the first frame and starts playing.
    pub fn restart(&mut self) {
        self.rewind();
        self.running = true;
    }

    /// Rewinds to the first frame without playing.
    pub fn reset(&mut self) {
        self.rewind();
        self.running = false;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Restarts the sequence unless it is already playing.
    pub fn ensure_running(&mut self) {
        if !self.running {
            self.restart();
        }
    }

    fn rewind(&mut self) {
        self.current_frame = 0;
        self.time_bank = 0;
        self.completed_cycles = 0;
        self.complete = false;
    }

    /// Banks `ticks` and steps through as many frames as they pay for.
    pub fn advance(&mut self, ticks: u32) {
        if !self.running {
            return;
        }

        self.time_bank = self.time_bank.saturating_add(ticks);
        self.skip_whole_cycles();
        while self.running && self.time_bank >= self.frame_duration.get() {
            self.time_bank -= self.frame_duration.get();
            self.step();
        }
    }

    /// Drops full cycles from the bank up front; a full cycle ends on the frame it began on.
    /// The last cycle of a finite sequence is always stepped through.
    fn skip_whole_cycles(&mut self) {
        let cycle = self.frames.len() as u64 * self.frame_duration.get() as u64;
        let whole = self.time_bank as u64 / cycle;
        let skippable = match self.repeat {
            Repeat::Forever => whole,
            Repeat::Times(count) => {
                let left = count.get().saturating_sub(self.completed_cycles) as u64;
                whole.min(left.saturating_sub(1))
            }
        };
        if skippable == 0 {
            return;
        }
        self.time_bank -= (skippable * cycle) as u32;
        self.completed_cycles = self.completed_cycles.saturating_add(skippable.min(u32::MAX as u64) as u32);
    }

    fn step(&mut self) {
        if self.current_frame + 1 < self.frames.len() {
            self.current_frame += 1;
            return;
        }

        // Last frame reached: one full cycle has played
        self.completed_cycles = self.completed_cycles.saturating_add(1);
        match self.repeat {
            Repeat::Forever => self.current_frame = 0,
            Repeat::Times(count) if self.completed_cycles < count.get() => self.current_frame = 0,
            Repeat::Times(_) => {
                self.running = false;
                self.complete = true;
                self.time_bank = 0;
            }
        }
    }

    pub fn current_frame(&self) -> &T {
        &self.frames[self.current_frame]
    }

    pub fn frame_at(&self, index: usize) -> Option<&T> {
        self.frames.get(index)
    }

    pub fn frame_index(&self) -> usize {
        self.current_frame
    }

    /// Jumps to `index`, clamped to the last frame.
    pub fn set_frame_index(&mut self, index: usize) {
        self.current_frame = index.min(self.frames.len() - 1);
        self.time_bank = 0;
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_duration(&self) -> u32 {
        self.frame_duration.get()
    }

    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

impl<T: Clone> FrameSequence<T> {
    /// Returns the current frame, then moves one tick forward.
    pub fn animate(&mut self) -> T {
        let frame = self.current_frame().clone();
        self.advance(1);
        frame
    }
}
