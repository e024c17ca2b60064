use crate::entity::Direction;
use crate::texture::animated::FrameSequence;

/// One frame sequence per facing direction.
///
/// Backed by a fixed array indexed with [`Direction::as_usize`], so every direction
/// always has a sequence.
#[derive(Debug, Clone)]
pub struct DirectionalSequence<T> {
    sequences: [FrameSequence<T>; 4],
}

impl<T> DirectionalSequence<T> {
    pub fn new(sequences: [FrameSequence<T>; 4]) -> Self {
        Self { sequences }
    }

    /// Builds one sequence per direction, stopping at the first failure.
    pub fn try_from_fn<E>(mut build: impl FnMut(Direction) -> Result<FrameSequence<T>, E>) -> Result<Self, E> {
        let [up, down, left, right] = Direction::DIRECTIONS;
        Ok(Self {
            sequences: [build(up)?, build(down)?, build(left)?, build(right)?],
        })
    }

    pub fn get(&self, direction: Direction) -> &FrameSequence<T> {
        &self.sequences[direction.as_usize()]
    }

    pub fn get_mut(&mut self, direction: Direction) -> &mut FrameSequence<T> {
        &mut self.sequences[direction.as_usize()]
    }

    /// Restarts every sequence that is not already running.
    pub fn ensure_running(&mut self) {
        self.sequences.iter_mut().for_each(FrameSequence::ensure_running);
    }

    pub fn restart(&mut self) {
        self.sequences.iter_mut().for_each(FrameSequence::restart);
    }

    pub fn stop(&mut self) {
        self.sequences.iter_mut().for_each(FrameSequence::stop);
    }

    pub fn reset(&mut self) {
        self.sequences.iter_mut().for_each(FrameSequence::reset);
    }

    pub fn is_running(&self) -> bool {
        self.sequences.iter().any(FrameSequence::is_running)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, &FrameSequence<T>)> {
        Direction::DIRECTIONS.into_iter().zip(self.sequences.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_uses_direction_index() {
        let seq = DirectionalSequence::try_from_fn(|dir| FrameSequence::new([dir.as_usize()], 1)).unwrap();
        for dir in Direction::DIRECTIONS {
            assert_eq!(*seq.get(dir).current_frame(), dir.as_usize());
        }
    }

    #[test]
    fn test_try_from_fn_propagates_error() {
        let result = DirectionalSequence::<u8>::try_from_fn(|dir| match dir {
            Direction::Left => FrameSequence::new([], 1),
            _ => FrameSequence::new([0], 1),
        });
        assert!(result.is_err());
    }
}
