//! Per-tick input latch.
//!
//! Key presses arrive much faster than the snake moves. Only the first usable
//! turn between two ticks is kept; anything after it is dropped, so two quick
//! presses can never fold the snake back onto itself within one move.

use super::action::Direction;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLatch {
    latched: Option<Direction>,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a direction while the snake is heading `current`.
    ///
    /// Returns true if the turn was latched for the next tick.
    pub fn submit(&mut self, direction: Direction, current: Direction) -> bool {
        if self.latched.is_some() || direction == current || direction.is_opposite(current) {
            return false;
        }

        self.latched = Some(direction);
        true
    }

    /// Hand over the latched turn at the tick boundary
    pub fn take(&mut self) -> Option<Direction> {
        self.latched.take()
    }

    pub fn peek(&self) -> Option<Direction> {
        self.latched
    }

    pub fn clear(&mut self) {
        self.latched = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_turn_wins() {
        let mut latch = InputLatch::new();
        assert!(latch.submit(Direction::Up, Direction::Right));
        assert!(!latch.submit(Direction::Down, Direction::Right));
        assert_eq!(latch.take(), Some(Direction::Up));
    }

    #[test]
    fn test_reverse_is_rejected() {
        let mut latch = InputLatch::new();
        assert!(!latch.submit(Direction::Left, Direction::Right));
        assert_eq!(latch.peek(), None);

        // A rejected key does not block a valid one in the same tick
        assert!(latch.submit(Direction::Down, Direction::Right));
        assert_eq!(latch.peek(), Some(Direction::Down));
    }

    #[test]
    fn test_same_direction_does_not_latch() {
        let mut latch = InputLatch::new();
        assert!(!latch.submit(Direction::Right, Direction::Right));
        assert!(latch.submit(Direction::Up, Direction::Right));
    }

    #[test]
    fn test_take_resets_for_next_tick() {
        let mut latch = InputLatch::new();
        latch.submit(Direction::Up, Direction::Right);
        assert_eq!(latch.take(), Some(Direction::Up));
        assert_eq!(latch.take(), None);

        // Next tick is judged against the new heading
        assert!(latch.submit(Direction::Left, Direction::Up));
    }

    #[test]
    fn test_clear() {
        let mut latch = InputLatch::new();
        latch.submit(Direction::Up, Direction::Right);
        latch.clear();
        assert_eq!(latch.take(), None);
    }
}
