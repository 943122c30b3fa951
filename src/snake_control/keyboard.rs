use ggez::input::keyboard::KeyCode;
use std::collections::VecDeque;

use crate::basic::Dir;

/// Queue of candidate directions fed from input events.
///
/// Candidates are only requests; the simulation step applies its own
/// reversal filter, so a queued 180° turn is simply ignored there.
/// At most one candidate is consumed per tick ("last direction wins
/// within a tick" never applies retroactively to queued input).
pub struct Keyboard {
    control_queue: VecDeque<Dir>,
}

impl Keyboard {
    /// How many moves ahead a player can queue (allows prepared
    /// double turns at high tick rates)
    const CTRL_QUEUE_LIMIT: usize = 3;

    pub fn new() -> Self {
        Self {
            control_queue: VecDeque::with_capacity(Self::CTRL_QUEUE_LIMIT),
        }
    }

    /// Arrow keys and WASD; anything else is not a direction
    pub fn candidate(key: KeyCode) -> Option<Dir> {
        use KeyCode::*;

        match key {
            Up | W => Some(Dir::U),
            Down | S => Some(Dir::D),
            Left | A => Some(Dir::L),
            Right | D => Some(Dir::R),
            _ => None,
        }
    }

    pub fn push(&mut self, dir: Dir) {
        // consecutive duplicates would only eat up queue slots
        if self.control_queue.back() == Some(&dir) {
            return;
        }
        if self.control_queue.len() == Self::CTRL_QUEUE_LIMIT {
            self.control_queue.pop_front();
        }
        self.control_queue.push_back(dir);
    }

    /// Called once per simulation tick
    pub fn next_dir(&mut self) -> Option<Dir> {
        self.control_queue.pop_front()
    }

    pub fn clear(&mut self) {
        self.control_queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_candidate_per_tick() {
        let mut keyboard = Keyboard::new();
        keyboard.push(Dir::U);
        keyboard.push(Dir::L);

        assert_eq!(keyboard.next_dir(), Some(Dir::U));
        assert_eq!(keyboard.next_dir(), Some(Dir::L));
        assert_eq!(keyboard.next_dir(), None);
    }

    #[test]
    fn queue_is_bounded_dropping_oldest() {
        let mut keyboard = Keyboard::new();
        keyboard.push(Dir::U);
        keyboard.push(Dir::L);
        keyboard.push(Dir::D);
        keyboard.push(Dir::R);

        assert_eq!(keyboard.next_dir(), Some(Dir::L));
        assert_eq!(keyboard.next_dir(), Some(Dir::D));
        assert_eq!(keyboard.next_dir(), Some(Dir::R));
        assert_eq!(keyboard.next_dir(), None);
    }

    #[test]
    fn consecutive_duplicates_collapse() {
        let mut keyboard = Keyboard::new();
        keyboard.push(Dir::U);
        keyboard.push(Dir::U);
        keyboard.push(Dir::U);

        assert_eq!(keyboard.next_dir(), Some(Dir::U));
        assert_eq!(keyboard.next_dir(), None);
    }

    #[test]
    fn key_mapping() {
        assert_eq!(Keyboard::candidate(KeyCode::Up), Some(Dir::U));
        assert_eq!(Keyboard::candidate(KeyCode::W), Some(Dir::U));
        assert_eq!(Keyboard::candidate(KeyCode::S), Some(Dir::D));
        assert_eq!(Keyboard::candidate(KeyCode::A), Some(Dir::L));
        assert_eq!(Keyboard::candidate(KeyCode::D), Some(Dir::R));
        assert_eq!(Keyboard::candidate(KeyCode::Space), None);
    }
}
