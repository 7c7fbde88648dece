use std::collections::VecDeque;

use rand::Rng;
use skyflap_kernel::FlappyGame;

use crate::action::Action;

/// FIFO of actions collected between ticks.
///
/// Window event handlers push; the frame driver drains once per tick, before
/// `update`. Every push is one action: repeated presses are never merged.
#[derive(Debug, Default)]
pub struct ActionQueue {
    pending: VecDeque<Action>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action) {
        self.pending.push_back(action);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return all pending actions in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = Action> + '_ {
        self.pending.drain(..)
    }

    /// Drain the queue into `game`. Returns the number of actions applied.
    pub fn apply_to<R: Rng>(&mut self, game: &mut FlappyGame<R>) -> usize {
        let mut applied = 0;
        for action in self.pending.drain(..) {
            action.apply(game);
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyflap_kernel::{GameConfig, GameEvent};

    #[test]
    fn drains_in_arrival_order() {
        let mut q = ActionQueue::new();
        q.push(Action::Jump);
        q.push(Action::Restart);
        q.push(Action::Jump);
        assert_eq!(q.len(), 3);
        let drained: Vec<Action> = q.drain().collect();
        assert_eq!(drained, vec![Action::Jump, Action::Restart, Action::Jump]);
        assert!(q.is_empty());
    }

    #[test]
    fn repeated_jumps_are_all_applied() {
        let mut game = FlappyGame::with_seed(GameConfig::default(), 11).unwrap();
        let mut q = ActionQueue::new();
        for _ in 0..5 {
            q.push(Action::Jump);
        }
        assert_eq!(q.apply_to(&mut game), 5);
        let jumps = game
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Jumped { .. }))
            .count();
        assert_eq!(jumps, 5);
        assert!(q.is_empty());
    }

    #[test]
    fn restart_then_jump_leaves_jump_velocity() {
        let mut game = FlappyGame::with_seed(GameConfig::default(), 11).unwrap();
        let mut q = ActionQueue::new();
        q.push(Action::Restart);
        q.push(Action::Jump);
        q.apply_to(&mut game);
        assert_eq!(game.player_velocity(), -5.0);
    }

    #[test]
    fn empty_queue_applies_nothing() {
        let mut game = FlappyGame::with_seed(GameConfig::default(), 11).unwrap();
        let mut q = ActionQueue::new();
        assert_eq!(q.apply_to(&mut game), 0);
        assert!(game.events().is_empty());
    }
}
