use rand::Rng;
use skyflap_kernel::FlappyGame;

/// A high-level action produced by any front end (window, CLI schedule, tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Set the player velocity to the jump velocity.
    Jump,
    /// Regenerate the whole game.
    Restart,
}

impl Action {
    /// Apply this action to the game.
    pub fn apply<R: Rng>(self, game: &mut FlappyGame<R>) {
        match self {
            Action::Jump => game.jump(),
            Action::Restart => {
                tracing::info!(score = game.score(), "restart requested");
                game.reset();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyflap_kernel::{GameConfig, GameEvent};

    #[test]
    fn jump_sets_jump_velocity() {
        let mut game = FlappyGame::with_seed(GameConfig::default(), 3).unwrap();
        Action::Jump.apply(&mut game);
        assert_eq!(game.player_velocity(), -5.0);
    }

    #[test]
    fn restart_resets_game() {
        let mut game = FlappyGame::with_seed(GameConfig::default(), 3).unwrap();
        for _ in 0..10 {
            game.update();
        }
        Action::Restart.apply(&mut game);
        assert_eq!(game.pipe_offset(), 0.0);
        assert!(matches!(game.events().last(), Some(GameEvent::Reset { .. })));
    }
}
