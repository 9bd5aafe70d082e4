use crate::util::random_choice;
use lib_boardgame::{GameAgent, GameState, PlayerColor};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Picks uniformly at random among the legal moves.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_entropy(),
        }
    }

    /// A RandomAgent that always plays the same sequence of choices.
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl<TState: GameState> GameAgent<TState> for RandomAgent {
    fn pick_move(&mut self, state: &TState, player: PlayerColor) -> Option<TState::Move> {
        let legal_moves = state.legal_moves(player);
        let picked = random_choice(legal_moves, &mut self.rng);

        debug!(%player, options = legal_moves.len(), ?picked, "random pick");

        picked
    }
}
