use lib_boardgame::{GameAgent, GameState, PlayerColor};
use tracing::debug;

/// Plays whichever legal move leaves it with the most pieces right away.
/// Ties go to the earliest move in the state's legal move order.
#[derive(Default)]
pub struct GreedyAgent;

impl<TState: GameState> GameAgent<TState> for GreedyAgent {
    fn pick_move(&mut self, state: &TState, player: PlayerColor) -> Option<TState::Move> {
        let mut best: Option<(TState::Move, usize)> = None;

        for &action in state.legal_moves(player) {
            let Some(next) = state.next_state(action, player) else {
                continue;
            };

            let score = next.player_score(player);

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((action, score));
            }
        }

        debug!(%player, ?best, "greedy pick");

        best.map(|(action, _)| action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_reversi::{BoardPosition, ReversiState};

    #[test]
    fn prefers_the_bigger_capture() {
        // (0,2) flips one piece on the left, (3,0) flips two pieces going up.
        let state = ReversiState::from_rows(
            &["XO--", "O---", "O---", "----"],
            PlayerColor::Black,
        )
        .unwrap();
        assert_eq!(
            &[BoardPosition::new(0, 2), BoardPosition::new(3, 0)],
            state.legal_moves(PlayerColor::Black)
        );

        let picked = GreedyAgent.pick_move(&state, PlayerColor::Black);

        assert_eq!(Some(BoardPosition::new(3, 0)), picked);
    }

    #[test]
    fn ties_go_to_the_first_move() {
        let state = ReversiState::new();

        let picked = GreedyAgent.pick_move(&state, PlayerColor::Black);

        assert_eq!(Some(BoardPosition::new(2, 3)), picked);
    }

    #[test]
    fn no_legal_moves_gives_none() {
        let state = ReversiState::from_rows(
            &["XX--", "XX--", "----", "----"],
            PlayerColor::White,
        )
        .unwrap();

        assert_eq!(None, GreedyAgent.pick_move(&state, PlayerColor::White));
    }
}
