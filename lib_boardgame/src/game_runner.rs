use crate::{GameAgent, GameResult, GameState, PlayerAction, PlayerColor};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum GameRunnerError {
    #[error("{player} gave up the game with legal moves still available")]
    Abandoned { player: PlayerColor },

    #[error("{player} picked the illegal move {action}")]
    IllegalMove { player: PlayerColor, action: String },
}

/// A trait that describes a game runner.
pub trait GameRunner<T: GameState> {
    fn play_to_end(
        game_state: &mut T,
        black_agent: &mut dyn GameAgent<T>,
        white_agent: &mut dyn GameAgent<T>,
    ) -> Result<GameResult, GameRunnerError>;
}

/// A trivial, general-purpose implementation of a GameRunner.
/// Probably all you need to run most games.
pub struct GeneralGameRunner;

/// Asks the agent for a move and checks it against the state.
/// Must only be called when the player has at least one legal move.
fn player_take_turn<S>(
    game_state: &S,
    agent: &mut dyn GameAgent<S>,
    player_color: PlayerColor,
) -> Result<S::Move, GameRunnerError>
where
    S: GameState,
{
    let selected_action = agent
        .pick_move(game_state, player_color)
        .ok_or(GameRunnerError::Abandoned {
            player: player_color,
        })?;

    if !game_state.is_valid_move(selected_action, player_color) {
        return Err(GameRunnerError::IllegalMove {
            player: player_color,
            action: format!("{:?}", selected_action),
        });
    }

    Ok(selected_action)
}

fn notify_agents<S: GameState>(
    black_agent: &mut dyn GameAgent<S>,
    white_agent: &mut dyn GameAgent<S>,
    player: PlayerColor,
    action: PlayerAction<S::Move>,
    game_state: &S,
) {
    black_agent.observe_action(player, action, game_state);
    white_agent.observe_action(player, action, game_state);
}

impl<T> GameRunner<T> for GeneralGameRunner
where
    T: GameState,
{
    /// Plays rounds until neither player can move.
    /// A player without legal moves is skipped and never asked for a move.
    fn play_to_end(
        game_state: &mut T,
        black_agent: &mut dyn GameAgent<T>,
        white_agent: &mut dyn GameAgent<T>,
    ) -> Result<GameResult, GameRunnerError> {
        while !game_state.is_game_over() {
            let cur_player_color = game_state.current_player_turn();

            if game_state.legal_moves(cur_player_color).is_empty() {
                info!(player = %cur_player_color, "no legal moves, passing the turn");

                notify_agents(
                    black_agent,
                    white_agent,
                    cur_player_color,
                    PlayerAction::PassTurn,
                    game_state,
                );

                if !game_state.switch_player() {
                    break;
                }

                continue;
            }

            let agent_to_play: &mut dyn GameAgent<T> = match cur_player_color {
                PlayerColor::Black => &mut *black_agent,
                PlayerColor::White => &mut *white_agent,
            };

            let selected_action = player_take_turn(game_state, agent_to_play, cur_player_color)?;

            debug!(
                player = %cur_player_color,
                action = ?selected_action,
                "player picked move"
            );

            if !game_state.apply_move(selected_action, cur_player_color) {
                return Err(GameRunnerError::IllegalMove {
                    player: cur_player_color,
                    action: format!("{:?}", selected_action),
                });
            }

            notify_agents(
                black_agent,
                white_agent,
                cur_player_color,
                PlayerAction::Move(selected_action),
                game_state,
            );

            game_state.check_game_over();
            game_state.switch_player();
        }

        let result = game_state
            .game_result()
            .expect("The game is over, so there must be a game result.");

        info!(?result, "game over");

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameMove;

    #[derive(Copy, Clone, Debug, PartialEq)]
    struct Take;

    impl GameMove for Take {}

    /// A pile of tokens; each move takes one and scores a point for the mover.
    #[derive(Clone)]
    struct PileState {
        pile: usize,
        initial_pile: usize,
        current: PlayerColor,
        black_score: usize,
        white_score: usize,
        moves: Vec<Take>,
        is_game_over: bool,
    }

    impl PileState {
        fn with_pile(pile: usize) -> Self {
            PileState {
                pile,
                initial_pile: pile,
                current: PlayerColor::Black,
                black_score: 0,
                white_score: 0,
                moves: if pile > 0 { vec![Take] } else { Vec::new() },
                is_game_over: false,
            }
        }
    }

    impl GameState for PileState {
        type Move = Take;

        fn human_friendly(&self) -> String {
            format!("{} left", self.pile)
        }

        fn reset(&mut self) {
            *self = PileState::with_pile(self.initial_pile);
        }

        fn initial_state() -> Self {
            PileState::with_pile(5)
        }

        fn is_valid_move(&self, _action: Take, player: PlayerColor) -> bool {
            self.pile > 0 && player == self.current
        }

        fn legal_moves(&self, _player: PlayerColor) -> &[Take] {
            &self.moves
        }

        fn apply_move(&mut self, action: Take, player: PlayerColor) -> bool {
            if !self.is_valid_move(action, player) {
                return false;
            }

            self.pile -= 1;
            match player {
                PlayerColor::Black => self.black_score += 1,
                PlayerColor::White => self.white_score += 1,
            }
            if self.pile == 0 {
                self.moves.clear();
            }

            true
        }

        fn current_player_turn(&self) -> PlayerColor {
            self.current
        }

        fn player_score(&self, player: PlayerColor) -> usize {
            match player {
                PlayerColor::Black => self.black_score,
                PlayerColor::White => self.white_score,
            }
        }

        fn switch_player(&mut self) -> bool {
            if self.check_game_over() {
                return false;
            }

            self.current = self.current.opponent();
            true
        }

        fn check_game_over(&mut self) -> bool {
            self.is_game_over = self.pile == 0;
            self.is_game_over
        }

        fn is_game_over(&self) -> bool {
            self.is_game_over
        }
    }

    /// Counts its turns into a counter owned by the test.
    struct CountingAgent<'a> {
        turns: &'a mut usize,
    }

    impl GameAgent<PileState> for CountingAgent<'_> {
        fn pick_move(&mut self, state: &PileState, player: PlayerColor) -> Option<Take> {
            *self.turns += 1;
            state.legal_moves(player).first().copied()
        }
    }

    #[test]
    fn agents_with_different_borrows_take_alternate_turns() {
        let mut black_turns = 0;
        let mut state = PileState::with_pile(5);

        let result = {
            let mut white_turns = 0;
            let mut black = CountingAgent {
                turns: &mut black_turns,
            };
            let mut white = CountingAgent {
                turns: &mut white_turns,
            };

            let result = <GeneralGameRunner as GameRunner<PileState>>::play_to_end(
                &mut state, &mut black, &mut white,
            );
            assert_eq!(2, white_turns);
            result
        };

        assert_eq!(GameResult::BlackWins, result.unwrap());
        assert_eq!(3, black_turns);
        assert!(state.is_game_over());
    }

    #[test]
    fn boxed_agents_play_like_the_agents_they_hold() {
        let mut black_turns = 0;
        let mut white_turns = 0;
        let mut state = PileState::with_pile(4);

        let mut black: Box<dyn GameAgent<PileState> + '_> = Box::new(CountingAgent {
            turns: &mut black_turns,
        });
        let mut white: Box<dyn GameAgent<PileState> + '_> = Box::new(CountingAgent {
            turns: &mut white_turns,
        });

        let result = <GeneralGameRunner as GameRunner<PileState>>::play_to_end(
            &mut state, &mut black, &mut white,
        );
        drop((black, white));

        assert_eq!(GameResult::Tie, result.unwrap());
        assert_eq!((2, 2), (black_turns, white_turns));
    }

    #[test]
    fn empty_pile_ends_without_asking_anyone() {
        let mut black_turns = 0;
        let mut white_turns = 0;
        let mut state = PileState::with_pile(0);

        let result = <GeneralGameRunner as GameRunner<PileState>>::play_to_end(
            &mut state,
            &mut CountingAgent {
                turns: &mut black_turns,
            },
            &mut CountingAgent {
                turns: &mut white_turns,
            },
        );

        assert_eq!(GameResult::Tie, result.unwrap());
        assert_eq!((0, 0), (black_turns, white_turns));
    }
}
