use crate::reversi_gamestate::ReversiState;
use lib_boardgame::{
    GameAgent, GameResult, GameRunner, GameRunnerError, GameState, GeneralGameRunner,
};

/// One game session: the board state plus the agents playing each color.
pub struct Reversi {
    white_agent: Box<dyn GameAgent<ReversiState>>,
    black_agent: Box<dyn GameAgent<ReversiState>>,
    game_state: ReversiState,
}

impl Reversi {
    pub fn new(
        white_agent: Box<dyn GameAgent<ReversiState>>,
        black_agent: Box<dyn GameAgent<ReversiState>>,
    ) -> Self {
        Self::with_state(ReversiState::new(), white_agent, black_agent)
    }

    /// A session starting from the given state, e.g. a board of another size.
    pub fn with_state(
        game_state: ReversiState,
        white_agent: Box<dyn GameAgent<ReversiState>>,
        black_agent: Box<dyn GameAgent<ReversiState>>,
    ) -> Self {
        Reversi {
            white_agent,
            black_agent,
            game_state,
        }
    }

    /// The game's current state.
    pub fn game_state(&self) -> &ReversiState {
        &self.game_state
    }

    /// Puts the board back to the starting position, keeping the agents.
    pub fn restart(&mut self) {
        self.game_state.reset();
    }

    /// True if the the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.game_state.is_game_over()
    }

    pub fn game_result(&self) -> Option<GameResult> {
        self.game_state.game_result()
    }

    /// Runs the turn loop until neither player can move.
    pub fn play_to_end(&mut self) -> Result<GameResult, GameRunnerError> {
        <GeneralGameRunner as GameRunner<ReversiState>>::play_to_end(
            &mut self.game_state,
            self.black_agent.as_mut(),
            self.white_agent.as_mut(),
        )
    }
}
