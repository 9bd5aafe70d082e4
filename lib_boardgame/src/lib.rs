use std::fmt;

pub mod game_runner;

pub use game_runner::{GameRunner, GameRunnerError, GeneralGameRunner};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlayerColor {
    Black,
    White,
}

impl PlayerColor {
    pub fn opponent(self) -> Self {
        match self {
            PlayerColor::Black => PlayerColor::White,
            PlayerColor::White => PlayerColor::Black,
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerColor::Black => write!(f, "Black"),
            PlayerColor::White => write!(f, "White"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    Tie,
    WhiteWins,
    BlackWins,
}

impl GameResult {
    /// Decides the result by strict comparison of the final piece counts.
    pub fn from_scores(black_score: usize, white_score: usize) -> Self {
        if black_score > white_score {
            GameResult::BlackWins
        } else if white_score > black_score {
            GameResult::WhiteWins
        } else {
            GameResult::Tie
        }
    }

    pub fn is_win_for_player(self, player_color: PlayerColor) -> bool {
        self.winner() == Some(player_color)
    }

    /// The winning color, or None for a tie.
    pub fn winner(self) -> Option<PlayerColor> {
        match self {
            GameResult::BlackWins => Some(PlayerColor::Black),
            GameResult::WhiteWins => Some(PlayerColor::White),
            GameResult::Tie => None,
        }
    }
}

/// Describes a move a player can make in a game.
/// I.e., in Reversi, a move could be at position (3,7).
pub trait GameMove: Copy + fmt::Debug + PartialEq {}

/// What a player did on their turn, as reported to observing agents.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PlayerAction<M: GameMove> {
    Move(M),
    PassTurn,
}

/// Describes a complete state of some Game,
/// such as the board position, the current player's turn,
/// or any other relevant info.
///
/// Turn order is driven from the outside: `apply_move` only places a move,
/// the caller then runs `check_game_over` and `switch_player`.
pub trait GameState: Clone {
    type Move: GameMove;

    /// Returns a human-friendly string for representing the state.
    fn human_friendly(&self) -> String;

    /// Puts the state back to the starting position of a fresh game.
    fn reset(&mut self);

    /// Returns a fresh, ready-to-play game state for this game.
    fn initial_state() -> Self;

    /// True if the given player may play the given move in the current state.
    fn is_valid_move(&self, action: Self::Move, player: PlayerColor) -> bool;

    /// Returns the possible moves the given player can make for the current state.
    fn legal_moves(&self, player: PlayerColor) -> &[Self::Move];

    /// Apply the given move for the given player, mutating this state.
    /// Returns false, leaving the state untouched, if the move is not valid.
    fn apply_move(&mut self, action: Self::Move, player: PlayerColor) -> bool;

    /// Returns the current player whose turn it currently is.
    fn current_player_turn(&self) -> PlayerColor;

    /// Returns the score of the given player in this state.
    fn player_score(&self, player: PlayerColor) -> usize;

    /// Given a legal move (or 'action'), return the resulting state of applying the action
    /// to this state (does not mutate this state).
    /// None if the move is not valid for the player.
    fn next_state(&self, action: Self::Move, player: PlayerColor) -> Option<Self> {
        let mut cloned = self.clone();

        if cloned.apply_move(action, player) {
            Some(cloned)
        } else {
            None
        }
    }

    /// Hands the turn to the opponent, or back to the current player if the opponent
    /// is forced to pass. Returns false when neither player can move.
    fn switch_player(&mut self) -> bool;

    /// Marks the game as over if neither player can take any further action.
    /// Returns true if the game is over.
    fn check_game_over(&mut self) -> bool;

    /// True if the game has been found to be over by `check_game_over`.
    fn is_game_over(&self) -> bool;

    /// The GameResult, or None if the game is not yet over.
    fn game_result(&self) -> Option<GameResult> {
        if !self.is_game_over() {
            return None;
        }

        Some(GameResult::from_scores(
            self.player_score(PlayerColor::Black),
            self.player_score(PlayerColor::White),
        ))
    }
}

/// A trait representing the functionality of a GameAgent.
/// Specifically, given a GameState, a GameAgent must be able to decide a GameMove.
pub trait GameAgent<TState: GameState> {
    /// Picks one of the player's legal moves.
    /// None if the player has no legal move, or if the agent gives up the game.
    fn pick_move(&mut self, state: &TState, player: PlayerColor) -> Option<TState::Move>;

    /// Called after any player's action has been applied to the state.
    fn observe_action(
        &mut self,
        _player: PlayerColor,
        _action: PlayerAction<TState::Move>,
        _state: &TState,
    ) {
    }
}

impl<TState, A> GameAgent<TState> for Box<A>
where
    TState: GameState,
    A: GameAgent<TState> + ?Sized,
{
    fn pick_move(&mut self, state: &TState, player: PlayerColor) -> Option<TState::Move> {
        (**self).pick_move(state, player)
    }

    fn observe_action(
        &mut self,
        player: PlayerColor,
        action: PlayerAction<TState::Move>,
        state: &TState,
    ) {
        (**self).observe_action(player, action, state);
    }
}
