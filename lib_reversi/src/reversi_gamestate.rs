use crate::reversi_board::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::util::BoardDirectionIter;
use crate::{Board, BoardPosition, Directions, ReversiError, ReversiPiece, BOARD_SIZE};
use lib_boardgame::{GameResult, GameState, PlayerColor};
use std::fmt;
use tracing::{debug, trace};

/// A contiguous line of opponent pieces, starting next to `origin`,
/// that is closed off by a piece of the mover's color.
#[derive(Copy, Clone, Debug)]
struct BracketedRun {
    origin: BoardPosition,
    direction: Directions,
    len: usize,
    board_size: usize,
}

impl BracketedRun {
    fn positions(self) -> impl Iterator<Item = BoardPosition> {
        BoardDirectionIter::new(self.origin, self.direction, self.board_size).take(self.len)
    }
}

#[derive(Clone, Debug)]
pub struct ReversiState {
    /// The underlying row-major grid of board pieces.
    board: Board,

    /// Width and height of the board.
    board_size: usize,

    /// The player whose turn it currently is.
    current_player_turn: PlayerColor,

    /// The count of white pieces on the board.
    white_pieces_count: usize,

    /// The count of black pieces on the board.
    black_pieces_count: usize,

    /// Legal moves of Black and White (in that order) for the current board.
    /// Refreshed after every board mutation.
    legal_moves: [Vec<BoardPosition>; 2],

    is_game_over: bool,

    winner: Option<GameResult>,

    move_count: usize,
}

impl ReversiState {
    /// A standard 8x8 game at its starting position.
    pub fn new() -> Self {
        let mut state = Self::empty(BOARD_SIZE);
        state.reset();

        state
    }

    /// A game at its starting position on a board of the given size.
    /// The size is fixed for the lifetime of the state.
    pub fn with_board_size(board_size: usize) -> Result<Self, ReversiError> {
        Self::check_board_size(board_size)?;

        let mut state = Self::empty(board_size);
        state.reset();

        Ok(state)
    }

    /// Builds an arbitrary position from one string per row:
    /// 'X' is black, 'O' is white, '-' or '.' is empty. Whitespace is ignored.
    ///
    /// The game is not checked for being over; call `check_game_over` for that.
    pub fn from_rows(rows: &[&str], to_move: PlayerColor) -> Result<Self, ReversiError> {
        let board_size = rows.len();
        Self::check_board_size(board_size)?;

        let mut state = Self::empty(board_size);

        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();

            if symbols.len() != board_size {
                return Err(ReversiError::RaggedRow {
                    row,
                    expected: board_size,
                    found: symbols.len(),
                });
            }

            for (col, symbol) in symbols.into_iter().enumerate() {
                let piece = match symbol {
                    'X' | 'x' => Some(ReversiPiece::Black),
                    'O' | 'o' => Some(ReversiPiece::White),
                    '-' | '.' => None,
                    _ => return Err(ReversiError::UnknownSymbol { symbol, row, col }),
                };

                state.set_piece(BoardPosition::new(row, col), piece);
            }
        }

        state.current_player_turn = to_move;
        state.update_stored_state_values();

        Ok(state)
    }

    fn check_board_size(board_size: usize) -> Result<(), ReversiError> {
        if board_size % 2 != 0 || !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&board_size) {
            return Err(ReversiError::InvalidBoardSize(board_size));
        }

        Ok(())
    }

    fn empty(board_size: usize) -> Self {
        ReversiState {
            board: vec![None; board_size * board_size],
            board_size,
            current_player_turn: PlayerColor::Black,
            white_pieces_count: 0,
            black_pieces_count: 0,
            legal_moves: [Vec::new(), Vec::new()],
            is_game_over: false,
            winner: None,
            move_count: 0,
        }
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// How many moves have been applied since the last reset.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Piece counts as (black, white).
    pub fn count_pieces(&self) -> (usize, usize) {
        (self.black_pieces_count, self.white_pieces_count)
    }

    fn index_of(&self, position: BoardPosition) -> Option<usize> {
        if self.within_board_bounds(position) {
            Some(position.row * self.board_size + position.col)
        } else {
            None
        }
    }

    fn within_board_bounds(&self, position: BoardPosition) -> bool {
        position.col < self.board_size && position.row < self.board_size
    }

    /// The piece present at the position, or None if the position is empty
    /// (or off the board).
    /// Note: (0,0) is the top-left position.
    pub fn cell_at(&self, position: BoardPosition) -> Option<ReversiPiece> {
        self.index_of(position).and_then(|i| self.board[i])
    }

    /// Set the piece at the coordinates to the given piece.
    fn set_piece(&mut self, position: BoardPosition, piece: Option<ReversiPiece>) {
        let Some(index) = self.index_of(position) else {
            return;
        };

        match self.board[index] {
            Some(ReversiPiece::White) => self.white_pieces_count -= 1,
            Some(ReversiPiece::Black) => self.black_pieces_count -= 1,
            None => {}
        };

        match piece {
            Some(ReversiPiece::White) => self.white_pieces_count += 1,
            Some(ReversiPiece::Black) => self.black_pieces_count += 1,
            None => {}
        };

        self.board[index] = piece;
    }

    fn traverse_from(&self, origin: BoardPosition, direction: Directions) -> BoardDirectionIter {
        BoardDirectionIter::new(origin, direction, self.board_size)
    }

    /// Walks from `origin` in one direction, looking for a run of one or more
    /// enemy pieces closed off by a piece of `origin_color`.
    ///
    /// Examples (placing X at 'a'):
    ///    In the below case, the three O pieces are a bracketed run,
    ///    since together 'a' and 'b' surround them.
    ///        _ O O O X
    ///        a       b
    ///
    ///    In the below case there is no run, since the gap at 'x'
    ///    prevents the pieces from being trapped.
    ///        _ O _ O X
    ///        a   x   b
    ///
    /// This function only checks the given direction.
    fn bracketed_run(
        &self,
        origin: BoardPosition,
        origin_color: ReversiPiece,
        direction: Directions,
    ) -> Option<BracketedRun> {
        let mut len = 0;

        for position in self.traverse_from(origin, direction) {
            match self.cell_at(position) {
                None => return None,
                // A piece of our own color right next to the origin traps nothing.
                Some(piece) if piece == origin_color => {
                    return (len > 0).then_some(BracketedRun {
                        origin,
                        direction,
                        len,
                        board_size: self.board_size,
                    });
                }
                Some(_) => len += 1,
            }
        }

        None
    }

    fn bracketed_runs(
        &self,
        origin: BoardPosition,
        origin_color: ReversiPiece,
    ) -> impl Iterator<Item = BracketedRun> + '_ {
        Directions::all()
            .filter_map(move |direction| self.bracketed_run(origin, origin_color, direction))
    }

    /// Returns the possible moves the given player can make, in row-major order.
    fn calc_legal_moves(&self, player: PlayerColor) -> Vec<BoardPosition> {
        // (0,0), (0,1) ... (0, 7), (1, 0) ... (7, 7)
        (0..(self.board_size * self.board_size))
            .map(|index| BoardPosition::new(index / self.board_size, index % self.board_size))
            .filter(|pos| self.is_valid_move(*pos, player))
            .collect()
    }

    fn update_stored_state_values(&mut self) {
        self.legal_moves = [
            self.calc_legal_moves(PlayerColor::Black),
            self.calc_legal_moves(PlayerColor::White),
        ];
    }

    fn has_legal_moves(&self, player: PlayerColor) -> bool {
        !self.legal_moves(player).is_empty()
    }

    /// Since the human-friendly output is always the same size for a given board,
    /// might as well pre-compute it so we can reserve the space ahead of time.
    /// (A test exists to confirm this is accurate.)
    fn friendly_print_size(&self) -> usize {
        // A header line plus one line per row, each a 2-wide label,
        // 3 chars per column and a newline.
        (self.board_size + 1) * (2 + 3 * self.board_size + 1)
    }
}

impl Default for ReversiState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for ReversiState {
    type Move = BoardPosition;

    /// Returns a human-friendly string for representing the state.
    fn human_friendly(&self) -> String {
        const BLACK_PIECE: char = 'X';
        const WHITE_PIECE: char = 'O';
        const EMPTY_SPACE: char = '-';

        let mut result = String::with_capacity(self.friendly_print_size());

        result.push_str("  ");
        for col in 0..self.board_size {
            result.push_str(&format!(" {:>2}", col));
        }
        result.push('\n');

        for row in 0..self.board_size {
            result.push_str(&format!("{:>2}", row));

            for col in 0..self.board_size {
                let piece_char = match self.cell_at(BoardPosition::new(row, col)) {
                    Some(ReversiPiece::White) => WHITE_PIECE,
                    Some(ReversiPiece::Black) => BLACK_PIECE,
                    None => EMPTY_SPACE,
                };

                result.push_str("  ");
                result.push(piece_char);
            }

            result.push('\n');
        }

        result
    }

    /// Clears the board and places the four starting pieces in the center,
    /// white on the main diagonal.
    fn reset(&mut self) {
        self.board.iter_mut().for_each(|cell| *cell = None);
        self.white_pieces_count = 0;
        self.black_pieces_count = 0;

        let mid = self.board_size / 2;
        self.set_piece(BoardPosition::new(mid - 1, mid - 1), Some(ReversiPiece::White));
        self.set_piece(BoardPosition::new(mid - 1, mid), Some(ReversiPiece::Black));
        self.set_piece(BoardPosition::new(mid, mid - 1), Some(ReversiPiece::Black));
        self.set_piece(BoardPosition::new(mid, mid), Some(ReversiPiece::White));

        self.current_player_turn = PlayerColor::Black;
        self.is_game_over = false;
        self.winner = None;
        self.move_count = 0;

        self.update_stored_state_values();
    }

    fn initial_state() -> Self {
        Self::new()
    }

    /// A move is valid on an empty, on-board position from which at least one
    /// direction brackets a run of enemy pieces.
    fn is_valid_move(&self, position: BoardPosition, player: PlayerColor) -> bool {
        if !self.within_board_bounds(position) || self.cell_at(position).is_some() {
            return false;
        }

        self.bracketed_runs(position, player.into()).next().is_some()
    }

    fn legal_moves(&self, player: PlayerColor) -> &[BoardPosition] {
        match player {
            PlayerColor::Black => &self.legal_moves[0],
            PlayerColor::White => &self.legal_moves[1],
        }
    }

    /// Places the player's piece at the given position,
    /// and flips all opponent pieces in any direction that terminates
    /// with another one of the player's pieces.
    ///
    /// Example:
    ///    O X X X *
    ///          X X
    ///        O   X
    ///            X
    ///
    /// Placing a white piece ('O') at the position marked with the *
    /// will result in the following state:
    ///
    ///    O O O O O
    ///          O X
    ///        O   X
    ///            X
    ///
    /// Does not advance the turn; see `switch_player`.
    fn apply_move(&mut self, position: BoardPosition, player: PlayerColor) -> bool {
        if !self.is_valid_move(position, player) {
            debug!(%position, %player, "rejected invalid move");
            return false;
        }

        let player_piece: ReversiPiece = player.into();
        let runs: Vec<BracketedRun> = self.bracketed_runs(position, player_piece).collect();

        self.set_piece(position, Some(player_piece));

        for run in runs {
            trace!(?run, "flipping run");

            for p in run.positions() {
                self.set_piece(p, Some(player_piece));
            }
        }

        self.move_count += 1;
        self.update_stored_state_values();

        true
    }

    /// Returns the current player whose turn it currently is.
    fn current_player_turn(&self) -> PlayerColor {
        self.current_player_turn
    }

    /// Returns the score of the given player in this state.
    fn player_score(&self, player: PlayerColor) -> usize {
        match player {
            PlayerColor::White => self.white_pieces_count,
            PlayerColor::Black => self.black_pieces_count,
        }
    }

    fn switch_player(&mut self) -> bool {
        let previous = self.current_player_turn;
        self.current_player_turn = previous.opponent();

        if self.has_legal_moves(self.current_player_turn) {
            return true;
        }

        debug!(player = %self.current_player_turn, "forced pass");
        self.current_player_turn = previous;

        if self.has_legal_moves(previous) {
            return true;
        }

        self.check_game_over();
        false
    }

    fn check_game_over(&mut self) -> bool {
        if self.has_legal_moves(PlayerColor::Black) || self.has_legal_moves(PlayerColor::White) {
            return false;
        }

        let (black, white) = self.count_pieces();
        self.is_game_over = true;
        self.winner = Some(GameResult::from_scores(black, white));

        true
    }

    /// True if the the game has ended, i.e. neither player could move
    /// the last time `check_game_over` ran.
    fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    fn game_result(&self) -> Option<GameResult> {
        self.winner
    }
}

impl fmt::Display for ReversiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.human_friendly())
    }
}
