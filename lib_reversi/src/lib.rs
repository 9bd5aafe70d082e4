pub mod reversi;
pub mod reversi_board;
pub mod reversi_gamestate;
mod util;

pub use reversi::Reversi;
pub use reversi_board::{BoardPosition, ParsePositionError, ReversiPiece, BOARD_SIZE};
pub use reversi_gamestate::ReversiState;

pub(crate) use reversi_board::{board_directions, Board, Directions};

/// Errors raised while setting up a board.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReversiError {
    #[error("board size must be an even number from 4 to 16, got {0}")]
    InvalidBoardSize(usize),

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized cell {symbol:?} at row {row}, col {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
}
