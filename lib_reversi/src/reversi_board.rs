use lib_boardgame::{GameMove, PlayerColor};
use std::fmt;
use std::str::FromStr;

/// The default size of the board.
/// E.x., if this is 8, the Reversi board is 8x8 spaces large.
pub const BOARD_SIZE: usize = 8;

pub(crate) const MIN_BOARD_SIZE: usize = 4;
pub(crate) const MAX_BOARD_SIZE: usize = 16;

/// Row-major cells, `None` being an empty space.
pub(crate) type Board = Vec<Option<ReversiPiece>>;

/// When traversing pieces on the board,
/// a positive direction indicates increasing values for col or row,
/// a negative direction indicates decreasing values for col or row,
/// and a 'same' direction indicates no movement for col or row.
/// Example: if we ask to traverse as 'col: positive, row: positive',
/// our traversal will increment both col and row.
/// (I.e., down and to the right, since row 0 is the top row.)
pub(crate) mod board_directions {
    pub type Direction = i32;
    pub const POSITIVE: Direction = 1;
    pub const NEGATIVE: Direction = -1;
    pub const SAME: Direction = 0;
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Directions {
    pub row_dir: board_directions::Direction,
    pub col_dir: board_directions::Direction,
}

impl Directions {
    /// The eight compass directions, skipping the (SAME, SAME) non-direction.
    pub fn all() -> impl Iterator<Item = Directions> {
        use board_directions::*;

        let all_directions = [NEGATIVE, SAME, POSITIVE];

        all_directions
            .into_iter()
            .flat_map(move |row_dir| {
                all_directions
                    .into_iter()
                    .map(move |col_dir| Directions { row_dir, col_dir })
            })
            .filter(|d| !(d.row_dir == SAME && d.col_dir == SAME))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReversiPiece {
    Black,
    White,
}

impl From<PlayerColor> for ReversiPiece {
    fn from(color: PlayerColor) -> ReversiPiece {
        match color {
            PlayerColor::Black => ReversiPiece::Black,
            PlayerColor::White => ReversiPiece::White,
        }
    }
}

/// A (row, col) coordinate. Row 0 is the top row, col 0 the leftmost column.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct BoardPosition {
    pub(crate) row: usize,
    pub(crate) col: usize,
}

impl BoardPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }
}

impl GameMove for BoardPosition {}

impl fmt::Display for BoardPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParsePositionError {
    #[error("expected a position as 'row,col' or 'row col', got {0:?}")]
    WrongFormat(String),

    #[error("{0:?} is not a board coordinate")]
    NotACoordinate(String),
}

/// Parses "row,col" or "row col". Bounds are not checked here;
/// an off-board position is simply never a valid move.
impl FromStr for BoardPosition {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let parts: Vec<_> = if s.contains(',') {
            s.split(',').map(|x| x.trim()).collect()
        } else {
            s.split_whitespace().collect()
        };

        if parts.len() != 2 {
            return Err(ParsePositionError::WrongFormat(s.to_owned()));
        }

        let parse_coord = |part: &str| {
            part.parse::<usize>()
                .map_err(|_| ParsePositionError::NotACoordinate(part.to_owned()))
        };

        let row = parse_coord(parts[0])?;
        let col = parse_coord(parts[1])?;

        Ok(BoardPosition::new(row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_and_space_separated_positions() {
        assert_eq!(Ok(BoardPosition::new(3, 4)), "3,4".parse());
        assert_eq!(Ok(BoardPosition::new(3, 4)), " 3 , 4 \n".parse());
        assert_eq!(Ok(BoardPosition::new(3, 4)), "3 4".parse());
        assert_eq!(Ok(BoardPosition::new(12, 0)), "12\t0".parse());
    }

    #[test]
    fn rejects_malformed_positions() {
        assert_eq!(
            Err(ParsePositionError::WrongFormat("3".to_owned())),
            "3".parse::<BoardPosition>()
        );
        assert_eq!(
            Err(ParsePositionError::WrongFormat("1,2,3".to_owned())),
            "1,2,3".parse::<BoardPosition>()
        );
        assert_eq!(
            Err(ParsePositionError::NotACoordinate("x".to_owned())),
            "x,2".parse::<BoardPosition>()
        );
        assert_eq!(
            Err(ParsePositionError::NotACoordinate("-1".to_owned())),
            "-1 2".parse::<BoardPosition>()
        );
        assert!("".parse::<BoardPosition>().is_err());
    }

    #[test]
    fn all_directions_has_eight_distinct_entries() {
        let directions: Vec<_> = Directions::all().collect();

        assert_eq!(8, directions.len());
        for (i, a) in directions.iter().enumerate() {
            assert!(a.row_dir != 0 || a.col_dir != 0);
            for b in &directions[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn piece_follows_player_color() {
        assert_eq!(ReversiPiece::Black, ReversiPiece::from(PlayerColor::Black));
        assert_eq!(ReversiPiece::White, ReversiPiece::from(PlayerColor::White));
    }
}
