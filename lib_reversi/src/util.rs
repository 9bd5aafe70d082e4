use crate::board_directions::SAME;
use crate::{BoardPosition, Directions};

/// Walks the board from an origin (exclusive) in one direction,
/// stopping at the edge of the board.
pub(crate) struct BoardDirectionIter {
    direction: Directions,
    board_size: usize,

    /// for iteration -- what position are we currently at?
    cursor: BoardPosition,
}

impl BoardDirectionIter {
    pub fn new(origin: BoardPosition, direction: Directions, board_size: usize) -> Self {
        debug_assert!(
            direction.col_dir != SAME || direction.row_dir != SAME,
            "an iterator that never moves would never end"
        );

        BoardDirectionIter {
            direction,
            board_size,

            cursor: origin,
        }
    }
}

impl Iterator for BoardDirectionIter {
    type Item = BoardPosition;

    fn next(&mut self) -> Option<Self::Item> {
        let next_row = self.cursor.row as i32 + self.direction.row_dir;
        let next_col = self.cursor.col as i32 + self.direction.col_dir;

        if next_col < 0 || next_row < 0 {
            return None;
        }

        if next_col >= self.board_size as i32 || next_row >= self.board_size as i32 {
            return None;
        }

        self.cursor = BoardPosition::new(next_row as usize, next_col as usize);

        Some(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_directions::*;

    #[test]
    fn walks_until_the_edge() {
        let direction = Directions {
            row_dir: SAME,
            col_dir: POSITIVE,
        };

        let visited: Vec<_> =
            BoardDirectionIter::new(BoardPosition::new(2, 5), direction, 8).collect();

        assert_eq!(
            vec![BoardPosition::new(2, 6), BoardPosition::new(2, 7)],
            visited
        );
    }

    #[test]
    fn diagonal_from_corner_off_board_is_empty() {
        let direction = Directions {
            row_dir: NEGATIVE,
            col_dir: NEGATIVE,
        };

        let mut iter = BoardDirectionIter::new(BoardPosition::new(0, 0), direction, 8);

        assert_eq!(None, iter.next());
    }

    #[test]
    fn diagonal_walk_covers_the_board() {
        let direction = Directions {
            row_dir: POSITIVE,
            col_dir: POSITIVE,
        };

        let visited = BoardDirectionIter::new(BoardPosition::new(0, 0), direction, 8).count();

        assert_eq!(7, visited);
    }
}
