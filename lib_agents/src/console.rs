use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use lib_boardgame::{GameState, PlayerColor};
use std::io::{self, Write};

/// Clears the terminal and puts the cursor in the top-left corner.
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))
}

/// Writes the board and both scores.
pub fn render_state<S: GameState, W: Write>(out: &mut W, state: &S) -> io::Result<()> {
    writeln!(out, "\n{}", state.human_friendly())?;
    writeln!(
        out,
        "Black (X): {}  White (O): {}",
        state.player_score(PlayerColor::Black),
        state.player_score(PlayerColor::White)
    )
}
