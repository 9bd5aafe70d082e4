use crate::console::{clear_screen, render_state};
use lib_boardgame::{GameAgent, GameState, PlayerAction, PlayerColor};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::marker::PhantomData;
use std::str::FromStr;
use tracing::{debug, warn};

const QUIT_COMMANDS: [&str; 3] = ["q", "quit", "exit"];

/// Reads the moves of a human player, one per line.
///
/// The board is shown before each prompt. Unparseable input and illegal moves
/// are reported and prompted again. End of input or a quit command gives up
/// the game, which `pick_move` reports as `None`.
pub struct HumanAgent<TState, R, W> {
    player_color: PlayerColor,
    input: R,
    output: W,
    pause_after_opponent: bool,
    clear_screen: bool,
    board_shown: bool,
    _phantom: PhantomData<TState>,
}

impl<TState, R, W> HumanAgent<TState, R, W>
where
    TState: GameState,
    TState::Move: FromStr + Display,
    <TState::Move as FromStr>::Err: Display,
    R: BufRead,
    W: Write,
{
    pub fn new(player_color: PlayerColor, input: R, output: W) -> Self {
        Self {
            player_color,
            input,
            output,
            pause_after_opponent: false,
            clear_screen: false,
            board_shown: false,
            _phantom: Default::default(),
        }
    }

    /// Wait for Enter after showing each move of the opponent.
    pub fn pause_after_opponent(mut self, pause: bool) -> Self {
        self.pause_after_opponent = pause;
        self
    }

    /// Clear the terminal before each board is shown.
    pub fn clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    fn render(&mut self, state: &TState) -> io::Result<()> {
        if self.clear_screen {
            clear_screen(&mut self.output)?;
        }

        render_state(&mut self.output, state)
    }

    /// One line of input, or None at the end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();

        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_owned()))
    }

    fn prompt_input(
        &mut self,
        state: &TState,
        player: PlayerColor,
    ) -> io::Result<Option<TState::Move>> {
        // The opponent's move may have just drawn this same board.
        if !std::mem::take(&mut self.board_shown) {
            self.render(state)?;
        }

        loop {
            write!(self.output, "\n{} to play, enter row,col or row col (q to quit): ", player)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            if QUIT_COMMANDS.contains(&line.to_lowercase().as_str()) {
                return Ok(None);
            }

            match TState::Move::from_str(&line) {
                Ok(action) if state.is_valid_move(action, player) => return Ok(Some(action)),
                Ok(action) => {
                    writeln!(self.output, "{} is not a legal move. Try again.", action)?;
                }
                Err(err) => {
                    debug!(%err, input = line.as_str(), "unparseable move");
                    writeln!(self.output, "Invalid input: {}", err)?;
                }
            }
        }
    }

    fn show_action(
        &mut self,
        player: PlayerColor,
        action: PlayerAction<TState::Move>,
        state: &TState,
    ) -> io::Result<()> {
        match action {
            PlayerAction::PassTurn if player == self.player_color => {
                writeln!(self.output, "\nYou have no legal moves, your turn is skipped.")?;
            }
            PlayerAction::PassTurn => {
                writeln!(self.output, "\n{} has no legal moves and passes.", player)?;
            }
            PlayerAction::Move(_) if player == self.player_color => {
                self.board_shown = false;
                return Ok(());
            }
            PlayerAction::Move(action) => {
                self.render(state)?;
                self.board_shown = true;
                writeln!(self.output, "{} played {}", player, action)?;
            }
        }

        if self.pause_after_opponent {
            write!(self.output, "Press Enter to continue...")?;
            self.output.flush()?;
            self.read_line()?;
        }

        Ok(())
    }
}

impl<TState, R, W> GameAgent<TState> for HumanAgent<TState, R, W>
where
    TState: GameState,
    TState::Move: FromStr + Display,
    <TState::Move as FromStr>::Err: Display,
    R: BufRead,
    W: Write,
{
    fn pick_move(&mut self, state: &TState, player: PlayerColor) -> Option<TState::Move> {
        if state.legal_moves(player).is_empty() {
            return None;
        }

        match self.prompt_input(state, player) {
            Ok(action) => action,
            Err(err) => {
                warn!(%err, "could not read the player's move");
                None
            }
        }
    }

    fn observe_action(
        &mut self,
        player: PlayerColor,
        action: PlayerAction<TState::Move>,
        state: &TState,
    ) {
        if let Err(err) = self.show_action(player, action, state) {
            warn!(%err, "could not show the last action");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_reversi::{BoardPosition, ReversiState};
    use std::io::Cursor;

    type TestAgent = HumanAgent<ReversiState, Cursor<Vec<u8>>, Vec<u8>>;

    fn agent(input: &str) -> TestAgent {
        HumanAgent::new(
            PlayerColor::Black,
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
        )
    }

    fn output_of(agent: &TestAgent) -> String {
        String::from_utf8_lossy(agent.output()).into_owned()
    }

    #[test]
    fn reads_a_legal_move() {
        let mut agent = agent("2,3\n");
        let state = ReversiState::new();

        assert_eq!(
            Some(BoardPosition::new(2, 3)),
            agent.pick_move(&state, PlayerColor::Black)
        );
        assert!(output_of(&agent).contains("Black (X): 2  White (O): 2"));
    }

    #[test]
    fn reprompts_after_bad_input_and_illegal_moves() {
        let mut agent = agent("hello\n0,0\n3 2\n");
        let state = ReversiState::new();

        assert_eq!(
            Some(BoardPosition::new(3, 2)),
            agent.pick_move(&state, PlayerColor::Black)
        );

        let output = output_of(&agent);
        assert!(output.contains("Invalid input"));
        assert!(output.contains("(0, 0) is not a legal move"));
    }

    #[test]
    fn quit_and_end_of_input_give_up() {
        let state = ReversiState::new();

        assert_eq!(None, agent("quit\n").pick_move(&state, PlayerColor::Black));
        assert_eq!(None, agent("Q\n2,3\n").pick_move(&state, PlayerColor::Black));
        assert_eq!(None, agent("9,9\n").pick_move(&state, PlayerColor::Black));
    }

    #[test]
    fn shows_opponent_moves_and_passes() {
        let mut agent = agent("");
        let state = ReversiState::new();

        agent.observe_action(
            PlayerColor::White,
            PlayerAction::Move(BoardPosition::new(2, 4)),
            &state,
        );
        agent.observe_action(PlayerColor::White, PlayerAction::PassTurn, &state);
        agent.observe_action(PlayerColor::Black, PlayerAction::PassTurn, &state);

        let output = output_of(&agent);
        assert!(output.contains("White played (2, 4)"));
        assert!(output.contains("White has no legal moves and passes."));
        assert!(output.contains("You have no legal moves"));
    }

    #[test]
    fn prompt_reuses_the_board_drawn_for_the_opponent_move() {
        let mut agent = agent("2,3\n");
        let state = ReversiState::new();

        agent.observe_action(
            PlayerColor::White,
            PlayerAction::Move(BoardPosition::new(2, 4)),
            &state,
        );
        agent.pick_move(&state, PlayerColor::Black);
        agent.pick_move(&state, PlayerColor::Black);

        // Drawn by the opponent's move, then again for the second prompt.
        assert_eq!(2, output_of(&agent).matches("Black (X): 2").count());
    }

    #[test]
    fn clears_the_screen_before_the_board_when_asked() {
        let mut agent = agent("2,3\n").clear_screen(true);

        agent.pick_move(&ReversiState::new(), PlayerColor::Black);

        assert!(output_of(&agent).starts_with("\x1b[2J"));
    }

    #[test]
    fn pauses_after_opponent_moves_when_asked() {
        let mut agent = agent("\n").pause_after_opponent(true);
        let state = ReversiState::new();

        agent.observe_action(
            PlayerColor::White,
            PlayerAction::Move(BoardPosition::new(2, 4)),
            &state,
        );

        assert!(output_of(&agent).ends_with("Press Enter to continue..."));
    }
}
