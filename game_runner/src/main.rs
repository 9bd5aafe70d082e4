use std::io::{self, Write};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use lib_agents::{clear_screen, GreedyAgent, HumanAgent, NarratedAgent, RandomAgent};
use lib_boardgame::{GameAgent, GameResult, GameRunnerError, GameState, PlayerColor};
use lib_reversi::{Reversi, ReversiState, BOARD_SIZE};
use tracing::{error, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod input;

use input::{read_line, StdinLines};

const RULES: &str = "\
Goal:
  Have more pieces of your color on the board when the game ends.

Rules:
  1. Black (X) moves first.
  2. A piece must be placed on an empty square.
  3. It must trap one or more of the opponent's pieces in a straight line
     (horizontal, vertical or diagonal) between itself and another piece
     of the same color.
  4. Every trapped piece is flipped to the mover's color.
  5. A player without a legal move skips their turn.
  6. The game ends when neither player has a legal move.
  7. The player with more pieces wins.

Controls:
  Enter a position as row,col or row col, e.g. 3,4 or 3 4.
  Enter q to leave a game and return to the menu.";

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    /// Moves are typed in on the terminal
    Human,
    /// Uniformly random legal moves
    Random,
    /// The move that captures the most pieces
    Greedy,
}

#[derive(Parser)]
#[command(about = "Reversi in the terminal")]
struct Args {
    /// Width and height of the board, an even number from 4 to 16
    #[arg(long, default_value_t = BOARD_SIZE)]
    board_size: usize,

    /// Who plays black, which moves first
    #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
    black: PlayerKind,

    /// Who plays white
    #[arg(long, value_enum, default_value_t = PlayerKind::Random)]
    white: PlayerKind,

    /// RNG seed for random players
    #[arg(long)]
    seed: Option<u64>,

    /// Don't wait for Enter after each computer move
    #[arg(long, default_value_t = false)]
    no_pause: bool,

    /// Don't clear the terminal before the menu and each board
    #[arg(long, default_value_t = false)]
    no_clear: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

impl Args {
    fn has_human(&self) -> bool {
        self.black == PlayerKind::Human || self.white == PlayerKind::Human
    }

    /// The color typing in moves, when exactly one side is human.
    fn single_human(&self) -> Option<PlayerColor> {
        match (self.black, self.white) {
            (PlayerKind::Human, PlayerKind::Human) => None,
            (PlayerKind::Human, _) => Some(PlayerColor::Black),
            (_, PlayerKind::Human) => Some(PlayerColor::White),
            _ => None,
        }
    }
}

/// Computer players narrate their own turns when no human is there to see the board.
fn make_agent(args: &Args, color: PlayerColor, seed: u64) -> Box<dyn GameAgent<ReversiState>> {
    let kind = match color {
        PlayerColor::Black => args.black,
        PlayerColor::White => args.white,
    };

    let computer: Box<dyn GameAgent<ReversiState>> = match kind {
        PlayerKind::Human => {
            return Box::new(
                HumanAgent::<ReversiState, _, _>::new(color, StdinLines::new(), io::stdout())
                    .pause_after_opponent(!args.no_pause)
                    .clear_screen(!args.no_clear),
            );
        }
        PlayerKind::Random => Box::new(RandomAgent::with_seed(seed)),
        PlayerKind::Greedy => Box::new(GreedyAgent),
    };

    if args.has_human() {
        return computer;
    }

    Box::new(NarratedAgent::<ReversiState, _, _>::new(color, computer, io::stdout()))
}

fn print_menu(clear: bool) -> io::Result<()> {
    let mut out = io::stdout();

    if clear {
        clear_screen(&mut out)?;
    }

    writeln!(out, "\n{}", "=".repeat(40))?;
    writeln!(out, "  Reversi")?;
    writeln!(out, "{}", "=".repeat(40))?;
    writeln!(out, " 1. Start a game")?;
    writeln!(out, " 2. Rules")?;
    writeln!(out, " 3. Quit")?;
    writeln!(out, "{}", "=".repeat(40))?;
    write!(out, "Choose an option (1-3): ")?;
    out.flush()
}

fn wait_for_enter(message: &str) -> io::Result<()> {
    print!("\n{}", message);
    io::stdout().flush()?;
    read_line()?;

    Ok(())
}

fn announce_result(state: &ReversiState, result: GameResult, human: Option<PlayerColor>) {
    let (black, white) = state.count_pieces();

    println!("\n{}", state.human_friendly());
    println!("Black (X): {}  White (O): {}", black, white);
    println!("{}", "=".repeat(40));
    match result {
        GameResult::BlackWins => println!("  Black (X) wins!"),
        GameResult::WhiteWins => println!("  White (O) wins!"),
        GameResult::Tie => println!("  It's a draw!"),
    }
    match human {
        Some(color) if result.is_win_for_player(color) => println!("  You win!"),
        Some(color) if result.is_win_for_player(color.opponent()) => println!("  You lose."),
        _ => {}
    }
    println!("{}", "=".repeat(40));
}

/// Plays one session from a fresh board. Returns once the game is over
/// or a human player leaves.
fn play_game(args: &Args, seed: u64) -> anyhow::Result<()> {
    let state = ReversiState::with_board_size(args.board_size)?;

    let black = make_agent(args, PlayerColor::Black, seed);
    let white = make_agent(args, PlayerColor::White, seed.wrapping_add(1));

    let mut game = Reversi::with_state(state, white, black);
    info!(seed, black = ?args.black, white = ?args.white, "starting game");

    match game.play_to_end() {
        Ok(result) => {
            info!(?result, moves = game.game_state().move_count(), "game finished");
            announce_result(game.game_state(), result, args.single_human());
        }
        Err(GameRunnerError::Abandoned { player }) => {
            println!("\n{} left the game.", player);
        }
        Err(err) => {
            error!(%err, "game aborted");
            println!("\nThe game was aborted: {}", err);
        }
    }

    wait_for_enter("Press Enter to return to the menu...")?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Fail on a bad board size before showing the menu.
    ReversiState::with_board_size(args.board_size).context("invalid --board-size")?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);

    let mut games_played: u64 = 0;

    loop {
        print_menu(!args.no_clear)?;

        let Some(choice) = read_line()? else {
            break;
        };

        match choice.as_str() {
            "1" => {
                // Each game gets its own seeds, derived from the session seed.
                play_game(&args, seed.wrapping_add(2 * games_played))?;
                games_played += 1;
            }
            "2" => {
                if !args.no_clear {
                    clear_screen(&mut io::stdout())?;
                }
                println!("\n{}", RULES);
                wait_for_enter("Press Enter to return to the menu...")?;
            }
            "3" | "q" | "quit" => break,
            other => println!("\nUnknown option {:?}, please enter 1, 2 or 3.", other),
        }
    }

    println!("\nThanks for playing!");

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}
