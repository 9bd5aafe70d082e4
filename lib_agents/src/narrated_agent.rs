use crate::console::render_state;
use lib_boardgame::{GameAgent, GameState, PlayerAction, PlayerColor};
use std::fmt::Display;
use std::io::{self, Write};
use std::marker::PhantomData;
use tracing::warn;

/// Wraps a computer agent and writes each of its turns to the terminal,
/// for games that nobody is playing by hand. The output scrolls as a log
/// of the game.
pub struct NarratedAgent<TState, A, W> {
    player_color: PlayerColor,
    inner: A,
    output: W,
    _phantom: PhantomData<TState>,
}

impl<TState, A, W> NarratedAgent<TState, A, W>
where
    TState: GameState,
    TState::Move: Display,
    A: GameAgent<TState>,
    W: Write,
{
    pub fn new(player_color: PlayerColor, inner: A, output: W) -> Self {
        Self {
            player_color,
            inner,
            output,
            _phantom: Default::default(),
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    fn before_pick(&mut self, state: &TState, player: PlayerColor) -> io::Result<()> {
        render_state(&mut self.output, state)?;
        writeln!(self.output, "\n{} is thinking...", player)?;
        self.output.flush()
    }

    fn after_pick(&mut self, player: PlayerColor, action: Option<TState::Move>) -> io::Result<()> {
        match action {
            Some(action) => writeln!(self.output, "{} chose {}", player, action)?,
            None => writeln!(self.output, "{} gave up", player)?,
        }

        self.output.flush()
    }
}

impl<TState, A, W> GameAgent<TState> for NarratedAgent<TState, A, W>
where
    TState: GameState,
    TState::Move: Display,
    A: GameAgent<TState>,
    W: Write,
{
    fn pick_move(&mut self, state: &TState, player: PlayerColor) -> Option<TState::Move> {
        if let Err(err) = self.before_pick(state, player) {
            warn!(%err, "could not show the board");
        }

        let action = self.inner.pick_move(state, player);

        if let Err(err) = self.after_pick(player, action) {
            warn!(%err, "could not show the picked move");
        }

        action
    }

    fn observe_action(
        &mut self,
        player: PlayerColor,
        action: PlayerAction<TState::Move>,
        state: &TState,
    ) {
        // Both sides observe a pass; only the passing side reports it.
        if action == PlayerAction::PassTurn && player == self.player_color {
            let shown = writeln!(self.output, "\n{} has no legal moves and passes.", player);

            if let Err(err) = shown {
                warn!(%err, "could not show the pass");
            }
        }

        self.inner.observe_action(player, action, state);
    }
}
