//! Game state manager: history, time travel, terminal state and auto-reset.

use super::action::{JumpError, MoveError};
use super::auto_reset::{AutoReset, ResetTicket};
use super::history::{History, HistoryEntry};
use super::invariants;
use super::rules::{self, WinLine};
use super::types::{Board, GameStatus, Player};
use super::Position;
use tracing::{debug, info, instrument};

/// A single tic-tac-toe session.
///
/// The session owns the snapshot history and a pointer into it. Turn and
/// winner are derived from the pointed-at board every time they are asked
/// for; only the terminal and celebration flags are stored.
///
/// Every intent either applies completely or returns an error and leaves the
/// session untouched.
#[derive(Debug)]
pub struct GameSession {
    history: History,
    current_move: usize,
    game_over: bool,
    celebrating: bool,
    auto_reset: AutoReset,
}

impl GameSession {
    /// Creates a session at the start of a game.
    #[instrument(skip(auto_reset), fields(delay_ms = auto_reset.delay().as_millis() as u64))]
    pub fn new(auto_reset: AutoReset) -> Self {
        info!("Creating game session");
        Self {
            history: History::new(),
            current_move: 0,
            game_over: false,
            celebrating: false,
            auto_reset,
        }
    }

    /// Board at the current position.
    pub fn board(&self) -> &Board {
        &self.history.boards()[self.current_move]
    }

    /// Index of the current position in the history.
    pub fn current_move(&self) -> usize {
        self.current_move
    }

    /// Player whose mark the next `play` places.
    pub fn to_move(&self) -> Player {
        Player::at_move(self.current_move)
    }

    /// Winner on the current board, recomputed on every call.
    pub fn winner(&self) -> Option<Player> {
        rules::check_winner(self.board())
    }

    /// Completed line on the current board, if any.
    pub fn winning_line(&self) -> Option<WinLine> {
        rules::winning_line(self.board())
    }

    /// Session status.
    ///
    /// `Won`/`Draw` only while the session is terminal; after a jump the
    /// status is `InProgress` even when the board shown has a line.
    pub fn status(&self) -> GameStatus {
        if !self.game_over {
            return GameStatus::InProgress;
        }
        match self.winner() {
            Some(player) => GameStatus::Won(player),
            None => GameStatus::Draw,
        }
    }

    /// True after a terminal move until the next jump or reset.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// True while the end-of-game celebration should be shown.
    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    /// True while an automatic reset is scheduled.
    pub fn auto_reset_pending(&self) -> bool {
        self.auto_reset.is_pending()
    }

    /// Ticket of the scheduled automatic reset.
    pub fn pending_reset(&self) -> Option<ResetTicket> {
        self.auto_reset.pending()
    }

    /// Snapshot history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Move list entries.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.history.entries()
    }

    /// Places the active mark at `pos`.
    ///
    /// Ignored when the session is over, the current board already has a
    /// winner, or the square is taken. Otherwise history after the current
    /// position is dropped and the new board appended. A winning or filling
    /// move makes the session terminal and arms the auto-reset.
    #[instrument(skip(self), fields(current_move = self.current_move))]
    pub fn play(&mut self, pos: Position) -> Result<GameStatus, MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        if let Some(winner) = self.winner() {
            return Err(MoveError::AlreadyWon(winner));
        }
        if !self.board().is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }

        let player = self.to_move();
        let next = self.board().with_mark(pos, player);
        self.current_move = self.history.commit(self.current_move, next);
        self.check_invariants();

        info!(
            %player,
            position = %pos,
            move_number = self.current_move,
            "Mark placed"
        );

        if rules::check_winner(&next).is_some() || rules::is_full(&next) {
            self.game_over = true;
            self.celebrating = true;
            let ticket = self.auto_reset.arm();
            info!(status = %self.status(), %ticket, "Game over, auto-reset scheduled");
        }

        Ok(self.status())
    }

    /// Same as [`play`](Self::play) for a raw cell index (0-8).
    pub fn play_index(&mut self, index: usize) -> Result<GameStatus, MoveError> {
        let pos = Position::from_index(index).ok_or(MoveError::OutOfBounds(index))?;
        self.play(pos)
    }

    /// Moves the pointer to history index `target`.
    ///
    /// Clears the terminal and celebration flags and cancels any pending
    /// auto-reset, even when `target` shows a finished board.
    #[instrument(skip(self), fields(current_move = self.current_move))]
    pub fn jump_to(&mut self, target: usize) -> Result<(), JumpError> {
        let len = self.history.len();
        if target >= len {
            return Err(JumpError {
                requested: target,
                len,
            });
        }

        self.current_move = target;
        self.game_over = false;
        self.celebrating = false;
        self.auto_reset.cancel();

        debug!(winner = ?self.winner(), to_move = %self.to_move(), "Jumped");
        Ok(())
    }

    /// Back to the single empty board.
    #[instrument(skip(self), fields(history_len = self.history.len()))]
    pub fn reset(&mut self) {
        self.history.clear();
        self.current_move = 0;
        self.game_over = false;
        self.celebrating = false;
        self.auto_reset.cancel();
        info!("Game reset");
    }

    /// Applies a fired auto-reset.
    ///
    /// Returns false (and does nothing) if `ticket` is not the pending one,
    /// i.e. a jump, reset, or newer game end superseded it.
    #[instrument(skip(self))]
    pub fn handle_auto_reset(&mut self, ticket: ResetTicket) -> bool {
        if !self.auto_reset.take(ticket) {
            debug!("Ignoring stale auto-reset");
            return false;
        }
        info!("Auto-reset");
        self.reset();
        true
    }

    fn check_invariants(&self) {
        debug_assert!(
            invariants::check_history(&self.history).is_ok(),
            "history invariants violated: {:?}",
            invariants::check_history(&self.history)
        );
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(AutoReset::default())
    }
}
