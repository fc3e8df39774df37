//! X & O Deluxe - terminal tic-tac-toe with time travel
//!
//! # Architecture
//!
//! - **Session**: [`GameSession`] owns the board history, the current
//!   position, and the auto-reset timer
//! - **Rules**: [`check_winner`] and friends, pure functions over a [`Board`]
//! - **TUI**: ratatui front end with a move list and an end-of-game
//!   celebration
//!
//! # Example
//!
//! ```
//! use xo_deluxe::{GameSession, GameStatus, Player};
//!
//! let mut session = GameSession::default();
//! for cell in [0, 1, 4, 2, 8] {
//!     session.play_index(cell).unwrap();
//! }
//! assert_eq!(session.status(), GameStatus::Won(Player::X));
//!
//! session.jump_to(0).unwrap();
//! assert_eq!(session.status(), GameStatus::InProgress);
//! assert!(session.winner().is_none());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod games;
mod tui;

// Crate-level exports - Configuration
pub use config::{CelebrationConfig, ConfigError, GameConfig, MAX_CONFETTI_PIECES, MAX_FIREWORKS};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    AutoReset, Board, DEFAULT_AUTO_RESET_DELAY, EntryLabel, GameSession, GameStatus, History,
    HistoryEntry, JumpError, Move, MoveError, Player, Position, ResetTicket, Square, WinLine,
    check_winner, winning_line,
};

// Crate-level exports - Rules and invariants
pub use games::tictactoe::{invariants, rules};

// Crate-level exports - Terminal UI
pub use tui::{App, Intent, intent_for, run_tui, status_line};
