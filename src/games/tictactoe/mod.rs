//! Tic-tac-toe: board types, rules, history and the session state manager.

mod action;
mod auto_reset;
mod history;
pub mod invariants;
mod position;
pub mod rules;
mod session;
mod types;

pub use action::{JumpError, Move, MoveError};
pub use auto_reset::{AutoReset, DEFAULT_AUTO_RESET_DELAY, ResetTicket};
pub use history::{EntryLabel, History, HistoryEntry};
pub use position::Position;
pub use rules::{WinLine, check_winner, winning_line};
pub use session::GameSession;
pub use types::{Board, GameStatus, Player, Square};

