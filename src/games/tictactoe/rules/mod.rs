//! Game rules for tic-tac-toe.
//!
//! Pure functions over a single board. Nothing here knows about history,
//! turns, or timers; the session derives its status from these on demand.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, WinLine, check_winner, winning_line};
