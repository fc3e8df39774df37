//! Keyboard mapping: cursor movement and player intents.

use crate::games::tictactoe::Position;
use crossterm::event::KeyCode;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Move the board cursor (arrow keys).
    MoveCursor(KeyCode),
    /// Place a mark at the cursor.
    PlayCursor,
    /// Place a mark at a specific cell (digit keys).
    PlayCell(Position),
    /// One entry back in the move list.
    StepBack,
    /// One entry forward in the move list.
    StepForward,
    /// Jump to the start of the game.
    JumpStart,
    /// Jump to the newest move.
    JumpLatest,
    /// Start over.
    Reset,
    /// Leave the app.
    Quit,
}

/// Maps a key to an intent.
pub fn intent_for(code: KeyCode) -> Option<Intent> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Intent::Quit),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Some(Intent::MoveCursor(code))
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(Intent::PlayCursor),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .and_then(|d| Position::from_index(d as usize - 1))
            .map(Intent::PlayCell),
        KeyCode::Char('[') => Some(Intent::StepBack),
        KeyCode::Char(']') => Some(Intent::StepForward),
        KeyCode::Home => Some(Intent::JumpStart),
        KeyCode::End => Some(Intent::JumpLatest),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Intent::Reset),
        _ => None,
    }
}

/// Moves cursor based on arrow keys.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    use Position::*;

    match (cursor, key) {
        // Right movement
        (TopLeft, KeyCode::Right) => TopCenter,
        (TopCenter, KeyCode::Right) => TopRight,
        (MiddleLeft, KeyCode::Right) => Center,
        (Center, KeyCode::Right) => MiddleRight,
        (BottomLeft, KeyCode::Right) => BottomCenter,
        (BottomCenter, KeyCode::Right) => BottomRight,

        // Left movement
        (TopCenter, KeyCode::Left) => TopLeft,
        (TopRight, KeyCode::Left) => TopCenter,
        (Center, KeyCode::Left) => MiddleLeft,
        (MiddleRight, KeyCode::Left) => Center,
        (BottomCenter, KeyCode::Left) => BottomLeft,
        (BottomRight, KeyCode::Left) => BottomCenter,

        // Down movement
        (TopLeft, KeyCode::Down) => MiddleLeft,
        (TopCenter, KeyCode::Down) => Center,
        (TopRight, KeyCode::Down) => MiddleRight,
        (MiddleLeft, KeyCode::Down) => BottomLeft,
        (Center, KeyCode::Down) => BottomCenter,
        (MiddleRight, KeyCode::Down) => BottomRight,

        // Up movement
        (MiddleLeft, KeyCode::Up) => TopLeft,
        (Center, KeyCode::Up) => TopCenter,
        (MiddleRight, KeyCode::Up) => TopRight,
        (BottomLeft, KeyCode::Up) => MiddleLeft,
        (BottomCenter, KeyCode::Up) => Center,
        (BottomRight, KeyCode::Up) => MiddleRight,

        // Edges
        _ => cursor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_map_to_cells() {
        assert_eq!(intent_for(KeyCode::Char('1')), Some(Intent::PlayCell(Position::TopLeft)));
        assert_eq!(intent_for(KeyCode::Char('9')), Some(Intent::PlayCell(Position::BottomRight)));
        assert_eq!(intent_for(KeyCode::Char('0')), None);
    }

    #[test]
    fn test_cursor_stops_at_edges() {
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::TopRight, KeyCode::Right), Position::TopRight);
        assert_eq!(move_cursor(Position::Center, KeyCode::Down), Position::BottomCenter);
    }
}
