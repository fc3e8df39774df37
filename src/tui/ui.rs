//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::app::App;
use crate::games::tictactoe::{GameSession, Player, Position, Square, WinLine};

/// Draws the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let session = app.session();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(13),   // Board + moves
            Constraint::Length(3), // Banner
            Constraint::Length(3), // Help
        ])
        .split(area);

    let title = Paragraph::new("✨ X & O Deluxe ✨")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(42), Constraint::Length(32)])
        .split(chunks[1]);

    draw_game(frame, body[0], session, app.cursor());
    draw_moves(frame, body[1], session);
    draw_banner(frame, chunks[2], session);

    let help = Paragraph::new(
        "Arrows: Move | Enter: Place | 1-9: Cell | [ ]: History | Home/End | R: Reset | Q: Quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);

    if let Some(celebration) = app.celebration() {
        frame.render_widget(celebration, area);
    }
}

/// Status line text for the current position.
pub fn status_line(session: &GameSession) -> String {
    match session.winner() {
        Some(player) => format!("Winner: {}", player),
        None if session.is_game_over() => "Draw!".to_string(),
        None => format!("Next player: {}", session.to_move()),
    }
}

fn draw_game(frame: &mut Frame, area: Rect, session: &GameSession, cursor: Position) {
    let block = Block::default().borders(Borders::ALL).title("Board");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(11)])
        .split(inner);

    let status_style = if session.winner().is_some() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let status = Paragraph::new(status_line(session))
        .style(status_style)
        .alignment(Alignment::Center);
    frame.render_widget(status, rows[0]);

    // Cursor is hidden once the game is over.
    let cursor = (!session.is_game_over()).then_some(cursor);
    draw_board(frame, rows[2], session, cursor, session.winning_line());
}

fn draw_board(
    frame: &mut Frame,
    area: Rect,
    session: &GameSession,
    cursor: Option<Position>,
    line: Option<WinLine>,
) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (row, chunk) in [rows[0], rows[2], rows[4]].into_iter().enumerate() {
        let cells = [
            Position::ALL[row * 3],
            Position::ALL[row * 3 + 1],
            Position::ALL[row * 3 + 2],
        ];
        draw_row(frame, chunk, session, cursor, line, &cells);
    }
    draw_separator(frame, rows[1]);
    draw_separator(frame, rows[3]);
}

fn draw_row(
    frame: &mut Frame,
    area: Rect,
    session: &GameSession,
    cursor: Option<Position>,
    line: Option<WinLine>,
    positions: &[Position; 3],
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    draw_cell(frame, cols[0], session, cursor, line, positions[0]);
    draw_separator_vertical(frame, cols[1]);
    draw_cell(frame, cols[2], session, cursor, line, positions[1]);
    draw_separator_vertical(frame, cols[3]);
    draw_cell(frame, cols[4], session, cursor, line, positions[2]);
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    session: &GameSession,
    cursor: Option<Position>,
    line: Option<WinLine>,
    pos: Position,
) {
    let hint = (pos.to_index() + 1).to_string();
    let (symbol, base_style) = match session.board().get(pos) {
        Square::Empty => (hint, Style::default().fg(Color::DarkGray)),
        Square::Occupied(Player::X) => (
            "X".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::O) => (
            "O".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if line.is_some_and(|l| l.contains(pos)) {
        base_style.bg(Color::Green).fg(Color::Black)
    } else if cursor == Some(pos) {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}  ", symbol), style)),
    ];
    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_moves(frame: &mut Frame, area: Rect, session: &GameSession) {
    let items: Vec<ListItem> = session
        .entries()
        .iter()
        .map(|entry| ListItem::new(entry.to_string()))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Moves"))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default().with_selected(Some(session.current_move()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_banner(frame: &mut Frame, area: Rect, session: &GameSession) {
    let mut spans = Vec::new();
    if session.is_celebrating() {
        let message = match session.winner() {
            Some(player) => format!("🎉 Congratulations, {}!", player),
            None => "🤝 It's a draw!".to_string(),
        };
        spans.push(Span::styled(
            message,
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if session.auto_reset_pending() {
        if !spans.is_empty() {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            "Preparing a new game...",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let banner = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(banner, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = (0..area.height).map(|_| Line::from("│")).collect();
    let sep = Paragraph::new(lines).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CelebrationConfig;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_status_line_tracks_turns() {
        let mut session = GameSession::default();
        assert_eq!(status_line(&session), "Next player: X");
        session.play(Position::Center).unwrap();
        assert_eq!(status_line(&session), "Next player: O");
    }

    #[test]
    fn test_status_line_draw() {
        let mut session = GameSession::default();
        for cell in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            session.play_index(cell).unwrap();
        }
        assert_eq!(status_line(&session), "Draw!");
    }

    #[test]
    fn test_draw_renders_move_list() {
        let mut session = GameSession::default();
        session.play(Position::Center).unwrap();
        let app = App::new(session, CelebrationConfig::default());

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("Start of game"));
        assert!(content.contains("Move #1"));
        assert!(content.contains("Next player: O"));
    }
}
