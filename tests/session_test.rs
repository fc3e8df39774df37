//! End-to-end scenarios for the game session: play, time travel, and the
//! automatic reset after a finished game.

use std::time::Duration;
use tokio::sync::mpsc;
use xo_deluxe::{
    AutoReset, EntryLabel, GameSession, GameStatus, MoveError, Player, Position, Square,
};

fn play_all(session: &mut GameSession, cells: &[usize]) {
    for &cell in cells {
        session.play_index(cell).expect("legal move");
    }
}

#[test]
fn test_diagonal_win() {
    let mut session = GameSession::default();
    play_all(&mut session, &[0, 1, 4, 2, 8]);

    assert_eq!(session.status(), GameStatus::Won(Player::X));
    assert_eq!(session.winner(), Some(Player::X));
    assert!(session.is_game_over());
    assert!(session.is_celebrating());
    assert!(session.auto_reset_pending());

    let line = session.winning_line().expect("winning line");
    assert_eq!(
        line.positions,
        [Position::TopLeft, Position::Center, Position::BottomRight]
    );
}

#[test]
fn test_full_board_draw() {
    let mut session = GameSession::default();
    play_all(&mut session, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

    assert_eq!(session.status(), GameStatus::Draw);
    assert_eq!(session.winner(), None);
    assert_eq!(session.history().len(), 10);
    assert!(session.auto_reset_pending());
}

#[test]
fn test_play_appends_and_moves_pointer() {
    let mut session = GameSession::default();
    for (i, cell) in [4, 0, 8].into_iter().enumerate() {
        let before = session.history().len();
        session.play_index(cell).unwrap();
        assert_eq!(session.history().len(), before + 1);
        assert_eq!(session.current_move(), session.history().last_index());
        assert_eq!(session.current_move(), i + 1);
    }
}

#[test]
fn test_rejected_moves_leave_history_alone() {
    let mut session = GameSession::default();
    play_all(&mut session, &[4]);

    assert_eq!(
        session.play(Position::Center),
        Err(MoveError::SquareOccupied(Position::Center))
    );
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.to_move(), Player::O);

    play_all(&mut session, &[0, 1, 3, 7]);
    assert_eq!(session.status(), GameStatus::Won(Player::X));
    let snapshot = session.history().clone();

    assert_eq!(session.play(Position::BottomRight), Err(MoveError::GameOver));
    assert_eq!(session.history(), &snapshot);
}

#[test]
fn test_jump_then_play_truncates_future() {
    let mut session = GameSession::default();
    play_all(&mut session, &[0, 4, 8, 2]);
    assert_eq!(session.history().len(), 5);

    session.jump_to(1).unwrap();
    assert_eq!(session.to_move(), Player::O);
    session.play(Position::BottomLeft).unwrap();

    assert_eq!(session.history().len(), 3);
    assert_eq!(session.current_move(), 2);
    assert_eq!(
        session.board().get(Position::BottomLeft),
        Square::Occupied(Player::O)
    );
    assert_eq!(session.board().get(Position::Center), Square::Empty);
}

#[test]
fn test_jump_to_start_after_win_cancels_reset() {
    let mut session = GameSession::default();
    play_all(&mut session, &[0, 1, 4, 2, 8]);

    session.jump_to(0).unwrap();
    assert_eq!(session.status(), GameStatus::InProgress);
    assert!(!session.is_celebrating());
    assert!(!session.auto_reset_pending());
    assert_eq!(session.history().len(), 6);

    session.jump_to(5).unwrap();
    assert!(!session.auto_reset_pending());
}

#[test]
fn test_jump_out_of_range() {
    let mut session = GameSession::default();
    play_all(&mut session, &[4]);

    let err = session.jump_to(2).unwrap_err();
    assert_eq!(err.requested, 2);
    assert_eq!(err.len, 2);
    assert_eq!(session.current_move(), 1);
}

#[test]
fn test_move_list_entries() {
    let mut session = GameSession::default();
    play_all(&mut session, &[4, 0]);

    let entries = session.entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].label, EntryLabel::Start);
    assert_eq!(entries[0].to_string(), "Start of game");
    assert_eq!(entries[2].label, EntryLabel::Move(2));
    assert_eq!(
        entries[2].played.map(|mv| (mv.player, mv.position)),
        Some((Player::O, Position::TopLeft))
    );
}

#[test]
fn test_manual_reset() {
    let mut session = GameSession::default();
    play_all(&mut session, &[0, 1, 4, 2, 8]);

    session.reset();
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.current_move(), 0);
    assert_eq!(session.status(), GameStatus::InProgress);
    assert!(!session.auto_reset_pending());
}

#[tokio::test(start_paused = true)]
async fn test_draw_resets_after_delay() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = GameSession::new(AutoReset::new(Duration::from_secs(4), tx));
    play_all(&mut session, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    assert_eq!(session.status(), GameStatus::Draw);

    tokio::time::sleep(Duration::from_millis(3_500)).await;
    assert!(rx.try_recv().is_err());
    assert_eq!(session.history().len(), 10);

    let ticket = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("timer fired")
        .expect("channel open");
    assert!(session.handle_auto_reset(ticket));

    assert_eq!(session.history().len(), 1);
    assert_eq!(session.current_move(), 0);
    assert!(!session.is_game_over());
    assert!(session.board().squares().iter().all(|s| *s == Square::Empty));
}

#[tokio::test(start_paused = true)]
async fn test_jump_before_delay_prevents_reset() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = GameSession::new(AutoReset::new(Duration::from_secs(4), tx));
    play_all(&mut session, &[0, 1, 4, 2, 8]);

    tokio::time::sleep(Duration::from_secs(1)).await;
    session.jump_to(0).unwrap();

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(rx.try_recv().is_err());
    assert_eq!(session.history().len(), 6);
    assert_eq!(session.current_move(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_reset_before_delay_prevents_second_reset() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = GameSession::new(AutoReset::new(Duration::from_secs(4), tx));
    play_all(&mut session, &[0, 1, 4, 2, 8]);

    tokio::time::sleep(Duration::from_secs(1)).await;
    session.reset();
    play_all(&mut session, &[4]);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(rx.try_recv().is_err());
    assert!(!session.auto_reset_pending());
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.current_move(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_ticket_in_flight_is_ignored_after_jump() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = GameSession::new(AutoReset::new(Duration::from_secs(4), tx));
    play_all(&mut session, &[0, 1, 4, 2, 8]);

    tokio::time::sleep(Duration::from_secs(5)).await;
    let ticket = rx.try_recv().expect("timer fired");

    session.jump_to(3).unwrap();
    assert!(!session.handle_auto_reset(ticket));
    assert_eq!(session.history().len(), 6);
    assert_eq!(session.current_move(), 3);
}
