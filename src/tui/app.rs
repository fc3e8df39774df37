//! Application state and logic.

use crate::config::CelebrationConfig;
use crate::games::tictactoe::{GameSession, Position, ResetTicket};
use crossterm::event::KeyEvent;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::layout::Rect;
use tracing::{debug, info};

use super::effects::Celebration;
use super::input::{Intent, intent_for, move_cursor};

/// Main application state.
pub struct App {
    session: GameSession,
    cursor: Position,
    effects: CelebrationConfig,
    celebration: Option<Celebration>,
    rng: StdRng,
    should_quit: bool,
}

impl App {
    /// Creates a new application around `session`.
    pub fn new(session: GameSession, effects: CelebrationConfig) -> Self {
        Self {
            session,
            cursor: Position::Center,
            effects,
            celebration: None,
            rng: StdRng::from_os_rng(),
            should_quit: false,
        }
    }

    /// Gets the game session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Board cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Running celebration effect, if any.
    pub fn celebration(&self) -> Option<&Celebration> {
        self.celebration.as_ref()
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(intent) = intent_for(key.code) {
            self.apply(intent);
        }
    }

    /// Applies one intent. Rejected intents are logged and otherwise ignored.
    pub fn apply(&mut self, intent: Intent) {
        debug!(?intent, "Applying intent");

        match intent {
            Intent::Quit => {
                info!("User quit");
                self.should_quit = true;
            }
            Intent::MoveCursor(code) => {
                self.cursor = move_cursor(self.cursor, code);
            }
            Intent::PlayCursor => self.play(self.cursor),
            Intent::PlayCell(pos) => {
                self.cursor = pos;
                self.play(pos);
            }
            Intent::StepBack => {
                if let Some(target) = self.session.current_move().checked_sub(1) {
                    self.jump(target);
                }
            }
            Intent::StepForward => self.jump(self.session.current_move() + 1),
            Intent::JumpStart => self.jump(0),
            Intent::JumpLatest => self.jump(self.session.history().last_index()),
            Intent::Reset => self.session.reset(),
        }
    }

    /// Applies a fired auto-reset ticket.
    pub fn on_auto_reset(&mut self, ticket: ResetTicket) {
        if self.session.handle_auto_reset(ticket) {
            self.cursor = Position::Center;
        }
    }

    /// Advances the celebration by one frame, starting or dropping it to
    /// follow the session's celebration flag.
    pub fn tick(&mut self, area: Rect) {
        if !(self.session.is_celebrating() && *self.effects.enabled()) {
            self.celebration = None;
            return;
        }

        if let Some(celebration) = self.celebration.as_mut() {
            celebration.step();
        } else {
            self.celebration = Some(Celebration::new(area, &self.effects, &mut self.rng));
        }
    }

    fn play(&mut self, pos: Position) {
        if let Err(e) = self.session.play(pos) {
            debug!(error = %e, "Move ignored");
        }
    }

    fn jump(&mut self, target: usize) {
        if let Err(e) = self.session.jump_to(target) {
            debug!(error = %e, "Jump ignored");
        }
    }
}
