//! Terminal UI for X & O Deluxe.

mod app;
mod effects;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

use crate::config::GameConfig;
use crate::games::tictactoe::{AutoReset, GameSession};

pub use app::App;
pub use input::{Intent, intent_for};
pub use ui::status_line;

/// Redraw interval; also drives the particle effect.
const FRAME: Duration = Duration::from_millis(50);

/// Runs the TUI until the user quits.
///
/// Must be called inside a tokio runtime: the auto-reset timer spawns onto it.
#[instrument(skip_all, fields(auto_reset_secs = *config.auto_reset_secs()))]
pub async fn run_tui(config: GameConfig) -> Result<()> {
    info!("Starting X & O Deluxe TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &config).await;

    // Restore the terminal even if the loop failed.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Event loop: redraw, then wait for a key, a fired auto-reset, or the next
/// frame.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &GameConfig,
) -> Result<()> {
    let (reset_tx, mut reset_rx) = mpsc::unbounded_channel();
    let session = GameSession::new(AutoReset::new(config.auto_reset_delay(), reset_tx));
    let mut app = App::new(session, config.celebration().clone());

    let mut events = EventStream::new();
    let mut frames = tokio::time::interval(FRAME);

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if app.should_quit() {
            info!("Leaving event loop");
            return Ok(());
        }

        tokio::select! {
            Some(ticket) = reset_rx.recv() => {
                app.on_auto_reset(ticket);
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind != KeyEventKind::Release => {
                    app.handle_key(key);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => {
                    info!("Input stream closed");
                    return Ok(());
                }
            },
            _ = frames.tick() => {
                let size = terminal.size()?;
                app.tick(Rect::new(0, 0, size.width, size.height));
            }
        }
    }
}
