//! Cancelable auto-reset timer.
//!
//! When a game ends the session arms a timer. The timer task never touches
//! the session: it only sends its [`ResetTicket`] back to the event loop,
//! which hands it to [`GameSession::handle_auto_reset`]. Arming again or
//! cancelling aborts the task and invalidates the ticket, so a ticket that
//! was already in flight is ignored.
//!
//! [`GameSession::handle_auto_reset`]: super::GameSession::handle_auto_reset

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, instrument, warn};

/// Delay between a terminal move and the automatic reset.
pub const DEFAULT_AUTO_RESET_DELAY: Duration = Duration::from_secs(4);

/// Identifies one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("reset#{}", _0)]
pub struct ResetTicket(u64);

#[derive(Debug)]
struct PendingReset {
    ticket: ResetTicket,
    task: Option<AbortHandle>,
}

impl Drop for PendingReset {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Owner of the (at most one) pending auto-reset.
#[derive(Debug)]
pub struct AutoReset {
    delay: Duration,
    notifier: Option<mpsc::UnboundedSender<ResetTicket>>,
    pending: Option<PendingReset>,
    issued: u64,
}

impl AutoReset {
    /// Creates a timer that spawns on the current tokio runtime and delivers
    /// fired tickets through `notifier`.
    #[instrument(skip(notifier))]
    pub fn new(delay: Duration, notifier: mpsc::UnboundedSender<ResetTicket>) -> Self {
        Self {
            delay,
            notifier: Some(notifier),
            pending: None,
            issued: 0,
        }
    }

    /// Creates a timer that tracks tickets but never fires on its own.
    #[instrument]
    pub fn detached(delay: Duration) -> Self {
        Self {
            delay,
            notifier: None,
            pending: None,
            issued: 0,
        }
    }

    /// Configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Ticket of the pending timer, if any.
    pub fn pending(&self) -> Option<ResetTicket> {
        self.pending.as_ref().map(|p| p.ticket)
    }

    /// Returns true while a reset is scheduled.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Cancels any pending timer and schedules a new one.
    #[instrument(skip(self), fields(delay_ms = self.delay.as_millis() as u64))]
    pub fn arm(&mut self) -> ResetTicket {
        self.cancel();
        self.issued += 1;
        let ticket = ResetTicket(self.issued);

        let task = self
            .notifier
            .as_ref()
            .and_then(|tx| self.spawn(ticket, tx.clone()));

        debug!(%ticket, spawned = task.is_some(), "Auto-reset armed");
        self.pending = Some(PendingReset { ticket, task });
        ticket
    }

    /// Aborts the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(ticket = %pending.ticket, "Auto-reset cancelled");
        }
    }

    /// Consumes `ticket` if it is the pending one.
    pub fn take(&mut self, ticket: ResetTicket) -> bool {
        if self.pending() == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    fn spawn(
        &self,
        ticket: ResetTicket,
        tx: mpsc::UnboundedSender<ResetTicket>,
    ) -> Option<AbortHandle> {
        let runtime = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(error = %e, %ticket, "No tokio runtime, auto-reset will not fire");
                return None;
            }
        };

        let delay = self.delay;
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            debug!(%ticket, "Auto-reset timer fired");
            if tx.send(ticket).is_err() {
                debug!(%ticket, "Event loop gone, dropping auto-reset");
            }
        });
        Some(handle.abort_handle())
    }
}

impl Default for AutoReset {
    fn default() -> Self {
        Self::detached(DEFAULT_AUTO_RESET_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_tracks_tickets() {
        let mut timer = AutoReset::detached(Duration::from_secs(1));
        let first = timer.arm();
        let second = timer.arm();

        assert_ne!(first, second);
        assert!(!timer.take(first));
        assert!(timer.take(second));
        assert!(!timer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = AutoReset::new(Duration::from_secs(4), tx);
        let ticket = timer.arm();

        tokio::time::sleep(Duration::from_millis(3_900)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(rx.try_recv().ok(), Some(ticket));
        assert!(timer.take(ticket));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_aborts_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = AutoReset::new(Duration::from_secs(4), tx);
        timer.arm();
        timer.cancel();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }
}
