//! Session lifecycle signals.
//!
//! The gateway does not navigate anywhere. It publishes [`SessionEvent`]s and
//! the host decides what "go to the login view" means.

use tokio::sync::broadcast;

const SIGNAL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The server rejected the credential; it has been cleared.
    Expired {
        /// Status that triggered the teardown (always 401 today)
        status: u16,
    },
    /// A login stored a fresh credential.
    LoggedIn,
    /// The credential was removed locally.
    LoggedOut,
}

/// Broadcast handle shared by the gateway and the client facade.
#[derive(Debug, Clone)]
pub struct SessionSignals {
    tx: broadcast::Sender<SessionEvent>,
}

impl Default for SessionSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionSignals {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(SIGNAL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    pub(crate) fn emit(&self, event: SessionEvent) {
        // No subscribers is fine; the signal is advisory.
        let delivered = self.tx.send(event).unwrap_or(0);
        tracing::debug!(?event, delivered, "session signal");
    }
}
