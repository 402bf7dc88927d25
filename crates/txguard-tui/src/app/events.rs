//! Event handling for the TUI
//!
//! Background tasks never touch `AppState`; they report back over an
//! unbounded channel that the draw loop drains every tick.

use tokio::sync::mpsc;
use txguard_auth::SessionSnapshot;
use txguard_core::{SourceError, Transaction, TransactionGroup, TransactionId};

/// Results delivered by background tasks
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Initial fetch or retry finished
    HistoryLoaded(Result<Vec<TransactionGroup>, SourceError>),
    /// Refresh finished
    HistoryRefreshed(Result<Vec<TransactionGroup>, SourceError>),
    /// Detail lookup finished
    DetailLoaded {
        id: TransactionId,
        result: Result<Option<Transaction>, SourceError>,
    },
    /// Reveal toggle (and any authentication it triggered) finished
    RevealToggled(SessionSnapshot),
}

/// Channel between background tasks and the draw loop
pub struct EventChannel {
    sender: mpsc::UnboundedSender<AppEvent>,
    receiver: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventChannel {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    /// Get a clone of the sender for other tasks to send events
    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.sender.clone()
    }

    /// Try to receive the next event (non-blocking)
    pub fn try_recv(&mut self) -> Option<AppEvent> {
        self.receiver.try_recv().ok()
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}
