//! Application state

use txguard_auth::{PinEntryState, SessionSnapshot};
use txguard_core::{SourceError, Transaction, TransactionGroup, TransactionId};

/// Current screen/view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    /// Grouped transaction list
    #[default]
    History,

    /// Single transaction
    Detail(TransactionId),
}

/// Async-loaded value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Load<T> {
    #[default]
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Load<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Load::Loading)
    }
}

impl<T> From<Result<T, SourceError>> for Load<T> {
    fn from(result: Result<T, SourceError>) -> Self {
        match result {
            Ok(value) => Load::Loaded(value),
            Err(e) => Load::Failed(e.to_string()),
        }
    }
}

/// Application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Current screen
    pub current_screen: Screen,

    /// History list
    pub history: Load<Vec<TransactionGroup>>,

    /// Refresh in progress (list stays visible)
    pub refreshing: bool,

    /// Selected row in the flattened history
    pub selected: usize,

    /// Detail lookup for the current detail screen
    pub detail: Load<Option<Transaction>>,

    /// Auth session as of the last tick
    pub session: SessionSnapshot,

    /// PIN modal as of the last tick
    pub pin: PinEntryState,

    /// A reveal toggle is running
    pub reveal_pending: bool,

    /// Status message to display
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transactions in display order
    pub fn visible_transactions(&self) -> Vec<&Transaction> {
        match &self.history {
            Load::Loaded(groups) => groups.iter().flat_map(|g| g.transactions.iter()).collect(),
            _ => Vec::new(),
        }
    }

    pub fn selected_transaction(&self) -> Option<&Transaction> {
        self.visible_transactions().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let count = self.visible_transactions().len();
        if self.selected + 1 < count {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Store a new history and keep the selection in range
    pub fn set_history(&mut self, history: Load<Vec<TransactionGroup>>) {
        self.history = history;
        let count = self.visible_transactions().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    /// Clear status messages
    pub fn clear_messages(&mut self) {
        self.status_message = None;
    }
}
