//! Generated transaction source for demos and tests
//!
//! Produces a plausible month of card and transfer activity, simulates
//! network latency and the occasional failed fetch, and grows by one
//! transaction on every refresh.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::{Result, SourceError};
use crate::grouping::group_by_date;
use crate::source::TransactionSource;
use crate::types::{
    AccountType, Amount, Transaction, TransactionGroup, TransactionId, TransactionKind,
    TransferChannel,
};

/// Message reported when a simulated fetch fails
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch transactions. Please try again.";

/// Merchants by spending category
const MERCHANTS: &[(&str, &[&str])] = &[
    ("Food", &["Whole Foods", "Starbucks", "Chipotle", "Uber Eats", "Blue Bottle Coffee"]),
    ("Shopping", &["Amazon", "Shopee", "Lazada", "Nike"]),
    ("Transport", &["Grab", "Shell", "Petron", "Caltex"]),
    ("Entertainment", &["Netflix", "Spotify", "Disney+", "Steam", "Nintendo"]),
    ("Bills", &["TM", "Astro", "Gym Membership", "Rent"]),
];

struct Recipient {
    name: &'static str,
    account: &'static str,
    account_type: AccountType,
    mobile: &'static str,
}

const RECIPIENTS: &[Recipient] = &[
    Recipient {
        name: "John Doe",
        account: "098712346666",
        account_type: AccountType::Savings,
        mobile: "0123456789",
    },
    Recipient {
        name: "Jane Smith",
        account: "234551246890",
        account_type: AccountType::Current,
        mobile: "0128904721",
    },
    Recipient {
        name: "Bob Johnson",
        account: "123456789012",
        account_type: AccountType::Savings,
        mobile: "01194022212",
    },
    Recipient {
        name: "Alice Brown",
        account: "888313583214",
        account_type: AccountType::Current,
        mobile: "01783490231",
    },
    Recipient {
        name: "Charlie Davis",
        account: "439013840124",
        account_type: AccountType::Savings,
        mobile: "0169022212",
    },
];

const SAVINGS_ACCOUNT: &str = "123456789999";
const CURRENT_ACCOUNT: &str = "987654321111";

/// History window for generated transactions
const HISTORY_WINDOW: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Mock source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockSourceConfig {
    /// Number of transactions generated up front
    #[serde(default = "default_initial_count")]
    pub initial_count: usize,

    /// Simulated latency of a full fetch
    #[serde(default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,

    /// Simulated latency of a refresh
    #[serde(default = "default_refresh_delay_ms")]
    pub refresh_delay_ms: u64,

    /// Simulated latency of a single-record lookup
    #[serde(default = "default_detail_delay_ms")]
    pub detail_delay_ms: u64,

    /// Probability that a full fetch fails (0.0 - 1.0)
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,

    /// Fixed RNG seed for reproducible data
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_initial_count() -> usize {
    25
}

fn default_fetch_delay_ms() -> u64 {
    1000
}

fn default_refresh_delay_ms() -> u64 {
    1500
}

fn default_detail_delay_ms() -> u64 {
    500
}

fn default_failure_rate() -> f64 {
    0.05
}

impl Default for MockSourceConfig {
    fn default() -> Self {
        Self {
            initial_count: default_initial_count(),
            fetch_delay_ms: default_fetch_delay_ms(),
            refresh_delay_ms: default_refresh_delay_ms(),
            detail_delay_ms: default_detail_delay_ms(),
            failure_rate: default_failure_rate(),
            seed: None,
        }
    }
}

impl MockSourceConfig {
    /// No latency, no failures, fixed seed
    pub fn instant(seed: u64) -> Self {
        Self {
            fetch_delay_ms: 0,
            refresh_delay_ms: 0,
            detail_delay_ms: 0,
            failure_rate: 0.0,
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(SourceError::InvalidConfig(format!(
                "failure_rate must be within 0.0..=1.0, got {}",
                self.failure_rate
            )));
        }
        Ok(())
    }
}

/// In-memory source backed by generated transactions
pub struct MockTransactionSource {
    config: MockSourceConfig,
    transactions: RwLock<Vec<Transaction>>,
    rng: Mutex<StdRng>,
}

impl MockTransactionSource {
    /// Create a source and generate its initial history
    pub fn new(config: MockSourceConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let now = Utc::now();
        let mut transactions: Vec<Transaction> = (0..config.initial_count)
            .map(|index| {
                let date = random_date(&mut rng, now);
                generate_transaction(&mut rng, index, date)
            })
            .collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));

        debug!("Generated {} mock transactions", transactions.len());

        Ok(Self {
            config,
            transactions: RwLock::new(transactions),
            rng: Mutex::new(rng),
        })
    }

    /// Number of transactions currently held
    pub async fn len(&self) -> usize {
        self.transactions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.transactions.read().await.is_empty()
    }

    async fn simulate_latency(millis: u64) {
        if millis > 0 {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }

    fn should_fail(&self) -> bool {
        if self.config.failure_rate <= 0.0 {
            return false;
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_bool(self.config.failure_rate)
    }
}

#[async_trait]
impl TransactionSource for MockTransactionSource {
    async fn fetch_transactions(&self) -> Result<Vec<TransactionGroup>> {
        Self::simulate_latency(self.config.fetch_delay_ms).await;

        if self.should_fail() {
            warn!("Simulated transaction fetch failure");
            return Err(SourceError::FetchFailed(FETCH_FAILED_MESSAGE.to_string()));
        }

        let transactions = self.transactions.read().await;
        Ok(group_by_date(&transactions))
    }

    async fn refresh_transactions(&self) -> Result<Vec<TransactionGroup>> {
        Self::simulate_latency(self.config.refresh_delay_ms).await;

        let mut transactions = self.transactions.write().await;
        let fresh = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            generate_transaction(&mut rng, transactions.len(), Utc::now())
        };
        debug!("Refresh added transaction {}", fresh.id);
        transactions.insert(0, fresh);

        Ok(group_by_date(&transactions))
    }

    async fn fetch_transaction(&self, id: &TransactionId) -> Result<Option<Transaction>> {
        Self::simulate_latency(self.config.detail_delay_ms).await;

        let transactions = self.transactions.read().await;
        Ok(transactions.iter().find(|tx| &tx.id == id).cloned())
    }

    fn source_name(&self) -> &'static str {
        "mock"
    }
}

fn random_date(rng: &mut StdRng, now: DateTime<Utc>) -> DateTime<Utc> {
    let window_ms = HISTORY_WINDOW.as_millis() as i64;
    now - chrono::Duration::milliseconds(rng.gen_range(0..window_ms))
}

fn generate_transaction(rng: &mut StdRng, index: usize, date: DateTime<Utc>) -> Transaction {
    let (_, merchants) = MERCHANTS[rng.gen_range(0..MERCHANTS.len())];
    let description = merchants[rng.gen_range(0..merchants.len())];

    let kind = if rng.gen_bool(0.2) {
        TransactionKind::Credit
    } else {
        TransactionKind::Debit
    };
    let amount = match kind {
        TransactionKind::Credit => Amount::from_cents(rng.gen_range(10_000..210_000)),
        TransactionKind::Debit => Amount::from_cents(rng.gen_range(500..20_500)),
    };

    let (account_type, account_number) = if rng.gen_bool(0.5) {
        (AccountType::Savings, SAVINGS_ACCOUNT)
    } else {
        (AccountType::Current, CURRENT_ACCOUNT)
    };
    let channel = if rng.gen_bool(0.5) {
        TransferChannel::Bank
    } else {
        TransferChannel::DuitNow
    };
    let recipient = &RECIPIENTS[rng.gen_range(0..RECIPIENTS.len())];
    let is_bank = channel == TransferChannel::Bank;

    let suffix: String = (0..7)
        .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_lowercase())
        .collect();

    Transaction {
        id: TransactionId(format!("tx-{}-{}", index, suffix)),
        amount,
        kind,
        date,
        description: description.to_string(),
        channel,
        reference_no: rng.gen_range(0..1_000_000),
        account_type,
        account_number: account_number.to_string(),
        recipient_account_number: is_bank.then(|| recipient.account.to_string()),
        recipient_account_type: is_bank.then_some(recipient.account_type),
        mobile_number: (!is_bank).then(|| recipient.mobile.to_string()),
        recipient_name: recipient.name.to_string(),
    }
}
