//! Transaction source abstraction
//!
//! The viewer never stores or transports data itself. Everything it shows
//! comes through this trait, so a backend client and the generated mock are
//! interchangeable.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Transaction, TransactionGroup, TransactionId};

/// Where grouped transaction history comes from
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch the full history, grouped by day
    async fn fetch_transactions(&self) -> Result<Vec<TransactionGroup>>;

    /// Re-fetch the history after a pull-to-refresh
    ///
    /// Defaults to a plain fetch.
    async fn refresh_transactions(&self) -> Result<Vec<TransactionGroup>> {
        self.fetch_transactions().await
    }

    /// Fetch a single record; `Ok(None)` when it does not exist
    async fn fetch_transaction(&self, id: &TransactionId) -> Result<Option<Transaction>>;

    /// Short name for logs
    fn source_name(&self) -> &'static str;
}
