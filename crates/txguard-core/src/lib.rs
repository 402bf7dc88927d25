//! txguard Core - Transaction model, masking and data source
//!
//! This crate holds everything the history viewer needs besides
//! authentication:
//! - The transaction record and its supporting enums
//! - Masked rendering of amounts, account numbers and mobile numbers
//! - The detail-row builder used by the detail view
//! - Date grouping for the history list
//! - The `TransactionSource` seam and a generated mock implementation

pub mod detail;
pub mod error;
pub mod grouping;
pub mod mask;
pub mod mock;
pub mod source;
pub mod types;

pub use detail::{detail_rows, DetailRow};
pub use error::{Result, SourceError};
pub use grouping::{group_by_date, group_by_date_in};
pub use mask::{account_display, mobile_display, MaskedAmount, ACCOUNT_MASK, MASK_TOKEN};
pub use mock::{MockSourceConfig, MockTransactionSource};
pub use source::TransactionSource;
pub use types::{
    AccountType, Amount, Transaction, TransactionGroup, TransactionId, TransactionKind,
    TransferChannel,
};

/// Currency label shown in front of every amount
pub const CURRENCY: &str = "RM";
