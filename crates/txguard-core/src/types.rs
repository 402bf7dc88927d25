//! Transaction record and supporting newtypes

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transaction identifier (e.g. `tx-3-k9f2a1b`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Monetary amount in minor units (cents)
///
/// Amounts are unsigned; the direction of money is carried by
/// [`TransactionKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// Create an amount from minor units
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Create an amount from a major and minor part (`45, 50` is 45.50)
    pub const fn new(major: u64, minor: u8) -> Self {
        Self(major * 100 + (minor as u64 % 100))
    }

    /// Minor units
    pub const fn cents(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received
    Credit,
    /// Money sent
    Debit,
}

impl TransactionKind {
    pub fn is_credit(&self) -> bool {
        matches!(self, TransactionKind::Credit)
    }

    /// Sign prefix used when rendering amounts
    pub fn sign(&self) -> &'static str {
        match self {
            TransactionKind::Credit => "",
            TransactionKind::Debit => "-",
        }
    }
}

/// Kind of bank account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Savings,
    Current,
}

impl AccountType {
    /// Title-cased label (`Savings`, `Current`)
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Savings => "Savings",
            AccountType::Current => "Current",
        }
    }
}

/// Channel a transfer went through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferChannel {
    /// Instant transfer addressed by mobile number
    DuitNow,
    /// Interbank transfer addressed by account number
    Bank,
}

impl TransferChannel {
    pub fn label(&self) -> &'static str {
        match self {
            TransferChannel::DuitNow => "DuitNow",
            TransferChannel::Bank => "Bank Transfer",
        }
    }
}

/// A single financial transaction
///
/// Records are immutable once fetched; the viewer only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub amount: Amount,
    pub kind: TransactionKind,
    pub date: DateTime<Utc>,
    pub description: String,
    pub channel: TransferChannel,
    pub reference_no: u32,
    pub account_type: AccountType,
    pub account_number: String,
    /// Set for bank transfers only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_account_number: Option<String>,
    /// Set for bank transfers only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_account_type: Option<AccountType>,
    /// Set for DuitNow transfers only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    pub recipient_name: String,
}

impl Transaction {
    pub fn is_credit(&self) -> bool {
        self.kind.is_credit()
    }

    pub fn is_bank_transfer(&self) -> bool {
        self.channel == TransferChannel::Bank
    }
}

/// Transactions that share a calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionGroup {
    /// Day label, e.g. `05 Mar 2025`
    pub date: String,
    pub transactions: Vec<Transaction>,
}

impl TransactionGroup {
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_display() {
        assert_eq!(Amount::from_cents(4550).to_string(), "45.50");
        assert_eq!(Amount::from_cents(5).to_string(), "0.05");
        assert_eq!(Amount::new(1999, 9).to_string(), "1999.09");
    }

    #[test]
    fn test_kind_sign() {
        assert_eq!(TransactionKind::Debit.sign(), "-");
        assert_eq!(TransactionKind::Credit.sign(), "");
    }

    #[test]
    fn test_enum_serialization() {
        let json = serde_json::to_string(&TransferChannel::DuitNow).unwrap();
        assert_eq!(json, "\"duitnow\"");

        let kind: TransactionKind = serde_json::from_str("\"debit\"").unwrap();
        assert_eq!(kind, TransactionKind::Debit);
    }
}
