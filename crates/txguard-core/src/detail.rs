//! Detail view rows
//!
//! Builds the labelled rows shown for a single transaction. Which rows appear
//! depends on the direction and channel; account and mobile numbers are
//! masked unless the reveal flag is set.

use chrono::{Local, TimeZone};

use crate::mask::{account_display, mobile_display};
use crate::types::Transaction;

/// Date format for the detail view (`05/03/2025 09:15:02 AM`)
pub const DETAIL_DATE_FORMAT: &str = "%d/%m/%Y %I:%M:%S %p";

/// One labelled line in the detail view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub title: &'static str,
    pub value: String,
}

impl DetailRow {
    fn new(title: &'static str, value: impl Into<String>) -> Self {
        Self {
            title,
            value: value.into(),
        }
    }
}

/// Rows for a transaction, in local time
pub fn detail_rows(tx: &Transaction, revealed: bool) -> Vec<DetailRow> {
    detail_rows_in(tx, revealed, &Local)
}

/// Rows for a transaction with timestamps rendered in `tz`
pub fn detail_rows_in<Tz: TimeZone>(tx: &Transaction, revealed: bool, tz: &Tz) -> Vec<DetailRow>
where
    Tz::Offset: std::fmt::Display,
{
    let is_credit = tx.is_credit();
    let is_bank = tx.is_bank_transfer();
    let mut rows = Vec::with_capacity(9);

    if !is_credit {
        rows.push(DetailRow::new("Transfer Method", tx.channel.label()));
    }

    rows.push(DetailRow::new(
        "Date & Time",
        tx.date.with_timezone(tz).format(DETAIL_DATE_FORMAT).to_string(),
    ));
    rows.push(DetailRow::new("Reference No.", tx.reference_no.to_string()));

    if !is_credit {
        rows.push(DetailRow::new(
            "From Account",
            account_display(&tx.account_number, tx.account_type, revealed),
        ));

        if is_bank {
            if let (Some(number), Some(account_type)) =
                (&tx.recipient_account_number, tx.recipient_account_type)
            {
                rows.push(DetailRow::new(
                    "Recipient Account No.",
                    account_display(number, account_type, revealed),
                ));
            }
        }

        rows.push(DetailRow::new("Recipient Name", tx.recipient_name.clone()));

        if !is_bank {
            if let Some(mobile) = &tx.mobile_number {
                rows.push(DetailRow::new("Mobile Number", mobile_display(mobile, revealed)));
            }
        }
    }

    rows.push(DetailRow::new("Description", tx.description.clone()));
    rows.push(DetailRow::new("Transaction Status", "Successful"));

    rows
}
