//! Date grouping for the history list

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate, TimeZone};

use crate::types::{Transaction, TransactionGroup};

/// Label format for a group header (`05 Mar 2025`)
pub const GROUP_LABEL_FORMAT: &str = "%d %b %Y";

/// Group transactions by local calendar day
pub fn group_by_date(transactions: &[Transaction]) -> Vec<TransactionGroup> {
    group_by_date_in(transactions, &Local)
}

/// Group transactions by calendar day in the given timezone
///
/// Groups are ordered newest day first and each group is ordered newest
/// transaction first.
pub fn group_by_date_in<Tz: TimeZone>(
    transactions: &[Transaction],
    tz: &Tz,
) -> Vec<TransactionGroup> {
    let mut days: BTreeMap<NaiveDate, Vec<Transaction>> = BTreeMap::new();

    for tx in transactions {
        let day = tx.date.with_timezone(tz).date_naive();
        days.entry(day).or_default().push(tx.clone());
    }

    days.into_iter()
        .rev()
        .map(|(day, mut transactions)| {
            transactions.sort_by(|a, b| b.date.cmp(&a.date));
            TransactionGroup {
                date: day.format(GROUP_LABEL_FORMAT).to_string(),
                transactions,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountType, Amount, TransactionId, TransactionKind, TransferChannel};
    use chrono::{DateTime, Utc};

    fn tx(id: &str, date: &str) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            amount: Amount::from_cents(1000),
            kind: TransactionKind::Debit,
            date: date.parse::<DateTime<Utc>>().unwrap(),
            description: "Starbucks".to_string(),
            channel: TransferChannel::DuitNow,
            reference_no: 1,
            account_type: AccountType::Savings,
            account_number: "123456789999".to_string(),
            recipient_account_number: None,
            recipient_account_type: None,
            mobile_number: Some("0123456789".to_string()),
            recipient_name: "John Doe".to_string(),
        }
    }

    #[test]
    fn test_groups_newest_first() {
        let txs = vec![
            tx("a", "2025-03-01T08:00:00Z"),
            tx("b", "2025-03-05T09:00:00Z"),
            tx("c", "2025-03-05T18:30:00Z"),
            tx("d", "2025-02-28T23:59:59Z"),
        ];

        let groups = group_by_date_in(&txs, &Utc);

        let labels: Vec<&str> = groups.iter().map(|g| g.date.as_str()).collect();
        assert_eq!(labels, vec!["05 Mar 2025", "01 Mar 2025", "28 Feb 2025"]);

        let first_ids: Vec<&str> = groups[0].transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(first_ids, vec!["c", "b"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_date_in(&[], &Utc).is_empty());
    }

    #[test]
    fn test_grouping_respects_timezone() {
        let txs = vec![tx("late", "2025-03-05T23:30:00Z")];
        let plus_two = chrono::FixedOffset::east_opt(2 * 3600).unwrap();

        let groups = group_by_date_in(&txs, &plus_two);
        assert_eq!(groups[0].date, "06 Mar 2025");
    }
}
