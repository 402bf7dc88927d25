//! Masked rendering of sensitive values
//!
//! Every function takes the current reveal flag and returns either the real
//! value or a fixed placeholder. Placeholders never depend on the underlying
//! value, so a masked screen leaks neither magnitude nor length.

use crate::types::{AccountType, Amount, TransactionKind};
use crate::CURRENCY;

/// Placeholder shown instead of an amount
pub const MASK_TOKEN: &str = "*****";

/// Placeholder shown instead of an account or mobile number
pub const ACCOUNT_MASK: &str = "************";

/// An amount paired with its direction, rendered according to the reveal flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskedAmount {
    pub amount: Amount,
    pub kind: TransactionKind,
}

impl MaskedAmount {
    pub fn new(amount: Amount, kind: TransactionKind) -> Self {
        Self { amount, kind }
    }

    /// Unsigned amount text: `45.50` or the mask token
    pub fn amount_text(&self, revealed: bool) -> String {
        if revealed {
            self.amount.to_string()
        } else {
            MASK_TOKEN.to_string()
        }
    }

    /// Signed value: `-45.50` for a revealed debit, the bare mask token otherwise
    pub fn signed_value(&self, revealed: bool) -> String {
        if revealed {
            format!("{}{}", self.kind.sign(), self.amount)
        } else {
            MASK_TOKEN.to_string()
        }
    }

    /// Full display string with currency: `- RM 45.50` or `- RM *****`
    pub fn render(&self, revealed: bool) -> String {
        let text = self.amount_text(revealed);
        match self.kind {
            TransactionKind::Credit => format!("{} {}", CURRENCY, text),
            TransactionKind::Debit => format!("- {} {}", CURRENCY, text),
        }
    }
}

/// Account number with its type: `123456789999 (Savings)`
pub fn account_display(number: &str, account_type: AccountType, revealed: bool) -> String {
    if revealed {
        format!("{} ({})", number, account_type.label())
    } else {
        format!("{} (Account)", ACCOUNT_MASK)
    }
}

/// Mobile number or the account mask
pub fn mobile_display(number: &str, revealed: bool) -> String {
    if revealed {
        number.to_string()
    } else {
        ACCOUNT_MASK.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_debit_uses_fixed_token() {
        let masked = MaskedAmount::new(Amount::from_cents(4550), TransactionKind::Debit);

        assert_eq!(masked.signed_value(false), MASK_TOKEN);
        assert_eq!(masked.amount_text(false), "*****");
        assert!(!masked.render(false).contains("45"));
        assert_eq!(masked.render(false), "- RM *****");
    }

    #[test]
    fn test_revealed_debit_is_signed() {
        let masked = MaskedAmount::new(Amount::from_cents(4550), TransactionKind::Debit);

        assert_eq!(masked.signed_value(true), "-45.50");
        assert_eq!(masked.render(true), "- RM 45.50");
    }

    #[test]
    fn test_revealed_credit_has_no_sign() {
        let masked = MaskedAmount::new(Amount::from_cents(120_000), TransactionKind::Credit);

        assert_eq!(masked.signed_value(true), "1200.00");
        assert_eq!(masked.render(true), "RM 1200.00");
    }

    #[test]
    fn test_mask_is_independent_of_value() {
        let small = MaskedAmount::new(Amount::from_cents(1), TransactionKind::Debit);
        let large = MaskedAmount::new(Amount::from_cents(99_999_999), TransactionKind::Debit);
        assert_eq!(small.render(false), large.render(false));
    }

    #[test]
    fn test_account_display() {
        assert_eq!(
            account_display("123456789999", AccountType::Savings, true),
            "123456789999 (Savings)"
        );
        assert_eq!(
            account_display("123456789999", AccountType::Savings, false),
            "************ (Account)"
        );
        assert_eq!(mobile_display("0123456789", false), ACCOUNT_MASK);
        assert_eq!(mobile_display("0123456789", true), "0123456789");
    }
}
