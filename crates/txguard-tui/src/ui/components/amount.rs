//! Masked amount and reveal toggle widgets

use ratatui::prelude::*;
use txguard_core::{MaskedAmount, Transaction};

use crate::ui::Theme;

/// Amount cell text for a transaction, masked unless `revealed`
pub fn amount_span(tx: &Transaction, revealed: bool, theme: &Theme) -> Span<'static> {
    let text = MaskedAmount::new(tx.amount, tx.kind).render(revealed);
    Span::styled(text, theme.amount(tx.is_credit(), revealed))
}

/// Label for the reveal toggle in the header
pub fn reveal_label(revealed: bool) -> &'static str {
    if revealed {
        "Revealed"
    } else {
        "Reveal All"
    }
}

/// Reveal toggle badge, dimmed while a toggle is running
pub fn reveal_badge(revealed: bool, pending: bool, theme: &Theme) -> Span<'static> {
    let style = if pending {
        theme.text_muted()
    } else {
        theme.reveal_toggle(revealed)
    };
    Span::styled(format!("[r] {} ", reveal_label(revealed)), style)
}
