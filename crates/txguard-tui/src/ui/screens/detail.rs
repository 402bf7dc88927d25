//! Transaction detail screen

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use txguard_core::{detail_rows, MaskedAmount, Transaction, TransactionId};

use crate::app::{App, Load};
use crate::ui::components::amount;
use crate::ui::layout::{self, ScreenLayout};
use crate::ui::Theme;

/// Render the detail screen for `id`
pub fn render(frame: &mut Frame, app: &App, id: &TransactionId) {
    let theme = &app.theme;
    let state = &app.state;
    let layout = ScreenLayout::new(frame.area());

    layout::render_header(
        frame,
        layout.header,
        "Transaction Details",
        &app.router.breadcrumb(),
        Some(amount::reveal_badge(
            state.session.is_revealed(),
            state.reveal_pending,
            theme,
        )),
        theme,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(format!(" {} ", id))
        .title_style(theme.title());
    let inner = block.inner(layout.content);
    frame.render_widget(block, layout.content);

    match &state.detail {
        Load::Loading => {
            layout::render_centered_message(frame, inner, "Loading...", theme.text_secondary());
        }
        Load::Failed(message) => {
            layout::render_centered_message(frame, inner, message, theme.danger());
        }
        Load::Loaded(None) => {
            layout::render_centered_message(
                frame,
                inner,
                "Transaction not found",
                theme.text_muted(),
            );
        }
        Load::Loaded(Some(tx)) => {
            draw_transaction(frame, inner, tx, state.session.is_revealed(), theme);
        }
    }

    let busy = state.reveal_pending.then_some("Authenticating...");
    layout::render_status_bar(
        frame,
        layout.status,
        state.status_message.as_deref(),
        busy,
        theme,
    );

    layout::render_footer(
        frame,
        layout.footer,
        &[("r", "Reveal"), ("Esc", "Back")],
        theme,
    );
}

fn draw_transaction(
    frame: &mut Frame,
    area: Rect,
    tx: &Transaction,
    revealed: bool,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Recipient
            Constraint::Length(2), // Amount
            Constraint::Min(3),    // Rows
        ])
        .split(area);

    let heading = Paragraph::new(tx.recipient_name.as_str())
        .style(theme.text_secondary())
        .alignment(Alignment::Center);
    frame.render_widget(heading, chunks[0]);

    let amount = MaskedAmount::new(tx.amount, tx.kind).render(revealed);
    let amount = Paragraph::new(amount)
        .style(theme.amount(tx.is_credit(), revealed).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(amount, chunks[1]);

    let rows: Vec<Row> = detail_rows(tx, revealed)
        .into_iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.title).style(theme.text_muted()),
                Cell::from(row.value).style(theme.text()),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(24), Constraint::Min(20)]);
    frame.render_widget(table, chunks[2]);
}
