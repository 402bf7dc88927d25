//! Transaction history screen

use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};

use crate::app::{App, Load};
use crate::ui::components::amount;
use crate::ui::layout::{self, ScreenLayout};

/// Render the grouped transaction list
pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let state = &app.state;
    let layout = ScreenLayout::new(frame.area());

    layout::render_header(
        frame,
        layout.header,
        "Transaction History",
        &app.router.breadcrumb(),
        Some(amount::reveal_badge(
            state.session.is_revealed(),
            state.reveal_pending,
            theme,
        )),
        theme,
    );

    let titled = |title: String| {
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(title)
            .title_style(theme.title())
    };

    match &state.history {
        Load::Loading => {
            let block = titled(" Transactions ".to_string());
            let inner = block.inner(layout.content);
            frame.render_widget(block, layout.content);
            layout::render_centered_message(
                frame,
                inner,
                "Loading transactions...",
                theme.text_secondary(),
            );
        }
        Load::Loaded(groups) if groups.iter().all(|g| g.is_empty()) => {
            let block = titled(" Transactions ".to_string());
            let inner = block.inner(layout.content);
            frame.render_widget(block, layout.content);
            layout::render_centered_message(
                frame,
                inner,
                "No transactions found",
                theme.text_muted(),
            );
        }
        Load::Loaded(groups) => {
            let revealed = state.session.is_revealed();
            let mut rows = Vec::new();
            let mut selected_row = None;
            let mut index = 0;

            for group in groups {
                rows.push(
                    Row::new(vec![
                        Cell::from(format!(" {}", group.date)),
                        Cell::from(""),
                        Cell::from(""),
                    ])
                    .style(theme.section_header()),
                );

                for tx in &group.transactions {
                    if index == state.selected {
                        selected_row = Some(rows.len());
                    }
                    index += 1;

                    let time = tx.date.with_timezone(&Local).format("%I:%M %p").to_string();
                    rows.push(Row::new(vec![
                        Cell::from(format!("  {}", tx.description)).style(theme.text()),
                        Cell::from(time).style(theme.text_muted()),
                        Cell::from(
                            Line::from(amount::amount_span(tx, revealed, theme))
                                .alignment(Alignment::Right),
                        ),
                    ]));
                }
            }

            let table = Table::new(
                rows,
                [
                    Constraint::Min(20),
                    Constraint::Length(10),
                    Constraint::Length(18),
                ],
            )
            .block(titled(format!(" Transactions ({}) ", index)))
            .highlight_style(theme.selection())
            .highlight_symbol("▶");

            let mut table_state = TableState::default().with_selected(selected_row);
            frame.render_stateful_widget(table, layout.content, &mut table_state);
        }
        // The error screen takes over before this is reached
        Load::Failed(_) => {
            frame.render_widget(titled(" Transactions ".to_string()), layout.content);
        }
    }

    let busy = if state.refreshing {
        Some("Refreshing...")
    } else if state.reveal_pending {
        Some("Authenticating...")
    } else {
        None
    };
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
        &[
            ("↑↓", "Select"),
            ("Enter", "Details"),
            ("r", "Reveal"),
            ("F5", "Refresh"),
            ("q", "Quit"),
        ],
        theme,
    );
}
