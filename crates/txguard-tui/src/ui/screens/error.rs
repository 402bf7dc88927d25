//! Full-screen error view for a failed history fetch

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::ui::layout::{self, centered_rect_fixed, ScreenLayout};

/// Render the fetch error with a retry hint
pub fn render(frame: &mut Frame, app: &App, message: &str) {
    let theme = &app.theme;
    let layout = ScreenLayout::new(frame.area());

    layout::render_header(
        frame,
        layout.header,
        "Transaction History",
        &app.router.breadcrumb(),
        None,
        theme,
    );

    let dialog = centered_rect_fixed(56, 9, layout.content);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.danger));
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let text = vec![
        Line::from(Span::styled("Something went wrong", theme.danger())),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.text_secondary())),
        Line::from(""),
        Line::from(Span::styled("[Enter] Try Again", theme.text_highlight())),
    ];
    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(body, inner);

    layout::render_footer(
        frame,
        layout.footer,
        &[("Enter", "Retry"), ("q", "Quit")],
        theme,
    );
}
