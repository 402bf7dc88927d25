//! PIN entry overlay

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::App;
use crate::ui::layout::centered_rect_fixed;

/// Draw the PIN modal over `area`
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let pin = &app.state.pin;

    let dialog = centered_rect_fixed(44, 13, area);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(" Enter PIN ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(Style::default().bg(theme.background));

    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Instructions
            Constraint::Length(2), // PIN dots
            Constraint::Length(2), // Error / validating
            Constraint::Min(0),    // Spacer
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let instructions = Paragraph::new("Enter your PIN to view amounts")
        .style(theme.text_secondary())
        .alignment(Alignment::Center);
    frame.render_widget(instructions, chunks[0]);

    // One dot per digit; filled dots for digits entered so far
    let dots: Vec<Span> = (0..pin.pin_length)
        .map(|i| {
            if i < pin.digits_entered {
                Span::styled("● ", theme.pin_dot())
            } else {
                Span::styled("○ ", theme.pin_placeholder())
            }
        })
        .collect();
    let dots = Paragraph::new(Line::from(dots)).alignment(Alignment::Center);
    frame.render_widget(dots, chunks[1]);

    let status = if pin.is_validating {
        Some(Span::styled("Validating...", theme.warning()))
    } else {
        pin.error_message
            .as_deref()
            .map(|error| Span::styled(error.to_string(), theme.danger()))
    };
    if let Some(status) = status {
        let status = Paragraph::new(Line::from(status)).alignment(Alignment::Center);
        frame.render_widget(status, chunks[2]);
    }

    let help = Paragraph::new("[0-9] Digit  [Backspace] Delete  [Esc] Cancel")
        .style(theme.text_muted())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}
