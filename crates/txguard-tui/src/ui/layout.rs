//! Layout helpers for consistent screen structure

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::Theme;

/// Standard screen layout with header, content, status line and footer
pub struct ScreenLayout {
    /// Header area
    pub header: Rect,
    /// Main content area
    pub content: Rect,
    /// One-line status area
    pub status: Rect,
    /// Footer/help area
    pub footer: Rect,
}

impl ScreenLayout {
    /// Create a standard layout from the total area
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(6),    // Content
                Constraint::Length(1), // Status
                Constraint::Length(2), // Footer
            ])
            .split(area);

        Self {
            header: chunks[0],
            content: chunks[1],
            status: chunks[2],
            footer: chunks[3],
        }
    }
}

/// Create a fixed-size centered box
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Render a header bar with a title, subtitle and right-hand badge
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    subtitle: &str,
    badge: Option<Span<'_>>,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border())
        .style(Style::default().bg(theme.background));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(18)])
        .split(inner);

    let heading = Line::from(vec![
        Span::styled(format!(" {}", title), theme.title()),
        Span::raw("  "),
        Span::styled(subtitle.to_string(), theme.text_secondary()),
    ]);
    frame.render_widget(Paragraph::new(heading), chunks[0]);

    if let Some(badge) = badge {
        let badge = Paragraph::new(Line::from(badge)).alignment(Alignment::Right);
        frame.render_widget(badge, chunks[1]);
    }
}

/// Render a standard footer with help hints
pub fn render_footer(frame: &mut Frame, area: Rect, hints: &[(&str, &str)], theme: &Theme) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme.border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let hint_spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, action)| {
            vec![
                Span::styled(format!("[{}]", key), theme.text_highlight()),
                Span::styled(format!(" {}  ", action), theme.text_muted()),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);
    frame.render_widget(footer, inner);
}

/// Render a one-line status message
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status: Option<&str>,
    busy: Option<&str>,
    theme: &Theme,
) {
    let (text, style) = match (busy, status) {
        (Some(busy), _) => (busy, theme.warning()),
        (None, Some(status)) => (status, theme.text_secondary()),
        (None, None) => ("", theme.text_secondary()),
    };

    let status_bar = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center);

    frame.render_widget(status_bar, area);
}

/// Render a message centered in `area`
pub fn render_centered_message(frame: &mut Frame, area: Rect, message: &str, style: Style) {
    let line = centered_rect_fixed(area.width, 1, area);
    let paragraph = Paragraph::new(message)
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, line);
}
