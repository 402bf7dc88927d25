//! Visual theme and color palette

use ratatui::style::{Color, Modifier, Style};

/// txguard color palette
pub struct Theme {
    // Primary branding colors
    pub accent: Color,
    pub background: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub danger: Color,

    // Amount colors
    pub credit: Color,
    pub debit: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub section: Color,
    pub selection: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Primary branding - iOS blue
            accent: Color::Rgb(0, 122, 255),   // #007AFF
            background: Color::Rgb(28, 28, 30), // #1C1C1E

            // Status colors
            success: Color::Rgb(52, 199, 89), // #34C759 - Green
            warning: Color::Rgb(255, 149, 0), // #FF9500 - Orange
            danger: Color::Rgb(255, 59, 48),  // #FF3B30 - Red

            // Amounts
            credit: Color::Rgb(52, 199, 89),
            debit: Color::Rgb(242, 242, 247),

            // UI elements
            border: Color::Rgb(58, 58, 60),            // #3A3A3C
            border_focused: Color::Rgb(0, 122, 255),   // #007AFF
            text_primary: Color::Rgb(242, 242, 247),   // #F2F2F7
            text_secondary: Color::Rgb(174, 174, 178), // #AEAEB2
            text_muted: Color::Rgb(99, 99, 102),       // #636366
            section: Color::Rgb(44, 44, 46),           // #2C2C2E
            selection: Color::Rgb(58, 58, 60),         // #3A3A3C
        }
    }
}

impl Theme {
    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn text_highlight(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn danger(&self) -> Style {
        Style::default()
            .fg(self.danger)
            .add_modifier(Modifier::BOLD)
    }

    /// Date header above each group of transactions
    pub fn section_header(&self) -> Style {
        Style::default()
            .bg(self.section)
            .fg(self.text_secondary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selection(&self) -> Style {
        Style::default().bg(self.selection).fg(self.text_primary)
    }

    /// Amount style; masked amounts are always muted
    pub fn amount(&self, credit: bool, revealed: bool) -> Style {
        if !revealed {
            return self.text_muted();
        }
        if credit {
            Style::default().fg(self.credit).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.debit)
        }
    }

    /// Reveal toggle badge
    pub fn reveal_toggle(&self, revealed: bool) -> Style {
        if revealed {
            Style::default().fg(self.success).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
        }
    }

    /// Get PIN dot style
    pub fn pin_dot(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Get PIN placeholder style
    pub fn pin_placeholder(&self) -> Style {
        Style::default().fg(self.text_muted)
    }
}
