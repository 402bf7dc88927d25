//! UI rendering

pub mod components;
pub mod layout;
pub mod screens;
pub mod theme;

pub use theme::Theme;

use ratatui::prelude::*;

use crate::app::{App, Load, Screen};

/// Main render function - delegates to the current screen
///
/// The PIN modal is drawn on top of whatever screen is showing.
pub fn render(frame: &mut Frame, app: &App) {
    match &app.state.current_screen {
        Screen::History => match &app.state.history {
            Load::Failed(message) => screens::error::render(frame, app, message),
            _ => screens::history::render(frame, app),
        },
        Screen::Detail(id) => screens::detail::render(frame, app, id),
    }

    if app.state.pin.visible {
        screens::pin_entry::draw(frame, frame.area(), app);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use ratatui::backend::TestBackend;
    use tokio::runtime::Handle;
    use txguard_auth::{
        Argon2PinValidator, AuthConfig, AuthGate, NoBiometrics, PinEntryState, DEMO_PIN,
    };
    use txguard_core::{MockSourceConfig, MockTransactionSource, MASK_TOKEN};

    use super::*;

    async fn loaded_app() -> App {
        let validator = Argon2PinValidator::from_pin(DEMO_PIN).unwrap();
        let gate =
            AuthGate::new(AuthConfig::default(), Arc::new(NoBiometrics), Arc::new(validator))
                .unwrap();
        let source = MockTransactionSource::new(MockSourceConfig::instant(3)).unwrap();
        let mut app = App::with_parts(Arc::new(gate), Arc::new(source), Handle::current());

        for _ in 0..500 {
            app.process_events();
            if matches!(app.state.history, Load::Loaded(_)) {
                return app;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("history never loaded");
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_history_is_masked() {
        let app = loaded_app().await;
        let screen = draw(&app);

        assert!(screen.contains("Transaction History"));
        assert!(screen.contains(MASK_TOKEN));
        assert!(screen.contains("Reveal All"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_pin_overlay() {
        let mut app = loaded_app().await;
        app.state.pin = PinEntryState {
            visible: true,
            digits_entered: 2,
            pin_length: 6,
            is_validating: false,
            error_message: Some("Incorrect PIN".to_string()),
        };

        let screen = draw(&app);
        assert!(screen.contains("Enter PIN"));
        assert!(screen.contains("Incorrect PIN"));
        assert_eq!(screen.matches('●').count(), 2);
        assert_eq!(screen.matches('○').count(), 4);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_error_screen() {
        let mut app = loaded_app().await;
        app.state.set_history(Load::Failed("Failed to fetch".to_string()));

        let screen = draw(&app);
        assert!(screen.contains("Something went wrong"));
        assert!(screen.contains("[Enter] Try Again"));
    }
}
