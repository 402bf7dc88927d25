//! Application state and event handling
//!
//! The draw loop runs on the calling thread and never awaits. Everything
//! asynchronous (data fetches, reveal toggles, PIN validation) is spawned on
//! the tokio runtime and reports back through [`EventChannel`] or the auth
//! gate's own state.

pub mod config;
pub mod events;
pub mod router;
mod state;

pub use config::{BiometricMode, ConfigError, TuiConfig};
pub use events::{AppEvent, EventChannel};
pub use router::Router;
pub use state::{AppState, Load, Screen};

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use tokio::runtime::Handle;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use txguard_auth::{AuthEvent, AuthGate, AuthMethod};
use txguard_core::{MockTransactionSource, TransactionSource};

use crate::feedback::TerminalBell;
use crate::ui::{self, Theme};

/// Application result type
pub type AppResult<T> = anyhow::Result<T>;

/// Main application struct
pub struct App {
    /// Application state
    pub state: AppState,

    /// Navigation history
    pub router: Router,

    /// Color palette
    pub theme: Theme,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Tick counter for animations
    pub tick: u64,

    /// Last tick time
    last_tick: Instant,

    gate: Arc<AuthGate>,
    source: Arc<dyn TransactionSource>,
    runtime: Handle,
    events: EventChannel,
    auth_events: broadcast::Receiver<AuthEvent>,
}

impl App {
    /// Build the gate and data source from configuration
    pub fn new(config: &TuiConfig, runtime: Handle) -> AppResult<Self> {
        config.validate()?;

        let gate = AuthGate::with_error_signal(
            config.auth.clone(),
            config.biometrics.platform(),
            Arc::new(config.validator()?),
            Arc::new(TerminalBell),
        )?;
        let source = MockTransactionSource::new(config.data.clone())?;
        info!(
            "Starting with {:?} biometrics and {} data",
            config.biometrics,
            source.source_name()
        );

        Ok(Self::with_parts(Arc::new(gate), Arc::new(source), runtime))
    }

    /// Assemble an app around an existing gate and source
    pub fn with_parts(
        gate: Arc<AuthGate>,
        source: Arc<dyn TransactionSource>,
        runtime: Handle,
    ) -> Self {
        let mut app = Self {
            state: AppState::new(),
            router: Router::new(),
            theme: Theme::default(),
            should_quit: false,
            tick: 0,
            last_tick: Instant::now(),
            auth_events: gate.subscribe(),
            gate,
            source,
            runtime,
            events: EventChannel::new(),
        };
        app.load_history();
        app.sync_auth();
        app
    }

    /// Run the application main loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> AppResult<()> {
        let tick_rate = Duration::from_millis(100);

        while !self.should_quit {
            self.process_events();

            // Draw UI
            terminal.draw(|frame| ui::render(frame, self))?;

            // Handle events
            let timeout = tick_rate
                .checked_sub(self.last_tick.elapsed())
                .unwrap_or(Duration::ZERO);

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            // Update tick
            if self.last_tick.elapsed() >= tick_rate {
                self.tick = self.tick.wrapping_add(1);
                self.last_tick = Instant::now();
            }
        }

        Ok(())
    }

    /// The auth gate shared with background tasks
    pub fn gate(&self) -> &Arc<AuthGate> {
        &self.gate
    }

    /// Apply everything background tasks reported since the last call
    pub fn process_events(&mut self) {
        while let Some(event) = self.events.try_recv() {
            self.apply_event(event);
        }

        loop {
            match self.auth_events.try_recv() {
                Ok(event) => self.apply_auth_event(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!("Skipped {} auth events", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        self.sync_auth();
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::HistoryLoaded(result) => {
                if let Err(e) = &result {
                    warn!("Transaction fetch failed: {}", e);
                }
                self.state.set_history(result.into());
            }
            AppEvent::HistoryRefreshed(result) => {
                self.state.refreshing = false;
                match &result {
                    Ok(_) => self.state.status_message = Some("Transactions updated".to_string()),
                    Err(e) => warn!("Transaction refresh failed: {}", e),
                }
                self.state.set_history(result.into());
            }
            AppEvent::DetailLoaded { id, result } => {
                if self.state.current_screen == Screen::Detail(id.clone()) {
                    self.state.detail = result.into();
                } else {
                    debug!("Dropping detail for {} after navigation", id);
                }
            }
            AppEvent::RevealToggled(snapshot) => {
                self.state.reveal_pending = false;
                self.state.session = snapshot;
            }
        }
    }

    fn apply_auth_event(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::Authenticated { method } => {
                let via = match method {
                    AuthMethod::Biometric => "biometrics",
                    AuthMethod::Pin => "PIN",
                    AuthMethod::AlreadyAuthenticated => return,
                };
                self.state.status_message = Some(format!("Unlocked with {}", via));
            }
            AuthEvent::Denied { reason } => {
                self.state.status_message = Some(format!("Amounts stay hidden: {}", reason));
            }
            _ => {}
        }
    }

    fn sync_auth(&mut self) {
        self.state.session = self.gate.snapshot();
        self.state.pin = self.gate.pin_modal().state();
    }

    /// Handle key press events
    pub fn handle_key(&mut self, key: KeyCode) {
        // The PIN modal captures all input while shown
        if self.gate.pin_modal().is_visible() {
            self.handle_pin_key(key);
            self.sync_auth();
            return;
        }

        match self.state.current_screen {
            Screen::History => self.handle_history_key(key),
            Screen::Detail(_) => self.handle_detail_key(key),
        }
    }

    /// Keys apply to the keypad here, on the draw thread; only validation
    /// runs in the background. The keypad ignores input until it finishes.
    fn handle_pin_key(&mut self, key: KeyCode) {
        let modal = self.gate.pin_modal();
        match key {
            KeyCode::Char(c) => {
                if let Some(submission) = modal.accept_digit(c) {
                    let modal = modal.clone();
                    self.runtime.spawn(async move {
                        modal.submit(submission).await;
                    });
                }
            }
            KeyCode::Backspace => {
                modal.press_delete();
            }
            KeyCode::Esc => {
                modal.close();
            }
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('r') => self.toggle_reveal(),
            KeyCode::F(5) | KeyCode::Char('R') => self.refresh_history(),
            KeyCode::Up | KeyCode::Char('k') => self.state.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.state.select_next(),
            KeyCode::Enter => match self.state.history {
                Load::Failed(_) => self.load_history(),
                Load::Loaded(_) => self.open_selected(),
                Load::Loading => {}
            },
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => {
                self.state.current_screen = self.router.back().clone();
            }
            KeyCode::Char('r') => self.toggle_reveal(),
            _ => {}
        }
    }

    /// Flip the reveal flag, authenticating first when needed
    pub fn toggle_reveal(&mut self) {
        if self.state.reveal_pending {
            return;
        }
        self.state.reveal_pending = true;
        self.state.clear_messages();

        let gate = self.gate.clone();
        let sender = self.events.sender();
        self.runtime.spawn(async move {
            let snapshot = gate.toggle_reveal().await;
            let _ = sender.send(AppEvent::RevealToggled(snapshot));
        });
    }

    /// Fetch the history from scratch
    pub fn load_history(&mut self) {
        self.state.set_history(Load::Loading);
        self.state.clear_messages();

        let source = self.source.clone();
        let sender = self.events.sender();
        self.runtime.spawn(async move {
            let result = source.fetch_transactions().await;
            let _ = sender.send(AppEvent::HistoryLoaded(result));
        });
    }

    /// Pull-to-refresh: keep showing the list while new data loads
    pub fn refresh_history(&mut self) {
        if self.state.refreshing || !matches!(self.state.history, Load::Loaded(_)) {
            return;
        }
        self.state.refreshing = true;

        let source = self.source.clone();
        let sender = self.events.sender();
        self.runtime.spawn(async move {
            let result = source.refresh_transactions().await;
            let _ = sender.send(AppEvent::HistoryRefreshed(result));
        });
    }

    fn open_selected(&mut self) {
        let Some(id) = self.state.selected_transaction().map(|tx| tx.id.clone()) else {
            return;
        };

        let screen = Screen::Detail(id.clone());
        self.router.push(screen.clone());
        self.state.current_screen = screen;
        self.state.detail = Load::Loading;

        let source = self.source.clone();
        let sender = self.events.sender();
        self.runtime.spawn(async move {
            let result = source.fetch_transaction(&id).await;
            let _ = sender.send(AppEvent::DetailLoaded { id, result });
        });
    }
}
