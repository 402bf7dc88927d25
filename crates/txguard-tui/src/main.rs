//! txguard - Transaction history viewer
//!
//! Amounts stay masked until the user proves presence with biometrics or,
//! failing that, a PIN.

use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use txguard_tui::app::{BiometricMode, ConfigError, TuiConfig};
use txguard_tui::App;

#[derive(Parser)]
#[command(name = "txguard")]
#[command(about = "Transaction history with biometric-or-PIN reveal", long_about = None)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Biometric sensor to use, overriding the config file
    #[arg(short, long, value_enum)]
    biometrics: Option<BiometricMode>,

    /// Log file (the terminal is owned by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Prompt for a new PIN, store its hash and exit
    #[arg(long)]
    set_pin: bool,
}

/// Application entry point with panic handling for terminal restoration
fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TuiConfig::load_from(path),
        None => TuiConfig::load(),
    };

    if cli.set_pin {
        let path = cli.config.or_else(TuiConfig::config_file_path);
        return set_pin(&mut config, path);
    }

    if let Some(mode) = cli.biometrics {
        config.biometrics = mode;
    }
    if let Some(log_file) = cli.log_file {
        config.log_file = Some(log_file);
    }

    // Set up panic hook to restore terminal on crash
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    init_logging(&config)?;

    let result = run_app(&config);
    if let Err(e) = &result {
        tracing::error!("Application error: {}", e);
    }

    result
}

/// Log to a file; stdout belongs to the terminal UI
fn init_logging(config: &TuiConfig) -> Result<()> {
    let path = config
        .log_file
        .clone()
        .unwrap_or_else(TuiConfig::default_log_file);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("txguard=info")),
        )
        .init();

    Ok(())
}

fn set_pin(config: &mut TuiConfig, path: Option<PathBuf>) -> Result<()> {
    let path = path.ok_or(ConfigError::NoConfigDir)?;

    config.change_pin(|label: &str| rpassword::prompt_password(label))?;
    config.save_to(&path)?;
    println!("PIN hash saved to {}", path.display());
    Ok(())
}

/// Main application runner
fn run_app(config: &TuiConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("txguard-worker")
        .build()
        .context("Failed to start async runtime")?;

    let mut app = App::new(config, runtime.handle().clone())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
