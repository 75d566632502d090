//! user-manager binary entry point.
//!
//! Initializes logging and the terminal in raw mode, runs the TUI event loop,
//! and restores the terminal state on exit. `--replay` skips the terminal and
//! prints the result of an action script instead.
//!
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use user_manager::app::{self, AppState};
use user_manager::error::Result;

/// Search, filter, add, edit and delete users in a terminal table
#[derive(Parser, Debug)]
#[command(name = "user-manager", version, about, long_about = None)]
struct Args {
    /// Directory holding theme.conf and keybinds.conf
    #[arg(long, value_name = "PATH", env = "USER_MANAGER_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Path to the diagnostics log file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Apply a JSON action script without a terminal and print the resulting state
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("user_manager=debug,info"))
}

/// Log to a file so output never lands on top of the TUI.
fn init_file_logging(path: &Path) {
    match std::fs::File::create(path) {
        Ok(file) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::sync::Arc::new(file)).with_ansi(false))
                .with(default_filter())
                .init();
        }
        Err(e) => eprintln!("warning: cannot open log file {}: {e}", path.display()),
    }
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(script) = &args.replay {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(default_filter())
            .init();
        let report = app::replay::run_file(script)?;
        println!("{report}");
        return Ok(());
    }

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("user-manager.log"));
    init_file_logging(&log_file);
    tracing::info!("user-manager starting");

    let config_dir = args.config_dir.clone().unwrap_or_else(app::default_config_dir);
    let mut state = AppState::from_config_dir(&config_dir);

    let mut terminal = init_terminal().map_err(|e| format!("init terminal: {e}"))?;

    let res = app::run(&mut terminal, &mut state);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture).ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!("application error: {err:#}");
        eprintln!("application error: {err}");
    }
    tracing::info!("user-manager exiting");
    Ok(())
}
