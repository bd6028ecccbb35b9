//! Podcast TUI Entry Point
//!
//! Launches the terminal UI for browsing the podcast catalog.
//!
//! # Usage
//!
//! ```bash
//! # Browse the public catalog
//! podcast-tui
//!
//! # Browse a local dump with season details
//! podcast-tui --file podcasts.json --seasons seasons.json
//!
//! # Relative dates, debug logging to a file
//! PODCAST_TUI_LOG=/tmp/podcast-tui.log RUST_LOG=debug podcast-tui --date-style relative
//! ```

use std::fs::File;
use std::io::{self, IsTerminal};
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_core::config::{default_config_path, load_config_from_path, ConfigOverrides};
use catalog_core::{CatalogConfig, DateStyle};
use podcast_tui::App;

/// Podcast TUI - browse the podcast catalog in your terminal
#[derive(Parser, Debug)]
#[command(name = "podcast-tui")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, env = "PODCAST_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Catalog API endpoint
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Read the catalog from a local JSON file instead of the API
    #[arg(short = 'f', long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Season details JSON file, attached to the podcasts by id
    #[arg(short = 's', long, value_name = "FILE")]
    seasons: Option<PathBuf>,

    /// Date style: calendar or relative
    #[arg(short = 'd', long, value_name = "STYLE")]
    date_style: Option<DateStyle>,

    /// Write logs to this file (the terminal is in raw mode)
    #[arg(long, env = "PODCAST_TUI_LOG", value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_url: self.api_url.clone(),
            catalog_file: self.file.clone(),
            seasons_file: self.seasons.clone(),
            date_style: self.date_style,
        }
    }
}

/// Initialize logging into `path`; without a path logs are discarded
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("podcast_tui=info,catalog_core=info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log_file.as_deref())?;

    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: podcast-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  • Running in a non-interactive environment (CI, container)");
        eprintln!("  • SSH without -t flag");
        eprintln!("  • Piped stdin/stdout");
        std::process::exit(1);
    }

    let config_path = args.config.clone().or_else(default_config_path);
    let mut config = load_config_from_path(config_path).context("Failed to load configuration")?;
    args.overrides().apply(&mut config);
    tracing::info!(source = %config.source(), "Configuration loaded");

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, &config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &CatalogConfig,
) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(config, (size.width, size.height))?;
    app.run(terminal).await
}
