//! benchtop - terminal electronics bench
//!
//! Run with: cargo run -- [--config bench.toml] [--service-url URL] [--offline]

mod app;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Mutex;

use benchtop::BenchConfig;
use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use ui::UiApp;

#[derive(Debug, Parser)]
#[command(name = "benchtop", version, about = "Simulated electronics bench in the terminal")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Modulation service endpoint (overrides the config file)
    #[arg(long)]
    service_url: Option<String>,

    /// Never contact the modulation service; always key locally
    #[arg(long)]
    offline: bool,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => BenchConfig::load(path)
            .wrap_err_with(|| format!("failed to load config {}", path.display()))?,
        None => BenchConfig::default(),
    };
    if let Some(url) = args.service_url {
        config.service_url = url;
    }
    if args.offline {
        config.offline = true;
    }

    init_logging(&config)?;
    info!(service = %config.service_url, offline = config.offline, "benchtop starting");

    let app = App::new(&config)?;

    let mut terminal = ratatui::init();
    crossterm::execute!(stdout(), EnableMouseCapture)?;
    let result = UiApp::new(app).run(&mut terminal);
    crossterm::execute!(stdout(), DisableMouseCapture)?;
    ratatui::restore();

    result
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging(config: &BenchConfig) -> EyreResult<()> {
    let file = File::create(&config.log_file)
        .wrap_err_with(|| format!("failed to create log file {}", config.log_file.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("benchtop=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
