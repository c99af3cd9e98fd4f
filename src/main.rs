// ABOUTME: Entry point for worklog — a chat-driven work-session time tracker.
// ABOUTME: Parses CLI args, loads config, and launches the app.

use std::path::PathBuf;

use clap::Parser;

use worklog::app::App;
use worklog::config::Config;

/// Track named work sessions per user and emit daily aggregate reports.
#[derive(Parser)]
#[command(name = "worklog", version)]
struct Cli {
    /// Path to a config file (default: ~/.worklog/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the destination for scheduled daily reports.
    #[arg(long)]
    destination: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    env_logger::init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::load_explicit(path)?,
        None => Config::load()?,
    };
    if let Some(destination) = cli.destination {
        config.report.destination = destination;
    }

    App::new(config).run().await
}
