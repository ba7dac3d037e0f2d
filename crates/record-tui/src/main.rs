mod action;
mod app;
mod browser;
mod components;
mod mpv;
mod theme;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use record_proto::catalog::CatalogClient;
use record_proto::config::Config;
use record_proto::prefs::{PreferenceStore, Preferences};
use record_proto::protocol::StreamQuality;

/// Browse and play Radio Record stations in the terminal.
#[derive(Debug, Parser)]
#[command(name = "record-radio", version, about)]
struct Cli {
    /// Config file (defaults to the platform config dir).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Stream quality: low, medium, high or hls (64, 128, 320 also work).
    /// Overrides the config file.
    #[arg(long, short)]
    quality: Option<StreamQuality>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── Load config ──────────────────────────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)?;
    if let Some(quality) = cli.quality {
        config.playback.quality = quality;
    }

    // ── Logging ──────────────────────────────────────────────────────────────
    let log_path = config.paths.log_file.clone();
    if let Some(dir) = log_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // RUST_LOG wins; otherwise debug for us and quiet HTTP internals.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    eprintln!("record-radio log: {}", log_path.display());
    tracing::info!(
        "record-radio starting, config {}, quality {}",
        config_path.display(),
        config.playback.quality.label()
    );

    // ── Collaborators ────────────────────────────────────────────────────────
    let prefs = Preferences::load(&config.paths.preferences_file);
    let player = mpv::MpvPlayer::discover(prefs.volume())?;
    let client = CatalogClient::new(&config.api)?;

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(&config, prefs, Box::new(player), client);
    app.run().await?;

    tracing::info!("record-radio exiting");
    Ok(())
}
