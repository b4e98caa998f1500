//! Main entry point for sdx CLI

use clap::Parser;
use sdx::cli::{App, Args, OutputFormatter, VerbosityLevel};
use sdx::config::Config;
use sdx::core::{DownloadRequest, Orchestrator};
use sdx::history::HistoryLog;
use sdx::runner::{DownloadRunner, YtDlpRunner};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    info!("Starting sdx");

    let formatter = OutputFormatter::new(args.verbosity_level());

    let runner = Arc::new(YtDlpRunner::new(&args.downloader));
    match runner.version().await {
        Ok(version) => info!("{} version {}", args.downloader, version.trim()),
        Err(e) => formatter.warning(&format!(
            "{} is not available ({}); downloads will fail until it is installed",
            args.downloader, e
        )),
    }

    let config_path = args.config_path();
    let config = Config::load(&config_path);
    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!(
                "Could not write default config to {}: {}",
                config_path.display(),
                e
            );
        }
    }

    let download_dir = args.download_dir();
    tokio::fs::create_dir_all(&download_dir).await?;

    let history = HistoryLog::new(args.history_path());
    let orchestrator = Orchestrator::new(runner, history, download_dir)
        .with_notifications(config.notifications && !args.no_notifications);

    let show_progress = config.show_progress && !args.no_progress;

    // One-shot mode: download the given URL and exit
    if let Some(url) = args.url.clone() {
        let request = DownloadRequest::new(&url, args.quality)?;
        let mut app = App::new(orchestrator, formatter, config, show_progress);
        if app.download_with_progress(&request, &url).await.is_err() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut app = App::new(orchestrator, formatter, config, show_progress);
    tokio::select! {
        result = app.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            println!();
            info!("Interrupted");
        }
    }

    Ok(())
}

/// Initialize logging system
fn init_logging(args: &Args) -> anyhow::Result<()> {
    // Keep the interactive screen quiet unless asked otherwise
    let default_level = match args.verbosity_level() {
        VerbosityLevel::Verbose => "debug",
        _ => "warn",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    Ok(())
}
