//! Command line argument parsing

use clap::Parser;
use std::path::PathBuf;

use crate::core::quality::Quality;
use crate::utils::notify::is_termux;

/// SDX - Social Video Downloader - interactive yt-dlp front-end
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Video URL to download directly, skipping the menu
    pub url: Option<String>,

    /// Quality preset for direct downloads
    #[arg(short = 'Q', long, value_enum, default_value = "best")]
    pub quality: Quality,

    /// Download directory (defaults to ~/sdx, or the shared Download
    /// folder on Termux)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// History file path
    #[arg(long, value_name = "PATH")]
    pub history: Option<PathBuf>,

    /// Downloader binary to invoke
    #[arg(long, value_name = "BIN", default_value = "yt-dlp")]
    pub downloader: String,

    /// Disable progress output
    #[arg(long)]
    pub no_progress: bool,

    /// Disable desktop notifications
    #[arg(long)]
    pub no_notifications: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (only errors)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Get output verbosity level
    pub fn verbosity_level(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }

    /// Resolve the download directory, honoring --output first
    pub fn download_dir(&self) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        if is_termux() {
            return PathBuf::from("/storage/emulated/0/Download/sdx");
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sdx")
    }

    /// Resolve the config file path, honoring --config first
    pub fn config_path(&self) -> PathBuf {
        if let Some(config) = &self.config {
            return config.clone();
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sdx")
            .join("config.json")
    }

    /// Resolve the history file path, honoring --history first
    pub fn history_path(&self) -> PathBuf {
        if let Some(history) = &self.history {
            return history.clone();
        }
        self.download_dir().join("download_history.txt")
    }
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Quiet (only errors)
    Quiet,
    /// Normal
    Normal,
    /// Verbose (debug info)
    Verbose,
}


// Implement Default for Args to make tests work
impl Default for Args {
    fn default() -> Self {
        Self {
            url: None,
            quality: Quality::Best,
            output: None,
            config: None,
            history: None,
            downloader: "yt-dlp".to_string(),
            no_progress: false,
            no_notifications: false,
            verbose: false,
            quiet: false,
        }
    }
}
