//! # sdx - Social Video Downloader
//!
//! Interactive front-end for yt-dlp covering the major social video
//! platforms.
//!
//! ## Features
//!
//! - URL classification for 13 platforms
//! - Quality presets mapped to yt-dlp format selectors
//! - Single and batch downloads with live progress
//! - Plain-text download history
//! - JSON configuration with sensible defaults
//!
//! ## Example
//!
//! ```rust,no_run
//! use sdx::core::{DownloadRequest, Orchestrator, Quality};
//! use sdx::history::HistoryLog;
//! use sdx::runner::YtDlpRunner;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = Orchestrator::new(
//!         Arc::new(YtDlpRunner::default()),
//!         HistoryLog::new("downloads/download_history.txt"),
//!         "downloads",
//!     );
//!
//!     let request = DownloadRequest::new("VIDEO_URL", Quality::Best)?;
//!     orchestrator.execute(&request, None).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod history;
pub mod platform;
pub mod runner;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::{BatchSummary, DownloadRequest, Orchestrator, Quality, VideoInfo};
pub use error::SdxError;
pub use history::{HistoryEntry, HistoryLog};
pub use platform::Platform;
pub use runner::{DownloadRunner, YtDlpRunner};

/// Result type alias for sdx operations
pub type Result<T> = std::result::Result<T, SdxError>;
