//! External downloader process invocation
//!
//! The orchestrator talks to the external downloader through the narrow
//! [`DownloadRunner`] trait so its flow can be exercised with a fake runner
//! in tests.

pub mod ytdlp;

pub use ytdlp::YtDlpRunner;

use crate::error::SdxError;
use async_trait::async_trait;

/// Optional observer for percentage progress reported by the subprocess
pub type ProgressCallback<'a> = Option<&'a (dyn Fn(f64) + Send + Sync)>;

/// Narrow interface over the external downloader executable
#[async_trait]
pub trait DownloadRunner: Send + Sync {
    /// Probe availability; returns the downloader version string.
    async fn version(&self) -> Result<String, SdxError>;

    /// Fetch metadata JSON for a URL with a separate invocation.
    async fn metadata_json(&self, url: &str) -> Result<String, SdxError>;

    /// Run a download with a fully built argument list.
    ///
    /// Progress lines are parsed opportunistically and forwarded to
    /// `on_progress`; a non-zero exit maps to [`SdxError::DownloadFailed`].
    async fn download(
        &self,
        args: &[String],
        on_progress: ProgressCallback<'_>,
    ) -> Result<(), SdxError>;
}
