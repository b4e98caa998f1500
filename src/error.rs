//! Error types for sdx

use thiserror::Error;

/// Main error type for sdx operations
#[derive(Debug, Error)]
pub enum SdxError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("yt-dlp not found (is it installed and on PATH?)")]
    DownloaderMissing,

    #[error("Failed to fetch video metadata: {0}")]
    MetadataFetch(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Generic error: {0}")]
    Generic(String),
}

impl SdxError {
    /// Check if error came from bad user input (re-prompt rather than abort)
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SdxError::InvalidUrl(_) | SdxError::UnsupportedPlatform(_)
        )
    }

    /// Check if error maps to a failed download attempt (vs. a pre-flight abort)
    pub fn is_download_failure(&self) -> bool {
        matches!(self, SdxError::DownloadFailed(_) | SdxError::IoError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_classification() {
        assert!(SdxError::InvalidUrl("x".to_string()).is_input_error());
        assert!(SdxError::UnsupportedPlatform("x".to_string()).is_input_error());
        assert!(!SdxError::DownloaderMissing.is_input_error());
        assert!(!SdxError::DownloadFailed("x".to_string()).is_input_error());
    }

    #[test]
    fn test_download_failure_classification() {
        assert!(SdxError::DownloadFailed("exit 1".to_string()).is_download_failure());
        assert!(!SdxError::MetadataFetch("x".to_string()).is_download_failure());
        assert!(!SdxError::UnsupportedPlatform("x".to_string()).is_download_failure());
    }
}
