//! Download orchestration
//!
//! Builds the yt-dlp argument list for a validated request, invokes the
//! runner, and records exactly one history line per attempt. Failures are
//! logged and reported but never fatal to the session.

use crate::core::quality::Quality;
use crate::core::video_info::VideoInfo;
use crate::error::SdxError;
use crate::history::HistoryLog;
use crate::platform::{self, Platform};
use crate::runner::{DownloadRunner, ProgressCallback};
use crate::utils::notify;
use rand::Rng;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Tag appended to non-YouTube filenames alongside a random suffix
const FILENAME_TAG: &str = "sdx";

/// History status strings; one of these is appended per attempt
const STATUS_DOWNLOADED: &str = "Downloaded";
const STATUS_FAILED: &str = "Failed";

/// A validated download action. Immutable once dispatched.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    pub quality: Quality,
    pub platform: Platform,
}

impl DownloadRequest {
    /// Validate and classify a URL into a dispatchable request.
    ///
    /// The platform must be resolvable before a download is attempted;
    /// malformed URLs are rejected before classification.
    pub fn new(url: &str, quality: Quality) -> Result<Self, SdxError> {
        if !platform::is_well_formed(url) {
            return Err(SdxError::InvalidUrl(url.to_string()));
        }
        let platform = platform::classify(url)
            .ok_or_else(|| SdxError::UnsupportedPlatform(url.to_string()))?;

        Ok(Self {
            url: url.to_string(),
            quality,
            platform,
        })
    }
}

/// Outcome counts for a batch run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Drives the external downloader and the history sink
pub struct Orchestrator {
    runner: Arc<dyn DownloadRunner>,
    history: HistoryLog,
    download_dir: PathBuf,
    notifications: bool,
}

impl Orchestrator {
    pub fn new(
        runner: Arc<dyn DownloadRunner>,
        history: HistoryLog,
        download_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            history,
            download_dir: download_dir.into(),
            notifications: false,
        }
    }

    /// Enable best-effort desktop notifications on success
    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notifications = enabled;
        self
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Validate, classify, and fetch metadata for a URL without downloading
    pub async fn fetch_info(&self, url: &str) -> Result<VideoInfo, SdxError> {
        if !platform::is_well_formed(url) {
            return Err(SdxError::InvalidUrl(url.to_string()));
        }
        let platform = platform::classify(url)
            .ok_or_else(|| SdxError::UnsupportedPlatform(url.to_string()))?;

        let json = self.runner.metadata_json(url).await?;
        VideoInfo::from_json(&json, platform)
    }

    /// Execute a validated request.
    ///
    /// Appends exactly one history line whether the attempt succeeds or
    /// fails; a failed invocation never produces a success entry.
    pub async fn execute(
        &self,
        request: &DownloadRequest,
        on_progress: ProgressCallback<'_>,
    ) -> Result<(), SdxError> {
        let platform_dir = self.download_dir.join(request.platform.name());
        info!(
            "Dispatching {} download ({}) to {}",
            request.platform,
            request.quality,
            platform_dir.display()
        );

        let result = self.run_attempt(request, &platform_dir, on_progress).await;

        match &result {
            Ok(()) => {
                info!("Download completed: {}", request.url);
                self.record(STATUS_DOWNLOADED, &request.url);
                notify::media_scan(&platform_dir).await;
                if self.notifications {
                    notify::send(
                        "Download Complete",
                        &format!("Saved to {}", platform_dir.display()),
                    )
                    .await;
                }
            }
            Err(e) => {
                warn!("Download failed for {}: {}", request.url, e);
                self.record(STATUS_FAILED, &request.url);
            }
        }

        result
    }

    /// Download one URL end to end, recording exactly one history line even
    /// when validation or the metadata pre-flight fails. Batch mode relies
    /// on this to produce one entry per input URL.
    pub async fn download_one(&self, url: &str, quality: Quality) -> Result<(), SdxError> {
        let request = match DownloadRequest::new(url, quality) {
            Ok(request) => request,
            Err(e) => {
                self.record(STATUS_FAILED, url);
                return Err(e);
            }
        };

        if let Err(e) = self.fetch_info(url).await {
            self.record(STATUS_FAILED, url);
            return Err(e);
        }

        self.execute(&request, None).await
    }

    /// Process URLs strictly sequentially; each attempt is awaited to
    /// completion before the next begins. `on_item` fires before each URL.
    pub async fn run_batch(
        &self,
        urls: &[String],
        quality: Quality,
        mut on_item: impl FnMut(usize, &str),
    ) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for (index, url) in urls.iter().enumerate() {
            on_item(index, url);
            match self.download_one(url, quality).await {
                Ok(()) => summary.succeeded += 1,
                Err(e) => {
                    warn!("Batch item failed ({}): {}", url, e);
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    async fn run_attempt(
        &self,
        request: &DownloadRequest,
        platform_dir: &Path,
        on_progress: ProgressCallback<'_>,
    ) -> Result<(), SdxError> {
        tokio::fs::create_dir_all(platform_dir).await?;
        let args = build_args(request, platform_dir);
        self.runner.download(&args, on_progress).await
    }

    /// History writes are best-effort; a failing sink must not change the
    /// reported outcome of the attempt itself.
    fn record(&self, status: &str, url: &str) {
        if let Err(e) = self.history.append(status, url) {
            warn!("Could not write history entry: {}", e);
        }
    }
}

/// Build the yt-dlp argument list for a request
pub fn build_args(request: &DownloadRequest, platform_dir: &Path) -> Vec<String> {
    let template = output_template(request.platform);
    let output = platform_dir.join(template).to_string_lossy().into_owned();

    vec![
        "-f".to_string(),
        request.quality.format_selector(),
        "--no-playlist".to_string(),
        "--newline".to_string(),
        "--merge-output-format".to_string(),
        "mp4".to_string(),
        "-o".to_string(),
        output,
        request.url.clone(),
    ]
}

/// YouTube keeps plain titles; other platforms get a tagged random suffix
fn output_template(platform: Platform) -> String {
    if platform == Platform::YouTube {
        "%(title)s.%(ext)s".to_string()
    } else {
        let suffix: u32 = rand::thread_rng().gen_range(10_000..=99_999);
        format!("%(title)s_{}_{}.%(ext)s", FILENAME_TAG, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct FakeRunner {
        fail_download: bool,
        fail_metadata: bool,
    }

    impl FakeRunner {
        fn ok() -> Self {
            Self {
                fail_download: false,
                fail_metadata: false,
            }
        }

        fn failing_download() -> Self {
            Self {
                fail_download: true,
                fail_metadata: false,
            }
        }

        fn failing_metadata() -> Self {
            Self {
                fail_download: false,
                fail_metadata: true,
            }
        }
    }

    #[async_trait]
    impl DownloadRunner for FakeRunner {
        async fn version(&self) -> Result<String, SdxError> {
            Ok("2024.01.01".to_string())
        }

        async fn metadata_json(&self, _url: &str) -> Result<String, SdxError> {
            if self.fail_metadata {
                Err(SdxError::MetadataFetch("video unavailable".to_string()))
            } else {
                Ok(r#"{"title": "Fake Video", "uploader": "Fake"}"#.to_string())
            }
        }

        async fn download(
            &self,
            _args: &[String],
            on_progress: ProgressCallback<'_>,
        ) -> Result<(), SdxError> {
            if let Some(callback) = on_progress {
                callback(50.0);
                callback(100.0);
            }
            if self.fail_download {
                Err(SdxError::DownloadFailed("exit status 1".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn orchestrator(runner: FakeRunner) -> (TempDir, Orchestrator) {
        let dir = TempDir::new().unwrap();
        let history = HistoryLog::new(dir.path().join("history.txt"));
        let orch = Orchestrator::new(Arc::new(runner), history, dir.path());
        (dir, orch)
    }

    #[test]
    fn test_request_validation() {
        let request =
            DownloadRequest::new("https://www.youtube.com/watch?v=abc", Quality::Best).unwrap();
        assert_eq!(request.platform, Platform::YouTube);

        assert!(matches!(
            DownloadRequest::new("not a url", Quality::Best),
            Err(SdxError::InvalidUrl(_))
        ));
        assert!(matches!(
            DownloadRequest::new("https://example.com/x", Quality::Best),
            Err(SdxError::UnsupportedPlatform(_))
        ));
    }

    #[test]
    fn test_build_args_shape() {
        let request =
            DownloadRequest::new("https://vimeo.com/123", Quality::P720).unwrap();
        let args = build_args(&request, Path::new("/tmp/sdx/Vimeo"));

        assert_eq!(args[0], "-f");
        assert_eq!(args[1], "bestvideo[height<=720]+bestaudio/best[height<=720]");
        assert!(args.contains(&"--no-playlist".to_string()));
        assert!(args.contains(&"--merge-output-format".to_string()));
        assert!(args.contains(&"mp4".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("https://vimeo.com/123"));

        let output = &args[args.iter().position(|a| a == "-o").unwrap() + 1];
        assert!(output.starts_with("/tmp/sdx/Vimeo/"));
        assert!(output.contains("_sdx_"));
    }

    #[test]
    fn test_youtube_template_has_no_suffix() {
        let request =
            DownloadRequest::new("https://youtu.be/abc", Quality::Best).unwrap();
        let args = build_args(&request, Path::new("/tmp/sdx/YouTube"));
        let output = &args[args.iter().position(|a| a == "-o").unwrap() + 1];
        assert_eq!(output, "/tmp/sdx/YouTube/%(title)s.%(ext)s");
    }

    #[tokio::test]
    async fn test_execute_success_records_one_entry() {
        let (dir, orch) = orchestrator(FakeRunner::ok());
        let request =
            DownloadRequest::new("https://vimeo.com/123", Quality::Best).unwrap();

        orch.execute(&request, None).await.unwrap();

        let entries = orch.history().recent(50).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, "Downloaded");
        assert_eq!(entries[0].url, "https://vimeo.com/123");
        assert!(dir.path().join("Vimeo").is_dir());
    }

    #[tokio::test]
    async fn test_execute_failure_never_records_success() {
        let (_dir, orch) = orchestrator(FakeRunner::failing_download());
        let request =
            DownloadRequest::new("https://vimeo.com/123", Quality::Best).unwrap();

        assert!(orch.execute(&request, None).await.is_err());

        let entries = orch.history().recent(50).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, "Failed");
    }

    #[tokio::test]
    async fn test_progress_callback_is_forwarded() {
        let (_dir, orch) = orchestrator(FakeRunner::ok());
        let request =
            DownloadRequest::new("https://vimeo.com/123", Quality::Best).unwrap();

        let seen = std::sync::Mutex::new(Vec::new());
        let callback = |p: f64| seen.lock().unwrap().push(p);
        orch.execute(&request, Some(&callback)).await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![50.0, 100.0]);
    }

    #[tokio::test]
    async fn test_download_one_metadata_failure_records_failed() {
        let (_dir, orch) = orchestrator(FakeRunner::failing_metadata());

        let result = orch.download_one("https://vimeo.com/123", Quality::Best).await;
        assert!(matches!(result, Err(SdxError::MetadataFetch(_))));

        let entries = orch.history().recent(50).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, "Failed");
    }

    #[tokio::test]
    async fn test_batch_produces_one_entry_per_url() {
        let (_dir, orch) = orchestrator(FakeRunner::ok());
        let urls = vec![
            "https://www.youtube.com/watch?v=abc".to_string(),
            "https://vimeo.com/123".to_string(),
            "not a url".to_string(),
            "https://example.com/x".to_string(),
        ];

        let mut visited = Vec::new();
        let summary = orch
            .run_batch(&urls, Quality::Best, |i, _url| visited.push(i))
            .await;

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.total(), urls.len());
        assert_eq!(visited, vec![0, 1, 2, 3]);

        let entries = orch.history().recent(50).unwrap();
        assert_eq!(entries.len(), urls.len());
        let downloaded = entries.iter().filter(|e| e.status == "Downloaded").count();
        let failed = entries.iter().filter(|e| e.status == "Failed").count();
        assert_eq!(downloaded, 2);
        assert_eq!(failed, 2);
    }

    #[tokio::test]
    async fn test_batch_all_failures_still_counted() {
        let (_dir, orch) = orchestrator(FakeRunner::failing_download());
        let urls = vec![
            "https://vimeo.com/1".to_string(),
            "https://vimeo.com/2".to_string(),
        ];

        let summary = orch.run_batch(&urls, Quality::Best, |_, _| {}).await;
        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.failed, 2);

        let entries = orch.history().recent(50).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.status == "Failed"));
    }
}
