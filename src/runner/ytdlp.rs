//! yt-dlp subprocess runner

use crate::core::progress::parse_percent;
use crate::error::SdxError;
use crate::runner::{DownloadRunner, ProgressCallback};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, warn};

/// How many trailing stderr lines to keep for failure reports
const STDERR_TAIL: usize = 20;

/// Runner invoking the yt-dlp executable
pub struct YtDlpRunner {
    bin: String,
}

impl YtDlpRunner {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    fn map_spawn_error(err: std::io::Error) -> SdxError {
        if err.kind() == std::io::ErrorKind::NotFound {
            SdxError::DownloaderMissing
        } else {
            SdxError::IoError(err)
        }
    }
}

impl Default for YtDlpRunner {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

#[async_trait]
impl DownloadRunner for YtDlpRunner {
    async fn version(&self) -> Result<String, SdxError> {
        let output = Command::new(&self.bin)
            .arg("--version")
            .output()
            .await
            .map_err(Self::map_spawn_error)?;

        if !output.status.success() {
            return Err(SdxError::DownloaderMissing);
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn metadata_json(&self, url: &str) -> Result<String, SdxError> {
        debug!("Fetching metadata for {}", url);

        let output = Command::new(&self.bin)
            .args(["--dump-json", "--no-playlist", url])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(Self::map_spawn_error)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .unwrap_or("no error output")
                .to_string();
            return Err(SdxError::MetadataFetch(reason));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn download(
        &self,
        args: &[String],
        on_progress: ProgressCallback<'_>,
    ) -> Result<(), SdxError> {
        debug!("Running {} {}", self.bin, args.join(" "));

        let mut child = Command::new(&self.bin)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(Self::map_spawn_error)?;

        // Collect a stderr tail in the background for the failure report
        let stderr_tail = match child.stderr.take() {
            Some(stderr) => tokio::spawn(collect_tail(stderr)),
            None => tokio::spawn(async { VecDeque::new() }),
        };

        // Stream stdout on this task; progress lines are parsed
        // opportunistically and everything else is ignored.
        if let Some(stdout) = child.stdout.take() {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!("yt-dlp: {}", line);
                if let (Some(percent), Some(callback)) = (parse_percent(&line), on_progress) {
                    callback(percent);
                }
            }
        }

        let status = child.wait().await?;
        let tail = stderr_tail.await.unwrap_or_default();

        if status.success() {
            Ok(())
        } else {
            for line in &tail {
                warn!("yt-dlp stderr: {}", line);
            }
            let reason = tail
                .iter()
                .rev()
                .find(|l| !l.trim().is_empty())
                .cloned()
                .unwrap_or_else(|| format!("yt-dlp exited with {}", status));
            Err(SdxError::DownloadFailed(reason))
        }
    }
}

/// Keep the last [`STDERR_TAIL`] lines of a stream
async fn collect_tail<R: AsyncRead + Unpin>(stream: R) -> VecDeque<String> {
    let mut tail = VecDeque::with_capacity(STDERR_TAIL);
    let mut lines = BufReader::new(stream).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        if tail.len() == STDERR_TAIL {
            tail.pop_front();
        }
        tail.push_back(line);
    }

    tail
}
