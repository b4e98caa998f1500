//! Interactive menu session
//!
//! One action at a time: every menu choice runs to completion before the
//! prompt returns. Handler errors are reported and the session continues;
//! only stdin failures end the loop.

use crate::cli::output::OutputFormatter;
use crate::config::Config;
use crate::core::orchestrator::{DownloadRequest, Orchestrator};
use crate::core::quality::Quality;
use crate::error::SdxError;
use crate::platform;
use crate::runner::ProgressCallback;
use crate::utils::{clipboard, system::DeviceInfo};
use std::io::Write;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Interactive application session
pub struct App {
    orchestrator: Orchestrator,
    formatter: OutputFormatter,
    config: Config,
    input: Lines<BufReader<Stdin>>,
    show_progress: bool,
}

impl App {
    pub fn new(
        orchestrator: Orchestrator,
        formatter: OutputFormatter,
        config: Config,
        show_progress: bool,
    ) -> Self {
        Self {
            orchestrator,
            formatter,
            config,
            input: BufReader::new(tokio::io::stdin()).lines(),
            show_progress,
        }
    }

    /// Run the menu loop until the user exits or stdin closes
    pub async fn run(&mut self) -> Result<(), SdxError> {
        self.offer_clipboard_url().await?;

        loop {
            self.formatter.print_banner();
            self.formatter.print_menu();

            let Some(choice) = self.prompt("Select an option [1-6]: ").await? else {
                break;
            };

            match choice.as_str() {
                "1" => self.menu_download(None).await?,
                "2" => self.menu_batch().await?,
                "3" => self.menu_history(),
                "4" => self.formatter.print_about(),
                "5" => self.menu_device_info(),
                "6" | "q" | "quit" | "exit" => break,
                "" => continue,
                other => {
                    self.formatter
                        .warning(&format!("Unrecognized option: {}", other));
                }
            }

            if matches!(choice.as_str(), "1" | "2" | "3" | "4" | "5") {
                self.pause().await?;
            }
        }

        self.formatter.info("Goodbye");
        Ok(())
    }

    /// Download a single URL end to end. With `prefill` the URL prompt is
    /// skipped (clipboard offer, one-shot mode).
    pub async fn menu_download(&mut self, prefill: Option<String>) -> Result<(), SdxError> {
        let url = match prefill {
            Some(url) => url,
            None => loop {
                let Some(line) = self.prompt("Video URL: ").await? else {
                    return Ok(());
                };
                if line.is_empty() {
                    return Ok(());
                }
                if platform::is_well_formed(&line) {
                    break line;
                }
                self.formatter.error("That does not look like a valid URL");
            },
        };

        let Some(detected) = platform::classify(&url) else {
            self.formatter
                .error(&format!("Unsupported platform: {}", url));
            return Ok(());
        };
        self.formatter.info(&format!("Detected platform: {}", detected));

        let info = match self.orchestrator.fetch_info(&url).await {
            Ok(info) => info,
            Err(e) => {
                self.formatter
                    .error(&format!("Could not fetch metadata: {}", e));
                return Ok(());
            }
        };
        self.formatter.print_video_info(&info);
        if let Some(bytes) = info.approx_size {
            self.formatter.print_size_hint(bytes);
        }

        let quality = self.prompt_quality().await?;
        let request = match DownloadRequest::new(&url, quality) {
            Ok(request) => request,
            Err(e) => {
                self.formatter.error(&e.to_string());
                return Ok(());
            }
        };

        let _ = self.download_with_progress(&request, &info.title).await;
        Ok(())
    }

    /// Batch download from a URL list file, or typed in line by line
    async fn menu_batch(&mut self) -> Result<(), SdxError> {
        let Some(path) = self
            .prompt("File with one URL per line (Enter to type them here): ")
            .await?
        else {
            return Ok(());
        };

        let mut urls = Vec::new();
        if path.is_empty() {
            self.formatter
                .info("Enter one URL per line; blank line to start the batch");
            loop {
                let Some(line) = self.prompt("> ").await? else {
                    break;
                };
                if line.is_empty() {
                    break;
                }
                urls.push(line);
            }
        } else {
            match tokio::fs::read_to_string(&path).await {
                Ok(contents) => {
                    urls.extend(
                        contents
                            .lines()
                            .map(str::trim)
                            .filter(|l| !l.is_empty() && !l.starts_with('#'))
                            .map(String::from),
                    );
                }
                Err(e) => {
                    self.formatter
                        .error(&format!("Could not read {}: {}", path, e));
                    return Ok(());
                }
            }
        }

        if urls.is_empty() {
            self.formatter.warning("No URLs entered");
            return Ok(());
        }

        let quality = self.prompt_quality().await?;
        let started = Instant::now();
        let total = urls.len();

        let formatter = &self.formatter;
        let summary = self
            .orchestrator
            .run_batch(&urls, quality, |index, url| {
                formatter.info(&format!("[{}/{}] {}", index + 1, total, url));
            })
            .await;

        self.formatter
            .print_batch_summary(&summary, started.elapsed());
        Ok(())
    }

    fn menu_history(&self) {
        let history = self.orchestrator.history();
        match history.is_empty() {
            Ok(true) => self.formatter.info("No downloads recorded yet"),
            Ok(false) => match (history.recent(50), history.len()) {
                (Ok(entries), Ok(total)) => {
                    self.formatter.print_history(&entries);
                    if total > entries.len() {
                        self.formatter.info(&format!(
                            "Showing the last {} of {} attempts",
                            entries.len(),
                            total
                        ));
                    }
                }
                (Err(e), _) | (_, Err(e)) => self
                    .formatter
                    .error(&format!("Could not read history: {}", e)),
            },
            Err(e) => self
                .formatter
                .error(&format!("Could not read history: {}", e)),
        }
    }

    fn menu_device_info(&self) {
        self.formatter.print_device_info(&DeviceInfo::collect());
    }

    /// If the clipboard holds a supported video URL, offer it before the menu
    async fn offer_clipboard_url(&mut self) -> Result<(), SdxError> {
        if !self.config.clipboard_monitoring {
            return Ok(());
        }
        let Some(text) = clipboard::read_text().await else {
            return Ok(());
        };
        if !clipboard::looks_like_candidate(&text) {
            return Ok(());
        }

        self.formatter
            .info(&format!("Found a video URL on the clipboard: {}", text));
        let Some(answer) = self.prompt("Download it now? [y/N]: ").await? else {
            return Ok(());
        };
        if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
            self.menu_download(Some(text)).await?;
            self.pause().await?;
        }
        Ok(())
    }

    /// Execute a request with a live progress bar, reporting the outcome.
    /// The error is also returned so one-shot mode can set the exit code.
    pub async fn download_with_progress(
        &mut self,
        request: &DownloadRequest,
        title: &str,
    ) -> Result<(), SdxError> {
        if self.show_progress {
            self.formatter.create_progress_bar(title);
        }

        let formatter = &self.formatter;
        let callback = |percent: f64| formatter.update_progress(percent);
        let on_progress: ProgressCallback<'_> = if self.show_progress {
            Some(&callback)
        } else {
            None
        };

        match self.orchestrator.execute(request, on_progress).await {
            Ok(()) => {
                formatter.finish_progress("done");
                formatter.success(&format!(
                    "Saved under {}",
                    self.orchestrator
                        .download_dir()
                        .join(request.platform.name())
                        .display()
                ));
                Ok(())
            }
            Err(e) => {
                formatter.finish_progress("failed");
                formatter.error(&format!("Download failed: {}", e));
                Err(e)
            }
        }
    }

    async fn prompt_quality(&mut self) -> Result<Quality, SdxError> {
        let default = Quality::parse(&self.config.default_quality);
        self.formatter.print_quality_menu(default);

        let Some(choice) = self.prompt("Quality [Enter for default]: ").await? else {
            return Ok(default);
        };
        Ok(resolve_quality_choice(&choice, default))
    }

    async fn pause(&mut self) -> Result<(), SdxError> {
        let _ = self.prompt("\nPress Enter to continue...").await?;
        Ok(())
    }

    /// Print a prompt and read one trimmed line; None means stdin closed
    async fn prompt(&mut self, label: &str) -> Result<Option<String>, SdxError> {
        print!("{}", label);
        std::io::stdout().flush()?;
        Ok(self
            .input
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }
}

/// Map a quality prompt answer to a tier. Accepts the 1-based menu index or
/// a label; empty keeps the default and anything else falls back to best.
fn resolve_quality_choice(input: &str, default: Quality) -> Quality {
    let input = input.trim();
    if input.is_empty() {
        return default;
    }
    if let Ok(index) = input.parse::<usize>() {
        if (1..=Quality::ALL.len()).contains(&index) {
            return Quality::ALL[index - 1];
        }
    }
    Quality::parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_quality_by_index() {
        assert_eq!(resolve_quality_choice("1", Quality::P360), Quality::Best);
        assert_eq!(resolve_quality_choice("3", Quality::Best), Quality::P720);
        assert_eq!(
            resolve_quality_choice("6", Quality::Best),
            Quality::AudioOnly
        );
    }

    #[test]
    fn test_resolve_quality_by_label() {
        assert_eq!(resolve_quality_choice("480p", Quality::Best), Quality::P480);
        assert_eq!(
            resolve_quality_choice("audio-only", Quality::Best),
            Quality::AudioOnly
        );
    }

    #[test]
    fn test_resolve_quality_empty_keeps_default() {
        assert_eq!(resolve_quality_choice("", Quality::P1080), Quality::P1080);
        assert_eq!(resolve_quality_choice("  ", Quality::P480), Quality::P480);
    }

    #[test]
    fn test_resolve_quality_unknown_falls_back_to_best() {
        assert_eq!(resolve_quality_choice("9", Quality::P360), Quality::Best);
        assert_eq!(resolve_quality_choice("4k", Quality::P360), Quality::Best);
        assert_eq!(resolve_quality_choice("0", Quality::P360), Quality::Best);
    }
}
