//! Output formatting and progress display

use crate::cli::args::VerbosityLevel;
use crate::core::progress::{format_bytes, format_duration};
use crate::core::quality::Quality;
use crate::core::video_info::VideoInfo;
use crate::core::BatchSummary;
use crate::history::HistoryEntry;
use crate::utils::system::DeviceInfo;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Main menu entries, in the order the handlers dispatch them
pub const MENU_ITEMS: [&str; 6] = [
    "Download a video",
    "Batch download",
    "Download history",
    "About",
    "Device info",
    "Exit",
];

/// Output formatter for sdx
pub struct OutputFormatter {
    verbosity: VerbosityLevel,
    progress_bar: Option<ProgressBar>,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            progress_bar: None,
        }
    }

    /// Create a percent-scaled progress bar for a download
    pub fn create_progress_bar(&mut self, title: &str) -> Option<ProgressBar> {
        if self.verbosity == VerbosityLevel::Quiet {
            return None;
        }

        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .unwrap()
            .progress_chars("#>-");

        let progress_bar = ProgressBar::new(100);
        progress_bar.set_style(style);
        progress_bar.set_message(truncate(title, 40));

        self.progress_bar = Some(progress_bar.clone());
        Some(progress_bar)
    }

    /// Update progress bar with a parsed percentage
    pub fn update_progress(&self, percent: f64) {
        if let Some(progress_bar) = &self.progress_bar {
            progress_bar.set_position(percent.clamp(0.0, 100.0) as u64);
        }
    }

    /// Finish progress bar
    pub fn finish_progress(&self, message: &str) {
        if let Some(progress_bar) = &self.progress_bar {
            progress_bar.finish_with_message(message.to_string());
        }
    }

    /// Print info message
    pub fn info(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("{} {}", "[*]".cyan(), message);
        }
    }

    /// Print success message
    pub fn success(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("{} {}", "[+]".green().bold(), message);
        }
    }

    /// Print warning message
    pub fn warning(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            eprintln!("{} {}", "[!]".yellow(), message);
        }
    }

    /// Print error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "[x]".red().bold(), message);
    }

    /// Print debug message
    pub fn debug(&self, message: &str) {
        if self.verbosity == VerbosityLevel::Verbose {
            println!("{} {}", "[d]".dimmed(), message);
        }
    }

    /// Clear the terminal and print the application banner
    pub fn print_banner(&self) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }

        print!("\x1B[2J\x1B[1;1H");
        println!("{}", "=".repeat(46).bright_blue());
        println!(
            "{}",
            format!("  SDX - Social Video Downloader v{}", env!("CARGO_PKG_VERSION"))
                .bright_cyan()
                .bold()
        );
        println!("{}", "=".repeat(46).bright_blue());
        println!();
    }

    /// Print the main menu
    pub fn print_menu(&self) {
        println!("{}", "Main Menu".bold());
        for (index, item) in MENU_ITEMS.iter().enumerate() {
            println!("  {} {}", format!("{}.", index + 1).cyan(), item);
        }
        println!();
    }

    /// Print the quality picker
    pub fn print_quality_menu(&self, default: Quality) {
        println!("{}", "Quality".bold());
        for (index, quality) in Quality::ALL.iter().enumerate() {
            let marker = if *quality == default { " (default)" } else { "" };
            println!("  {} {}{}", format!("{}.", index + 1).cyan(), quality, marker);
        }
        println!();
    }

    /// Print fetched video metadata
    pub fn print_video_info(&self, info: &VideoInfo) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }

        println!();
        println!("{} {}", "Title:".bold(), info.title);
        println!("{} {}", "Uploader:".bold(), info.uploader);
        println!("{} {}", "Platform:".bold(), info.platform);
        println!("{} {}", "Duration:".bold(), info.duration_string());
        println!("{} {}", "Size:".bold(), info.size_string());
        if !info.qualities.is_empty() {
            println!("{} {}", "Available:".bold(), info.qualities.join(", "));
        }
        let description = info.short_description();
        if !description.is_empty() {
            println!("{} {}", "About:".bold(), description);
        }
        println!();
    }

    /// Print history entries, oldest first
    pub fn print_history(&self, entries: &[HistoryEntry]) {
        if entries.is_empty() {
            self.info("No downloads recorded yet");
            return;
        }

        println!("{}", "Download History".bold());
        for entry in entries {
            let status = if entry.status == "Downloaded" {
                entry.status.green()
            } else {
                entry.status.red()
            };
            println!("  {}  {:<12}  {}", entry.timestamp.dimmed(), status, entry.url);
        }
        println!();
    }

    /// Print the device info screen
    pub fn print_device_info(&self, info: &DeviceInfo) {
        println!("{}", "Device Info".bold());
        println!("  {} {} {}", "OS:".bold(), info.os_name, info.os_version);
        println!("  {} {}", "Host:".bold(), info.hostname);
        println!("  {} {}", "Arch:".bold(), info.arch);
        println!("  {} {} ({} cores)", "CPU:".bold(), info.cpu_brand, info.cpu_count);
        println!("  {} {:.1}%", "CPU usage:".bold(), info.cpu_usage);
        println!("  {} {}", "Memory:".bold(), info.memory_summary());
        for disk in &info.disks {
            println!("  {} {}", "Disk:".bold(), disk.summary());
        }
        println!();
    }

    /// Print the about screen
    pub fn print_about(&self) {
        println!("{}", "About".bold());
        println!("  sdx version {}", env!("CARGO_PKG_VERSION"));
        println!("  Interactive downloader for social video platforms,");
        println!("  powered by yt-dlp.");
        println!();
    }

    /// Print batch outcome counts
    pub fn print_batch_summary(&self, summary: &BatchSummary, elapsed: Duration) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }

        println!();
        println!(
            "{} {} succeeded, {} failed ({} total) in {}",
            "Batch:".bold(),
            summary.succeeded.to_string().green(),
            summary.failed.to_string().red(),
            summary.total(),
            format_duration(elapsed)
        );
    }

    /// Approximate size line for verbose output
    pub fn print_size_hint(&self, bytes: u64) {
        self.debug(&format!("Approximate size: {}", format_bytes(bytes)));
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let shortened: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", shortened)
    }
}
