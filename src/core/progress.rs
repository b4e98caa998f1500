//! Progress parsing and human-readable size/duration formatting
//!
//! yt-dlp interleaves progress lines like
//! `[download]  42.3% of 10.00MiB at 1.20MiB/s ETA 00:05` on stdout.
//! Parsing is opportunistic: any line we cannot interpret is silently
//! skipped and the bar simply does not advance for it.

use regex::Regex;
use std::time::Duration;

/// Extract the percentage from a yt-dlp progress line.
///
/// Only lines carrying both `ETA` and `%` are considered progress lines.
pub fn parse_percent(line: &str) -> Option<f64> {
    if !line.contains("ETA") || !line.contains('%') {
        return None;
    }

    let re = Regex::new(r"(\d+(?:\.\d+)?)%").ok()?;
    let caps = re.captures(line)?;
    let percent: f64 = caps.get(1)?.as_str().parse().ok()?;

    (0.0..=100.0).contains(&percent).then_some(percent)
}

/// Format bytes as human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let bytes_f64 = bytes as f64;
    let exp = (bytes_f64.ln() / THRESHOLD.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);

    let value = bytes_f64 / THRESHOLD.powi(exp as i32);

    if exp == 0 {
        format!("{} {}", bytes, UNITS[exp])
    } else {
        format!("{:.1} {}", value, UNITS[exp])
    }
}

/// Format a duration as HH:MM:SS
pub fn format_clock(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    if total_seconds < 60 {
        format!("{}s", total_seconds)
    } else if total_seconds < 3600 {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        if seconds == 0 {
            format!("{}m", minutes)
        } else {
            format!("{}m {}s", minutes, seconds)
        }
    } else {
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        if minutes == 0 {
            format!("{}h", hours)
        } else {
            format!("{}h {}m", hours, minutes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percent_typical_line() {
        let line = "[download]  42.3% of 10.00MiB at 1.20MiB/s ETA 00:05";
        assert_eq!(parse_percent(line), Some(42.3));
    }

    #[test]
    fn test_parse_percent_whole_number() {
        let line = "[download] 100% of 10.00MiB in 00:08 ETA 00:00";
        assert_eq!(parse_percent(line), Some(100.0));
    }

    #[test]
    fn test_parse_percent_requires_eta_marker() {
        // Percentage without ETA is not a progress line
        assert_eq!(parse_percent("[download] 42.3% of 10.00MiB"), None);
        // ETA without percentage
        assert_eq!(parse_percent("[download] Unknown ETA"), None);
    }

    #[test]
    fn test_parse_percent_garbage_is_ignored() {
        assert_eq!(parse_percent(""), None);
        assert_eq!(parse_percent("[merger] Merging formats"), None);
        assert_eq!(parse_percent("ETA % nonsense"), None);
    }

    #[test]
    fn test_parse_percent_out_of_range_rejected() {
        assert_eq!(parse_percent("[download] 250% of x ETA 00:01"), None);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
        assert_eq!(format_bytes(1073741824), "1.0 GB");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(Duration::from_secs(0)), "00:00:00");
        assert_eq!(format_clock(Duration::from_secs(75)), "00:01:15");
        assert_eq!(format_clock(Duration::from_secs(3725)), "01:02:05");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_secs(60)), "1m");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3600)), "1h");
        assert_eq!(format_duration(Duration::from_secs(3660)), "1h 1m");
    }
}
