//! Video metadata parsed from yt-dlp's `--dump-json` output

use crate::core::progress::{format_bytes, format_clock};
use crate::error::SdxError;
use crate::platform::Platform;
use serde::Deserialize;
use std::time::Duration;

/// Raw shape of the fields we read from yt-dlp metadata JSON
#[derive(Debug, Deserialize)]
struct RawMetadata {
    title: Option<String>,
    uploader: Option<String>,
    duration: Option<f64>,
    description: Option<String>,
    thumbnail: Option<String>,
    filesize_approx: Option<u64>,
    #[serde(default)]
    formats: Vec<RawFormat>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    height: Option<u32>,
    vcodec: Option<String>,
    acodec: Option<String>,
}

/// Video information and metadata
#[derive(Debug, Clone)]
pub struct VideoInfo {
    /// Video title
    pub title: String,
    /// Uploader/channel name
    pub uploader: String,
    /// Duration in whole seconds, if reported
    pub duration_secs: Option<u64>,
    /// Available quality labels, highest first (e.g. "1080p", "audio-only")
    pub qualities: Vec<String>,
    /// Video description
    pub description: String,
    /// Thumbnail URL
    pub thumbnail: Option<String>,
    /// Approximate file size in bytes, if reported
    pub approx_size: Option<u64>,
    /// Platform the URL classified to
    pub platform: Platform,
}

impl VideoInfo {
    /// Parse metadata JSON produced by `yt-dlp --dump-json --no-playlist`
    pub fn from_json(json: &str, platform: Platform) -> Result<Self, SdxError> {
        let raw: RawMetadata = serde_json::from_str(json)?;
        let qualities = collect_qualities(&raw);

        Ok(Self {
            title: raw.title.unwrap_or_else(|| "Unknown".to_string()),
            uploader: raw.uploader.unwrap_or_else(|| "Unknown".to_string()),
            duration_secs: raw.duration.map(|d| d.max(0.0) as u64),
            qualities,
            description: raw
                .description
                .unwrap_or_else(|| "No description available".to_string()),
            thumbnail: raw.thumbnail,
            approx_size: raw.filesize_approx,
            platform,
        })
    }

    /// Duration as HH:MM:SS, or "Unknown"
    pub fn duration_string(&self) -> String {
        match self.duration_secs {
            Some(secs) => format_clock(Duration::from_secs(secs)),
            None => "Unknown".to_string(),
        }
    }

    /// Approximate size as a human-readable string, or "Unknown"
    pub fn size_string(&self) -> String {
        match self.approx_size {
            Some(bytes) => format_bytes(bytes),
            None => "Unknown".to_string(),
        }
    }

    /// Description truncated for single-panel display
    pub fn short_description(&self) -> String {
        const LIMIT: usize = 100;
        if self.description.chars().count() > LIMIT {
            let truncated: String = self.description.chars().take(LIMIT).collect();
            format!("{}...", truncated)
        } else {
            self.description.clone()
        }
    }
}

/// Distill the format list into distinct quality labels, highest first.
fn collect_qualities(raw: &RawMetadata) -> Vec<String> {
    let mut heights: Vec<u32> = Vec::new();
    let mut has_audio_only = false;

    for format in &raw.formats {
        let has_video = format
            .vcodec
            .as_deref()
            .map(|v| v != "none")
            .unwrap_or(false);
        let has_audio = format
            .acodec
            .as_deref()
            .map(|a| a != "none")
            .unwrap_or(false);

        match format.height {
            Some(h) if h > 0 && has_video => {
                if !heights.contains(&h) {
                    heights.push(h);
                }
            }
            _ if has_audio && !has_video => has_audio_only = true,
            _ => {}
        }
    }

    // Single-format metadata carries height at the top level
    if heights.is_empty() {
        if let Some(h) = raw.height {
            heights.push(h);
        }
    }

    heights.sort_unstable_by(|a, b| b.cmp(a));

    let mut labels: Vec<String> = heights.into_iter().map(|h| format!("{}p", h)).collect();
    if has_audio_only {
        labels.push("audio-only".to_string());
    }
    if labels.is_empty() {
        labels.push("best".to_string());
    }
    labels
}
