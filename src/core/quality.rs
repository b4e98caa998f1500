//! Quality tiers and yt-dlp format selector mapping

use clap::ValueEnum;
use std::fmt;

/// Discrete resolution/audio selector guiding yt-dlp format choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Quality {
    /// Best available video+audio
    #[value(name = "best")]
    Best,
    #[value(name = "1080p")]
    P1080,
    #[value(name = "720p")]
    P720,
    #[value(name = "480p")]
    P480,
    #[value(name = "360p")]
    P360,
    /// Audio track only
    #[value(name = "audio-only")]
    AudioOnly,
}

impl Quality {
    /// All tiers in menu order
    pub const ALL: [Quality; 6] = [
        Quality::Best,
        Quality::P1080,
        Quality::P720,
        Quality::P480,
        Quality::P360,
        Quality::AudioOnly,
    ];

    /// Display/config label
    pub fn label(&self) -> &'static str {
        match self {
            Quality::Best => "best",
            Quality::P1080 => "1080p",
            Quality::P720 => "720p",
            Quality::P480 => "480p",
            Quality::P360 => "360p",
            Quality::AudioOnly => "audio-only",
        }
    }

    /// Height cap for capped tiers
    pub fn height(&self) -> Option<u32> {
        match self {
            Quality::P1080 => Some(1080),
            Quality::P720 => Some(720),
            Quality::P480 => Some(480),
            Quality::P360 => Some(360),
            _ => None,
        }
    }

    /// Parse from a label; anything outside the enumeration falls back to best.
    pub fn parse(s: &str) -> Quality {
        let s = s.trim().to_lowercase();
        Quality::ALL
            .iter()
            .find(|q| q.label() == s)
            .copied()
            .unwrap_or(Quality::Best)
    }

    /// yt-dlp `-f` selector for this tier
    pub fn format_selector(&self) -> String {
        match self {
            Quality::AudioOnly => "bestaudio".to_string(),
            Quality::Best => "bestvideo+bestaudio".to_string(),
            _ => {
                // Capped tiers always have a height
                let height = self.height().unwrap_or(1080);
                format!(
                    "bestvideo[height<={}]+bestaudio/best[height<={}]",
                    height, height
                )
            }
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_labels() {
        assert_eq!(Quality::parse("best"), Quality::Best);
        assert_eq!(Quality::parse("1080p"), Quality::P1080);
        assert_eq!(Quality::parse("720p"), Quality::P720);
        assert_eq!(Quality::parse("480p"), Quality::P480);
        assert_eq!(Quality::parse("360p"), Quality::P360);
        assert_eq!(Quality::parse("audio-only"), Quality::AudioOnly);
    }

    #[test]
    fn test_parse_is_case_and_whitespace_tolerant() {
        assert_eq!(Quality::parse(" 720P "), Quality::P720);
        assert_eq!(Quality::parse("BEST"), Quality::Best);
    }

    #[test]
    fn test_parse_falls_back_to_best() {
        assert_eq!(Quality::parse("4k"), Quality::Best);
        assert_eq!(Quality::parse("potato"), Quality::Best);
        assert_eq!(Quality::parse(""), Quality::Best);
    }

    #[test]
    fn test_format_selectors() {
        assert_eq!(Quality::AudioOnly.format_selector(), "bestaudio");
        assert_eq!(Quality::Best.format_selector(), "bestvideo+bestaudio");
        assert_eq!(
            Quality::P720.format_selector(),
            "bestvideo[height<=720]+bestaudio/best[height<=720]"
        );
        assert_eq!(
            Quality::P360.format_selector(),
            "bestvideo[height<=360]+bestaudio/best[height<=360]"
        );
    }

    #[test]
    fn test_heights() {
        assert_eq!(Quality::Best.height(), None);
        assert_eq!(Quality::AudioOnly.height(), None);
        assert_eq!(Quality::P1080.height(), Some(1080));
        assert_eq!(Quality::P480.height(), Some(480));
    }

    #[test]
    fn test_labels_round_trip() {
        for q in Quality::ALL {
            assert_eq!(Quality::parse(q.label()), q);
        }
    }
}
