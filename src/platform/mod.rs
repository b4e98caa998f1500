//! Platform classification for social media URLs
//!
//! Maps a URL's host to a named platform via ordered substring containment
//! checks. Classification never fails on malformed input; well-formedness is
//! a separate predicate checked before dispatch.

use std::fmt;
use url::Url;

/// A recognized social/media platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    YouTube,
    Instagram,
    Facebook,
    Twitter,
    TikTok,
    Reddit,
    Vimeo,
    Dailymotion,
    Pinterest,
    LinkedIn,
    Threads,
    Snapchat,
    Tumblr,
}

/// Ordered domain fragments; first containment match wins.
const DOMAIN_FRAGMENTS: &[(&str, Platform)] = &[
    ("youtube.com", Platform::YouTube),
    ("youtu.be", Platform::YouTube),
    ("instagram.com", Platform::Instagram),
    ("facebook.com", Platform::Facebook),
    ("fb.com", Platform::Facebook),
    ("twitter.com", Platform::Twitter),
    ("x.com", Platform::Twitter),
    ("tiktok.com", Platform::TikTok),
    ("reddit.com", Platform::Reddit),
    ("vimeo.com", Platform::Vimeo),
    ("dailymotion.com", Platform::Dailymotion),
    ("pinterest.com", Platform::Pinterest),
    ("linkedin.com", Platform::LinkedIn),
    ("threads.net", Platform::Threads),
    ("snapchat.com", Platform::Snapchat),
    ("tumblr.com", Platform::Tumblr),
];

impl Platform {
    /// Human-readable platform name, also used as the download subdirectory
    pub fn name(&self) -> &'static str {
        match self {
            Platform::YouTube => "YouTube",
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::Twitter => "Twitter",
            Platform::TikTok => "TikTok",
            Platform::Reddit => "Reddit",
            Platform::Vimeo => "Vimeo",
            Platform::Dailymotion => "Dailymotion",
            Platform::Pinterest => "Pinterest",
            Platform::LinkedIn => "LinkedIn",
            Platform::Threads => "Threads",
            Platform::Snapchat => "Snapchat",
            Platform::Tumblr => "Tumblr",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a URL by its host. Returns `None` for unsupported or unparsable URLs.
pub fn classify(url: &str) -> Option<Platform> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_lowercase();

    DOMAIN_FRAGMENTS
        .iter()
        .find(|(fragment, _)| host.contains(fragment))
        .map(|(_, platform)| *platform)
}

/// Well-formedness predicate: scheme and host must both be present.
///
/// Checked before classification; a URL failing this is never dispatched.
pub fn is_well_formed(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => !parsed.scheme().is_empty() && parsed.host_str().is_some(),
        Err(_) => false,
    }
}
