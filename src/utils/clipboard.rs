//! Best-effort clipboard reads
//!
//! Tries the platform's clipboard tools in order and returns the first
//! non-empty result. No clipboard tooling is a normal condition, not an
//! error.

use tokio::process::Command;
use tracing::debug;

use crate::utils::notify::is_termux;

/// Read the current clipboard text, if any tool can provide it
pub async fn read_text() -> Option<String> {
    let candidates: &[&[&str]] = if is_termux() {
        &[&["termux-clipboard-get"]]
    } else if cfg!(target_os = "macos") {
        &[&["pbpaste"]]
    } else {
        &[&["wl-paste", "--no-newline"], &["xclip", "-selection", "clipboard", "-o"]]
    };

    for candidate in candidates {
        match Command::new(candidate[0]).args(&candidate[1..]).output().await {
            Ok(output) if output.status.success() => {
                let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !text.is_empty() {
                    return Some(text);
                }
            }
            Ok(_) => {}
            Err(e) => debug!("Clipboard tool {} unavailable: {}", candidate[0], e),
        }
    }

    None
}

/// True when the clipboard currently holds something that looks like a
/// supported video URL worth offering to the user.
pub fn looks_like_candidate(text: &str) -> bool {
    crate::platform::is_well_formed(text) && crate::platform::classify(text).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_detection() {
        assert!(looks_like_candidate("https://www.youtube.com/watch?v=abc"));
        assert!(looks_like_candidate("https://vimeo.com/123"));
        assert!(!looks_like_candidate("https://example.com/page"));
        assert!(!looks_like_candidate("some random text"));
        assert!(!looks_like_candidate(""));
    }
}
