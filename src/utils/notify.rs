//! Best-effort desktop notifications
//!
//! Shells out to whatever notifier the host provides. A missing or failing
//! notifier is logged at debug level and otherwise ignored.

use tokio::process::Command;
use tracing::debug;

/// Send a notification with the given title and body. Never fails.
pub async fn send(title: &str, body: &str) {
    let attempt = if is_termux() {
        Command::new("termux-notification")
            .args(["--title", title, "--content", body])
            .output()
            .await
    } else if cfg!(target_os = "macos") {
        let script = format!(
            "display notification \"{}\" with title \"{}\"",
            body.replace('"', "'"),
            title.replace('"', "'")
        );
        Command::new("osascript").args(["-e", &script]).output().await
    } else {
        Command::new("notify-send").args([title, body]).output().await
    };

    if let Err(e) = attempt {
        debug!("Notification delivery unavailable: {}", e);
    }
}

/// Ask the Android media store to index freshly downloaded files.
/// No-op outside Termux; failures are ignored.
pub async fn media_scan(dir: &std::path::Path) {
    if !is_termux() {
        return;
    }
    if let Err(e) = Command::new("termux-media-scan").arg(dir).output().await {
        debug!("Media scan unavailable: {}", e);
    }
}

/// Termux sets PREFIX to a path under com.termux
pub fn is_termux() -> bool {
    std::env::var("PREFIX")
        .map(|p| p.contains("com.termux"))
        .unwrap_or(false)
}
