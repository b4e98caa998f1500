//! Append-only download history log
//!
//! One line per download attempt, `timestamp - status - url`. The tool only
//! ever appends; entries are never mutated or deleted.

use crate::error::SdxError;
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A single recorded download attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub status: String,
    pub url: String,
}

impl HistoryEntry {
    /// Parse a history line, tolerating older two- and one-field lines.
    pub fn parse(line: &str) -> HistoryEntry {
        let mut parts = line.trim().splitn(3, " - ");
        let first = parts.next().unwrap_or_default().to_string();
        let second = parts.next();
        let third = parts.next();

        match (second, third) {
            (Some(status), Some(url)) => HistoryEntry {
                timestamp: first,
                status: status.to_string(),
                url: url.to_string(),
            },
            (Some(url), None) => HistoryEntry {
                timestamp: first,
                status: String::new(),
                url: url.to_string(),
            },
            _ => HistoryEntry {
                timestamp: String::new(),
                status: String::new(),
                url: first,
            },
        }
    }
}

/// Append-only sink over a line-oriented history file
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one attempt outcome with the current local timestamp
    pub fn append(&self, status: &str, url: &str) -> Result<(), SdxError> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{} - {} - {}", timestamp, status, url)?;
        Ok(())
    }

    /// Read the most recent `limit` entries, oldest first
    pub fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, SdxError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let lines: Vec<&str> = contents.lines().filter(|l| !l.trim().is_empty()).collect();
        let skip = lines.len().saturating_sub(limit);

        Ok(lines[skip..].iter().map(|l| HistoryEntry::parse(l)).collect())
    }

    /// Total number of recorded attempts
    pub fn len(&self) -> Result<usize, SdxError> {
        if !self.path.exists() {
            return Ok(0);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(contents.lines().filter(|l| !l.trim().is_empty()).count())
    }

    pub fn is_empty(&self) -> Result<bool, SdxError> {
        Ok(self.len()? == 0)
    }
}
