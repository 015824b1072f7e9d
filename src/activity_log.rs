//! Append-only, line-oriented report files the maintenance jobs write into.
//!
//! Files are created on first use and never truncated. Each call writes one
//! full line in a single `write_all`.

use chrono::{DateTime, Local, Utc};
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// `2026-10-15 09:30:00`
pub const CLEANUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// `2026-10-15 09:30:00,123`
pub const ASCTIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";
/// `15/10/2026-09:30:00`
pub const HEARTBEAT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y-%H:%M:%S";

#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
}

impl ActivityLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` followed by a newline, creating the file if needed.
    pub async fn append_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        file.write_all(buf.as_bytes()).await?;
        file.flush().await?;

        debug!(path = %self.path.display(), "Appended activity log line");
        Ok(())
    }
}

/// Renders `at` in the machine's local time zone.
pub fn format_local(at: DateTime<Utc>, format: &str) -> String {
    at.with_timezone(&Local).format(format).to_string()
}

pub fn cleanup_line(at: DateTime<Utc>, deleted: u64) -> String {
    format!(
        "{}: Deleted {} inactive customers",
        format_local(at, CLEANUP_TIMESTAMP_FORMAT),
        deleted
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn cleanup_line_reports_count_after_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let line = cleanup_line(at, 2);
        let expected_ts = at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string();
        assert_eq!(line, format!("{expected_ts}: Deleted 2 inactive customers"));
    }

    #[test]
    fn zero_count_is_still_reported() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert!(cleanup_line(at, 0).ends_with(": Deleted 0 inactive customers"));
    }

    #[test]
    fn asctime_keeps_milliseconds() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert!(format_local(at, ASCTIME_FORMAT).ends_with(",123"));
    }

    #[tokio::test]
    async fn append_creates_then_appends_without_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let log = ActivityLog::new(dir.path().join("cleanup.log"));

        log.append_line("first").await.unwrap();
        log.append_line("second").await.unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[tokio::test]
    async fn append_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let log = ActivityLog::new(dir.path().join("missing").join("cleanup.log"));
        assert!(log.append_line("nope").await.is_err());
    }
}
