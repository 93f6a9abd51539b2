//! Best-effort audio-stream resolution for a search string.
//!
//! Delegates to yt-dlp: `ytsearch1:` takes the first search result, and
//! `-f bestaudio` picks its best audio-only format. We only reshape the
//! extractor's JSON; correctness of extraction is the extractor's problem.

use std::{path::PathBuf, process::Stdio, time::Duration};

use async_trait::async_trait;
use serde_json::Value;
use tokio::{process::Command, time::timeout};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no results for query")]
    NotFound,

    #[error("extractor failed: {0}")]
    Extraction(String),

    #[error("extractor timed out after {0:?}")]
    Timeout(Duration),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// One resolved audio stream.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub duration: Option<u64>,
    pub thumbnail: Option<String>,
}

#[async_trait]
pub trait AudioResolver: Send + Sync {
    async fn resolve(&self, query: &str) -> Result<SearchHit, ResolveError>;
}

pub struct YtDlpResolver {
    path: PathBuf,
    timeout: Duration,
}

impl YtDlpResolver {
    pub fn new(path: PathBuf, timeout: Duration) -> Self {
        Self { path, timeout }
    }
}

#[async_trait]
impl AudioResolver for YtDlpResolver {
    async fn resolve(&self, query: &str) -> Result<SearchHit, ResolveError> {
        let mut cmd = Command::new(&self.path);
        cmd.args([
            "--dump-single-json",
            "--no-warnings",
            "--skip-download",
            "-f",
            "bestaudio",
        ])
        .arg(format!("ytsearch1:{query}"))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

        let output = timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| ResolveError::Timeout(self.timeout))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let lines: Vec<&str> = stderr.lines().collect();
            let tail = lines[lines.len().saturating_sub(5)..].join("\n");
            return Err(ResolveError::Extraction(tail));
        }

        parse_dump(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Reshape a yt-dlp `--dump-single-json` payload into a `SearchHit`.
///
/// `ytsearchN:` queries produce a playlist object with an `entries` array;
/// a direct URL produces the entry itself.
pub fn parse_dump(raw: &str) -> Result<SearchHit, ResolveError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ResolveError::Extraction(e.to_string()))?;

    let entry = match value.get("entries") {
        Some(Value::Array(entries)) => entries.first().ok_or(ResolveError::NotFound)?,
        Some(_) => return Err(ResolveError::NotFound),
        None => &value,
    };

    let title = entry
        .get("title")
        .and_then(Value::as_str)
        .ok_or(ResolveError::NotFound)?
        .to_string();

    let url = entry
        .get("url")
        .or_else(|| entry.get("webpage_url"))
        .and_then(Value::as_str)
        .ok_or(ResolveError::NotFound)?
        .to_string();

    let duration = entry
        .get("duration")
        .and_then(Value::as_f64)
        .map(|d| d as u64);

    let thumbnail = entry
        .get("thumbnail")
        .and_then(Value::as_str)
        .map(|s| s.to_string());

    Ok(SearchHit {
        title,
        url,
        duration,
        thumbnail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_playlist_first_entry() {
        let raw = r#"{
            "_type": "playlist",
            "entries": [{
                "title": "Test Song",
                "url": "https://cdn.example/audio.m4a",
                "duration": 213.4,
                "thumbnail": "https://cdn.example/thumb.jpg"
            }]
        }"#;
        let hit = parse_dump(raw).unwrap();
        assert_eq!(hit.title, "Test Song");
        assert_eq!(hit.url, "https://cdn.example/audio.m4a");
        assert_eq!(hit.duration, Some(213));
        assert_eq!(hit.thumbnail.as_deref(), Some("https://cdn.example/thumb.jpg"));
    }

    #[test]
    fn parses_flat_entry_without_playlist_wrapper() {
        let raw = r#"{"title": "Direct", "webpage_url": "https://example/watch?v=1"}"#;
        let hit = parse_dump(raw).unwrap();
        assert_eq!(hit.title, "Direct");
        assert_eq!(hit.url, "https://example/watch?v=1");
        assert_eq!(hit.duration, None);
        assert_eq!(hit.thumbnail, None);
    }

    #[test]
    fn empty_entries_is_not_found() {
        let raw = r#"{"_type": "playlist", "entries": []}"#;
        assert!(matches!(parse_dump(raw), Err(ResolveError::NotFound)));
    }

    #[test]
    fn garbage_output_is_extraction_failure() {
        assert!(matches!(
            parse_dump("not json"),
            Err(ResolveError::Extraction(_))
        ));
    }
}
