pub mod captions;
pub mod config;
pub mod fallback;
pub mod output;
pub mod prompt;
pub mod transcript;
pub mod youtube;

use serde::{Deserialize, Serialize};

/// One channel video with its statistics and, once fetched, its transcript.
///
/// Field names follow the JSON schema of the result document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    #[serde(rename = "likeCount")]
    pub like_count: u64,
    #[serde(rename = "viewCount")]
    pub view_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

/// Which source produced a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranscriptSource {
    Captions,
    Fallback,
}

impl std::fmt::Display for TranscriptSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptSource::Captions => write!(f, "captions"),
            TranscriptSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Order records by like count, descending. The sort is stable, so videos
/// with equal like counts keep their listing order.
pub fn sort_by_likes(mut records: Vec<VideoRecord>) -> Vec<VideoRecord> {
    records.sort_by(|a, b| b.like_count.cmp(&a.like_count));
    records
}

/// Canonical watch URL for a video ID
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}
