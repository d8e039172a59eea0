use std::time::Duration;

use eyre::{Result, bail};
use indicatif::ProgressBar;
use log::debug;
use serde::Deserialize;

use crate::VideoRecord;

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// videos.list and playlistItems.list accept at most 50 ids/results per call
const PAGE_SIZE: usize = 50;

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    #[serde(rename = "contentDetails")]
    content_details: ChannelContentDetails,
}

#[derive(Debug, Deserialize)]
struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists")]
    related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
struct RelatedPlaylists {
    uploads: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItem>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    #[serde(rename = "contentDetails")]
    content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Deserialize)]
struct PlaylistItemContentDetails {
    #[serde(rename = "videoId")]
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    snippet: VideoSnippet,
    statistics: Option<VideoStatistics>,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    title: String,
    #[serde(rename = "publishedAt")]
    published_at: String,
}

/// Statistics counts arrive as JSON strings; likeCount is absent entirely
/// when the uploader hides likes.
#[derive(Debug, Default, Deserialize)]
struct VideoStatistics {
    #[serde(rename = "likeCount")]
    like_count: Option<String>,
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
}

/// YouTube Data API v3 client scoped to listing a channel's uploads.
///
/// Every request is throttled by a fixed caller-configured delay to stay
/// under quota. Any upstream error aborts the run.
pub struct ChannelClient {
    client: reqwest::Client,
    api_key: String,
    throttle: Duration,
}

impl ChannelClient {
    pub fn new(client: reqwest::Client, api_key: String, throttle_ms: u64) -> Self {
        Self {
            client,
            api_key,
            throttle: Duration::from_millis(throttle_ms),
        }
    }

    async fn throttle(&self) {
        if !self.throttle.is_zero() {
            tokio::time::sleep(self.throttle).await;
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        self.throttle().await;
        let url = format!("{API_BASE}/{path}");
        debug!("GET {url}");
        let resp = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp)
    }

    /// Resolve the channel's "uploads" playlist via channels.list
    pub async fn uploads_playlist_id(&self, channel_id: &str) -> Result<String> {
        let resp: ChannelListResponse = self
            .get("channels", &[("part", "contentDetails"), ("id", channel_id), ("maxResults", "1")])
            .await?;
        uploads_from_response(resp, channel_id)
    }

    /// Page through playlistItems.list until nextPageToken runs out
    pub async fn collect_video_ids(&self, playlist_id: &str, progress: &ProgressBar) -> Result<Vec<String>> {
        let mut video_ids = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let max_results = PAGE_SIZE.to_string();
            let mut query = vec![
                ("part", "contentDetails"),
                ("playlistId", playlist_id),
                ("maxResults", max_results.as_str()),
            ];
            if let Some(ref token) = page_token {
                query.push(("pageToken", token.as_str()));
            }

            let resp: PlaylistItemsResponse = self.get("playlistItems", &query).await?;
            progress.inc(resp.items.len() as u64);
            video_ids.extend(resp.items.into_iter().map(|item| item.content_details.video_id));

            page_token = resp.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        debug!("Collected {} video ids from playlist {playlist_id}", video_ids.len());
        Ok(video_ids)
    }

    /// Fetch title, publish date, and statistics for each video, 50 at a time
    pub async fn fetch_video_stats(&self, video_ids: &[String], progress: &ProgressBar) -> Result<Vec<VideoRecord>> {
        let mut records = Vec::with_capacity(video_ids.len());

        for chunk in video_ids.chunks(PAGE_SIZE) {
            let ids = chunk.join(",");
            let resp: VideoListResponse = self
                .get("videos", &[("part", "snippet,statistics"), ("id", ids.as_str())])
                .await?;
            progress.inc(resp.items.len() as u64);
            records.extend(resp.items.into_iter().map(record_from_item));
        }

        Ok(records)
    }
}

fn uploads_from_response(resp: ChannelListResponse, channel_id: &str) -> Result<String> {
    match resp
        .items
        .into_iter()
        .next()
        .and_then(|item| item.content_details.related_playlists.uploads)
    {
        Some(uploads) => Ok(uploads),
        None => bail!("no uploads playlist found for channel {channel_id} (invalid channel ID?)"),
    }
}

fn record_from_item(item: VideoItem) -> VideoRecord {
    let stats = item.statistics.unwrap_or_default();
    VideoRecord {
        id: item.id,
        title: item.snippet.title,
        published_at: item.snippet.published_at,
        like_count: parse_count(stats.like_count.as_deref()),
        view_count: parse_count(stats.view_count.as_deref()),
        transcript: None,
    }
}

fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(0)
}
