//! YouTube Data API v3 catalog client.

use std::time::Duration;

use meiri_core::catalog::{MAX_DETAIL_BATCH, VideoCatalog};
use meiri_core::{MeiriError, VideoRef};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{RemoteError, Result, check_status};

/// Default API root.
pub const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Blocking client listing every upload of a channel.
///
/// Listing takes three steps: the channel's uploads playlist, the video ids
/// of that playlist page by page, then the video titles in batches of
/// [`MAX_DETAIL_BATCH`] ids.
#[derive(Clone)]
pub struct YouTubeCatalog {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeCatalog {
    /// Builds a client for the public API.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::InvalidConfig` for a blank key, or
    /// `RemoteError::Http` if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(RemoteError::InvalidConfig("missing YouTube API key".into()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.trim().to_string(),
            base_url: API_BASE.to_string(),
        })
    }

    /// Points the client at another API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn get<T: DeserializeOwned>(&self, resource: &str, query: &[(&str, &str)]) -> Result<T> {
        let resp = self
            .client
            .get(format!("{}/{resource}", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()?;
        Ok(check_status(resp)?.json()?)
    }

    /// Returns the id of the channel's uploads playlist.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::ChannelNotFound` if the channel does not exist.
    pub fn uploads_playlist(&self, channel_id: &str) -> Result<String> {
        let resp: ListResponse<ChannelItem> = self.get(
            "channels",
            &[("part", "contentDetails"), ("id", channel_id)],
        )?;
        resp.items
            .into_iter()
            .next()
            .map(|c| c.content_details.related_playlists.uploads)
            .ok_or_else(|| RemoteError::ChannelNotFound(channel_id.to_string()))
    }

    /// Returns every video id of a playlist, following page tokens.
    ///
    /// # Errors
    ///
    /// Returns the first failing page request.
    pub fn playlist_video_ids(&self, playlist_id: &str) -> Result<Vec<String>> {
        let page_size = MAX_DETAIL_BATCH.to_string();
        let mut ids = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("part", "contentDetails"),
                ("playlistId", playlist_id),
                ("maxResults", page_size.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }

            let page: ListResponse<PlaylistItem> = self.get("playlistItems", &query)?;
            ids.extend(page.items.into_iter().map(|i| i.content_details.video_id));
            debug!(playlist_id, fetched = ids.len(), "playlist page fetched");

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(ids)
    }

    /// Fetches titles for `ids`, at most [`MAX_DETAIL_BATCH`] per request.
    ///
    /// # Errors
    ///
    /// Returns the first failing batch request.
    pub fn video_details(&self, ids: &[String]) -> Result<Vec<VideoRef>> {
        let mut videos = Vec::with_capacity(ids.len());
        for batch in ids.chunks(MAX_DETAIL_BATCH) {
            let joined = batch.join(",");
            let resp: ListResponse<VideoItem> =
                self.get("videos", &[("part", "snippet"), ("id", joined.as_str())])?;
            videos.extend(resp.items.into_iter().map(VideoRef::from));
        }
        Ok(videos)
    }

    fn list(&self, channel_id: &str) -> Result<Vec<VideoRef>> {
        let playlist = self.uploads_playlist(channel_id)?;
        let ids = self.playlist_video_ids(&playlist)?;
        let videos = self.video_details(&ids)?;
        info!(channel_id, videos = videos.len(), "channel listed");
        Ok(videos)
    }
}

impl VideoCatalog for YouTubeCatalog {
    fn list_videos(&self, channel_id: &str) -> meiri_core::Result<Vec<VideoRef>> {
        self.list(channel_id)
            .map_err(|e| MeiriError::Catalog(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelItem {
    content_details: ChannelContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelContentDetails {
    related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
struct RelatedPlaylists {
    uploads: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItem {
    content_details: PlaylistItemDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemDetails {
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
}

impl From<VideoItem> for VideoRef {
    fn from(item: VideoItem) -> Self {
        VideoRef::new(item.id, item.snippet.title)
    }
}
