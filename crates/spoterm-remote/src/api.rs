//! Spotify Web API client.
//!
//! Thin, typed wrappers over the player/library/search endpoints. Every call
//! is independent and may fail; callers turn failures into events, never into
//! panics.

use reqwest::header::CONTENT_LENGTH;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::auth::TokenManager;
use crate::model::{Device, PlaybackSnapshot, TrackHit};

const API_BASE: &str = "https://api.spotify.com/v1";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("spotify returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("authentication: {0}")]
    Auth(String),
}

pub struct SpotifyClient {
    http: reqwest::Client,
    tokens: TokenManager,
}

impl SpotifyClient {
    pub fn new(tokens: TokenManager) -> Self {
        Self {
            http: reqwest::Client::new(),
            tokens,
        }
    }

    /// Current playback state, or `None` when no session is active
    /// (the service answers 204, or the player has no item loaded).
    ///
    /// `liked` is always false here; it comes from a separate
    /// [`is_liked`](Self::is_liked) lookup.
    pub async fn get_state(&self) -> Result<Option<PlaybackSnapshot>, ApiError> {
        let token = self.tokens.bearer().await?;
        let resp = self
            .http
            .get(format!("{}/me/player", API_BASE))
            .bearer_auth(token)
            .send()
            .await?;

        if resp.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let resp = Self::check(resp).await?;
        let body: PlayerStateBody = resp.json().await?;
        Ok(snapshot_from(body))
    }

    pub async fn is_liked(&self, track_id: &str) -> Result<bool, ApiError> {
        let token = self.tokens.bearer().await?;
        let resp = self
            .http
            .get(format!("{}/me/tracks/contains", API_BASE))
            .bearer_auth(token)
            .query(&[("ids", track_id)])
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        let flags: Vec<bool> = resp.json().await?;
        Ok(flags.first().copied().unwrap_or(false))
    }

    pub async fn play(&self) -> Result<(), ApiError> {
        self.put_empty("me/player/play", &[]).await
    }

    pub async fn pause(&self) -> Result<(), ApiError> {
        self.put_empty("me/player/pause", &[]).await
    }

    pub async fn next(&self) -> Result<(), ApiError> {
        let token = self.tokens.bearer().await?;
        let resp = self
            .http
            .post(format!("{}/me/player/next", API_BASE))
            .bearer_auth(token)
            .header(CONTENT_LENGTH, 0)
            .send()
            .await?;
        Self::check(resp).await.map(|_| ())
    }

    pub async fn previous(&self) -> Result<(), ApiError> {
        let token = self.tokens.bearer().await?;
        let resp = self
            .http
            .post(format!("{}/me/player/previous", API_BASE))
            .bearer_auth(token)
            .header(CONTENT_LENGTH, 0)
            .send()
            .await?;
        Self::check(resp).await.map(|_| ())
    }

    pub async fn set_volume(&self, percent: u8) -> Result<(), ApiError> {
        let percent = percent.min(100).to_string();
        self.put_empty("me/player/volume", &[("volume_percent", percent.as_str())])
            .await
    }

    pub async fn seek(&self, position_ms: u32) -> Result<(), ApiError> {
        let position = position_ms.to_string();
        self.put_empty("me/player/seek", &[("position_ms", position.as_str())])
            .await
    }

    pub async fn add_to_library(&self, track_id: &str) -> Result<(), ApiError> {
        let token = self.tokens.bearer().await?;
        let resp = self
            .http
            .put(format!("{}/me/tracks", API_BASE))
            .bearer_auth(token)
            .query(&[("ids", track_id)])
            .header(CONTENT_LENGTH, 0)
            .send()
            .await?;
        Self::check(resp).await.map(|_| ())
    }

    pub async fn remove_from_library(&self, track_id: &str) -> Result<(), ApiError> {
        let token = self.tokens.bearer().await?;
        let resp = self
            .http
            .delete(format!("{}/me/tracks", API_BASE))
            .bearer_auth(token)
            .query(&[("ids", track_id)])
            .send()
            .await?;
        Self::check(resp).await.map(|_| ())
    }

    /// Track search, relevance order, at most 10 hits.
    pub async fn search_tracks(&self, query: &str) -> Result<Vec<TrackHit>, ApiError> {
        let token = self.tokens.bearer().await?;
        let resp = self
            .http
            .get(format!("{}/search", API_BASE))
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track"), ("limit", "10")])
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        let body: SearchBody = resp.json().await?;
        let items = body.tracks.map(|t| t.items).unwrap_or_default();
        Ok(items.into_iter().filter_map(track_hit_from).collect())
    }

    pub async fn list_devices(&self) -> Result<Vec<Device>, ApiError> {
        let token = self.tokens.bearer().await?;
        let resp = self
            .http
            .get(format!("{}/me/player/devices", API_BASE))
            .bearer_auth(token)
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        let body: DevicesBody = resp.json().await?;
        Ok(body.devices)
    }

    pub async fn transfer_playback(&self, device_id: &str) -> Result<(), ApiError> {
        let token = self.tokens.bearer().await?;
        let resp = self
            .http
            .put(format!("{}/me/player", API_BASE))
            .bearer_auth(token)
            .json(&serde_json::json!({ "device_ids": [device_id], "play": false }))
            .send()
            .await?;
        Self::check(resp).await.map(|_| ())
    }

    pub async fn play_uri(&self, uri: &str) -> Result<(), ApiError> {
        let token = self.tokens.bearer().await?;
        let resp = self
            .http
            .put(format!("{}/me/player/play", API_BASE))
            .bearer_auth(token)
            .json(&serde_json::json!({ "uris": [uri] }))
            .send()
            .await?;
        Self::check(resp).await.map(|_| ())
    }

    // ── helpers ───────────────────────────────────────────────────────────────

    async fn put_empty(&self, path: &str, query: &[(&str, &str)]) -> Result<(), ApiError> {
        let token = self.tokens.bearer().await?;
        let resp = self
            .http
            .put(format!("{}/{}", API_BASE, path))
            .bearer_auth(token)
            .query(query)
            .header(CONTENT_LENGTH, 0)
            .send()
            .await?;
        Self::check(resp).await.map(|_| ())
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let text = resp.text().await.unwrap_or_default();
        // The API wraps errors as {"error":{"status":..,"message":..}}.
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|e| e.error.message)
            .unwrap_or(text);
        Err(ApiError::Status { status, message })
    }
}

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct PlayerStateBody {
    #[serde(default)]
    is_playing: bool,
    #[serde(default)]
    progress_ms: Option<u64>,
    #[serde(default)]
    device: Option<DeviceVolume>,
    #[serde(default)]
    item: Option<TrackItem>,
}

#[derive(Debug, Deserialize)]
struct DeviceVolume {
    #[serde(default)]
    volume_percent: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct TrackItem {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default)]
    duration_ms: u64,
    #[serde(default)]
    uri: String,
    #[serde(default)]
    artists: Vec<ArtistRef>,
}

#[derive(Debug, Deserialize)]
struct ArtistRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    tracks: Option<TracksPage>,
}

#[derive(Debug, Deserialize)]
struct TracksPage {
    items: Vec<TrackItem>,
}

#[derive(Debug, Deserialize)]
struct DevicesBody {
    devices: Vec<Device>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}

fn snapshot_from(body: PlayerStateBody) -> Option<PlaybackSnapshot> {
    let item = body.item?;
    let track_id = item.id?;
    let artist_name = item
        .artists
        .first()
        .map(|a| a.name.clone())
        .unwrap_or_default();
    Some(PlaybackSnapshot {
        track_name: item.name,
        artist_name,
        progress_ms: body.progress_ms.unwrap_or(0).min(u32::MAX as u64) as u32,
        duration_ms: item.duration_ms.min(u32::MAX as u64) as u32,
        playing: body.is_playing,
        track_id,
        liked: false,
        volume_percent: body
            .device
            .and_then(|d| d.volume_percent)
            .unwrap_or(0)
            .min(100),
    })
}

fn track_hit_from(item: TrackItem) -> Option<TrackHit> {
    let id = item.id?;
    let artist = item
        .artists
        .first()
        .map(|a| a.name.clone())
        .unwrap_or_default();
    Some(TrackHit {
        id,
        name: item.name,
        artist,
        uri: item.uri,
    })
}
