use serde::{Deserialize, Serialize};

/// Snapshot of the remote player, as consumed by the controller.
///
/// Assembled from `GET /me/player` plus a separate liked-tracks lookup; the
/// controller replaces its playback state wholesale with each snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PlaybackSnapshot {
    pub track_name: String,
    pub artist_name: String,
    pub progress_ms: u32,
    pub duration_ms: u32,
    pub playing: bool,
    /// Opaque track identifier. Empty when the player has no item.
    pub track_id: String,
    pub liked: bool,
    pub volume_percent: u8,
}

/// A playback device known to the remote service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Device {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Raw device type as reported by the service ("Computer", "Smartphone", ...).
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "is_active", default)]
    pub active: bool,
    #[serde(rename = "is_restricted", default)]
    pub restricted: bool,
}

impl Device {
    /// A device we are willing to transfer playback to.
    ///
    /// Restricted devices reject playback commands outright; anything that is
    /// not a computer, smartphone, or speaker (group players, TVs, ...) is
    /// skipped as well.
    pub fn is_controllable(&self) -> bool {
        if self.restricted || self.id.is_empty() {
            return false;
        }
        matches!(
            self.kind.to_ascii_lowercase().as_str(),
            "computer" | "smartphone" | "speaker"
        )
    }
}

/// One track returned by a search, in relevance order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TrackHit {
    pub id: String,
    pub name: String,
    /// Primary artist only — enough for a one-line result list.
    pub artist: String,
    /// Playable URI, passed back verbatim to start playback.
    pub uri: String,
}
