//! The single-owner state tree.
//!
//! Only the reducer in `update` writes to a `Model`; everything else reads.
//! Invariants (progress ≤ duration, volume ≤ 100) are enforced by the write
//! paths here, not re-checked by consumers.

use spoterm_remote::model::PlaybackSnapshot;

use crate::event::PollRate;
use crate::search::SearchState;

/// Number of fast ticks queued by a user action (one second at 100 ms).
pub const BURST_TICKS: u32 = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackState {
    /// Empty = no track.
    pub track_name: String,
    pub artist_name: String,
    pub playing: bool,
    /// Opaque identifier; empty = none.
    pub track_id: String,
    /// Meaningful only while `track_id` is non-empty.
    pub liked: bool,
    pub volume_percent: u8,
    progress_ms: u32,
    duration_ms: u32,
}

impl PlaybackState {
    pub fn progress_ms(&self) -> u32 {
        self.progress_ms
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn has_track(&self) -> bool {
        !self.track_id.is_empty()
    }

    /// Wholesale replacement from a refresh result.
    pub fn apply(&mut self, snap: &PlaybackSnapshot) {
        self.track_name = snap.track_name.clone();
        self.artist_name = snap.artist_name.clone();
        self.playing = snap.playing;
        self.track_id = snap.track_id.clone();
        self.liked = snap.liked;
        self.volume_percent = snap.volume_percent.min(100);
        self.duration_ms = snap.duration_ms;
        self.progress_ms = snap.progress_ms.min(snap.duration_ms);
    }

    /// Local progress estimate between refreshes; clamped to the duration and
    /// always overwritten by the next refresh result.
    pub fn advance_progress(&mut self, delta_ms: u32) {
        self.progress_ms = self
            .progress_ms
            .saturating_add(delta_ms)
            .min(self.duration_ms);
    }
}

/// Exactly one mode is active; search state lives and dies with its variant.
#[derive(Debug, Clone)]
pub enum UiMode {
    Normal,
    Help,
    Searching(SearchState),
}

impl UiMode {
    pub fn is_searching(&self) -> bool {
        matches!(self, UiMode::Searching(_))
    }
}

/// Adaptive polling schedule. Fast while burst ticks remain, normal after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSchedule {
    pub rate: PollRate,
    pub burst_ticks_remaining: u32,
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self {
            rate: PollRate::Normal,
            burst_ticks_remaining: 0,
        }
    }
}

impl PollSchedule {
    pub fn trigger_burst(&mut self) {
        self.burst_ticks_remaining = BURST_TICKS;
    }

    /// Decide the rate for the next tick, consuming one burst tick if any.
    pub fn next_tick_rate(&mut self) -> PollRate {
        self.rate = if self.burst_ticks_remaining > 0 {
            self.burst_ticks_remaining -= 1;
            PollRate::Fast
        } else {
            PollRate::Normal
        };
        self.rate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u16,
    pub height: u16,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// A transient status line. `seq` ties the message to its scheduled clear so
/// a newer message supersedes an older expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub seq: u64,
}

#[derive(Debug, Clone)]
pub struct Model {
    pub playback: PlaybackState,
    pub mode: UiMode,
    pub poll: PollSchedule,
    pub dims: Dimensions,
    pub status: Option<StatusMessage>,
    /// True once at least one track-bearing refresh has been applied; the
    /// local progress estimator stays off until then.
    pub has_playback_state: bool,
    /// The player launch is attempted at most once per process.
    pub launch_attempted: bool,
    status_seq: u64,
}

impl Model {
    pub fn new() -> Self {
        Self {
            playback: PlaybackState::default(),
            mode: UiMode::Normal,
            poll: PollSchedule::default(),
            dims: Dimensions::default(),
            status: Some(StatusMessage {
                text: "Use p/space to play/pause, n/b to skip.".to_string(),
                kind: StatusKind::Info,
                seq: 0,
            }),
            has_playback_state: false,
            launch_attempted: false,
            status_seq: 0,
        }
    }

    /// Replace the status line; returns the seq the clear must be scheduled
    /// against.
    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) -> u64 {
        self.status_seq += 1;
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
            seq: self.status_seq,
        });
        self.status_seq
    }

    /// Apply a scheduled clear; a stale seq (message replaced since) is a
    /// no-op.
    pub fn clear_status(&mut self, seq: u64) {
        if self.status.as_ref().map(|s| s.seq) == Some(seq) {
            self.status = None;
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}
