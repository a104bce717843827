//! Inputs and outputs of the reducer.
//!
//! Every asynchronous source (timers, remote-call results, terminal input)
//! reports back as an [`Event`] on one channel; the reducer answers with
//! [`Effect`]s, which are the only way side effects happen.

use ratatui::crossterm::event::{KeyEvent, MouseEvent};

use spoterm_remote::model::{PlaybackSnapshot, TrackHit};

/// The two polling cadences of the adaptive poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollRate {
    /// Burst polling right after a user action.
    Fast,
    /// Steady-state polling.
    Normal,
}

impl PollRate {
    pub const fn millis(self) -> u64 {
        match self {
            PollRate::Fast => 100,
            PollRate::Normal => 1000,
        }
    }
}

/// Everything that can arrive at the event loop, in arrival order.
#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Poller tick; also the trigger for the next refresh request.
    Tick,
    /// Result of a state refresh. `None` means no active session or a
    /// transient failure — either way, nothing to show.
    Refresh(Option<PlaybackSnapshot>),
    /// Terminal result of a user command: status text or failure detail.
    CommandDone(Result<String, String>),
    /// Result of a search request.
    SearchDone(Result<Vec<TrackHit>, String>),
    /// A device listing came back completely empty.
    NoDevices,
    /// Scheduled status expiry; ignored unless `seq` still matches.
    ClearStatus(u64),
}

/// One remote operation, executed as exactly one asynchronous task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ensure a controllable device is active, then start playback.
    Resume,
    Pause,
    Next,
    Previous,
    SetVolume(u8),
    Seek(u32),
    Like(String),
    Unlike(String),
    PlayTrack(String),
    Search(String),
}

/// Work requested by the reducer, performed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Run(Command),
    /// Fetch a fresh playback snapshot.
    Refresh,
    /// Fire the next `Event::Tick` after the given rate's interval.
    ScheduleTick(PollRate),
    /// Fire `Event::ClearStatus(seq)` after the status timeout.
    ClearStatusAfter(u64),
    /// Best-effort launch of the local player client.
    LaunchPlayer,
    Quit,
}
