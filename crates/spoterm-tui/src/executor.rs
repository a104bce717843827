//! Executes reducer-emitted commands against the remote service.
//!
//! Each command becomes one spawned task delivering exactly one event back to
//! the loop; the loop never blocks on a remote call. Failures are data, not
//! panics.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use spoterm_remote::api::{ApiError, SpotifyClient};
use spoterm_remote::model::Device;

use crate::event::{Command, Event};

/// What the device-activation policy decided for a resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumePlan {
    /// A controllable device is already active; just play.
    AlreadyActive,
    /// Transfer playback to this device first.
    Transfer(String),
    /// The listing was completely empty.
    NoDevices,
    /// Devices exist, but none we can control.
    NoneControllable,
}

/// Decide how to get a controllable device active, from a fresh listing.
/// Runs on every resume — the user may have switched targets externally.
pub fn resume_plan(devices: &[Device]) -> ResumePlan {
    if devices.is_empty() {
        return ResumePlan::NoDevices;
    }
    if devices.iter().any(|d| d.is_controllable() && d.active) {
        return ResumePlan::AlreadyActive;
    }
    match devices.iter().find(|d| d.is_controllable()) {
        Some(d) => ResumePlan::Transfer(d.id.clone()),
        None => ResumePlan::NoneControllable,
    }
}

pub struct Executor {
    client: Arc<SpotifyClient>,
    tx: mpsc::Sender<Event>,
}

impl Executor {
    pub fn new(client: Arc<SpotifyClient>, tx: mpsc::Sender<Event>) -> Self {
        Self { client, tx }
    }

    /// Spawn one task for `command`, reporting one terminal event.
    pub fn run(&self, command: Command) {
        debug!("executor: {:?}", command);
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let event = execute(&client, command).await;
            let _ = tx.send(event).await;
        });
    }

    /// Spawn a refresh task: current state plus the liked flag for its track.
    pub fn refresh(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let event = fetch_state(&client).await;
            let _ = tx.send(event).await;
        });
    }
}

async fn fetch_state(client: &SpotifyClient) -> Event {
    match client.get_state().await {
        Ok(Some(mut snap)) => {
            // A failed liked-lookup degrades to "not liked" rather than
            // discarding the whole snapshot.
            snap.liked = client.is_liked(&snap.track_id).await.unwrap_or(false);
            Event::Refresh(Some(snap))
        }
        Ok(None) => Event::Refresh(None),
        Err(e) => {
            // Routine polling gap; the reducer keeps the previous display.
            debug!("refresh failed: {}", e);
            Event::Refresh(None)
        }
    }
}

async fn execute(client: &SpotifyClient, command: Command) -> Event {
    match command {
        Command::Resume => match resume(client).await {
            Ok(message) => Event::CommandDone(Ok(message)),
            Err(ResumeError::NoDevices) => Event::NoDevices,
            Err(ResumeError::NoneControllable) => {
                Event::CommandDone(Err("no controllable devices available".to_string()))
            }
            Err(ResumeError::Api(e)) => Event::CommandDone(Err(e.to_string())),
        },
        Command::Pause => done(client.pause().await, "Paused."),
        Command::Next => done(client.next().await, "Skipped to next track."),
        Command::Previous => done(client.previous().await, "Went back to previous track."),
        Command::SetVolume(percent) => {
            let message = format!("Volume: {}%", percent);
            match client.set_volume(percent).await {
                Ok(()) => Event::CommandDone(Ok(message)),
                Err(e) => Event::CommandDone(Err(e.to_string())),
            }
        }
        Command::Seek(position_ms) => match client.seek(position_ms).await {
            // A seek answers with a fresh snapshot instead of a status line;
            // the progress bar jumping is feedback enough.
            Ok(()) => fetch_state(client).await,
            Err(e) => Event::CommandDone(Err(e.to_string())),
        },
        Command::Like(track_id) => {
            done(client.add_to_library(&track_id).await, "Added to Liked Songs.")
        }
        Command::Unlike(track_id) => done(
            client.remove_from_library(&track_id).await,
            "Removed from Liked Songs.",
        ),
        Command::PlayTrack(uri) => done(client.play_uri(&uri).await, "Playing selected track"),
        Command::Search(query) => match client.search_tracks(&query).await {
            Ok(hits) => Event::SearchDone(Ok(hits)),
            Err(e) => Event::SearchDone(Err(e.to_string())),
        },
    }
}

fn done(result: Result<(), ApiError>, message: &str) -> Event {
    match result {
        Ok(()) => Event::CommandDone(Ok(message.to_string())),
        Err(e) => Event::CommandDone(Err(e.to_string())),
    }
}

enum ResumeError {
    NoDevices,
    NoneControllable,
    Api(ApiError),
}

async fn resume(client: &SpotifyClient) -> Result<String, ResumeError> {
    let devices = client.list_devices().await.map_err(ResumeError::Api)?;

    match resume_plan(&devices) {
        ResumePlan::NoDevices => return Err(ResumeError::NoDevices),
        ResumePlan::NoneControllable => return Err(ResumeError::NoneControllable),
        ResumePlan::AlreadyActive => {}
        ResumePlan::Transfer(device_id) => {
            warn!("no active device, transferring playback to {}", device_id);
            client
                .transfer_playback(&device_id)
                .await
                .map_err(ResumeError::Api)?;
        }
    }

    // Only issue play if the player is not already running; replaying an
    // active session restarts the track on some clients.
    let playing = client
        .get_state()
        .await
        .map_err(ResumeError::Api)?
        .map(|s| s.playing)
        .unwrap_or(false);
    if !playing {
        client.play().await.map_err(ResumeError::Api)?;
    }

    Ok("Resumed playback.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(id: &str, kind: &str, active: bool, restricted: bool) -> Device {
        Device {
            id: id.to_string(),
            name: id.to_string(),
            kind: kind.to_string(),
            active,
            restricted,
        }
    }

    #[test]
    fn test_empty_listing_means_no_devices() {
        assert_eq!(resume_plan(&[]), ResumePlan::NoDevices);
    }

    #[test]
    fn test_active_controllable_device_needs_no_transfer() {
        let devices = vec![
            device("a", "Computer", false, false),
            device("b", "Smartphone", true, false),
        ];
        assert_eq!(resume_plan(&devices), ResumePlan::AlreadyActive);
    }

    #[test]
    fn test_transfers_to_first_controllable_when_none_active() {
        // The spec scenario: nothing active, one valid target.
        let devices = vec![
            device("tv", "CastVideo", false, false),
            device("desk", "Computer", false, false),
        ];
        assert_eq!(
            resume_plan(&devices),
            ResumePlan::Transfer("desk".to_string())
        );
    }

    #[test]
    fn test_restricted_and_exotic_devices_are_skipped() {
        let devices = vec![
            device("locked", "Computer", true, true),
            device("tv", "TV", true, false),
        ];
        assert_eq!(resume_plan(&devices), ResumePlan::NoneControllable);
    }

    #[test]
    fn test_active_but_restricted_device_does_not_count() {
        let devices = vec![
            device("locked", "Speaker", true, true),
            device("desk", "Computer", false, false),
        ];
        assert_eq!(
            resume_plan(&devices),
            ResumePlan::Transfer("desk".to_string())
        );
    }
}
