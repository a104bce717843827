//! The dispatcher: one pure reducer over every event the loop can receive.
//!
//! `update` never performs I/O and never blocks; remote calls, timers and the
//! player launch come back out as [`Effect`]s for the app shell to execute.
//! It runs strictly serialized — the model has exactly one owner.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind,
};

use spoterm_remote::model::TrackHit;

use crate::event::{Command, Effect, Event, PollRate};
use crate::layout::{Button, HitTarget, Layout};
use crate::model::{Model, StatusKind, UiMode};
use crate::search::{SearchOutcome, SearchState};

/// Seek step for the arrow keys.
pub const SEEK_STEP_MS: u32 = 10_000;
/// Volume step for +/-.
pub const VOLUME_STEP: u8 = 10;
/// Status messages expire after this many seconds unless superseded.
pub const STATUS_CLEAR_SECS: u64 = 5;

/// Work to request when the controller starts: one refresh, one tick.
pub fn init_effects() -> Vec<Effect> {
    vec![Effect::Refresh, Effect::ScheduleTick(PollRate::Normal)]
}

pub fn update(model: &mut Model, event: Event) -> Vec<Effect> {
    match event {
        Event::Resize(width, height) => {
            model.dims.width = width;
            model.dims.height = height;
            vec![]
        }

        Event::Tick => handle_tick(model),

        Event::Refresh(Some(snap)) => {
            model.playback.apply(&snap);
            model.has_playback_state = true;
            vec![]
        }
        // No active session, or the poll failed: leave the displayed state
        // alone rather than flickering it away.
        Event::Refresh(None) => status(model, StatusKind::Info, "Waiting for playback..."),

        Event::CommandDone(Ok(text)) => status(model, StatusKind::Info, text),
        Event::CommandDone(Err(detail)) => {
            status(model, StatusKind::Error, format!("Error: {}", detail))
        }

        Event::SearchDone(result) => handle_search_done(model, result),

        Event::NoDevices => {
            if !model.launch_attempted {
                model.launch_attempted = true;
                let mut effects = vec![Effect::LaunchPlayer];
                effects.extend(status(
                    model,
                    StatusKind::Info,
                    "No devices found. Launching Spotify...",
                ));
                effects
            } else {
                status(
                    model,
                    StatusKind::Error,
                    "Error: no devices found; open Spotify on a device",
                )
            }
        }

        Event::ClearStatus(seq) => {
            model.clear_status(seq);
            vec![]
        }

        Event::Key(key) => handle_key(model, key),
        Event::Mouse(mouse) => handle_mouse(model, mouse),
    }
}

// ── Adaptive poller ───────────────────────────────────────────────────────────

fn handle_tick(model: &mut Model) -> Vec<Effect> {
    let rate = model.poll.next_tick_rate();
    if rate == PollRate::Normal && model.playback.playing && model.has_playback_state {
        // Smooth the displayed position between refreshes. Burst ticks skip
        // this; the next refresh overwrites the estimate either way.
        model
            .playback
            .advance_progress(PollRate::Normal.millis() as u32);
    }
    vec![Effect::Refresh, Effect::ScheduleTick(rate)]
}

// ── Input routing ─────────────────────────────────────────────────────────────

fn handle_key(model: &mut Model, key: KeyEvent) -> Vec<Effect> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![Effect::Quit];
    }

    if model.mode.is_searching() {
        return handle_search_key(model, key);
    }
    if matches!(model.mode, UiMode::Help) {
        return handle_help_key(model, key);
    }
    handle_normal_key(model, key)
}

fn handle_search_key(model: &mut Model, key: KeyEvent) -> Vec<Effect> {
    let outcome = match &mut model.mode {
        UiMode::Searching(search) => search.handle_key(key),
        _ => return vec![],
    };
    match outcome {
        SearchOutcome::Cancel => {
            model.mode = UiMode::Normal;
            vec![]
        }
        SearchOutcome::Play(hit) => {
            model.mode = UiMode::Normal;
            vec![Effect::Run(Command::PlayTrack(hit.uri))]
        }
        SearchOutcome::RunSearch(query) => vec![Effect::Run(Command::Search(query))],
        SearchOutcome::None => vec![],
    }
}

fn handle_help_key(model: &mut Model, key: KeyEvent) -> Vec<Effect> {
    match key.code {
        KeyCode::Char('?') | KeyCode::Esc => {
            model.mode = UiMode::Normal;
            vec![]
        }
        KeyCode::Char('q') => vec![Effect::Quit],
        // The help screen consumes everything else.
        _ => vec![],
    }
}

fn handle_normal_key(model: &mut Model, key: KeyEvent) -> Vec<Effect> {
    match key.code {
        KeyCode::Char('/') | KeyCode::Char('s') => {
            model.mode = UiMode::Searching(SearchState::new());
            vec![]
        }

        KeyCode::Char('?') => {
            model.mode = UiMode::Help;
            vec![]
        }

        KeyCode::Char('p') | KeyCode::Char(' ') => play_pause(model),
        KeyCode::Char('n') => control(model, Command::Next),
        KeyCode::Char('b') => control(model, Command::Previous),
        KeyCode::Char('l') => like_toggle(model),

        KeyCode::Char('+') | KeyCode::Char('=') => {
            let volume = (model.playback.volume_percent + VOLUME_STEP).min(100);
            control(model, Command::SetVolume(volume))
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            let volume = model.playback.volume_percent.saturating_sub(VOLUME_STEP);
            control(model, Command::SetVolume(volume))
        }

        KeyCode::Left => {
            if model.playback.progress_ms() > 0 {
                let target = model.playback.progress_ms().saturating_sub(SEEK_STEP_MS);
                control(model, Command::Seek(target))
            } else {
                vec![]
            }
        }
        KeyCode::Right => {
            let duration = model.playback.duration_ms();
            if duration > 0 {
                let target = model
                    .playback
                    .progress_ms()
                    .saturating_add(SEEK_STEP_MS)
                    .min(duration);
                control(model, Command::Seek(target))
            } else {
                vec![]
            }
        }

        KeyCode::Char('q') => vec![Effect::Quit],
        _ => vec![],
    }
}

fn handle_mouse(model: &mut Model, mouse: MouseEvent) -> Vec<Effect> {
    // Wheel scrolling is only meaningful on a result list.
    if let UiMode::Searching(search) = &mut model.mode {
        if !search.results.is_empty() {
            match mouse.kind {
                MouseEventKind::ScrollUp => search.cursor_up(),
                MouseEventKind::ScrollDown => search.cursor_down(),
                _ => {}
            }
        }
        return vec![];
    }

    if !matches!(model.mode, UiMode::Normal) {
        return vec![];
    }

    // Only a release triggers anything; a press would double-fire.
    if !matches!(mouse.kind, MouseEventKind::Up(_)) {
        return vec![];
    }

    let layout = Layout::compute(&model.playback, model.dims);
    match layout.hit_test(mouse.column, mouse.row) {
        Some(HitTarget::Button(Button::Search)) => {
            model.mode = UiMode::Searching(SearchState::new());
            vec![]
        }
        Some(HitTarget::Button(Button::PlayPause)) => play_pause(model),
        Some(HitTarget::Button(Button::Previous)) => control(model, Command::Previous),
        Some(HitTarget::Button(Button::Next)) => control(model, Command::Next),
        Some(HitTarget::Button(Button::Like)) => like_toggle(model),
        Some(HitTarget::Seek(ratio)) => {
            let duration = model.playback.duration_ms();
            if duration > 0 {
                let target = ((ratio * f64::from(duration)).round() as u32).min(duration);
                control(model, Command::Seek(target))
            } else {
                vec![]
            }
        }
        None => vec![],
    }
}

// ── Action helpers ────────────────────────────────────────────────────────────

/// A user control action: burst the poller so the display catches up fast,
/// and hand the command to the executor.
fn control(model: &mut Model, command: Command) -> Vec<Effect> {
    model.poll.trigger_burst();
    vec![Effect::Run(command)]
}

/// Optimistic play/pause: decide from the local flag, not a remote round
/// trip, so the action is responsive before the next refresh confirms it.
fn play_pause(model: &mut Model) -> Vec<Effect> {
    let command = if model.playback.playing {
        Command::Pause
    } else {
        Command::Resume
    };
    control(model, command)
}

fn like_toggle(model: &mut Model) -> Vec<Effect> {
    if !model.playback.has_track() {
        return vec![];
    }
    let id = model.playback.track_id.clone();
    let command = if model.playback.liked {
        Command::Unlike(id)
    } else {
        Command::Like(id)
    };
    control(model, command)
}

fn handle_search_done(model: &mut Model, result: Result<Vec<TrackHit>, String>) -> Vec<Effect> {
    // Results for a cancelled search arrive after the state was discarded;
    // drop them.
    if !model.mode.is_searching() {
        return vec![];
    }
    match result {
        Ok(hits) if hits.is_empty() => status(model, StatusKind::Info, "No results found"),
        Ok(hits) => {
            if let UiMode::Searching(search) = &mut model.mode {
                search.apply_results(hits);
            }
            vec![]
        }
        // A failed search keeps editing active so the user can retry.
        Err(detail) => status(model, StatusKind::Info, format!("Search failed: {}", detail)),
    }
}

fn status(model: &mut Model, kind: StatusKind, text: impl Into<String>) -> Vec<Effect> {
    let seq = model.set_status(kind, text);
    vec![Effect::ClearStatusAfter(seq)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout;
    use crate::model::BURST_TICKS;
    use ratatui::crossterm::event::MouseButton;
    use spoterm_remote::model::{PlaybackSnapshot, TrackHit};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn release(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn press(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn wheel(down: bool) -> Event {
        Event::Mouse(MouseEvent {
            kind: if down {
                MouseEventKind::ScrollDown
            } else {
                MouseEventKind::ScrollUp
            },
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn snapshot(playing: bool, progress: u32, duration: u32) -> PlaybackSnapshot {
        PlaybackSnapshot {
            track_name: "Song".into(),
            artist_name: "Artist".into(),
            progress_ms: progress,
            duration_ms: duration,
            playing,
            track_id: "track1".into(),
            liked: false,
            volume_percent: 50,
        }
    }

    fn model_with_track(playing: bool, progress: u32, duration: u32) -> Model {
        let mut m = Model::new();
        update(&mut m, Event::Refresh(Some(snapshot(playing, progress, duration))));
        m
    }

    fn hits(n: usize) -> Vec<TrackHit> {
        (0..n)
            .map(|i| TrackHit {
                id: format!("id{}", i),
                name: format!("track {}", i),
                artist: "artist".into(),
                uri: format!("spotify:track:id{}", i),
            })
            .collect()
    }

    // ── Poller ────────────────────────────────────────────────────────────────

    #[test]
    fn test_burst_resets_to_ten_and_drains_monotonically() {
        let mut m = model_with_track(true, 0, 60_000);
        update(&mut m, key(KeyCode::Char('n')));
        assert_eq!(m.poll.burst_ticks_remaining, BURST_TICKS);

        let mut previous = m.poll.burst_ticks_remaining;
        for _ in 0..BURST_TICKS + 3 {
            let effects = update(&mut m, Event::Tick);
            assert!(m.poll.burst_ticks_remaining <= previous);
            previous = m.poll.burst_ticks_remaining;
            assert!(effects.contains(&Effect::Refresh));
        }
        assert_eq!(m.poll.burst_ticks_remaining, 0);
    }

    #[test]
    fn test_tick_rate_follows_burst() {
        let mut m = model_with_track(true, 0, 60_000);
        update(&mut m, key(KeyCode::Char('n')));
        let effects = update(&mut m, Event::Tick);
        assert!(effects.contains(&Effect::ScheduleTick(PollRate::Fast)));

        m.poll.burst_ticks_remaining = 0;
        let effects = update(&mut m, Event::Tick);
        assert!(effects.contains(&Effect::ScheduleTick(PollRate::Normal)));
    }

    #[test]
    fn test_normal_tick_advances_progress_and_clamps() {
        let mut m = model_with_track(true, 59_500, 60_000);
        update(&mut m, Event::Tick);
        assert_eq!(m.playback.progress_ms(), 60_000);
        update(&mut m, Event::Tick);
        assert_eq!(m.playback.progress_ms(), 60_000);
    }

    #[test]
    fn test_burst_tick_does_not_advance_progress() {
        let mut m = model_with_track(true, 1000, 60_000);
        m.poll.trigger_burst();
        update(&mut m, Event::Tick);
        assert_eq!(m.playback.progress_ms(), 1000);
    }

    #[test]
    fn test_paused_tick_does_not_advance_progress() {
        let mut m = model_with_track(false, 1000, 60_000);
        update(&mut m, Event::Tick);
        assert_eq!(m.playback.progress_ms(), 1000);
    }

    // ── Volume / seek clamping ────────────────────────────────────────────────

    #[test]
    fn test_volume_up_clamps_at_hundred() {
        let mut m = model_with_track(true, 0, 1000);
        m.playback.volume_percent = 95;
        let effects = update(&mut m, key(KeyCode::Char('+')));
        assert_eq!(effects, vec![Effect::Run(Command::SetVolume(100))]);
        assert_eq!(m.poll.burst_ticks_remaining, BURST_TICKS);
    }

    #[test]
    fn test_volume_down_clamps_at_zero() {
        let mut m = model_with_track(true, 0, 1000);
        m.playback.volume_percent = 5;
        let effects = update(&mut m, key(KeyCode::Char('-')));
        assert_eq!(effects, vec![Effect::Run(Command::SetVolume(0))]);
    }

    #[test]
    fn test_backward_seek_clamps_at_zero() {
        let mut m = model_with_track(true, 3000, 60_000);
        let effects = update(&mut m, key(KeyCode::Left));
        assert_eq!(effects, vec![Effect::Run(Command::Seek(0))]);
    }

    #[test]
    fn test_forward_seek_clamps_at_duration() {
        let mut m = model_with_track(true, 55_000, 60_000);
        let effects = update(&mut m, key(KeyCode::Right));
        assert_eq!(effects, vec![Effect::Run(Command::Seek(60_000))]);
    }

    // ── Optimistic play/pause ─────────────────────────────────────────────────

    #[test]
    fn test_play_pause_uses_local_flag() {
        let mut m = model_with_track(true, 0, 1000);
        assert_eq!(
            update(&mut m, key(KeyCode::Char('p'))),
            vec![Effect::Run(Command::Pause)]
        );

        let mut m = model_with_track(false, 0, 1000);
        assert_eq!(
            update(&mut m, key(KeyCode::Char(' '))),
            vec![Effect::Run(Command::Resume)]
        );
        assert_eq!(m.poll.burst_ticks_remaining, BURST_TICKS);
    }

    #[test]
    fn test_like_requires_track() {
        let mut m = Model::new();
        assert!(update(&mut m, key(KeyCode::Char('l'))).is_empty());

        let mut m = model_with_track(true, 0, 1000);
        assert_eq!(
            update(&mut m, key(KeyCode::Char('l'))),
            vec![Effect::Run(Command::Like("track1".into()))]
        );

        m.playback.liked = true;
        assert_eq!(
            update(&mut m, key(KeyCode::Char('l'))),
            vec![Effect::Run(Command::Unlike("track1".into()))]
        );
    }

    // ── Pointer hit-testing ───────────────────────────────────────────────────

    #[test]
    fn test_release_on_next_button_dispatches_next() {
        let mut m = model_with_track(true, 0, 60_000);
        let l = Layout::compute(&m.playback, m.dims);
        let next = l
            .buttons
            .iter()
            .find(|b| b.button == layout::Button::Next)
            .unwrap()
            .x
            .clone();

        let effects = update(&mut m, release(next.start + 1, layout::CONTROL_ROW));
        assert_eq!(effects, vec![Effect::Run(Command::Next)]);
        assert_eq!(m.poll.burst_ticks_remaining, BURST_TICKS);
    }

    #[test]
    fn test_release_outside_any_button_is_noop() {
        let mut m = model_with_track(true, 0, 60_000);
        let l = Layout::compute(&m.playback, m.dims);
        let next = l
            .buttons
            .iter()
            .find(|b| b.button == layout::Button::Next)
            .unwrap()
            .x
            .clone();

        assert!(update(&mut m, release(next.end, layout::CONTROL_ROW)).is_empty());
        assert_eq!(m.poll.burst_ticks_remaining, 0);
    }

    #[test]
    fn test_press_never_fires() {
        let mut m = model_with_track(true, 0, 60_000);
        let l = Layout::compute(&m.playback, m.dims);
        let next = l
            .buttons
            .iter()
            .find(|b| b.button == layout::Button::Next)
            .unwrap()
            .x
            .clone();
        assert!(update(&mut m, press(next.start, layout::CONTROL_ROW)).is_empty());
    }

    #[test]
    fn test_release_on_bar_seeks_by_fraction() {
        let mut m = model_with_track(true, 0, 100_000);
        let l = Layout::compute(&m.playback, m.dims);
        let p = l.progress.unwrap();

        let effects = update(&mut m, release(p.bar_x, layout::PROGRESS_ROW));
        assert_eq!(effects, vec![Effect::Run(Command::Seek(0))]);

        let mid = p.bar_x + p.bar_width / 2;
        let effects = update(&mut m, release(mid, layout::PROGRESS_ROW));
        match &effects[..] {
            [Effect::Run(Command::Seek(target))] => {
                assert!(*target > 40_000 && *target < 60_000, "target {}", target);
            }
            other => panic!("expected seek, got {:?}", other),
        }
    }

    #[test]
    fn test_search_button_opens_search() {
        let mut m = model_with_track(true, 0, 60_000);
        let l = Layout::compute(&m.playback, m.dims);
        let search = l
            .buttons
            .iter()
            .find(|b| b.button == layout::Button::Search)
            .unwrap()
            .x
            .clone();
        let effects = update(&mut m, release(search.start + 2, layout::CONTROL_ROW));
        assert!(effects.is_empty());
        assert!(m.mode.is_searching());
        // Opening search is not a control action; no burst.
        assert_eq!(m.poll.burst_ticks_remaining, 0);
    }

    // ── Search flow ───────────────────────────────────────────────────────────

    #[test]
    fn test_search_enters_clean_and_cancel_clears() {
        let mut m = Model::new();
        update(&mut m, key(KeyCode::Char('/')));
        update(&mut m, key(KeyCode::Char('a')));
        update(&mut m, Event::SearchDone(Ok(hits(4))));
        update(&mut m, key(KeyCode::Esc));
        assert!(matches!(m.mode, UiMode::Normal));

        // Re-entering starts from scratch regardless of the prior session.
        update(&mut m, key(KeyCode::Char('s')));
        match &m.mode {
            UiMode::Searching(s) => {
                assert!(s.query().is_empty());
                assert!(s.results.is_empty());
                assert_eq!(s.cursor, 0);
            }
            other => panic!("expected search mode, got {:?}", other),
        }
    }

    #[test]
    fn test_fifteen_results_truncate_to_ten() {
        let mut m = Model::new();
        update(&mut m, key(KeyCode::Char('/')));
        update(&mut m, Event::SearchDone(Ok(hits(15))));
        match &m.mode {
            UiMode::Searching(s) => {
                assert_eq!(s.results.len(), 10);
                assert_eq!(s.cursor, 0);
            }
            other => panic!("expected search mode, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_results_keep_editing_with_status() {
        let mut m = Model::new();
        update(&mut m, key(KeyCode::Char('/')));
        update(&mut m, key(KeyCode::Char('z')));
        let effects = update(&mut m, Event::SearchDone(Ok(vec![])));
        assert!(m.mode.is_searching());
        assert_eq!(m.status.as_ref().unwrap().text, "No results found");
        assert_eq!(m.status.as_ref().unwrap().kind, StatusKind::Info);
        assert!(matches!(effects[..], [Effect::ClearStatusAfter(_)]));
    }

    #[test]
    fn test_search_failure_is_plain_status_and_keeps_editing() {
        let mut m = Model::new();
        update(&mut m, key(KeyCode::Char('/')));
        update(&mut m, Event::SearchDone(Err("timeout".into())));
        assert!(m.mode.is_searching());
        assert_eq!(m.status.as_ref().unwrap().kind, StatusKind::Info);
    }

    #[test]
    fn test_stale_results_after_cancel_are_dropped() {
        let mut m = Model::new();
        update(&mut m, key(KeyCode::Char('/')));
        update(&mut m, key(KeyCode::Esc));
        assert!(update(&mut m, Event::SearchDone(Ok(hits(3)))).is_empty());
        assert!(matches!(m.mode, UiMode::Normal));
    }

    #[test]
    fn test_enter_plays_selection_and_exits() {
        let mut m = Model::new();
        update(&mut m, key(KeyCode::Char('/')));
        update(&mut m, Event::SearchDone(Ok(hits(3))));
        update(&mut m, key(KeyCode::Down));
        let effects = update(&mut m, key(KeyCode::Enter));
        assert_eq!(
            effects,
            vec![Effect::Run(Command::PlayTrack("spotify:track:id1".into()))]
        );
        assert!(matches!(m.mode, UiMode::Normal));
    }

    #[test]
    fn test_wheel_scrolls_results_without_wrapping() {
        let mut m = Model::new();
        update(&mut m, key(KeyCode::Char('/')));
        update(&mut m, Event::SearchDone(Ok(hits(2))));
        update(&mut m, wheel(true));
        update(&mut m, wheel(true));
        match &m.mode {
            UiMode::Searching(s) => assert_eq!(s.cursor, 1),
            other => panic!("expected search mode, got {:?}", other),
        }
        update(&mut m, wheel(false));
        update(&mut m, wheel(false));
        match &m.mode {
            UiMode::Searching(s) => assert_eq!(s.cursor, 0),
            other => panic!("expected search mode, got {:?}", other),
        }
    }

    // ── Status lifecycle ──────────────────────────────────────────────────────

    #[test]
    fn test_refresh_none_sets_waiting_and_keeps_fields() {
        let mut m = model_with_track(true, 5000, 60_000);
        let effects = update(&mut m, Event::Refresh(None));
        assert_eq!(m.status.as_ref().unwrap().text, "Waiting for playback...");
        assert_eq!(m.playback.track_name, "Song");
        assert_eq!(m.playback.progress_ms(), 5000);
        assert!(matches!(effects[..], [Effect::ClearStatusAfter(_)]));
    }

    #[test]
    fn test_command_results_become_status() {
        let mut m = Model::new();
        update(&mut m, Event::CommandDone(Ok("Resumed playback.".into())));
        assert_eq!(m.status.as_ref().unwrap().text, "Resumed playback.");
        assert_eq!(m.status.as_ref().unwrap().kind, StatusKind::Info);

        update(&mut m, Event::CommandDone(Err("boom".into())));
        assert_eq!(m.status.as_ref().unwrap().text, "Error: boom");
        assert_eq!(m.status.as_ref().unwrap().kind, StatusKind::Error);
    }

    #[test]
    fn test_newer_status_supersedes_scheduled_clear() {
        let mut m = Model::new();
        let first = update(&mut m, Event::CommandDone(Ok("one".into())));
        let Effect::ClearStatusAfter(first_seq) = first[0] else {
            panic!("expected clear effect");
        };
        update(&mut m, Event::CommandDone(Ok("two".into())));
        update(&mut m, Event::ClearStatus(first_seq));
        assert_eq!(m.status.as_ref().unwrap().text, "two");
    }

    // ── Devices / launch ──────────────────────────────────────────────────────

    #[test]
    fn test_launch_player_attempted_once() {
        let mut m = Model::new();
        let effects = update(&mut m, Event::NoDevices);
        assert!(effects.contains(&Effect::LaunchPlayer));
        assert!(m.launch_attempted);

        let effects = update(&mut m, Event::NoDevices);
        assert!(!effects.contains(&Effect::LaunchPlayer));
        assert_eq!(m.status.as_ref().unwrap().kind, StatusKind::Error);
    }

    // ── Modes / quitting ──────────────────────────────────────────────────────

    #[test]
    fn test_help_consumes_control_keys() {
        let mut m = model_with_track(true, 0, 60_000);
        update(&mut m, key(KeyCode::Char('?')));
        assert!(matches!(m.mode, UiMode::Help));
        assert!(update(&mut m, key(KeyCode::Char('n'))).is_empty());
        assert_eq!(m.poll.burst_ticks_remaining, 0);
        update(&mut m, key(KeyCode::Esc));
        assert!(matches!(m.mode, UiMode::Normal));
    }

    #[test]
    fn test_quit_keys() {
        let mut m = Model::new();
        assert_eq!(update(&mut m, key(KeyCode::Char('q'))), vec![Effect::Quit]);

        let mut m = Model::new();
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(update(&mut m, ctrl_c), vec![Effect::Quit]);
    }

    #[test]
    fn test_init_effects() {
        assert_eq!(
            init_effects(),
            vec![Effect::Refresh, Effect::ScheduleTick(PollRate::Normal)]
        );
    }
}
