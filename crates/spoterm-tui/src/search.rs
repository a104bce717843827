//! Modal search sub-flow: query entry → results → selection → playback.

use ratatui::crossterm::event::{Event as CEvent, KeyCode, KeyEvent};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use spoterm_remote::model::TrackHit;

/// Results kept per search; anything beyond this from the remote is dropped.
pub const MAX_RESULTS: usize = 10;

/// What the reducer should do after a key was routed into search mode.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    None,
    /// Leave search mode, discarding all search state.
    Cancel,
    /// Issue a search request for the current query.
    RunSearch(String),
    /// Play the highlighted result and leave search mode.
    Play(TrackHit),
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub input: Input,
    /// At most [`MAX_RESULTS`], insertion order = relevance order.
    pub results: Vec<TrackHit>,
    /// 0 when `results` is empty, otherwise < `results.len()`.
    pub cursor: usize,
}

impl SearchState {
    /// Entering search always starts clean, whatever a prior session held.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        self.input.value()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SearchOutcome {
        match key.code {
            KeyCode::Esc => SearchOutcome::Cancel,
            KeyCode::Enter => {
                if let Some(hit) = self.results.get(self.cursor) {
                    SearchOutcome::Play(hit.clone())
                } else if !self.query().is_empty() {
                    SearchOutcome::RunSearch(self.query().to_string())
                } else {
                    SearchOutcome::None
                }
            }
            KeyCode::Up => {
                self.cursor_up();
                SearchOutcome::None
            }
            KeyCode::Down => {
                self.cursor_down();
                SearchOutcome::None
            }
            _ => {
                self.input.handle_event(&CEvent::Key(key));
                SearchOutcome::None
            }
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.results.len() {
            self.cursor += 1;
        }
    }

    /// Store a fresh result set: truncate to the cap, reset the cursor.
    pub fn apply_results(&mut self, mut hits: Vec<TrackHit>) {
        hits.truncate(MAX_RESULTS);
        self.results = hits;
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
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

    #[test]
    fn test_starts_clean() {
        let s = SearchState::new();
        assert!(s.query().is_empty());
        assert!(s.results.is_empty());
        assert_eq!(s.cursor, 0);
    }

    #[test]
    fn test_typing_builds_query() {
        let mut s = SearchState::new();
        for c in ['a', 'b', 'c'] {
            s.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(s.query(), "abc");
        s.handle_key(key(KeyCode::Backspace));
        assert_eq!(s.query(), "ab");
    }

    #[test]
    fn test_enter_with_query_runs_search() {
        let mut s = SearchState::new();
        s.handle_key(key(KeyCode::Char('x')));
        assert_eq!(
            s.handle_key(key(KeyCode::Enter)),
            SearchOutcome::RunSearch("x".into())
        );
    }

    #[test]
    fn test_enter_with_empty_query_is_noop() {
        let mut s = SearchState::new();
        assert_eq!(s.handle_key(key(KeyCode::Enter)), SearchOutcome::None);
    }

    #[test]
    fn test_enter_with_results_plays_selection() {
        let mut s = SearchState::new();
        s.apply_results(hits(3));
        s.cursor_down();
        match s.handle_key(key(KeyCode::Enter)) {
            SearchOutcome::Play(hit) => assert_eq!(hit.id, "id1"),
            other => panic!("expected Play, got {:?}", other),
        }
    }

    #[test]
    fn test_cursor_does_not_wrap() {
        let mut s = SearchState::new();
        s.apply_results(hits(2));
        s.cursor_up();
        assert_eq!(s.cursor, 0);
        s.cursor_down();
        s.cursor_down();
        assert_eq!(s.cursor, 1);
    }

    #[test]
    fn test_results_truncated_to_cap() {
        let mut s = SearchState::new();
        s.apply_results(hits(3));
        s.cursor = 2;
        s.apply_results(hits(15));
        assert_eq!(s.results.len(), MAX_RESULTS);
        assert_eq!(s.cursor, 0);
    }

    #[test]
    fn test_esc_cancels() {
        let mut s = SearchState::new();
        s.apply_results(hits(1));
        assert_eq!(s.handle_key(key(KeyCode::Esc)), SearchOutcome::Cancel);
    }
}
