//! Screen geometry, shared by the renderer and the pointer hit-tester.
//!
//! Everything here is derived per frame/event from the live state and the
//! terminal dimensions. The renderer places strings at exactly the
//! coordinates computed here, so a pointer hit can be resolved against the
//! same numbers — there is no second coordinate table to drift.

use std::ops::Range;

use unicode_width::UnicodeWidthStr;

use crate::model::{Dimensions, PlaybackState};

/// Rows of the normal screen, top to bottom:
/// header(1) + container top border(1) + track(1) + artist(1) + blank(1),
/// then the progress bar and the control row.
pub const TRACK_ROW: u16 = 2;
pub const ARTIST_ROW: u16 = 3;
pub const PROGRESS_ROW: u16 = 5;
pub const CONTROL_ROW: u16 = 6;
pub const VOLUME_ROW: u16 = 7;
pub const STATUS_ROW: u16 = 9;

/// One border cell on each side of the container.
const BORDER_WIDTH: u16 = 2;
/// First column inside the container.
const CONTENT_X0: u16 = 1;
/// Columns reserved next to the progress bar for borders, padding and the
/// `m:ss/m:ss` timer text.
const PROGRESS_RESERVE: u16 = 4 + 15;
const MIN_BAR_WIDTH: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Search,
    PlayPause,
    Previous,
    Next,
    Like,
}

#[derive(Debug, Clone)]
pub struct ButtonBounds {
    pub button: Button,
    /// Absolute terminal columns, `start..end`.
    pub x: Range<u16>,
}

#[derive(Debug, Clone)]
pub struct ProgressGeometry {
    /// Column of the first timer character.
    pub line_x: u16,
    /// `m:ss/m:ss ` — included here because its width shifts the bar.
    pub timer: String,
    /// Column of the first bar cell.
    pub bar_x: u16,
    pub bar_width: u16,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub control_row: u16,
    pub progress_row: u16,
    /// Column of the first control-string character.
    pub controls_x: u16,
    /// The fully assembled control string, as rendered.
    pub controls: String,
    /// Display width of `controls`.
    pub controls_width: u16,
    pub buttons: Vec<ButtonBounds>,
    /// Absent while no track (duration 0) is loaded.
    pub progress: Option<ProgressGeometry>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitTarget {
    Button(Button),
    /// Position within the progress bar as a fraction in [0, 1].
    Seek(f64),
}

pub fn play_icon(playing: bool) -> &'static str {
    if playing {
        "⏸"
    } else {
        "▶"
    }
}

pub fn heart_icon(liked: bool) -> &'static str {
    if liked {
        "♥"
    } else {
        "♡"
    }
}

/// The control row as labeled segments; `None` segments are dead space.
fn control_segments(playing: bool, liked: bool) -> Vec<(Option<Button>, String)> {
    vec![
        (None, " ".to_string()),
        (Some(Button::Search), "[ 🔍 Search ]".to_string()),
        (None, "  ".to_string()),
        (Some(Button::PlayPause), format!("[ {} ]", play_icon(playing))),
        (None, "  ".to_string()),
        (Some(Button::Previous), "[ ⏮ ]".to_string()),
        (None, "  ".to_string()),
        (Some(Button::Next), "[ ⏭ ]".to_string()),
        (None, "  ".to_string()),
        (Some(Button::Like), format!("[ {} ]", heart_icon(liked))),
        (None, " ".to_string()),
    ]
}

pub fn fmt_time(ms: u32) -> String {
    let total_sec = ms / 1000;
    format!("{}:{:02}", total_sec / 60, total_sec % 60)
}

impl Layout {
    /// Derive the full geometry for the current state and terminal size.
    pub fn compute(playback: &PlaybackState, dims: Dimensions) -> Self {
        let width = if dims.width == 0 { 80 } else { dims.width };
        let container_width = width.saturating_sub(BORDER_WIDTH);

        // Control row: centered within the container, buttons at fixed
        // character offsets inside the assembled string.
        let segments = control_segments(playback.playing, playback.liked);
        let controls: String = segments.iter().map(|(_, s)| s.as_str()).collect();
        let controls_width = controls.width() as u16;
        let padding = container_width.saturating_sub(controls_width) / 2;
        let controls_x = CONTENT_X0 + padding;

        let mut buttons = Vec::new();
        let mut x = controls_x;
        for (button, text) in &segments {
            let w = text.width() as u16;
            if let Some(button) = *button {
                buttons.push(ButtonBounds {
                    button,
                    x: x..x + w,
                });
            }
            x += w;
        }

        // Progress row: fixed reserve for border/padding/timer, bar fills the
        // rest, the whole line centered like the controls.
        let progress = (playback.duration_ms() > 0).then(|| {
            let bar_width = width
                .saturating_sub(PROGRESS_RESERVE)
                .max(MIN_BAR_WIDTH);
            let timer = format!(
                "{}/{} ",
                fmt_time(playback.progress_ms()),
                fmt_time(playback.duration_ms())
            );
            let timer_width = timer.width() as u16;
            let line_width = timer_width + bar_width;
            let padding = container_width.saturating_sub(line_width) / 2;
            let line_x = CONTENT_X0 + padding;
            ProgressGeometry {
                line_x,
                timer,
                bar_x: line_x + timer_width,
                bar_width,
            }
        });

        Self {
            control_row: CONTROL_ROW,
            progress_row: PROGRESS_ROW,
            controls_x,
            controls,
            controls_width,
            buttons,
            progress,
        }
    }

    /// Resolve a pointer release at (x, y). Anything outside the two
    /// hit-testable strips is a miss.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<HitTarget> {
        if y == self.control_row {
            return self
                .buttons
                .iter()
                .find(|b| b.x.contains(&x))
                .map(|b| HitTarget::Button(b.button));
        }

        if let Some(p) = &self.progress {
            if y == self.progress_row && x >= p.bar_x && x < p.bar_x + p.bar_width {
                let ratio = f64::from(x - p.bar_x) / f64::from(p.bar_width);
                return Some(HitTarget::Seek(ratio.clamp(0.0, 1.0)));
            }
        }

        None
    }

    #[cfg(test)]
    fn bounds(&self, button: Button) -> &Range<u16> {
        &self
            .buttons
            .iter()
            .find(|b| b.button == button)
            .expect("every button is laid out")
            .x
    }
}
