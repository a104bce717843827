//! Full-screen rendering for the three UI modes.
//!
//! The normal screen places the progress and control rows at the exact
//! coordinates `Layout` computes, so every pointer release resolves against
//! the same geometry the user sees.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::layout::{
    Layout, ARTIST_ROW, CONTROL_ROW, PROGRESS_ROW, STATUS_ROW, TRACK_ROW, VOLUME_ROW,
};
use crate::model::{Model, StatusKind, UiMode};
use crate::search::SearchState;
use crate::theme::Palette;

pub fn draw(frame: &mut Frame, model: &Model, palette: &Palette) {
    match &model.mode {
        UiMode::Help => draw_help(frame, palette),
        UiMode::Searching(search) => draw_search(frame, search, model, palette),
        UiMode::Normal => draw_normal(frame, model, palette),
    }
}

/// One-row rect inside the container, or `None` when the terminal is too
/// short for that row.
fn content_row(area: Rect, y: u16) -> Option<Rect> {
    // Rows 0 (header) and 1 / area.height-1 (borders) are off limits.
    if y + 1 >= area.height.saturating_sub(1) || area.width <= 2 {
        return None;
    }
    Some(Rect {
        x: 1,
        y,
        width: area.width - 2,
        height: 1,
    })
}

fn draw_chrome(frame: &mut Frame, palette: &Palette, title: &str) -> Rect {
    let area = frame.area();

    let header = Paragraph::new(Line::from(Span::styled(
        title.to_string(),
        palette.style_header(),
    )));
    frame.render_widget(
        header,
        Rect {
            x: 0,
            y: 0,
            width: area.width,
            height: area.height.min(1),
        },
    );

    let container = Rect {
        x: 0,
        y: area.height.min(1),
        width: area.width,
        height: area.height.saturating_sub(1),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.style_border());
    frame.render_widget(block, container);

    area
}

fn draw_normal(frame: &mut Frame, model: &Model, palette: &Palette) {
    let area = draw_chrome(
        frame,
        palette,
        &format!(" spoterm v{}", env!("CARGO_PKG_VERSION")),
    );

    let playback = &model.playback;

    // Track / artist lines, centered; geometry-free, so plain alignment.
    if let Some(row) = content_row(area, TRACK_ROW) {
        let line = if playback.track_name.is_empty() {
            Line::from("No track playing")
        } else if playback.playing {
            Line::from(Span::styled(
                playback.track_name.clone(),
                palette.style_track_playing(),
            ))
        } else {
            Line::from(Span::styled(
                format!("{} (paused)", playback.track_name),
                palette.style_track_paused(),
            ))
        };
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
    }
    if let Some(row) = content_row(area, ARTIST_ROW) {
        if !playback.track_name.is_empty() {
            let line = Line::from(Span::styled(
                playback.artist_name.clone(),
                palette.style_artist(),
            ));
            frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
        }
    }

    // Progress and controls come from the shared layout.
    let layout = Layout::compute(playback, model.dims);

    if let (Some(progress), Some(_)) = (&layout.progress, content_row(area, PROGRESS_ROW)) {
        let ratio = if playback.duration_ms() > 0 {
            f64::from(playback.progress_ms()) / f64::from(playback.duration_ms())
        } else {
            0.0
        }
        .clamp(0.0, 1.0);
        let filled = ((ratio * f64::from(progress.bar_width)) as u16).min(progress.bar_width);
        let empty = progress.bar_width - filled;

        let line = Line::from(vec![
            Span::raw(progress.timer.clone()),
            Span::styled("━".repeat(filled as usize), palette.style_progress()),
            Span::styled("─".repeat(empty as usize), palette.style_artist()),
        ]);
        let rect = Rect {
            x: progress.line_x,
            y: PROGRESS_ROW,
            width: (area.width.saturating_sub(progress.line_x + 1))
                .min(progress.bar_width + progress.timer.len() as u16),
            height: 1,
        };
        frame.render_widget(Paragraph::new(line), rect);
    }

    if content_row(area, CONTROL_ROW).is_some() {
        let rect = Rect {
            x: layout.controls_x,
            y: CONTROL_ROW,
            width: layout
                .controls_width
                .min(area.width.saturating_sub(layout.controls_x + 1)),
            height: 1,
        };
        frame.render_widget(Paragraph::new(layout.controls.clone()), rect);
    }

    if let Some(row) = content_row(area, VOLUME_ROW) {
        let line = Line::from(format!("🔊 {}%", playback.volume_percent));
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
    }

    if let Some(row) = content_row(area, STATUS_ROW) {
        let line = match &model.status {
            Some(status) if status.kind == StatusKind::Error => Line::from(Span::styled(
                status.text.clone(),
                palette.style_error(),
            )),
            Some(status) => Line::from(Span::styled(
                format!("{}  |  ? for help", status.text),
                palette.style_status(),
            )),
            None => Line::from(Span::styled("?  for help", palette.style_status())),
        };
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
    }
}

fn draw_help(frame: &mut Frame, palette: &Palette) {
    let area = draw_chrome(frame, palette, " spoterm help");

    let text = [
        "Keyboard Controls",
        "─────────────────",
        "  p / Space    Play/Pause",
        "  n            Next track",
        "  b            Previous track",
        "  l            Like/Unlike song",
        "",
        "  + / =        Volume up (+10%)",
        "  - / _        Volume down (-10%)",
        "",
        "  ← / →        Seek -/+10 seconds",
        "",
        "  s / /        Search for songs",
        "  ?            Toggle help",
        "  q / Ctrl+C   Quit",
        "",
        "Press ESC or ? to close this screen",
    ];

    let container = Rect {
        x: 0,
        y: area.height.min(1),
        width: area.width,
        height: area.height.saturating_sub(1),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.style_border())
        .padding(Padding::new(2, 2, 1, 1));
    let inner = block.inner(container);

    let lines: Vec<Line> = text
        .iter()
        .map(|l| Line::from(Span::styled(l.to_string(), palette.style_status())))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_search(frame: &mut Frame, search: &SearchState, model: &Model, palette: &Palette) {
    let area = draw_chrome(frame, palette, " 🔍 Search");

    let container = Rect {
        x: 0,
        y: area.height.min(1),
        width: area.width,
        height: area.height.saturating_sub(1),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.style_border())
        .padding(Padding::new(2, 2, 1, 1));
    let inner = block.inner(container);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(format!("Search: {}", search.query())));
    lines.push(Line::from(""));

    if search.results.is_empty() {
        if search.query().is_empty() {
            lines.push(Line::from(Span::styled(
                "Type to search for songs, then press Enter",
                palette.style_status(),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Press Enter to search...",
                palette.style_status(),
            )));
        }
    } else {
        // Window the results to what fits: chrome + hints eat a fixed number
        // of rows, and at least 3 results stay visible.
        let reserved: u16 = 11;
        let mut max_visible = model.dims.height.saturating_sub(reserved).max(3) as usize;
        max_visible = max_visible.min(search.results.len());

        let start = if search.cursor >= max_visible {
            search.cursor - max_visible + 1
        } else {
            0
        };
        let end = (start + max_visible).min(search.results.len());

        lines.push(Line::from(Span::styled(
            format!(
                "Results {}-{} of {} (↑/↓ to scroll, Enter to play):",
                start + 1,
                end,
                search.results.len()
            ),
            palette.style_status(),
        )));
        lines.push(Line::from(""));

        if start > 0 {
            lines.push(Line::from(Span::styled(
                "  ↑ more results above",
                palette.style_artist(),
            )));
        }
        for (i, hit) in search.results.iter().enumerate().take(end).skip(start) {
            if i == search.cursor {
                lines.push(Line::from(Span::styled(
                    format!("▶ {} - {}", hit.name, hit.artist),
                    palette.style_track_playing(),
                )));
            } else {
                lines.push(Line::from(Span::styled(
                    format!("  {} - {}", hit.name, hit.artist),
                    palette.style_artist(),
                )));
            }
        }
        if end < search.results.len() {
            lines.push(Line::from(Span::styled(
                "  ↓ more results below",
                palette.style_artist(),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press ESC to cancel",
        palette.style_status(),
    )));

    frame.render_widget(Paragraph::new(lines), inner);

    // Put the terminal cursor where typing lands.
    let prompt_width = "Search: ".len() as u16;
    let cursor_x = inner.x + prompt_width + search.input.visual_cursor() as u16;
    frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
}
