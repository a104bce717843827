//! Styles built from the config-supplied color palette.

use ratatui::style::{Color, Modifier, Style};

use spoterm_remote::config::Colors;

/// The seven named UI colors, parsed once at startup.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub header: Color,
    pub track_playing: Color,
    pub track_paused: Color,
    pub artist: Color,
    pub progress_bar: Color,
    pub status: Color,
    pub error: Color,
}

impl Palette {
    /// Unparseable entries fall back to the stock scheme rather than failing
    /// startup.
    pub fn from_colors(colors: &Colors) -> Self {
        Self {
            header: parse_hex(&colors.header).unwrap_or(Color::Cyan),
            track_playing: parse_hex(&colors.track_playing).unwrap_or(Color::Green),
            track_paused: parse_hex(&colors.track_paused).unwrap_or(Color::Yellow),
            artist: parse_hex(&colors.artist).unwrap_or(Color::White),
            progress_bar: parse_hex(&colors.progress_bar).unwrap_or(Color::White),
            status: parse_hex(&colors.status).unwrap_or(Color::Gray),
            error: parse_hex(&colors.error).unwrap_or(Color::Red),
        }
    }

    pub fn style_header(&self) -> Style {
        Style::default().fg(self.header).add_modifier(Modifier::BOLD)
    }

    pub fn style_track_playing(&self) -> Style {
        Style::default()
            .fg(self.track_playing)
            .add_modifier(Modifier::BOLD)
    }

    pub fn style_track_paused(&self) -> Style {
        Style::default().fg(self.track_paused)
    }

    pub fn style_artist(&self) -> Style {
        Style::default().fg(self.artist)
    }

    pub fn style_progress(&self) -> Style {
        Style::default().fg(self.progress_bar)
    }

    pub fn style_status(&self) -> Style {
        Style::default().fg(self.status)
    }

    pub fn style_error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn style_border(&self) -> Style {
        Style::default().fg(self.header)
    }
}

fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#00FF00"), Some(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex("#1db954"), Some(Color::Rgb(29, 185, 84)));
        assert_eq!(parse_hex("00FF00"), None);
        assert_eq!(parse_hex("#XYZ123"), None);
        assert_eq!(parse_hex("#FFF"), None);
    }

    #[test]
    fn test_palette_from_default_colors() {
        let palette = Palette::from_colors(&Colors::default());
        assert_eq!(palette.header, Color::Rgb(0, 255, 255));
        assert_eq!(palette.error, Color::Rgb(255, 0, 0));
    }

    #[test]
    fn test_garbage_falls_back() {
        let mut colors = Colors::default();
        colors.header = "not-a-color".to_string();
        let palette = Palette::from_colors(&colors);
        assert_eq!(palette.header, Color::Cyan);
    }
}
