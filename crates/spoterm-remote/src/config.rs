use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub colors: Colors,
}

/// UI color scheme. Seven named colors, each a `#RRGGBB` string; the TUI
/// parses them into terminal colors and renders with whatever is supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Colors {
    #[serde(default = "default_header")]
    pub header: String,
    #[serde(default = "default_track_playing")]
    pub track_playing: String,
    #[serde(default = "default_track_paused")]
    pub track_paused: String,
    #[serde(default = "default_artist")]
    pub artist: String,
    #[serde(default = "default_progress_bar")]
    pub progress_bar: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_error")]
    pub error: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            header: default_header(),
            track_playing: default_track_playing(),
            track_paused: default_track_paused(),
            artist: default_artist(),
            progress_bar: default_progress_bar(),
            status: default_status(),
            error: default_error(),
        }
    }
}

fn default_header() -> String {
    "#00FFFF".to_string()
}

fn default_track_playing() -> String {
    "#00FF00".to_string()
}

fn default_track_paused() -> String {
    "#FFFF00".to_string()
}

fn default_artist() -> String {
    "#FFFFFF".to_string()
}

fn default_progress_bar() -> String {
    "#FFFFFF".to_string()
}

fn default_status() -> String {
    "#808080".to_string()
}

fn default_error() -> String {
    "#FF0000".to_string()
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        config_dir().join("config.toml")
    }
}

/// API credentials supplied by the user (their own Spotify app registration).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn load() -> anyhow::Result<Self> {
        let path = credentials_path();
        let data = std::fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!(
                "could not read credentials from {}: {} (create it with your client_id/client_secret)",
                path.display(),
                e
            )
        })?;
        let creds: Self = serde_json::from_str(&data)?;
        Ok(creds)
    }
}

pub fn config_dir() -> PathBuf {
    // ~/.config/spoterm on macOS too, for consistency with Linux.
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("spoterm")
    }

    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spoterm")
    }
}

pub fn data_dir() -> PathBuf {
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| std::env::temp_dir())
            .join(".local")
            .join("share")
            .join("spoterm")
    }

    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spoterm")
    }
}

pub fn credentials_path() -> PathBuf {
    config_dir().join("credentials.json")
}

pub fn token_path() -> PathBuf {
    config_dir().join("token.json")
}
