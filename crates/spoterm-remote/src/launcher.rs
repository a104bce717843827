//! Best-effort detection and launching of the local Spotify client.
//!
//! Used exactly once, when a device listing ever comes back empty; failure is
//! reported, never fatal.

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::info;

/// Attempt to start the Spotify client for the current platform.
pub fn launch_player() -> anyhow::Result<()> {
    #[cfg(target_os = "macos")]
    {
        info!("launching Spotify via `open -a`");
        Command::new("open").args(["-a", "Spotify"]).spawn()?;
        return Ok(());
    }

    #[cfg(target_os = "windows")]
    {
        info!("launching Spotify via start handler");
        Command::new("cmd")
            .args(["/c", "start", "spotify:"])
            .spawn()?;
        return Ok(());
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        // Preference order: flatpak, plain binary, snap.
        if find_on_path("flatpak").is_some() && flatpak_has_spotify() {
            info!("launching Spotify via flatpak");
            Command::new("flatpak")
                .args(["run", "com.spotify.Client"])
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()?;
            return Ok(());
        }
        if find_on_path("spotify").is_some() {
            info!("launching Spotify binary");
            Command::new("spotify")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()?;
            return Ok(());
        }
        if find_on_path("snap").is_some() && snap_has_spotify() {
            info!("launching Spotify via snap");
            Command::new("snap")
                .args(["run", "spotify"])
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()?;
            return Ok(());
        }
        anyhow::bail!("spotify not found on this system");
    }
}

/// Open a URL in the default browser, best-effort.
pub fn open_url(url: &str) {
    #[cfg(target_os = "macos")]
    let mut cmd = {
        let mut c = Command::new("open");
        c.arg(url);
        c
    };

    #[cfg(target_os = "windows")]
    let mut cmd = {
        let mut c = Command::new("cmd");
        c.args(["/c", "start", url]);
        c
    };

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut cmd = {
        let mut c = Command::new("xdg-open");
        c.arg(url);
        c
    };

    let _ = cmd.stdout(Stdio::null()).stderr(Stdio::null()).spawn();
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn flatpak_has_spotify() -> bool {
    Command::new("flatpak")
        .args(["info", "com.spotify.Client"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn snap_has_spotify() -> bool {
    Command::new("snap")
        .args(["list", "spotify"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn find_on_path(name: &str) -> Option<PathBuf> {
    let path = std::env::var("PATH").ok()?;
    for dir in path.split(':') {
        let candidate = PathBuf::from(dir).join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}
