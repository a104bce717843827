use std::sync::Arc;

use tracing::info;

use spoterm_remote::api::SpotifyClient;
use spoterm_remote::auth;
use spoterm_remote::config::{data_dir, Config};
use spoterm_tui::app::App;
use spoterm_tui::theme::Palette;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("spoterm.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // RUST_LOG overrides; default keeps HTTP client internals quiet.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Point the operator at the log before the alternate screen takes over.
    eprintln!("spoterm log: {}", log_path.display());
    info!("spoterm starting…");

    let config = Config::load().unwrap_or_default();
    let palette = Palette::from_colors(&config.colors);

    let tokens = auth::authenticate().await?;
    let client = Arc::new(SpotifyClient::new(tokens));

    let app = App::new(client, palette);
    app.run().await
}
