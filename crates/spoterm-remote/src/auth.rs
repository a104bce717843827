//! OAuth authorization-code flow against the Spotify accounts service.
//!
//! First run: open the authorize URL in a browser, catch the redirect on a
//! one-shot local HTTP listener, exchange the code, persist the token.
//! Later runs: load the persisted token and refresh it as needed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use tokio::sync::{oneshot, Mutex};
use tracing::{info, warn};

use crate::api::ApiError;
use crate::config::{token_path, Credentials};
use crate::launcher;

const REDIRECT_URI: &str = "http://127.0.0.1:8000/callback";
const CALLBACK_ADDR: &str = "127.0.0.1:8000";
const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";

const SCOPES: &str = "user-read-private user-read-playback-state \
user-read-currently-playing user-modify-playback-state \
user-library-read user-library-modify";

/// Refresh this many seconds before the reported expiry.
const EXPIRY_MARGIN_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp (seconds) past which the access token is stale.
    pub expires_at: u64,
}

impl StoredToken {
    pub fn is_expired(&self, now: u64) -> bool {
        now + EXPIRY_MARGIN_SECS >= self.expires_at
    }
}

fn now_epoch() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub fn load_token() -> anyhow::Result<StoredToken> {
    load_token_from(&token_path())
}

pub fn save_token(token: &StoredToken) -> anyhow::Result<()> {
    save_token_to(&token_path(), token)
}

fn load_token_from(path: &Path) -> anyhow::Result<StoredToken> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn save_token_to(path: &Path, token: &StoredToken) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_vec_pretty(token)?)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
    }
    Ok(())
}

// ── Token manager ─────────────────────────────────────────────────────────────

/// Owns the credentials and the current token; hands out fresh bearer tokens,
/// refreshing and re-persisting them behind the scenes.
pub struct TokenManager {
    http: reqwest::Client,
    credentials: Credentials,
    token: Mutex<StoredToken>,
    token_file: PathBuf,
}

impl TokenManager {
    pub fn new(credentials: Credentials, token: StoredToken) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            token: Mutex::new(token),
            token_file: token_path(),
        }
    }

    /// Current access token, refreshed if it is about to expire.
    pub async fn bearer(&self) -> Result<String, ApiError> {
        let mut token = self.token.lock().await;
        if token.is_expired(now_epoch()) {
            let refreshed = self.refresh(&token.refresh_token).await?;
            *token = refreshed;
            if let Err(e) = save_token_to(&self.token_file, &token) {
                warn!("could not persist refreshed token: {}", e);
            }
        }
        Ok(token.access_token.clone())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<StoredToken, ApiError> {
        let resp = self
            .http
            .post(TOKEN_URL)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(ApiError::Auth(format!(
                "token refresh failed ({}): {}",
                status, message
            )));
        }

        let body: TokenResponse = resp.json().await?;
        Ok(StoredToken {
            access_token: body.access_token,
            // The refresh grant may omit the refresh token; keep the old one.
            refresh_token: body
                .refresh_token
                .unwrap_or_else(|| refresh_token.to_string()),
            expires_at: now_epoch() + body.expires_in,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
    refresh_token: Option<String>,
}

// ── Interactive flow ──────────────────────────────────────────────────────────

/// Load credentials and produce a ready `TokenManager`, running the full
/// browser flow when no usable token is on disk.
pub async fn authenticate() -> anyhow::Result<TokenManager> {
    let credentials = Credentials::load()?;

    match load_token() {
        Ok(token) => {
            info!("using persisted token");
            return Ok(TokenManager::new(credentials, token));
        }
        Err(e) => warn!("could not load token, re-authenticating: {}", e),
    }

    let token = full_oauth_flow(&credentials).await?;
    save_token(&token)?;
    Ok(TokenManager::new(credentials, token))
}

struct CallbackShared {
    expected_state: String,
    code_tx: std::sync::Mutex<Option<oneshot::Sender<Result<String, String>>>>,
}

async fn full_oauth_flow(credentials: &Credentials) -> anyhow::Result<StoredToken> {
    let state: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();

    let authorize_url = reqwest::Url::parse_with_params(
        AUTHORIZE_URL,
        &[
            ("client_id", credentials.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", REDIRECT_URI),
            ("scope", SCOPES),
            ("state", state.as_str()),
        ],
    )?;

    let (code_tx, code_rx) = oneshot::channel();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let shared = Arc::new(CallbackShared {
        expected_state: state,
        code_tx: std::sync::Mutex::new(Some(code_tx)),
    });

    let app = Router::new()
        .route("/callback", get(callback))
        .with_state(shared);

    let listener = tokio::net::TcpListener::bind(CALLBACK_ADDR).await?;
    let server = tokio::spawn(async move {
        let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        });
        if let Err(e) = serve.await {
            warn!("callback server error: {}", e);
        }
    });

    println!(
        "Please log in to Spotify by visiting the following page in your browser:\n{}",
        authorize_url
    );
    launcher::open_url(authorize_url.as_str());

    let code = code_rx
        .await
        .map_err(|_| anyhow::anyhow!("callback listener closed before a code arrived"))?
        .map_err(|e| anyhow::anyhow!("authorization failed: {}", e))?;

    let _ = shutdown_tx.send(());
    let _ = server.await;

    exchange_code(credentials, &code).await
}

async fn callback(
    State(shared): State<Arc<CallbackShared>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    let reply = |result: Result<String, String>| {
        if let Ok(mut slot) = shared.code_tx.lock() {
            if let Some(tx) = slot.take() {
                let _ = tx.send(result);
            }
        }
    };

    if let Some(err) = params.get("error") {
        reply(Err(err.clone()));
        return (StatusCode::FORBIDDEN, format!("Authorization denied: {}", err));
    }

    if params.get("state").map(String::as_str) != Some(shared.expected_state.as_str()) {
        reply(Err("state mismatch".to_string()));
        return (StatusCode::FORBIDDEN, "State mismatch".to_string());
    }

    match params.get("code") {
        Some(code) => {
            reply(Ok(code.clone()));
            (
                StatusCode::OK,
                "Authenticated! You can close this window.".to_string(),
            )
        }
        None => {
            reply(Err("missing code".to_string()));
            (StatusCode::FORBIDDEN, "Couldn't get token".to_string())
        }
    }
}

async fn exchange_code(credentials: &Credentials, code: &str) -> anyhow::Result<StoredToken> {
    let resp = reqwest::Client::new()
        .post(TOKEN_URL)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", REDIRECT_URI),
        ])
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let message = resp.text().await.unwrap_or_default();
        anyhow::bail!("code exchange failed ({}): {}", status, message);
    }

    let body: TokenResponse = resp.json().await?;
    let refresh_token = body
        .refresh_token
        .ok_or_else(|| anyhow::anyhow!("token response had no refresh_token"))?;

    Ok(StoredToken {
        access_token: body.access_token,
        refresh_token,
        expires_at: now_epoch() + body.expires_in,
    })
}
