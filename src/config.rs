//! Configuration management for sporfortune.
//!
//! Values come from environment variables. A `.env` file in the platform
//! local data directory (`sporfortune/.env`) is loaded first when it exists,
//! so secrets do not have to live in the shell profile:
//!
//! - Linux: `~/.local/share/sporfortune/.env`
//! - macOS: `~/Library/Application Support/sporfortune/.env`
//! - Windows: `%LOCALAPPDATA%/sporfortune/.env`
//!
//! Everything except the client id falls back to a sensible default.

use std::{env, path::PathBuf};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_CALLBACK_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_SCOPE: &str = "user-read-recently-played user-top-read";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Loads the `.env` file from the local data directory if there is one.
///
/// Creates the `sporfortune` data directory on the way so the build script
/// template and the caches share one location.
///
/// # Errors
///
/// Fails when the directory cannot be created or an existing `.env` file
/// cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Root of everything sporfortune persists.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporfortune");
    path
}

fn var_or(key: &str, default: impl FnOnce() -> String) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(default)
}

/// Address the fortune API binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", || DEFAULT_SERVER_ADDRESS.to_string())
}

/// Address of the temporary OAuth callback listener (`CALLBACK_ADDRESS`).
pub fn callback_addr() -> String {
    var_or("CALLBACK_ADDRESS", || DEFAULT_CALLBACK_ADDRESS.to_string())
}

/// Base URL the CLI uses to reach the fortune API (`FORTUNE_SERVER_URL`).
pub fn fortune_server_url() -> String {
    var_or("FORTUNE_SERVER_URL", || format!("http://{}", server_addr()))
}

/// Spotify application client id (`SPOTIFY_API_AUTH_CLIENT_ID`).
///
/// # Errors
///
/// Returns an error when the variable is missing; authentication and token
/// refresh cannot work without it.
pub fn spotify_client_id() -> Result<String, String> {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID")
        .map_err(|_| "SPOTIFY_API_AUTH_CLIENT_ID must be set".to_string())
}

/// Redirect URI registered with Spotify (`SPOTIFY_API_REDIRECT_URI`).
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_API_REDIRECT_URI", || {
        format!("http://{}/callback", callback_addr())
    })
}

/// Space separated OAuth scopes (`SPOTIFY_API_AUTH_SCOPE`).
pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", || DEFAULT_SCOPE.to_string())
}

pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", || DEFAULT_AUTH_URL.to_string())
}

pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", || DEFAULT_API_URL.to_string())
}

pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", || DEFAULT_TOKEN_URL.to_string())
}
