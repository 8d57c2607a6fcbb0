//! Configuration management for genrefy.
//!
//! All settings come from environment variables, optionally seeded from
//! `.env` files. Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`genrefy/.env`)
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::error::{Error, Result};

const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_SCOPE: &str = "playlist-modify-public playlist-modify-private";

/// Loads environment variables from `.env` files.
///
/// Neither file has to exist. Variables already present in the process
/// environment are never overwritten, and the working directory file wins
/// over the one in the local data directory.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/genrefy/.env`
/// - macOS: `~/Library/Application Support/genrefy/.env`
/// - Windows: `%LOCALAPPDATA%/genrefy/.env`
///
/// # Errors
///
/// Returns [`Error::Config`] when a `.env` file exists but cannot be parsed.
pub async fn load_env() -> Result<()> {
    let local = PathBuf::from(".env");
    if async_fs::metadata(&local).await.is_ok() {
        dotenv::from_path(&local).map_err(|e| Error::Config(format!("{}: {}", local.display(), e)))?;
    }

    let data = env_file_path();
    if async_fs::metadata(&data).await.is_ok() {
        dotenv::from_path(&data).map_err(|e| Error::Config(format!("{}: {}", data.display(), e)))?;
    }

    Ok(())
}

/// Path of the `.env` file in the local data directory.
pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("genrefy/.env");
    path
}

/// Reads a variable that must be set and non-empty.
pub fn require(name: &str) -> Result<String> {
    optional(name).ok_or_else(|| {
        Error::Config(format!(
            "{name} must be set (environment or {})",
            env_file_path().display()
        ))
    })
}

/// Reads a variable, treating an empty value as unset.
pub fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Returns the Spotify API client ID (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String> {
    require("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify API client secret (`SPOTIFY_API_AUTH_CLIENT_SECRET`).
///
/// The secret should never be exposed in logs or version control.
pub fn spotify_client_secret() -> Result<String> {
    require("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Returns the OAuth redirect URI (`SPOTIFY_API_REDIRECT_URI`).
///
/// Only needed for the user-authorized flow, i.e. when a playlist is created.
/// It must match the redirect URI registered in the Spotify application
/// settings, e.g. `http://127.0.0.1:8888/callback`.
pub fn spotify_redirect_uri() -> Result<String> {
    require("SPOTIFY_API_REDIRECT_URI")
}

/// Returns the user that owns created playlists, if configured (`SPOTIFY_USER_ID`).
///
/// When unset the owner is looked up with `GET /me`.
pub fn spotify_user() -> Option<String> {
    optional("SPOTIFY_USER_ID")
}

pub fn spotify_scope() -> String {
    optional("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string())
}

pub fn spotify_apiauth_url() -> String {
    optional("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string())
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`), without trailing slash.
pub fn spotify_apiurl() -> String {
    optional("SPOTIFY_API_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

pub fn spotify_apitoken_url() -> String {
    optional("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string())
}
