//! # Spotify Integration Module
//!
//! Interface to the parts of the Spotify Web API genrefy needs: reading a
//! playlist, looking up artists in batches, and writing a new playlist.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! Pipeline functions
//!     ├── playlist::get_all_tracks   (pagination)
//!     ├── artists::resolve_genres    (batched lookups, 429 backoff)
//!     └── playlist::create / add_tracks
//!          ↓
//! SpotifyApi trait ── SpotifyClient (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! The pipeline functions are generic over [`SpotifyApi`] so they can run
//! against in-memory stubs. [`SpotifyClient`] is the only implementation
//! that talks HTTP; it maps non-success responses to
//! [`Error::RateLimited`](crate::error::Error::RateLimited) (429) and
//! [`Error::Upstream`](crate::error::Error::Upstream) (everything else),
//! leaving retry decisions to the callers.
//!
//! ## Authentication
//!
//! [`auth`] provides two flows:
//! - **Client credentials** for read-only runs (listing and filtering).
//! - **OAuth 2.0 PKCE** with a local callback server when a playlist is
//!   created on behalf of the user.
//!
//! Tokens are kept in memory for the duration of a run only.
//!
//! ## API Coverage
//!
//! - `GET /playlists/{id}/tracks` - playlist items, 100 per page
//! - `GET /artists?ids=...` - up to 50 artists per request
//! - `GET /me` - current user, owner of created playlists
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `POST /playlists/{playlist_id}/tracks` - add up to 100 tracks per request
//! - `POST /api/token` - client credentials and code exchange

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{
        AddTrackToPlaylistResponse, Artist, CreatePlaylistRequest, CreatePlaylistResponse,
        CurrentUser, PlaylistTracksPage,
    },
};

pub mod artists;
pub mod auth;
pub mod client;
pub mod playlist;

pub use client::SpotifyClient;

/// The request shapes genrefy issues against Spotify.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Fetches one page of playlist items.
    ///
    /// `cursor` is `None` for the first page, otherwise the `next` value of
    /// the previous page.
    async fn playlist_page(
        &self,
        playlist_id: &str,
        cursor: Option<&str>,
    ) -> Result<PlaylistTracksPage>;

    /// Looks up at most [`artists::ARTIST_BATCH_SIZE`] artists in one request.
    ///
    /// Spotify answers `null` for ids it does not know.
    async fn several_artists(&self, ids: &[String]) -> Result<Vec<Option<Artist>>>;

    async fn current_user(&self) -> Result<CurrentUser>;

    async fn create_playlist(
        &self,
        owner_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse>;

    /// Appends at most [`playlist::ADD_TRACKS_BATCH_SIZE`] track URIs.
    async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<AddTrackToPlaylistResponse>;
}
