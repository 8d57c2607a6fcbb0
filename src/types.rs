use std::collections::{BTreeSet, HashMap};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::{Error, Result};

/// Genres of a single artist, or the union over a track's artists.
pub type GenreSet = BTreeSet<String>;

/// Artist id to genres, built once per run by the genre resolver.
pub type ArtistGenreMap = HashMap<String, GenreSet>;

/// Bearer token for one run. Expiry and refresh fields of the token response are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<ArtistRef>,
}

impl Track {
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksPage {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub is_local: bool,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedArtist {
    pub id: Option<String>,
    pub name: String,
}

impl PlaylistItem {
    /// Converts a playlist entry into a [`Track`].
    ///
    /// Removed tracks (`null`) and local files have no Spotify id and yield `None`.
    /// Artists without an id are dropped.
    pub fn into_track(self) -> Option<Track> {
        let track = self.track?;
        if track.is_local {
            return None;
        }
        let id = track.id.filter(|id| !id.is_empty())?;

        let artists = track
            .artists
            .into_iter()
            .filter_map(|a| a.id.map(|id| ArtistRef { id, name: a.name }))
            .collect();

        Some(Track {
            id,
            name: track.name,
            artists,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveralArtistsResponse {
    pub artists: Vec<Option<Artist>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
    /// Web API shape: `{"error": {"status": 404, "message": "..."}}`
    Api { status: u16, message: String },
    /// Accounts service shape: `{"error": "invalid_client", "error_description": "..."}`
    OAuth(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub public: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

#[derive(Tabled)]
pub struct GenreTableRow {
    pub genre: String,
    pub tracks: usize,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artists: String,
    pub genres: String,
}

/// How a genre selection typed by the user is matched against a track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FilterMode {
    /// Comma separated genres, a track matches if it has any of them
    #[default]
    Exact,
    /// Single text, a track matches if its joined genre string contains it
    Substring,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterCriterion {
    Genres(BTreeSet<String>),
    Substring(String),
}

impl FilterCriterion {
    pub fn parse(input: &str, mode: FilterMode) -> Result<Self> {
        let criterion = match mode {
            FilterMode::Exact => {
                let genres: BTreeSet<String> = input
                    .split(',')
                    .map(|g| g.trim().to_lowercase())
                    .filter(|g| !g.is_empty())
                    .collect();
                if genres.is_empty() {
                    return Err(Error::InvalidInput("no genre selected".to_string()));
                }
                FilterCriterion::Genres(genres)
            }
            FilterMode::Substring => {
                let needle = input.trim().to_lowercase();
                if needle.is_empty() {
                    return Err(Error::InvalidInput("no genre selected".to_string()));
                }
                FilterCriterion::Substring(needle)
            }
        };
        Ok(criterion)
    }

    pub fn matches(&self, genres: &GenreSet) -> bool {
        match self {
            FilterCriterion::Genres(wanted) => genres
                .iter()
                .any(|g| wanted.contains(&g.to_lowercase())),
            FilterCriterion::Substring(needle) => join_genres(genres)
                .to_lowercase()
                .contains(needle.as_str()),
        }
    }
}

pub fn join_genres(genres: &GenreSet) -> String {
    genres.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
