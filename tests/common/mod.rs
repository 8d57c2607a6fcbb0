#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

use async_trait::async_trait;
use genrefy::{
    error::{Error, Result},
    spotify::SpotifyApi,
    types::{
        AddTrackToPlaylistResponse, Artist, ArtistRef, CreatePlaylistRequest,
        CreatePlaylistResponse, CurrentUser, PlaylistItem, PlaylistTrack, PlaylistTracksPage,
        SimplifiedArtist, Track,
    },
};

/// In-memory Spotify that records every request it receives.
#[derive(Default)]
pub struct StubApi {
    playlist_id: String,
    pages: Vec<Vec<PlaylistItem>>,
    artists: HashMap<String, Vec<String>>,
    artist_failures: Mutex<VecDeque<Error>>,
    page_failures: Mutex<VecDeque<Error>>,
    pub page_requests: Mutex<Vec<Option<String>>>,
    pub lookups: Mutex<Vec<Vec<String>>>,
    pub created: Mutex<Vec<(String, CreatePlaylistRequest)>>,
    pub added: Mutex<Vec<(String, Vec<String>)>>,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_playlist(mut self, playlist_id: &str, pages: Vec<Vec<PlaylistItem>>) -> Self {
        self.playlist_id = playlist_id.to_string();
        self.pages = pages;
        self
    }

    pub fn with_artist(mut self, id: &str, genres: &[&str]) -> Self {
        self.artists
            .insert(id.to_string(), genres.iter().map(|g| g.to_string()).collect());
        self
    }

    /// Errors returned by the next artist lookups, before lookups succeed again.
    pub fn failing_lookups(self, errors: Vec<Error>) -> Self {
        *self.artist_failures.lock().unwrap() = errors.into();
        self
    }

    pub fn failing_pages(self, errors: Vec<Error>) -> Self {
        *self.page_failures.lock().unwrap() = errors.into();
        self
    }

    pub fn lookups(&self) -> Vec<Vec<String>> {
        self.lookups.lock().unwrap().clone()
    }

    pub fn page_requests(&self) -> Vec<Option<String>> {
        self.page_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpotifyApi for StubApi {
    async fn playlist_page(
        &self,
        playlist_id: &str,
        cursor: Option<&str>,
    ) -> Result<PlaylistTracksPage> {
        self.page_requests
            .lock()
            .unwrap()
            .push(cursor.map(str::to_string));

        if let Some(err) = self.page_failures.lock().unwrap().pop_front() {
            return Err(err);
        }
        if playlist_id != self.playlist_id {
            return Err(Error::Upstream {
                status: 404,
                message: "Resource not found".to_string(),
            });
        }

        let index = cursor
            .and_then(|c| c.strip_prefix("page-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);

        let items = self.pages.get(index).cloned().unwrap_or_default();
        let next = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));
        let total = self.pages.iter().map(Vec::len).sum::<usize>() as u64;

        Ok(PlaylistTracksPage {
            items,
            next,
            total: Some(total),
        })
    }

    async fn several_artists(&self, ids: &[String]) -> Result<Vec<Option<Artist>>> {
        self.lookups.lock().unwrap().push(ids.to_vec());

        if let Some(err) = self.artist_failures.lock().unwrap().pop_front() {
            return Err(err);
        }

        Ok(ids
            .iter()
            .map(|id| {
                self.artists.get(id).map(|genres| Artist {
                    id: id.clone(),
                    name: format!("Artist {id}"),
                    genres: genres.clone(),
                })
            })
            .collect())
    }

    async fn current_user(&self) -> Result<CurrentUser> {
        Ok(CurrentUser {
            id: "owner".to_string(),
            display_name: None,
        })
    }

    async fn create_playlist(
        &self,
        owner_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse> {
        self.created
            .lock()
            .unwrap()
            .push((owner_id.to_string(), request.clone()));

        Ok(CreatePlaylistResponse {
            id: "new-playlist".to_string(),
            name: request.name.clone(),
            description: Some(request.description.clone()),
            public: Some(request.public),
        })
    }

    async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<AddTrackToPlaylistResponse> {
        self.added
            .lock()
            .unwrap()
            .push((playlist_id.to_string(), uris.to_vec()));

        Ok(AddTrackToPlaylistResponse {
            snapshot_id: "snapshot".to_string(),
        })
    }
}

pub fn item(track_id: &str, artist_ids: &[&str]) -> PlaylistItem {
    PlaylistItem {
        track: Some(PlaylistTrack {
            id: Some(track_id.to_string()),
            name: format!("Song {track_id}"),
            is_local: false,
            artists: artist_ids
                .iter()
                .map(|id| SimplifiedArtist {
                    id: Some(id.to_string()),
                    name: format!("Artist {id}"),
                })
                .collect(),
        }),
    }
}

pub fn track(track_id: &str, artist_ids: &[&str]) -> Track {
    Track {
        id: track_id.to_string(),
        name: format!("Song {track_id}"),
        artists: artist_ids
            .iter()
            .map(|id| ArtistRef {
                id: id.to_string(),
                name: format!("Artist {id}"),
            })
            .collect(),
    }
}

pub fn ids(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i}")).collect()
}

pub fn rate_limited(retry_after: Option<u64>) -> Error {
    Error::RateLimited { retry_after }
}
