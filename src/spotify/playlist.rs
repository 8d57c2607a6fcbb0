use crate::{
    error::{Error, Result},
    types::{CreatePlaylistRequest, Track},
};

use super::SpotifyApi;

/// Maximum number of URIs accepted by `POST /playlists/{id}/tracks`.
pub const ADD_TRACKS_BATCH_SIZE: usize = 100;

/// Fetches every track of a playlist, in playlist order.
///
/// Starts with the first page and follows the `next` cursor of each response
/// until Spotify reports no further page. Removed tracks and local files are
/// skipped.
///
/// # Errors
///
/// - [`Error::InvalidInput`] for an empty playlist id
/// - [`Error::NotFound`] when Spotify answers 403 or 404 for the playlist
/// - [`Error::Upstream`] for any other failure, a 429 included
pub async fn get_all_tracks<A>(api: &A, playlist_id: &str) -> Result<Vec<Track>>
where
    A: SpotifyApi + ?Sized,
{
    if playlist_id.trim().is_empty() {
        return Err(Error::InvalidInput("playlist id is empty".to_string()));
    }

    let mut tracks: Vec<Track> = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = api
            .playlist_page(playlist_id, cursor.as_deref())
            .await
            .map_err(|e| page_error(playlist_id, e))?;

        if tracks.is_empty() {
            if let Some(total) = page.total {
                tracks.reserve(total as usize);
            }
        }

        tracks.extend(page.items.into_iter().filter_map(|item| item.into_track()));

        cursor = page.next;
        if cursor.is_none() {
            break;
        }
    }

    Ok(tracks)
}

fn page_error(playlist_id: &str, err: Error) -> Error {
    match err {
        Error::RateLimited { retry_after } => Error::Upstream {
            status: 429,
            message: match retry_after {
                Some(secs) => format!("rate limited while reading playlist, retry after {secs}s"),
                None => "rate limited while reading playlist".to_string(),
            },
        },
        other if matches!(other.status(), Some(403 | 404)) => {
            Error::NotFound(playlist_id.to_string())
        }
        other => other,
    }
}

/// Resolves the owner of new playlists.
///
/// Uses `SPOTIFY_USER_ID` when configured, the authorized user otherwise.
pub async fn owner_id<A>(api: &A) -> Result<String>
where
    A: SpotifyApi + ?Sized,
{
    match crate::config::spotify_user() {
        Some(user) => Ok(user),
        None => Ok(api.current_user().await?.id),
    }
}

/// Creates a playlist and returns its id.
pub async fn create<A>(
    api: &A,
    owner_id: &str,
    name: &str,
    description: &str,
    public: bool,
) -> Result<String>
where
    A: SpotifyApi + ?Sized,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("playlist name is empty".to_string()));
    }

    let request = CreatePlaylistRequest {
        name: name.to_string(),
        description: description.trim().to_string(),
        public,
        collaborative: false,
    };

    let response = api.create_playlist(owner_id, &request).await?;
    Ok(response.id)
}

/// Appends tracks to a playlist in request-sized chunks, keeping their order.
pub async fn add_tracks<A>(api: &A, playlist_id: &str, track_ids: &[String]) -> Result<()>
where
    A: SpotifyApi + ?Sized,
{
    let uris: Vec<String> = track_ids
        .iter()
        .map(|id| format!("spotify:track:{id}"))
        .collect();

    for chunk in uris.chunks(ADD_TRACKS_BATCH_SIZE) {
        api.add_tracks(playlist_id, chunk).await?;
    }

    Ok(())
}
