use std::time::Duration;

use indicatif::ProgressBar;
use tokio::time::sleep;

use crate::{
    error::{Error, Result},
    types::{Artist, ArtistGenreMap},
    warning,
};

use super::SpotifyApi;

/// Maximum number of ids accepted by `GET /artists`.
pub const ARTIST_BATCH_SIZE: usize = 50;

/// Lookup attempts per chunk before giving up on rate limiting.
pub const MAX_ATTEMPTS: u32 = 5;

/// Wait applied when a 429 response carries no usable `Retry-After`.
pub const DEFAULT_RETRY_AFTER: u64 = 1;

/// Status reported when a lookup failed without an HTTP status of its own.
const LOOKUP_FAILED_STATUS: u16 = 502;

/// Progress of a single chunk lookup.
#[derive(Debug)]
enum ChunkState {
    Pending,
    Succeeded(Vec<Option<Artist>>),
    RateLimited(Duration),
    Failed(Error),
}

/// Resolves artist ids to their genres.
///
/// The ids are split into consecutive chunks of [`ARTIST_BATCH_SIZE`] and
/// looked up one chunk at a time. A rate limited chunk is retried after the
/// wait requested by Spotify, up to [`MAX_ATTEMPTS`] lookups per chunk; any
/// other failure aborts the resolution.
///
/// Every input id ends up as a key of the returned map. Ids Spotify does not
/// know map to an empty set.
///
/// # Errors
///
/// - [`Error::RetryExhausted`] when a chunk is still rate limited after
///   [`MAX_ATTEMPTS`] lookups
/// - [`Error::Upstream`] for any other lookup failure, transport and decode
///   errors included
/// - configuration and authorization errors as-is
pub async fn resolve_genres<A>(api: &A, artist_ids: &[String]) -> Result<ArtistGenreMap>
where
    A: SpotifyApi + ?Sized,
{
    resolve_genres_with_progress(api, artist_ids, &ProgressBar::hidden()).await
}

/// [`resolve_genres`] reporting resolved artists on `pb`.
///
/// The bar advances by one per artist id once its chunk is merged. Rate limit
/// warnings are printed with the bar suspended.
pub async fn resolve_genres_with_progress<A>(
    api: &A,
    artist_ids: &[String],
    pb: &ProgressBar,
) -> Result<ArtistGenreMap>
where
    A: SpotifyApi + ?Sized,
{
    let mut genres = ArtistGenreMap::with_capacity(artist_ids.len());

    for chunk in artist_ids.chunks(ARTIST_BATCH_SIZE) {
        let artists = fetch_chunk(api, chunk, pb).await?;
        merge_chunk(&mut genres, chunk, artists);
        pb.inc(chunk.len() as u64);
    }

    Ok(genres)
}

async fn fetch_chunk<A>(
    api: &A,
    chunk: &[String],
    pb: &ProgressBar,
) -> Result<Vec<Option<Artist>>>
where
    A: SpotifyApi + ?Sized,
{
    let mut attempts = 0;
    let mut state = ChunkState::Pending;

    loop {
        state = match state {
            ChunkState::Pending => {
                attempts += 1;
                match api.several_artists(chunk).await {
                    Ok(artists) => ChunkState::Succeeded(artists),
                    Err(Error::RateLimited { retry_after }) if attempts < MAX_ATTEMPTS => {
                        let secs = retry_after.unwrap_or(DEFAULT_RETRY_AFTER);
                        ChunkState::RateLimited(Duration::from_secs(secs))
                    }
                    Err(Error::RateLimited { retry_after }) => {
                        ChunkState::Failed(Error::RetryExhausted {
                            attempts,
                            status: 429,
                            message: format!(
                                "artist lookup still rate limited (last retry after: {}s)",
                                retry_after.unwrap_or(DEFAULT_RETRY_AFTER)
                            ),
                        })
                    }
                    Err(err) => ChunkState::Failed(lookup_error(err)),
                }
            }
            ChunkState::RateLimited(wait) => {
                pb.suspend(|| {
                    warning!("Rate limited. Retrying after {} seconds.", wait.as_secs())
                });
                sleep(wait).await;
                ChunkState::Pending
            }
            ChunkState::Succeeded(artists) => return Ok(artists),
            ChunkState::Failed(err) => return Err(err),
        };
    }
}

/// Gives transport and decode failures of a lookup an upstream status.
fn lookup_error(err: Error) -> Error {
    match err {
        Error::Http(e) => Error::Upstream {
            status: e.status().map_or(LOOKUP_FAILED_STATUS, |s| s.as_u16()),
            message: format!("artist lookup failed: {e}"),
        },
        Error::Json(e) => Error::Upstream {
            status: LOOKUP_FAILED_STATUS,
            message: format!("artist lookup returned an unreadable body: {e}"),
        },
        other => other,
    }
}

fn merge_chunk(genres: &mut ArtistGenreMap, chunk: &[String], artists: Vec<Option<Artist>>) {
    for artist in artists.into_iter().flatten() {
        genres.insert(artist.id, artist.genres.into_iter().collect());
    }

    // ids answered with `null` or left out still get an entry
    for id in chunk {
        genres.entry(id.clone()).or_default();
    }
}
