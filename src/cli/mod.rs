//! # CLI Module
//!
//! User-facing commands of genrefy. Every command follows the same pipeline
//! and only differs in what it does with the result:
//!
//! ```text
//! playlist reference ─ utils::parse_playlist_id
//!     ↓
//! spotify::playlist::get_all_tracks     (pages of 100)
//!     ↓
//! utils::unique_artist_ids
//!     ↓
//! spotify::artists::resolve_genres      (chunks of 50, 429 backoff)
//!     ↓
//! management::GenreIndex                (counts, per-track genres, filters)
//! ```
//!
//! ## Commands
//!
//! - [`genres`] - genre frequency table of a playlist
//! - [`tracks`] - every track with its artists and genres
//! - [`filter`] - tracks matching a genre selection, optionally written to a
//!   file and saved as a new playlist
//! - [`interactive`] - the same as `filter`, driven by prompts on stdin
//!
//! Read-only commands authenticate with the client credentials flow. Creating
//! a playlist needs a user token, obtained through the PKCE flow.
//!
//! ## Usage Patterns
//!
//! ```bash
//! genrefy genres https://open.spotify.com/playlist/3z3ssAyKVkPBtThG44BcaX
//! genrefy filter 3z3ssAyKVkPBtThG44BcaX --genre "rock, indie rock" --output rock.txt
//! genrefy filter 3z3ssAyKVkPBtThG44BcaX --genre pop --mode substring --create "Pop picks"
//! genrefy interactive
//! ```

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    error::Result,
    spotify::{self, SpotifyApi},
    types::{ArtistGenreMap, Track},
    utils,
};

mod filter;
mod genres;
mod interactive;
mod tracks;

pub use filter::{FilterOptions, filter};
pub use genres::genres;
pub use interactive::interactive;
pub use tracks::tracks;

/// Tracks of a playlist together with the genres of all their artists.
pub struct PlaylistGenres {
    pub playlist_id: String,
    pub tracks: Vec<Track>,
    pub artist_genres: ArtistGenreMap,
}

/// Runs the fetch half of the pipeline with spinners for feedback.
pub async fn load_playlist_genres<A>(api: &A, playlist: &str) -> Result<PlaylistGenres>
where
    A: SpotifyApi + ?Sized,
{
    let playlist_id = utils::parse_playlist_id(playlist)?;

    let pb = spinner("Fetching playlist tracks...");
    let tracks = spotify::playlist::get_all_tracks(api, &playlist_id).await;
    pb.finish_and_clear();
    let tracks = tracks?;

    let artist_ids = utils::unique_artist_ids(&tracks);

    let pb = counter("Resolving artist genres", artist_ids.len() as u64);
    let artist_genres =
        spotify::artists::resolve_genres_with_progress(api, &artist_ids, &pb).await;
    pb.finish_and_clear();
    let artist_genres = artist_genres?;

    Ok(PlaylistGenres {
        playlist_id,
        tracks,
        artist_genres,
    })
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

fn counter(message: &str, len: u64) -> ProgressBar {
    let pb = spinner(message);
    pb.set_length(len);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg} {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
