use std::{collections::HashSet, path::Path};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use futures::AsyncWriteExt;
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::{
    error::{Error, Result},
    types::{GenreSet, Track, join_genres},
};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Extracts the playlist id from a share URL, a `spotify:playlist:` URI or a bare id.
///
/// ```text
/// https://open.spotify.com/playlist/3z3ssAyKVkPBtThG44BcaX?si=5fc999cf17f246b0
/// spotify:playlist:3z3ssAyKVkPBtThG44BcaX
/// 3z3ssAyKVkPBtThG44BcaX
/// ```
pub fn parse_playlist_id(input: &str) -> Result<String> {
    let input = input.trim();

    let id = if let Some(rest) = input.strip_prefix("spotify:playlist:") {
        rest
    } else if input.contains("://") {
        let without_query = input.split(['?', '#']).next().unwrap_or_default();
        let mut segments = without_query.trim_end_matches('/').rsplit('/');
        let id = segments.next().unwrap_or_default();
        if segments.next() != Some("playlist") {
            return Err(Error::InvalidInput(format!("not a playlist URL: {input}")));
        }
        id
    } else {
        input
    };

    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::InvalidInput(format!(
            "cannot read a playlist id from '{input}'"
        )));
    }

    Ok(id.to_string())
}

/// Distinct artist ids across all tracks, in first-seen order.
pub fn unique_artist_ids(tracks: &[Track]) -> Vec<String> {
    let mut seen_ids = HashSet::new();
    tracks
        .iter()
        .flat_map(|t| t.artists.iter())
        .filter(|a| seen_ids.insert(a.id.as_str()))
        .map(|a| a.id.clone())
        .collect()
}

/// One line per matched track, as printed and written to the output file.
pub fn format_track_line(track: &Track, genres: &GenreSet) -> String {
    let genres_str = if genres.is_empty() {
        "No genre information".to_string()
    } else {
        join_genres(genres)
    };

    format!(
        "{} by {} - Genres: {}",
        track.name,
        track.artist_names(),
        genres_str
    )
}

/// Appends lines to a file, creating it and its parent directories when missing.
pub async fn append_lines(path: &Path, lines: &[String]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        async_fs::create_dir_all(parent).await?;
    }

    let mut file = async_fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;

    for line in lines {
        file.write_all(line.as_bytes()).await?;
        file.write_all(b"\n").await?;
    }
    file.flush().await?;

    Ok(())
}
