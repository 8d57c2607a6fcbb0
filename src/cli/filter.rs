use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{
    error::Result,
    info,
    management::GenreIndex,
    spotify::{self, SpotifyApi, SpotifyClient, auth},
    success,
    types::{FilterCriterion, FilterMode},
    utils, warning,
};

use super::{PlaylistGenres, load_playlist_genres};

#[derive(Debug, Clone)]
pub struct FilterOptions {
    pub playlist: String,
    pub genre: String,
    pub mode: FilterMode,
    pub output: Option<PathBuf>,
    pub create: Option<String>,
    pub description: Option<String>,
    pub public: bool,
}

pub async fn filter(opts: FilterOptions) -> Result<()> {
    // reject an unusable selection before talking to Spotify
    let criterion = FilterCriterion::parse(&opts.genre, opts.mode)?;

    // a user token reads the playlist as well, so only authorize once
    let token = match opts.create {
        Some(_) => auth::authorize_user().await?,
        None => auth::client_credentials().await?,
    };
    let api = SpotifyClient::new(token);

    let loaded = load_playlist_genres(&api, &opts.playlist).await?;
    let matched = report_matches(&loaded, &criterion, &opts.genre, opts.output.as_deref()).await?;

    if let Some(name) = opts.create {
        let description = opts
            .description
            .unwrap_or_else(|| default_description(&loaded.playlist_id, &opts.genre));
        materialize(&api, &name, &description, opts.public, &matched).await?;
    }

    Ok(())
}

/// Prints the matching tracks, appends them to `output` if given and returns their ids.
pub(super) async fn report_matches(
    loaded: &PlaylistGenres,
    criterion: &FilterCriterion,
    selection: &str,
    output: Option<&Path>,
) -> Result<Vec<String>> {
    let index = GenreIndex::new(&loaded.tracks, &loaded.artist_genres);
    let matched = index.filter(criterion);

    if matched.is_empty() {
        warning!(
            "No track of {} tracks matches '{}'",
            loaded.tracks.len(),
            selection
        );
        return Ok(Vec::new());
    }

    let lines: Vec<String> = matched
        .iter()
        .map(|t| utils::format_track_line(t, &index.track_genres(t)))
        .collect();

    for line in &lines {
        println!("{}", line);
    }
    success!(
        "{} of {} tracks match '{}'",
        matched.len(),
        loaded.tracks.len(),
        selection
    );

    if let Some(path) = output {
        utils::append_lines(path, &lines).await?;
        success!("Appended {} tracks to {}", lines.len(), path.display());
    }

    Ok(matched.into_iter().map(|t| t.id.clone()).collect())
}

/// Creates a playlist holding `track_ids`. Nothing is created for an empty list.
pub(super) async fn materialize<A>(
    api: &A,
    name: &str,
    description: &str,
    public: bool,
    track_ids: &[String],
) -> Result<()>
where
    A: SpotifyApi + ?Sized,
{
    if track_ids.is_empty() {
        warning!("No matching tracks, playlist {} not created", name);
        return Ok(());
    }

    let owner = spotify::playlist::owner_id(api).await?;

    info!("Create playlist {}", name);
    let playlist_id = spotify::playlist::create(api, &owner, name, description, public).await?;

    info!("Add {} tracks to playlist {}", track_ids.len(), name);
    spotify::playlist::add_tracks(api, &playlist_id, track_ids).await?;

    success!(
        "Playlist {} created: https://open.spotify.com/playlist/{}",
        name,
        playlist_id
    );
    Ok(())
}

pub(super) fn default_description(playlist_id: &str, selection: &str) -> String {
    format!(
        "Tracks of playlist {} matching '{}', created {}",
        playlist_id,
        selection.trim(),
        Utc::now().format("%Y-%m-%d")
    )
}
