use std::{io::Write, path::PathBuf};

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::{
    error::{Error, Result},
    info,
    management::GenreIndex,
    spotify::{SpotifyClient, auth},
    types::{FilterCriterion, FilterMode},
};

use super::{
    filter::{default_description, materialize, report_matches},
    load_playlist_genres,
};

const TOP_GENRES: usize = 15;

/// Prompt driven variant of `filter`.
///
/// Reads the playlist, shows its most frequent genres, asks for a selection
/// and finally for the name of a playlist to create. An empty name ends the
/// session without creating anything.
pub async fn interactive(mode: FilterMode, output: Option<PathBuf>) -> Result<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let playlist = prompt(&mut input, "Enter the playlist URL or id: ").await?;

    let token = auth::client_credentials().await?;
    let api = SpotifyClient::new(token);
    let loaded = load_playlist_genres(&api, &playlist).await?;

    let index = GenreIndex::new(&loaded.tracks, &loaded.artist_genres);
    info!("Most frequent genres in {} tracks:", loaded.tracks.len());
    for gc in index.sorted_genre_counts().into_iter().take(TOP_GENRES) {
        println!("    {:>4}  {}", gc.count, gc.genre);
    }

    let label = match mode {
        FilterMode::Exact => "Enter the genres you want to filter by (comma separated): ",
        FilterMode::Substring => "Enter the genre you want to filter by: ",
    };
    let selection = prompt(&mut input, label).await?;
    let criterion = FilterCriterion::parse(&selection, mode)?;

    let matched = report_matches(&loaded, &criterion, &selection, output.as_deref()).await?;
    if matched.is_empty() {
        return Ok(());
    }

    let name = prompt(
        &mut input,
        "Name of the new playlist (leave empty to skip): ",
    )
    .await?;
    if name.is_empty() {
        return Ok(());
    }

    let description = prompt(&mut input, "Description (optional): ").await?;
    let description = if description.is_empty() {
        default_description(&loaded.playlist_id, &selection)
    } else {
        description
    };

    let public = prompt(&mut input, "Make the playlist public? [y/N]: ").await?;
    let public = matches!(public.to_lowercase().as_str(), "y" | "yes");

    let user_token = auth::authorize_user().await?;
    let user_api = SpotifyClient::new(user_token);
    materialize(&user_api, &name, &description, public, &matched).await
}

async fn prompt(input: &mut Lines<BufReader<Stdin>>, label: &str) -> Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;

    match input.next_line().await? {
        Some(line) => Ok(line.trim().to_string()),
        None => Err(Error::InvalidInput("unexpected end of input".to_string())),
    }
}
