use tabled::Table;

use crate::{
    error::Result,
    info,
    management::GenreIndex,
    spotify::{SpotifyClient, auth},
    success,
    types::GenreTableRow,
    warning,
};

use super::load_playlist_genres;

pub async fn genres(playlist: String, limit: Option<usize>) -> Result<()> {
    let token = auth::client_credentials().await?;
    let api = SpotifyClient::new(token);

    let loaded = load_playlist_genres(&api, &playlist).await?;
    let index = GenreIndex::new(&loaded.tracks, &loaded.artist_genres);

    success!(
        "Fetched {} tracks by {} artists",
        loaded.tracks.len(),
        loaded.artist_genres.len()
    );

    let counts = index.sorted_genre_counts();
    if counts.is_empty() {
        warning!("No genre information for playlist {}", loaded.playlist_id);
        return Ok(());
    }

    info!("{} distinct genres", counts.len());

    let table_rows: Vec<GenreTableRow> = counts
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|gc| GenreTableRow {
            genre: gc.genre,
            tracks: gc.count,
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);

    Ok(())
}
