use tabled::Table;

use crate::{
    error::Result,
    management::GenreIndex,
    spotify::{SpotifyClient, auth},
    success,
    types::{TrackTableRow, join_genres},
};

use super::load_playlist_genres;

pub async fn tracks(playlist: String) -> Result<()> {
    let token = auth::client_credentials().await?;
    let api = SpotifyClient::new(token);

    let loaded = load_playlist_genres(&api, &playlist).await?;
    let index = GenreIndex::new(&loaded.tracks, &loaded.artist_genres);

    let table_rows: Vec<TrackTableRow> = index
        .track_genre_views()
        .into_iter()
        .map(|(track, genres)| TrackTableRow {
            name: track.name.clone(),
            artists: track.artist_names(),
            genres: join_genres(&genres),
        })
        .collect();

    success!("Fetched {} tracks", table_rows.len());
    let table = Table::new(table_rows);
    println!("{}", table);

    Ok(())
}
