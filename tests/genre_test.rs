mod common;

use common::track;
use genrefy::{
    management::GenreIndex,
    types::{ArtistGenreMap, FilterCriterion, FilterMode, GenreCount, GenreSet, Track},
    utils::unique_artist_ids,
};

fn set(genres: &[&str]) -> GenreSet {
    genres.iter().map(|g| g.to_string()).collect()
}

fn genre_map(entries: Vec<(&str, Vec<&str>)>) -> ArtistGenreMap {
    entries
        .into_iter()
        .map(|(id, genres)| (id.to_string(), set(&genres)))
        .collect()
}

fn count(genre: &str, count: usize) -> GenreCount {
    GenreCount {
        genre: genre.to_string(),
        count,
    }
}

fn scenario() -> (Vec<Track>, ArtistGenreMap) {
    let tracks = vec![track("t1", &["a1"]), track("t2", &["a1", "a2"])];
    let genres = genre_map(vec![("a1", vec!["pop"]), ("a2", vec!["rock"])]);
    (tracks, genres)
}

#[test]
fn test_track_genres_are_union_of_artists() {
    let (tracks, genres) = scenario();
    let index = GenreIndex::new(&tracks, &genres);

    assert_eq!(index.track_genres(&tracks[0]), set(&["pop"]));
    assert_eq!(index.track_genres(&tracks[1]), set(&["pop", "rock"]));
}

#[test]
fn test_genre_counts_count_tracks_not_artists() {
    let (tracks, genres) = scenario();
    let index = GenreIndex::new(&tracks, &genres);

    let counts = index.genre_counts();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts["pop"], 2);
    assert_eq!(counts["rock"], 1);

    // two artists sharing a genre still count the track once
    let tracks = vec![track("t1", &["a1", "a2"])];
    let genres = genre_map(vec![("a1", vec!["pop"]), ("a2", vec!["pop", "rock"])]);
    let index = GenreIndex::new(&tracks, &genres);
    assert_eq!(index.genre_counts()["pop"], 1);
}

#[test]
fn test_filter_by_genre() {
    let (tracks, genres) = scenario();
    let index = GenreIndex::new(&tracks, &genres);

    let rock = FilterCriterion::parse("rock", FilterMode::Exact).unwrap();
    assert_eq!(index.filter_ids(&rock), vec!["t2".to_string()]);

    let pop = FilterCriterion::parse("pop", FilterMode::Exact).unwrap();
    assert_eq!(
        index.filter_ids(&pop),
        vec!["t1".to_string(), "t2".to_string()]
    );

    let none = FilterCriterion::parse("jazz, blues", FilterMode::Exact).unwrap();
    assert!(index.filter_ids(&none).is_empty());
}

#[test]
fn test_filter_selection_with_several_genres() {
    let tracks = vec![
        track("t1", &["a1"]),
        track("t2", &["a2"]),
        track("t3", &["a3"]),
    ];
    let genres = genre_map(vec![
        ("a1", vec!["Indie Rock"]),
        ("a2", vec!["k-pop"]),
        ("a3", vec!["jazz"]),
    ]);
    let index = GenreIndex::new(&tracks, &genres);

    let exact = FilterCriterion::parse("indie rock, pop", FilterMode::Exact).unwrap();
    assert_eq!(index.filter_ids(&exact), vec!["t1".to_string()]);

    let substring = FilterCriterion::parse("pop", FilterMode::Substring).unwrap();
    assert_eq!(index.filter_ids(&substring), vec!["t2".to_string()]);
}

#[test]
fn test_sorted_counts_break_ties_by_first_encounter() {
    let tracks = vec![
        track("t1", &["a1"]),
        track("t2", &["a2"]),
        track("t3", &["a3"]),
        track("t4", &["a3"]),
    ];
    let genres = genre_map(vec![
        ("a1", vec!["shoegaze"]),
        ("a2", vec!["ambient"]),
        ("a3", vec!["techno"]),
    ]);
    let index = GenreIndex::new(&tracks, &genres);

    assert_eq!(
        index.sorted_genre_counts(),
        vec![count("techno", 2), count("shoegaze", 1), count("ambient", 1)]
    );
}

#[test]
fn test_aggregation_is_idempotent() {
    let (tracks, genres) = scenario();
    let index = GenreIndex::new(&tracks, &genres);

    assert_eq!(index.genre_counts(), index.genre_counts());
    assert_eq!(index.sorted_genre_counts(), index.sorted_genre_counts());
    assert_eq!(
        GenreIndex::new(&tracks, &genres).sorted_genre_counts(),
        vec![count("pop", 2), count("rock", 1)]
    );
}

#[test]
fn test_artists_without_genres() {
    let tracks = vec![track("t1", &["a1"]), track("t2", &["unknown"])];
    let genres = genre_map(vec![("a1", vec![])]);
    let index = GenreIndex::new(&tracks, &genres);

    assert!(index.track_genres(&tracks[0]).is_empty());
    assert!(index.track_genres(&tracks[1]).is_empty());
    assert!(index.sorted_genre_counts().is_empty());

    let views = index.track_genre_views();
    assert_eq!(views.len(), 2);
    assert_eq!(views[1].0.id, "t2");
}

#[test]
fn test_empty_playlist() {
    let tracks: Vec<Track> = Vec::new();
    let genres = ArtistGenreMap::new();
    let index = GenreIndex::new(&tracks, &genres);

    assert!(unique_artist_ids(&tracks).is_empty());
    assert!(index.genre_counts().is_empty());
    assert!(index.sorted_genre_counts().is_empty());

    let rock = FilterCriterion::parse("rock", FilterMode::Exact).unwrap();
    assert!(index.filter_ids(&rock).is_empty());
}
