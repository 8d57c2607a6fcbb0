use std::collections::HashMap;

use crate::types::{ArtistGenreMap, FilterCriterion, GenreCount, GenreSet, Track};

/// Read-only view joining playlist tracks with resolved artist genres.
///
/// Nothing is cached: every query derives the track genre sets again from
/// the artist map.
pub struct GenreIndex<'a> {
    tracks: &'a [Track],
    artist_genres: &'a ArtistGenreMap,
}

impl<'a> GenreIndex<'a> {
    pub fn new(tracks: &'a [Track], artist_genres: &'a ArtistGenreMap) -> Self {
        Self {
            tracks,
            artist_genres,
        }
    }

    /// Union of the genres of all artists of a track. Unknown artists add nothing.
    pub fn track_genres(&self, track: &Track) -> GenreSet {
        track
            .artists
            .iter()
            .filter_map(|a| self.artist_genres.get(&a.id))
            .flat_map(|genres| genres.iter().cloned())
            .collect()
    }

    /// Tracks paired with their genre sets, in playlist order.
    pub fn track_genre_views(&self) -> Vec<(&'a Track, GenreSet)> {
        self.tracks
            .iter()
            .map(|t| (t, self.track_genres(t)))
            .collect()
    }

    /// Number of tracks exposing each genre.
    ///
    /// A track counts once per genre, however many of its artists share it.
    pub fn genre_counts(&self) -> HashMap<String, usize> {
        self.sorted_genre_counts()
            .into_iter()
            .map(|gc| (gc.genre, gc.count))
            .collect()
    }

    /// Genre counts, most frequent first.
    ///
    /// Equal counts keep the order in which the genres were first seen while
    /// walking the playlist.
    pub fn sorted_genre_counts(&self) -> Vec<GenreCount> {
        let mut counts: Vec<GenreCount> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for track in self.tracks {
            for genre in self.track_genres(track) {
                match positions.get(&genre) {
                    Some(&pos) => counts[pos].count += 1,
                    None => {
                        positions.insert(genre.clone(), counts.len());
                        counts.push(GenreCount { genre, count: 1 });
                    }
                }
            }
        }

        // stable, so ties stay in encounter order
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }

    /// Tracks whose genres match the criterion, in playlist order.
    pub fn filter(&self, criterion: &FilterCriterion) -> Vec<&'a Track> {
        self.tracks
            .iter()
            .filter(|t| criterion.matches(&self.track_genres(t)))
            .collect()
    }

    pub fn filter_ids(&self, criterion: &FilterCriterion) -> Vec<String> {
        self.filter(criterion)
            .into_iter()
            .map(|t| t.id.clone())
            .collect()
    }
}
