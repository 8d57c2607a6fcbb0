mod common;

use common::track;
use genrefy::error::Error;
use genrefy::types::GenreSet;
use genrefy::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let challenge = generate_code_challenge("test_verifier_123");

    // Should be deterministic
    assert_eq!(challenge, generate_code_challenge("test_verifier_123"));
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // SHA256 in URL-safe base64 without padding
    assert_eq!(challenge.len(), 43);
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_parse_playlist_id_from_share_url() {
    let url = "https://open.spotify.com/playlist/3z3ssAyKVkPBtThG44BcaX?si=5fc999cf17f246b0";
    assert_eq!(parse_playlist_id(url).unwrap(), "3z3ssAyKVkPBtThG44BcaX");

    let localized = "https://open.spotify.com/intl-de/playlist/3z3ssAyKVkPBtThG44BcaX/";
    assert_eq!(parse_playlist_id(localized).unwrap(), "3z3ssAyKVkPBtThG44BcaX");
}

#[test]
fn test_parse_playlist_id_from_uri_and_bare_id() {
    assert_eq!(
        parse_playlist_id("spotify:playlist:37i9dQZF1DXcBWIGoYBM5M").unwrap(),
        "37i9dQZF1DXcBWIGoYBM5M"
    );
    assert_eq!(
        parse_playlist_id("  37i9dQZF1DXcBWIGoYBM5M \n").unwrap(),
        "37i9dQZF1DXcBWIGoYBM5M"
    );
}

#[test]
fn test_parse_playlist_id_invalid_inputs() {
    let invalid = [
        "",
        "   ",
        "https://open.spotify.com/album/4aawyAB9vmqN3uQ7FjRGTy",
        "spotify:playlist:",
        "not a playlist",
    ];

    for input in invalid {
        assert!(
            matches!(parse_playlist_id(input), Err(Error::InvalidInput(_))),
            "accepted {input:?}"
        );
    }
}

#[test]
fn test_unique_artist_ids_first_seen_order() {
    let tracks = vec![
        track("t1", &["a2", "a1"]),
        track("t2", &["a1", "a3"]),
        track("t3", &["a2"]),
    ];

    assert_eq!(unique_artist_ids(&tracks), vec!["a2", "a1", "a3"]);
}

#[test]
fn test_unique_artist_ids_is_deterministic() {
    let tracks: Vec<_> = (0..200)
        .map(|i| track(&format!("t{i}"), &[format!("a{}", i % 37).as_str()]))
        .collect();

    let first = unique_artist_ids(&tracks);
    assert_eq!(first.len(), 37);
    assert_eq!(first, unique_artist_ids(&tracks));
}

#[test]
fn test_format_track_line() {
    let t = track("t1", &["a1", "a2"]);

    let genres: GenreSet = ["rock", "indie"].iter().map(|g| g.to_string()).collect();
    assert_eq!(
        format_track_line(&t, &genres),
        "Song t1 by Artist a1, Artist a2 - Genres: indie, rock"
    );
    assert_eq!(
        format_track_line(&t, &GenreSet::new()),
        "Song t1 by Artist a1, Artist a2 - Genres: No genre information"
    );
}

#[tokio::test]
async fn test_append_lines_creates_and_appends() {
    let dir = std::env::temp_dir().join(format!(
        "genrefy-test-{}-{}",
        std::process::id(),
        generate_code_verifier()
    ));
    let path = dir.join("nested/filteredList.txt");

    append_lines(&path, &["first".to_string()]).await.unwrap();
    append_lines(&path, &["second".to_string(), "third".to_string()])
        .await
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "first\nsecond\nthird\n");

    std::fs::remove_dir_all(&dir).unwrap();
}
