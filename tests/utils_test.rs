use chrono::{NaiveDate, NaiveDateTime};
use sporfortune::spotify::auth::into_token;
use sporfortune::types::{CanonicalTrack, TimeLeft, TokenResponse};
use sporfortune::utils::*;

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    assert_eq!(verifier.len(), 128);
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(verifier, generate_code_verifier());
}

#[test]
fn test_generate_code_challenge() {
    // RFC 7636 appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");

    assert_ne!(challenge, generate_code_challenge("different_verifier"));
}

#[test]
fn test_date_string() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    assert_eq!(date_string(date), "2024-03-04");
}

#[test]
fn test_time_until_midnight() {
    assert_eq!(
        time_until_midnight(at("2024-03-14 23:59:59")),
        TimeLeft { hours: 0, minutes: 0, seconds: 1 }
    );
    assert_eq!(
        time_until_midnight(at("2024-03-14 12:00:00")),
        TimeLeft { hours: 12, minutes: 0, seconds: 0 }
    );
    assert_eq!(
        time_until_midnight(at("2024-03-14 00:00:00")),
        TimeLeft { hours: 24, minutes: 0, seconds: 0 }
    );
    assert_eq!(
        time_until_midnight(at("2024-12-31 00:00:01")),
        TimeLeft { hours: 23, minutes: 59, seconds: 59 }
    );
}

#[test]
fn test_time_left_display() {
    let left = TimeLeft { hours: 3, minutes: 7, seconds: 9 };
    assert_eq!(left.to_string(), "03:07:09");
}

#[test]
fn test_track_rows() {
    let rows = track_rows(&[CanonicalTrack {
        name: "Hyperballad".to_string(),
        artist_name: "Björk".to_string(),
        spotify_url: "https://open.spotify.com/track/b".to_string(),
        preview_url: None,
        album_art_url: None,
    }]);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].track, "Hyperballad");
    assert_eq!(rows[0].artist, "Björk");
}

#[test]
fn test_into_token_keeps_refresh_token() {
    let response = TokenResponse {
        access_token: "new-access".to_string(),
        refresh_token: None,
        scope: "user-top-read".to_string(),
        expires_in: None,
    };
    let token = into_token(response, Some("old-refresh"));

    assert_eq!(token.access_token, "new-access");
    assert_eq!(token.refresh_token, "old-refresh");
    assert_eq!(token.expires_in, 3600);
}
