use reqwest::StatusCode;
use sporfortune::{client::{FortuneClient, interpret_response}, error::ClientError};

#[test]
fn test_interpret_success() {
    let body = r#"{"fortune":{"text":"Sing Teardrop a little louder today.","tracks":[{"name":"Teardrop","artistName":"Massive Attack","spotifyUrl":"https://open.spotify.com/track/c","previewUrl":null,"albumArtUrl":null}]}}"#;
    let fortune = interpret_response(StatusCode::OK, body).unwrap();

    assert_eq!(fortune.text, "Sing Teardrop a little louder today.");
    assert_eq!(fortune.tracks[0].artist_name, "Massive Attack");
}

#[test]
fn test_interpret_auth_failures() {
    let body = r#"{"error":"Not authenticated or missing access token"}"#;
    assert!(matches!(
        interpret_response(StatusCode::UNAUTHORIZED, body),
        Err(ClientError::NotAuthenticated)
    ));

    let body = r#"{"error":"Insufficient permissions","details":"Failed to fetch top tracks: 403"}"#;
    let err = interpret_response(StatusCode::FORBIDDEN, body).unwrap_err();
    assert!(matches!(err, ClientError::NeedsPermissions));
    assert!(err.to_string().contains("permissions"));
}

#[test]
fn test_interpret_server_error() {
    let body = r#"{"error":"Failed to generate fortune","details":"Failed to fetch recent tracks: 500"}"#;
    match interpret_response(StatusCode::INTERNAL_SERVER_ERROR, body) {
        Err(ClientError::Failed(reason)) => {
            assert_eq!(reason, "Failed to generate fortune: Failed to fetch recent tracks: 500")
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    match interpret_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>") {
        Err(ClientError::Failed(reason)) => assert_eq!(reason, "502 Bad Gateway"),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_interpret_missing_fortune() {
    assert!(matches!(
        interpret_response(StatusCode::OK, r#"{"something":"else"}"#),
        Err(ClientError::Missing)
    ));
}

#[test]
fn test_fortune_url() {
    let client = FortuneClient::new("http://127.0.0.1:3000/", "token");
    assert_eq!(client.fortune_url(), "http://127.0.0.1:3000/api/fortune");
}
