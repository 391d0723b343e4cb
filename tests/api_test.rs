mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::AUTHORIZATION},
};
use common::*;
use serde_json::{Value, json};
use sporfortune::{
    api::bearer_token,
    fortune::generator::EMPTY_HISTORY_FORTUNE,
    server::{AppState, build_router},
    types::TimeRange,
};
use tower::util::ServiceExt;

fn app(history: StubHistory) -> Router {
    build_router(AppState::new(history))
}

async fn get(app: Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let mut request = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        request = request.header(AUTHORIZATION, format!("Bearer {}", token));
    }

    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn listening_history() -> StubHistory {
    StubHistory::with_pages(
        page(vec![played_item("a", "Dancing On My Own", "Robyn")]),
        page(vec![top_item("b", "Hyperballad", "Björk")]),
        page(vec![Value::Null]),
        page(vec![top_item("c", "Teardrop", "Massive Attack")]),
    )
}

#[tokio::test]
async fn test_fortune_requires_token() {
    let history = listening_history();
    let (status, body) = get(app(history.clone()), "/api/fortune", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({ "error": "Not authenticated or missing access token" })
    );
    assert_eq!(history.call_count(), 0);
}

#[tokio::test]
async fn test_fortune_from_history() {
    let history = listening_history();
    let (status, body) = get(app(history.clone()), "/api/fortune", Some("abc")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.call_count(), 4);

    let text = body["fortune"]["text"].as_str().unwrap();
    assert!(!text.contains("{trackName}") && !text.contains("{artistName}"));

    let tracks = body["fortune"]["tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 1);
    let name = tracks[0]["name"].as_str().unwrap();
    assert!(["Dancing On My Own", "Hyperballad", "Teardrop"].contains(&name));
    assert!(tracks[0]["spotifyUrl"].as_str().unwrap().starts_with("https://open.spotify.com/track/"));
}

#[tokio::test]
async fn test_fortune_empty_history() {
    let history = StubHistory::with_pages(
        page(vec![Value::Null]),
        page(vec![]),
        page(vec![json!({ "played_at": "2024-03-14T08:15:00.000Z" })]),
        page(vec![]),
    );
    let (status, body) = get(app(history), "/api/fortune", Some("abc")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "fortune": { "text": EMPTY_HISTORY_FORTUNE, "tracks": [] } })
    );
}

#[tokio::test]
async fn test_fortune_upstream_failure() {
    let mut history = listening_history();
    history.fail_top = Some((TimeRange::LongTerm, 502));
    let (status, body) = get(app(history), "/api/fortune", Some("abc")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate fortune");
    assert_eq!(body["details"], "Failed to fetch top tracks: 502");
}

#[tokio::test]
async fn test_fortune_missing_scope() {
    let mut history = listening_history();
    history.fail_recent = Some(403);
    let (status, body) = get(app(history), "/api/fortune", Some("abc")).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Insufficient permissions");
    assert_eq!(body["details"], "Failed to fetch recent tracks: 403");
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(StubHistory::default()), "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["name"], "sporfortune");
}

#[test]
fn test_bearer_token() {
    let mut headers = axum::http::HeaderMap::new();
    assert_eq!(bearer_token(&headers), None);

    headers.insert(AUTHORIZATION, "Bearer abc123".parse().unwrap());
    assert_eq!(bearer_token(&headers), Some("abc123"));

    headers.insert(AUTHORIZATION, "bearer abc123".parse().unwrap());
    assert_eq!(bearer_token(&headers), Some("abc123"));

    headers.insert(AUTHORIZATION, "Bearer ".parse().unwrap());
    assert_eq!(bearer_token(&headers), None);

    headers.insert(AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());
    assert_eq!(bearer_token(&headers), None);
}
