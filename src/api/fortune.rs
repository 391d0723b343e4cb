use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header::AUTHORIZATION},
};

use crate::{
    error::FortuneError,
    fortune::{self, HistoryFetcher},
    server::AppState,
    types::FortuneResponse,
};

/// `GET /api/fortune`
///
/// Draws a fortune from the caller's listening history. The bearer token is
/// passed through to Spotify untouched; without one no upstream call is made.
pub async fn fortune<H>(
    State(state): State<AppState<H>>,
    headers: HeaderMap,
) -> Result<Json<FortuneResponse>, FortuneError>
where
    H: HistoryFetcher + Clone + Send + Sync + 'static,
{
    let token = bearer_token(&headers).ok_or(FortuneError::Unauthenticated)?;

    let tracks = fortune::aggregate(&state.history, token).await?;
    if tracks.is_empty() {
        return Ok(Json(FortuneResponse {
            fortune: fortune::empty_fortune(),
        }));
    }

    let fortune = fortune::generate(&tracks)?;
    Ok(Json(FortuneResponse { fortune }))
}

/// Extracts a non-empty token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() { None } else { Some(token) }
}
