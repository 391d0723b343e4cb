use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{
    Res, api, config,
    fortune::{HistoryFetcher, SpotifyHistory},
    info,
    types::PkceToken,
};

/// Shared state of the fortune API.
#[derive(Debug, Clone)]
pub struct AppState<H> {
    pub history: H,
}

impl<H> AppState<H> {
    pub fn new(history: H) -> Self {
        Self { history }
    }
}

/// Routes of the fortune API.
pub fn build_router<H>(state: AppState<H>) -> Router
where
    H: HistoryFetcher + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(api::health))
        .route("/api/fortune", get(api::fortune::<H>))
        .with_state(state)
}

/// Routes of the temporary OAuth callback listener.
pub fn callback_router(state: Arc<Mutex<Option<PkceToken>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

/// Serves the fortune API on `SERVER_ADDRESS` until the process ends.
pub async fn start_api_server() -> Res<()> {
    let addr = SocketAddr::from_str(&config::server_addr())?;
    let app = build_router(AppState::new(SpotifyHistory::from_env()));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Fortune API listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Serves the OAuth callback on `CALLBACK_ADDRESS`.
pub async fn start_callback_server(state: Arc<Mutex<Option<PkceToken>>>) -> Res<()> {
    let addr = SocketAddr::from_str(&config::callback_addr())?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, callback_router(state)).await?;
    Ok(())
}
