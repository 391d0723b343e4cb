use crate::{
    error,
    management::{DailyFortuneCache, FileFortuneStore, TokenManager},
    server, success, warning,
};

/// Runs the fortune API in the foreground.
pub async fn serve() {
    if let Err(e) = server::start_api_server().await {
        error!("Fortune API failed: {}", e);
    }
}

/// Drops today's stored fortune so a new one can be drawn.
pub async fn forget() {
    let mut cache = DailyFortuneCache::new(FileFortuneStore::default());
    match cache.reset().await {
        Ok(()) => success!("Stored fortune removed."),
        Err(e) => error!("Failed to remove stored fortune: {}", e),
    }
}

/// Signs out: removes the stored token and the stored fortune.
pub async fn logout() {
    if let Err(e) = TokenManager::clear().await {
        error!("Failed to remove token: {}", e);
    }

    let mut cache = DailyFortuneCache::new(FileFortuneStore::default());
    if let Err(e) = cache.reset().await {
        warning!("Failed to remove stored fortune: {}", e);
    }

    success!("Signed out.");
}
