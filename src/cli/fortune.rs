use tabled::Table;

use crate::{
    client::FortuneClient,
    error,
    error::ClientError,
    info,
    management::{
        CacheState, DailyFortuneCache, FileFortuneStore, Obtained, TokenManager, daily,
    },
    success,
    types::Fortune,
    utils, warning,
};

/// Shows today's fortune, drawing a new one when the day allows it.
///
/// A fortune already drawn today is shown from the local cache without
/// touching the network. `refresh` skips that check and always asks the
/// server; the new fortune then replaces the stored one.
pub async fn fortune(refresh: bool) {
    let today = utils::local_today();
    let mut cache = DailyFortuneCache::new(FileFortuneStore::default());

    if !refresh {
        if let CacheState::Locked { fortune } = cache.load(today).await.clone() {
            print_fortune(&fortune);
            print_countdown(cache.state());
            return;
        }
    }

    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run sporfortune auth\n Error: {}",
                e
            );
        }
    };
    let client = FortuneClient::from_env(token_mgr.get_valid_token().await);

    let pb = utils::spinner("Opening cookie...");
    let result = cache.obtain(&client, today, refresh).await;
    pb.finish_and_clear();

    match result {
        Ok(Obtained::Fresh(fortune)) => {
            success!("Today's fortune received.");
            print_fortune(&fortune);
            print_countdown(cache.state());
        }
        Ok(Obtained::Cached(fortune)) => {
            print_fortune(&fortune);
            print_countdown(cache.state());
        }
        Err(ClientError::NeedsPermissions) => {
            warning!("{}", ClientError::NeedsPermissions);
            info!("Run sporfortune logout followed by sporfortune auth.");
        }
        Err(e) => warning!("{}", e),
    }
}

pub fn print_fortune(fortune: &Fortune) {
    println!("\n  🥠 {}\n", fortune.text);

    if fortune.tracks.is_empty() {
        return;
    }

    println!("{}", Table::new(utils::track_rows(&fortune.tracks)));
    for track in &fortune.tracks {
        if let Some(preview) = &track.preview_url {
            info!("Preview: {}", preview);
        }
        if let Some(art) = &track.album_art_url {
            info!("Album art: {}", art);
        }
    }
}

fn print_countdown(state: &CacheState) {
    if let Some(left) = daily::time_until_next_eligibility(state, utils::local_now()) {
        info!("New fortune in: {}", left);
    }
}
