use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};

use crate::{
    cli, info,
    management::{DailyFortuneCache, FileFortuneStore, Transition, daily},
    success, utils,
};

/// Counts down to the next fortune and waits for the local date to change.
///
/// The countdown is redrawn every second; the stored date is compared with
/// today every [`daily::RECHECK_INTERVAL_SECS`] seconds, and only that
/// comparison unlocks. Ctrl-C stops both timers. With `fetch` the new
/// fortune is drawn right after the rollover.
pub async fn watch(fetch: bool) {
    let mut cache = DailyFortuneCache::new(FileFortuneStore::default());

    if cache.load(utils::local_today()).await.can_fetch_new_fortune() {
        announce_ready(fetch).await;
        return;
    }

    let pb = utils::spinner("Waiting for tomorrow...");
    let mut countdown = interval(Duration::from_secs(1));
    let mut recheck = interval(Duration::from_secs(daily::RECHECK_INTERVAL_SECS));
    countdown.set_missed_tick_behavior(MissedTickBehavior::Skip);
    recheck.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let unlocked = loop {
        tokio::select! {
            _ = countdown.tick() => {
                if let Some(left) = daily::time_until_next_eligibility(cache.state(), utils::local_now()) {
                    pb.set_message(format!("New fortune in: {}", left));
                }
            }
            _ = recheck.tick() => {
                if cache.recheck(utils::local_today()).await == Transition::Unlocked {
                    break true;
                }
            }
            _ = tokio::signal::ctrl_c() => break false,
        }
    };

    drop(countdown);
    drop(recheck);
    pb.finish_and_clear();

    if unlocked {
        announce_ready(fetch).await;
    } else {
        info!("Stopped watching.");
    }
}

async fn announce_ready(fetch: bool) {
    if fetch {
        cli::fortune(false).await;
    } else {
        success!("A new fortune is ready. Run sporfortune fortune.");
    }
}
