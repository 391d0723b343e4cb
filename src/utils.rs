use std::time::Duration;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{CanonicalTrack, TimeLeft, TrackTableRow};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Today's calendar date in the local timezone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current wall-clock time in the local timezone.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Formats a date the way fortunes are stamped (`YYYY-MM-DD`).
pub fn date_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Time remaining until the next local midnight.
///
/// Computed on wall-clock values, so a DST shift during the night makes the
/// display off by an hour; the day rollover itself is detected by comparing
/// dates, not by this countdown.
pub fn time_until_midnight(now: NaiveDateTime) -> TimeLeft {
    let midnight = match now.date().succ_opt() {
        Some(next) => next.and_time(NaiveTime::MIN),
        None => return TimeLeft::default(),
    };

    let diff = (midnight - now).num_seconds();
    if diff <= 0 {
        return TimeLeft::default();
    }

    TimeLeft {
        hours: diff / 3600,
        minutes: (diff / 60) % 60,
        seconds: diff % 60,
    }
}

pub fn track_rows(tracks: &[CanonicalTrack]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .map(|t| TrackTableRow {
            track: t.name.clone(),
            artist: t.artist_name.clone(),
            link: t.spotify_url.clone(),
        })
        .collect()
}

/// Spinner in the style used for every long-running CLI step.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
