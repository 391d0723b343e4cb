#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use serde_json::{Value, json};
use sporfortune::{
    error::{ClientError, FortuneError},
    fortune::HistoryFetcher,
    management::FortuneSource,
    types::{CanonicalTrack, Fortune, TimeRange, TrackPage},
};

// Top-tracks shape: fields at the top level
pub fn top_item(id: &str, name: &str, artist: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "artists": [{ "name": artist }, { "name": "Featured Guest" }],
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{}", id) },
        "preview_url": format!("https://p.scdn.co/mp3-preview/{}", id),
        "album": {
            "images": [
                { "url": format!("https://i.scdn.co/image/{}-640", id), "height": 640, "width": 640 },
                { "url": format!("https://i.scdn.co/image/{}-300", id), "height": 300, "width": 300 }
            ]
        }
    })
}

// Recently-played shape: the same track nested under `track`
pub fn played_item(id: &str, name: &str, artist: &str) -> Value {
    json!({
        "track": top_item(id, name, artist),
        "played_at": "2024-03-14T08:15:00.000Z"
    })
}

pub fn page(items: Vec<Value>) -> TrackPage {
    TrackPage { items }
}

pub fn sample_fortune(name: &str) -> Fortune {
    Fortune {
        text: format!("Keep {} close. It carries more courage than you think.", name),
        tracks: vec![CanonicalTrack {
            name: name.to_string(),
            artist_name: "Robyn".to_string(),
            spotify_url: "https://open.spotify.com/track/abc".to_string(),
            preview_url: None,
            album_art_url: Some("https://i.scdn.co/image/abc-640".to_string()),
        }],
    }
}

/// Canned listening history: one page per endpoint, optionally failing one.
#[derive(Clone, Default)]
pub struct StubHistory {
    pub recent: TrackPage,
    pub short: TrackPage,
    pub medium: TrackPage,
    pub long: TrackPage,
    pub fail_top: Option<(TimeRange, u16)>,
    pub fail_recent: Option<u16>,
    pub calls: Arc<AtomicUsize>,
}

impl StubHistory {
    pub fn with_pages(recent: TrackPage, short: TrackPage, medium: TrackPage, long: TrackPage) -> Self {
        Self {
            recent,
            short,
            medium,
            long,
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HistoryFetcher for StubHistory {
    async fn recently_played(&self, _token: &str, _limit: u32) -> Result<TrackPage, FortuneError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.fail_recent {
            return Err(FortuneError::Upstream {
                endpoint: "recent tracks",
                status,
            });
        }
        Ok(self.recent.clone())
    }

    async fn top_tracks(
        &self,
        _token: &str,
        range: TimeRange,
        _limit: u32,
    ) -> Result<TrackPage, FortuneError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some((failing, status)) = self.fail_top {
            if failing == range {
                return Err(FortuneError::Upstream {
                    endpoint: "top tracks",
                    status,
                });
            }
        }
        Ok(match range {
            TimeRange::ShortTerm => self.short.clone(),
            TimeRange::MediumTerm => self.medium.clone(),
            TimeRange::LongTerm => self.long.clone(),
        })
    }
}

/// Fortune server stand-in that counts round-trips.
#[derive(Default)]
pub struct StubSource {
    pub fortune: Option<Fortune>,
    pub calls: AtomicUsize,
}

impl StubSource {
    pub fn answering(fortune: Fortune) -> Self {
        Self {
            fortune: Some(fortune),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FortuneSource for StubSource {
    async fn fetch(&self) -> Result<Fortune, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.fortune
            .clone()
            .ok_or_else(|| ClientError::Failed("Failed to generate fortune".to_string()))
    }
}
