use std::future::Future;

use reqwest::Client;
use serde_json::Value;

use crate::{
    config,
    error::FortuneError,
    types::{RawTrackRecord, TimeRange, TrackPage},
};

pub const RECENT_LIMIT: u32 = 20;
pub const TOP_LIMIT: u32 = 50;

/// Source of the user's listening history.
///
/// [`SpotifyHistory`] talks to the Web API; tests substitute canned pages.
pub trait HistoryFetcher {
    fn recently_played(
        &self,
        token: &str,
        limit: u32,
    ) -> impl Future<Output = Result<TrackPage, FortuneError>> + Send;

    fn top_tracks(
        &self,
        token: &str,
        range: TimeRange,
        limit: u32,
    ) -> impl Future<Output = Result<TrackPage, FortuneError>> + Send;
}

#[derive(Debug, Clone)]
pub struct SpotifyHistory {
    client: Client,
    api_url: String,
}

impl SpotifyHistory {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(config::spotify_apiurl())
    }

    async fn get_page(
        &self,
        url: String,
        query: &[(&str, String)],
        token: &str,
        endpoint: &'static str,
    ) -> Result<TrackPage, FortuneError> {
        let response = self
            .client
            .get(&url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FortuneError::Upstream {
                endpoint,
                status: status.as_u16(),
            });
        }

        Ok(response.json::<TrackPage>().await?)
    }
}

impl HistoryFetcher for SpotifyHistory {
    async fn recently_played(&self, token: &str, limit: u32) -> Result<TrackPage, FortuneError> {
        let url = format!("{uri}/me/player/recently-played", uri = self.api_url);
        self.get_page(url, &[("limit", limit.to_string())], token, "recent tracks")
            .await
    }

    async fn top_tracks(
        &self,
        token: &str,
        range: TimeRange,
        limit: u32,
    ) -> Result<TrackPage, FortuneError> {
        let url = format!("{uri}/me/top/tracks", uri = self.api_url);
        self.get_page(
            url,
            &[("limit", limit.to_string()), ("time_range", range.to_string())],
            token,
            "top tracks",
        )
        .await
    }
}

/// Fetches recent plays and the three top-track windows concurrently and
/// returns the usable records in the order recent, short, medium, long.
///
/// The first failing call aborts the others; there is no partial result.
pub async fn aggregate<H: HistoryFetcher + Sync>(
    history: &H,
    token: &str,
) -> Result<Vec<RawTrackRecord>, FortuneError> {
    let (recent, short, medium, long) = tokio::try_join!(
        history.recently_played(token, RECENT_LIMIT),
        history.top_tracks(token, TimeRange::ShortTerm, TOP_LIMIT),
        history.top_tracks(token, TimeRange::MediumTerm, TOP_LIMIT),
        history.top_tracks(token, TimeRange::LongTerm, TOP_LIMIT),
    )?;

    Ok(usable_records(merge_pages([recent, short, medium, long])))
}

/// Concatenates the `items` of all pages, keeping page order.
pub fn merge_pages<I>(pages: I) -> Vec<Value>
where
    I: IntoIterator<Item = TrackPage>,
{
    pages.into_iter().flat_map(|page| page.items).collect()
}

/// Drops nulls and items that match neither listing shape.
pub fn usable_records(items: Vec<Value>) -> Vec<RawTrackRecord> {
    items.iter().filter_map(RawTrackRecord::classify).collect()
}
