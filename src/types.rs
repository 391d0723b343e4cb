use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Time window of the `/me/top/tracks` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        };
        write!(f, "{}", s)
    }
}

/// One page of an upstream listing. Items stay untyped until they are
/// classified, so a single odd entry never fails the whole page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<Value>,
}

// Track fields decode leniently: a `null` or oddly typed value becomes the
// field's default, so only `normalize` decides whether a record is usable.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default, deserialize_with = "lenient")]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(default, deserialize_with = "lenient")]
    pub images: Vec<Image>,
}

/// Spotify track object as it appears in both listing shapes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackObject {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub artists: Vec<ArtistRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub external_urls: Option<ExternalUrls>,
    #[serde(default, deserialize_with = "lenient")]
    pub preview_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub album: Option<AlbumRef>,
}

impl TrackObject {
    fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

/// A listening-history entry in one of the two upstream shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum RawTrackRecord {
    /// `/me/player/recently-played` entry with the track nested under `track`.
    Played { track: TrackObject },
    /// `/me/top/tracks` entry carrying the track fields at the top level.
    Top(TrackObject),
}

impl RawTrackRecord {
    /// Classifies a raw listing item. Returns `None` for nulls and for items
    /// that carry neither a `track` object nor a `name`.
    pub fn classify(item: &Value) -> Option<Self> {
        let obj = item.as_object()?;

        match obj.get("track") {
            Some(track) if track.is_object() => Some(RawTrackRecord::Played {
                track: TrackObject::from_value(track),
            }),
            _ => match obj.get("name") {
                Some(name) if !name.is_null() => {
                    Some(RawTrackRecord::Top(TrackObject::from_value(item)))
                }
                _ => None,
            },
        }
    }

    pub fn track(&self) -> &TrackObject {
        match self {
            RawTrackRecord::Played { track } => track,
            RawTrackRecord::Top(track) => track,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalTrack {
    pub name: String,
    pub artist_name: String,
    pub spotify_url: String,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub album_art_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fortune {
    pub text: String,
    #[serde(default)]
    pub tracks: Vec<CanonicalTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FortuneResponse {
    pub fortune: Fortune,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// The single persisted fortune together with the local date it was drawn on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFortuneRecord {
    pub fortune: Fortune,
    /// `YYYY-MM-DD` in the client's local timezone.
    pub date: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeLeft {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub track: String,
    pub artist: String,
    pub link: String,
}
