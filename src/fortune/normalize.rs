use crate::{
    error::FortuneError,
    types::{CanonicalTrack, RawTrackRecord},
};

/// Converts either listing shape into a [`CanonicalTrack`].
///
/// The name, the first artist's name and the Spotify link are required;
/// preview and album art stay optional. The album art is the first image
/// Spotify lists, which is the largest one.
pub fn normalize(raw: &RawTrackRecord) -> Result<CanonicalTrack, FortuneError> {
    let track = raw.track();

    let name = track
        .name
        .clone()
        .ok_or(FortuneError::MalformedRecord("track name"))?;

    let artist_name = track
        .artists
        .first()
        .and_then(|a| a.name.clone())
        .ok_or(FortuneError::MalformedRecord("artist name"))?;

    let spotify_url = track
        .external_urls
        .as_ref()
        .and_then(|u| u.spotify.clone())
        .ok_or(FortuneError::MalformedRecord("spotify url"))?;

    let album_art_url = track
        .album
        .as_ref()
        .and_then(|album| album.images.first())
        .and_then(|image| image.url.clone());

    Ok(CanonicalTrack {
        name,
        artist_name,
        spotify_url,
        preview_url: track.preview_url.clone(),
        album_art_url,
    })
}
