use rand::Rng;

use crate::{
    error::FortuneError,
    fortune::normalize,
    types::{Fortune, RawTrackRecord},
};

pub const EMPTY_HISTORY_FORTUNE: &str =
    "We couldn't find any tracks to generate your fortune. Listen to more music on Spotify!";

pub const TRACK_NAME: &str = "{trackName}";
pub const ARTIST_NAME: &str = "{artistName}";

pub const TEMPLATES: &[&str] = &[
    "Your week will move to the beat of {trackName} by {artistName}. Dance through it.",
    "A door you thought was closed will open while {trackName} plays.",
    "{artistName} already knows what you are about to discover. Listen closely to {trackName}.",
    "The next bold idea you have will arrive somewhere between the verses of {trackName}.",
    "Someone close to you hums {trackName} when they think of you.",
    "Like the bridge in {trackName} by {artistName}, a change of key is coming your way.",
    "Press repeat on {trackName}: the universe rewards persistence today.",
    "Good news travels fast, about as fast as the tempo of {trackName}.",
    "{trackName} by {artistName} holds the answer to a question you have not asked yet.",
    "A small risk taken today will echo like the chorus of {trackName}.",
    "Your lucky soundtrack this season is {trackName}. Play it before a big decision.",
    "The quiet moments in {trackName} remind you that rest is also progress.",
    "An old friend will resurface, much like {trackName} in your listening history.",
    "Trust the rhythm you keep returning to. {artistName} certainly does.",
    "Whatever {trackName} makes you feel is the right compass for tomorrow.",
    "A surprising invitation is coming. Say yes, and hum {trackName} on the way there.",
    "Your taste in {artistName} reveals a patience that is about to pay off.",
    "The opening notes of {trackName} mark the start of a lucky streak.",
    "You will solve a stubborn problem the way {artistName} resolves {trackName}: gracefully.",
    "Harmony is on its way to your home, humming {trackName} as it walks in.",
    "Keep {trackName} close. It carries more courage than you think.",
    "The stars are aligned like a perfect playlist, and {trackName} is track one.",
    "A creative spark is near. {artistName} would approve.",
    "Sing {trackName} a little louder today; someone needs to hear it.",
    "Fortune favors the curious listener. Go deeper into {artistName}'s catalog.",
    "Every time {trackName} plays, a wish you made gets a little closer.",
    "The melody of {trackName} predicts calm waters after a short storm.",
    "Your next chapter has a soundtrack, and {trackName} by {artistName} is the overture.",
];

/// Builds a fortune from the given records using the thread-local RNG.
pub fn generate(tracks: &[RawTrackRecord]) -> Result<Fortune, FortuneError> {
    generate_with(tracks, &mut rand::rng())
}

/// Builds a fortune from the given records, drawing from `rng`.
///
/// One record and one template are picked uniformly at random. An empty
/// input yields the fixed "no tracks" fortune.
pub fn generate_with<R: Rng + ?Sized>(
    tracks: &[RawTrackRecord],
    rng: &mut R,
) -> Result<Fortune, FortuneError> {
    if tracks.is_empty() {
        return Ok(empty_fortune());
    }

    let selected = normalize(&tracks[rng.random_range(0..tracks.len())])?;
    let template = TEMPLATES[rng.random_range(0..TEMPLATES.len())];

    Ok(Fortune {
        text: fill_template(template, &selected.name, &selected.artist_name),
        tracks: vec![selected],
    })
}

pub fn empty_fortune() -> Fortune {
    Fortune {
        text: EMPTY_HISTORY_FORTUNE.to_string(),
        tracks: Vec::new(),
    }
}

/// Substitutes both placeholders in a single pass, so substituted values are
/// never scanned for placeholders again.
pub fn fill_template(template: &str, track_name: &str, artist_name: &str) -> String {
    let mut out = String::with_capacity(template.len() + track_name.len() + artist_name.len());
    let mut rest = template;

    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix(TRACK_NAME) {
            out.push_str(track_name);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(ARTIST_NAME) {
            out.push_str(artist_name);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}
