//! # Fortune Module
//!
//! Turns a user's listening history into a fortune.
//!
//! - [`aggregator`] pulls recent plays and top tracks from Spotify and keeps
//!   the records that match one of the two listing shapes
//! - [`normalize`] maps either shape onto a [`crate::types::CanonicalTrack`]
//! - [`generator`] picks one record and one template at random

pub mod aggregator;
pub mod generator;
mod normalize;

pub use aggregator::{HistoryFetcher, SpotifyHistory, aggregate};
pub use generator::{empty_fortune, generate};
pub use normalize::normalize;
