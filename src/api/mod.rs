//! # API Module
//!
//! HTTP endpoints served by sporfortune.
//!
//! ## Fortune API
//!
//! - [`fortune`] - `GET /api/fortune`, draws a fortune from the listening
//!   history of whoever owns the bearer token
//! - [`health`] - `GET /health`, status and version
//!
//! ## OAuth Callback Listener
//!
//! - [`callback`] - `GET /callback`, completes the PKCE flow started by
//!   `sporfortune auth`
//!
//! ## Error Responses
//!
//! Failures are answered with JSON bodies built by
//! [`crate::error::FortuneError`]: 401 without a token, 403 when Spotify
//! refuses a listing for missing scopes, 500 for everything else.

mod callback;
mod fortune;
mod health;

pub use callback::callback;
pub use fortune::{bearer_token, fortune};
pub use health::health;
