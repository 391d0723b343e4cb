//! # Spotify Integration Module
//!
//! Authentication against Spotify's accounts service. The listening-history
//! calls live in [`crate::fortune::aggregator`] next to the code that
//! consumes them.
//!
//! ## Authentication Flow
//!
//! [`auth`] implements OAuth 2.0 with PKCE, so no client secret is stored:
//!
//! 1. **Code Verifier Generation**: a random 128 character verifier
//! 2. **Challenge Creation**: URL-safe base64 of its SHA256 digest
//! 3. **Authorization Request**: the user is sent to Spotify with the challenge
//! 4. **Local Callback**: the code arrives at a temporary axum listener
//! 5. **Token Exchange**: code + verifier are traded for an access token
//! 6. **Token Storage**: the token is persisted by
//!    [`crate::management::TokenManager`], which refreshes it 4 minutes
//!    before it expires
//!
//! ## Scopes
//!
//! Only `user-read-recently-played` and `user-top-read` are needed. Missing
//! scopes surface as 403 from the fortune server, and the CLI asks the user
//! to sign in again.

pub mod auth;
