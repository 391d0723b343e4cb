//! # CLI Module
//!
//! User-facing commands of sporfortune.
//!
//! ## Commands
//!
//! - [`auth`] - Sign in with Spotify (OAuth 2.0 PKCE)
//! - [`serve`] - Run the fortune API
//! - [`fortune`] - Show today's fortune, drawing one if the day allows it
//! - [`watch`] - Count down to the next fortune
//! - [`forget`] - Drop the stored fortune
//! - [`logout`] - Remove the stored token and fortune
//!
//! ## Daily Flow
//!
//! ```bash
//! sporfortune auth          # once
//! sporfortune serve         # in another terminal, or on a server
//! sporfortune fortune       # draws today's fortune
//! sporfortune fortune       # same fortune again, no network
//! sporfortune watch --fetch # waits for midnight, then draws
//! ```
//!
//! The "once per day" rule lives entirely in the client
//! ([`crate::management::DailyFortuneCache`]); `fortune --refresh` ignores it.

mod auth;
mod fortune;
mod session;
mod watch;

pub use auth::auth;
pub use fortune::{fortune, print_fortune};
pub use session::{forget, logout, serve};
pub use watch::watch;
