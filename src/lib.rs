//! Spotify Fortune Cookie Library
//!
//! Draws a daily "fortune" from a user's Spotify listening history. The
//! library contains both sides: the HTTP service that aggregates recent and
//! top tracks and fills a fortune template, and the client pieces that
//! authenticate, call that service and keep one fortune per local day.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the fortune API and the OAuth callback
//! - `cli` - Command-line interface implementations
//! - `client` - HTTP client for the fortune API
//! - `config` - Configuration management and environment variables
//! - `error` - Error types and their HTTP responses
//! - `fortune` - History aggregation, track normalization, fortune generation
//! - `management` - Token persistence and the daily fortune cache
//! - `server` - Router construction and listeners
//! - `spotify` - Spotify OAuth 2.0 PKCE flow
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use sporfortune::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> sporfortune::Res<()> {
//!     config::load_env().await?;
//!     cli::fortune(false).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod fortune;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Result alias for application plumbing (config, token persistence,
/// listeners). Domain failures use the typed errors in [`error`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line with a blue `o` bullet.
///
/// ```
/// info!("Fortune API listening on http://{}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a green check mark line for completed steps.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line and exits with status 1.
///
/// Only for situations the CLI cannot recover from, such as a missing
/// token. Never used on the request path of the fortune API.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line for recoverable problems.
///
/// ```
/// warning!("Discarding unreadable stored fortune.");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
