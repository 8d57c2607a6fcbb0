//! Spotify Playlist Genre Tool Library
//!
//! Reads a Spotify playlist, resolves the genres of every track's artists with
//! batched lookups that tolerate rate limiting, and filters or summarizes the
//! playlist by genre, optionally saving the result as a new playlist.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration from environment variables and `.env` files
//! - `error` - Error taxonomy and `Result` alias
//! - `management` - Genre aggregation and filtering over fetched tracks
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client, pagination and genre resolution
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use genrefy::{config, spotify};
//!
//! #[tokio::main]
//! async fn main() -> genrefy::Result<()> {
//!     config::load_env().await?;
//!     let token = spotify::auth::client_credentials().await?;
//!     let api = spotify::SpotifyClient::new(token);
//!     let tracks = spotify::playlist::get_all_tracks(&api, "3z3ssAyKVkPBtThG44BcaX").await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Prints a status line prefixed with a blue `o`.
///
/// Takes the same arguments as `println!`.
///
/// ```
/// info!("Fetching playlist tracks...");
/// info!("{} distinct genres", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a completion line prefixed with a green `✓`.
///
/// ```
/// success!("Fetched {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a fatal error prefixed with a red `!` to stderr and exits with code 1.
///
/// Only `main` should reach for this; library code returns [`Error`].
///
/// ```
/// error!("{}", err);
/// // not reached
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a recoverable problem prefixed with a yellow `!` to stderr.
///
/// ```
/// warning!("Rate limited. Retrying after {} seconds.", retry_after);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
