//! # API Module
//!
//! HTTP endpoints of the short-lived local server started during the
//! user-authorized (PKCE) flow.
//!
//! - [`callback`] - receives the authorization code from Spotify's redirect and
//!   exchanges it for an access token, or records why authorization failed.
//! - [`health`] - reports that the server is up and which version is running.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
