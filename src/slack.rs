//! A client for Slack's Web API, authenticated with an OAuth access token.
//!
//! Every method is a form-encoded `POST` to `https://slack.com/api/<method>`
//! carrying the token, answered by an `{"ok": ...}` envelope. See
//! [client::SlackOAuthClient::call] for the primitive the named helpers are
//! built upon.

pub mod api;
pub mod auth;
pub mod channel;
pub mod client;
pub mod error;
pub mod form;
mod message;
pub mod user;

pub use auth::SlackAccessToken;
pub use error::SlackError;
