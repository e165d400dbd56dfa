//! A thin client for [Slack's Web API](https://api.slack.com/methods).
//!
//! ```no_run
//! # async fn run() -> Result<(), slack_oauth::SlackError> {
//! use slack_oauth::{ChannelId, SlackOAuthClient};
//!
//! let client = SlackOAuthClient::new("xoxb-...")?;
//! client
//!     .post_message(&ChannelId("C024BE91L".into()), "hello", None)
//!     .await?;
//!
//! let everyone = client.get_all_user_list().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
mod de;
pub mod slack;

pub use config::{ClientConfig, ConfigError};
pub use slack::{
    api::{Envelope, HttpClient, API_BASE},
    channel::{Channel, ChannelId},
    client::SlackOAuthClient,
    form::{FormValue, Params},
    user::{User, UserId, UserListPage},
    SlackAccessToken, SlackError,
};
