//! Command-line access to Slack's Web API.
//!
//! The access token is read from `$SLACK_TOKEN` (or `--token`), optionally
//! via a `.env` file. Results are printed to stdout as JSON.

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde::Serialize;
use slack_oauth::{ChannelId, ClientConfig, Params, SlackOAuthClient, UserId};
use std::error::Error;
use tracing::warn;

#[derive(Parser)]
#[command(name = "slack-oauth", about = "Call Slack's Web API", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// OAuth access token
    #[arg(long, env = "SLACK_TOKEN", hide_env_values = true)]
    token: String,
}

#[derive(Subcommand)]
enum Command {
    /// Post a message to a channel
    Post {
        channel: String,
        text: String,
        /// Post as the authed user rather than as a bot
        #[arg(long)]
        as_user: bool,
    },

    /// List workspace members
    Users {
        /// Follow cursors to fetch every page
        #[arg(long)]
        all: bool,
        /// Start from this cursor
        #[arg(long, conflicts_with = "all")]
        cursor: Option<String>,
    },

    /// Show a single user
    User { id: String },

    /// List channels
    Channels,

    /// Show a single channel
    Channel { id: String },

    /// Call any method with `key=value` arguments. A bare `key` is sent empty.
    Call { method: String, args: Vec<String> },
}

/// Application entrypoint. Initialises tracing, loads any `.env`, and runs
/// the requested command. Log levels come from `$RUST_LOG`, defaulting to
/// `info`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    found_dotenv(dotenv());

    let cli = Cli::parse();

    let config = ClientConfig::from_env()?;
    if config.base_url.as_str() != slack_oauth::API_BASE {
        warn!("Using non-default API base {}", config.base_url);
    }

    let client = SlackOAuthClient::with_config(cli.token, config)?;

    match cli.command {
        Command::Post {
            channel,
            text,
            as_user,
        } => {
            let options = as_user.then(|| Params::new().set("as_user", true));
            let res = client
                .post_message(&ChannelId(channel), &text, options)
                .await?;
            print(&res)
        }
        Command::Users { all: true, .. } => print(&client.get_all_user_list().await?),
        Command::Users { cursor, .. } => {
            print(&client.get_user_list(cursor.as_deref()).await?)
        }
        Command::User { id } => print(&client.get_user_info(&UserId(id)).await?),
        Command::Channels => print(&client.get_channel_list().await?),
        Command::Channel { id } => print(&client.get_channel_info(&ChannelId(id)).await?),
        Command::Call { method, args } => {
            let res = client.call(&method, parse_args(&args)).await?;
            print(&res)
        }
    }
}

/// Whether a `.env` was loaded, warning if not.
fn found_dotenv<T>(res: dotenvy::Result<T>) -> bool {
    match res {
        Ok(_) => true,
        Err(e) if e.not_found() => {
            warn!("No .env found");
            false
        }
        Err(e) => {
            warn!("Could not load .env: {}", e);
            false
        }
    }
}

fn print<T: Serialize>(x: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(x)?);
    Ok(())
}

/// Parse `key=value` pairs in order. Values are always sent as strings.
fn parse_args(args: &[String]) -> Params {
    args.iter().fold(Params::new(), |params, arg| match arg.split_once('=') {
        Some((k, v)) => params.set(k, v),
        None => params.unset(arg.as_str()),
    })
}
