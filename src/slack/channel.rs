//! Look up public channels.

use super::{
    client::SlackOAuthClient,
    error::SlackError,
    form::{FormValue, Params},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Because channel names can change, channels are generally referred to by
/// their underlying ID. This can be found in the UI by copying a link to the
/// channel.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

/// Format without the surrounding newtype wrapper.
///
/// ```
/// # use slack_oauth::ChannelId;
/// let x = ChannelId("C024BE91L".into());
/// assert_eq!(format!("{}", x), "C024BE91L");
/// ```
impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&ChannelId> for FormValue {
    fn from(x: &ChannelId) -> Self {
        FormValue::Str(x.0.clone())
    }
}

/// A channel object, kept exactly as Slack sent it.
///
/// <https://api.slack.com/types/channel>
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Channel(pub Map<String, Value>);

impl Channel {
    pub fn id(&self) -> Option<ChannelId> {
        self.0
            .get("id")
            .and_then(Value::as_str)
            .map(|x| ChannelId(x.to_owned()))
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }
}

/// <https://api.slack.com/methods/channels.list#examples>
#[derive(Deserialize)]
struct ListResponse {
    channels: Vec<Channel>,
}

/// <https://api.slack.com/methods/channels.info#examples>
#[derive(Deserialize)]
struct InfoResponse {
    channel: Channel,
}

impl SlackOAuthClient {
    pub async fn get_channel_list(&self) -> Result<Vec<Channel>, SlackError> {
        let res: ListResponse = self.call_as("channels.list", Params::new()).await?;

        Ok(res.channels)
    }

    pub async fn get_channel_info(&self, channel: &ChannelId) -> Result<Channel, SlackError> {
        let res: InfoResponse = self
            .call_as("channels.info", Params::new().set("channel", channel))
            .await?;

        Ok(res.channel)
    }
}
