//! Post messages to a channel.

use super::{
    api::Envelope, channel::ChannelId, client::SlackOAuthClient, error::SlackError, form::Params,
};

impl SlackOAuthClient {
    /// Post a message in a channel via `chat.postMessage`.
    ///
    /// Any `options`, e.g. `as_user`, are sent after `channel` and `text`,
    /// and replace them should they share a key.
    ///
    /// <https://api.slack.com/methods/chat.postMessage#args>
    pub async fn post_message(
        &self,
        channel: &ChannelId,
        text: &str,
        options: Option<Params>,
    ) -> Result<Envelope, SlackError> {
        let params = Params::new().set("channel", channel).set("text", text);

        let params = match options {
            Some(options) => params.merge(options),
            None => params,
        };

        self.call("chat.postMessage", params).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::client::testing::*;
    use super::*;
    use serde_json::{json, Value};

    fn channel() -> ChannelId {
        ChannelId("C1234567890".into())
    }

    fn reply() -> Value {
        json!({
            "ok": true,
            "ts": "1405895017.000506",
            "channel": "C024BE91L",
            "message": {},
        })
    }

    #[tokio::test]
    async fn test_post_message() {
        let mut srv = server().await;
        let mock = mock_post(
            &mut srv,
            "/chat.postMessage",
            "channel=C1234567890&text=hello&token=xxxx-xxxxxxxxx-xxxx",
            &reply(),
        )
        .await;

        let res = client(&srv)
            .post_message(&channel(), "hello", None)
            .await
            .unwrap();

        mock.assert_async().await;

        assert_eq!(Value::Object(res), reply());
    }

    #[tokio::test]
    async fn test_post_message_with_options() {
        let mut srv = server().await;
        let mock = mock_post(
            &mut srv,
            "/chat.postMessage",
            "channel=C1234567890&text=hello&as_user=true&token=xxxx-xxxxxxxxx-xxxx",
            &reply(),
        )
        .await;

        let options = Params::new().set("as_user", true);
        let res = client(&srv)
            .post_message(&channel(), "hello", Some(options))
            .await
            .unwrap();

        mock.assert_async().await;

        assert_eq!(Value::Object(res), reply());
    }

    #[tokio::test]
    async fn test_post_message_escapes_text() {
        let mut srv = server().await;
        let mock = mock_post(
            &mut srv,
            "/chat.postMessage",
            "channel=C1234567890&text=fish+%26+chips%3F&token=xxxx-xxxxxxxxx-xxxx",
            &reply(),
        )
        .await;

        client(&srv)
            .post_message(&channel(), "fish & chips?", None)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_message_not_ok() {
        let mut srv = server().await;
        let mock = mock_post(
            &mut srv,
            "/chat.postMessage",
            "channel=C1234567890&text=hello&token=xxxx-xxxxxxxxx-xxxx",
            &json!({ "ok": false, "error": "not_in_channel" }),
        )
        .await;

        let err = client(&srv)
            .post_message(&channel(), "hello", None)
            .await
            .unwrap_err();

        mock.assert_async().await;

        assert_eq!(err.to_string(), "not_in_channel");
    }
}
