//! The OAuth client and its generic call primitive.

use super::{
    api::{http_client, APIResult, Envelope, HttpClient},
    auth::SlackAccessToken,
    error::SlackError,
    form::Params,
};
use crate::config::ClientConfig;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// A client for Slack's Web API, authenticating each call with an OAuth
/// access token sent as a form field.
///
/// Nothing is mutated after construction, so a single client can be shared
/// freely between tasks.
#[derive(Clone, Debug)]
pub struct SlackOAuthClient {
    token: SlackAccessToken,
    http: HttpClient,
}

impl SlackOAuthClient {
    /// Create a client against the public Slack API.
    pub fn new<T: Into<SlackAccessToken>>(token: T) -> Result<Self, SlackError> {
        Self::with_config(token, ClientConfig::default())
    }

    /// Equivalent to [SlackOAuthClient::new].
    pub fn connect<T: Into<SlackAccessToken>>(token: T) -> Result<Self, SlackError> {
        Self::new(token)
    }

    pub fn with_config<T: Into<SlackAccessToken>>(
        token: T,
        config: ClientConfig,
    ) -> Result<Self, SlackError> {
        Ok(SlackOAuthClient {
            token: token.into(),
            http: http_client(&config)?,
        })
    }

    /// The underlying transport, for making requests this client has no
    /// helper for.
    pub fn http_client(&self) -> &HttpClient {
        &self.http
    }

    /// Call any Web API method, returning the whole response envelope.
    ///
    /// Fails with [SlackError::APIResponseError] carrying Slack's error code
    /// if the response isn't `ok`.
    pub async fn call(&self, method: &str, params: Params) -> Result<Envelope, SlackError> {
        let mut envelope: Envelope = self.call_as(method, params).await?;
        envelope.insert("ok".to_owned(), Value::Bool(true));

        Ok(envelope)
    }

    /// Call any Web API method, deserialising the fields of a successful
    /// envelope other than `ok` into `T`.
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Params,
    ) -> Result<T, SlackError> {
        let body = params.with_token(&self.token).encode()?;

        debug!(method, "Calling Slack API");

        let res: APIResult<T> = self
            .http
            .post(method)?
            .body(body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        res.into_result().map_err(|e| {
            warn!(method, error = %e, "Slack API returned error");
            e
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use url::Url;

    pub const TOKEN: &str = "xxxx-xxxxxxxxx-xxxx";

    pub async fn server() -> mockito::ServerGuard {
        mockito::Server::new_async().await
    }

    pub fn client(srv: &mockito::ServerGuard) -> SlackOAuthClient {
        let config = ClientConfig::default().with_base_url(Url::parse(&srv.url()).unwrap());

        SlackOAuthClient::with_config(TOKEN, config).unwrap()
    }

    /// A `POST` mock which only matches the exact form body Slack should
    /// receive, sent with the form content type.
    pub async fn mock_post(
        srv: &mut mockito::ServerGuard,
        path: &str,
        body: &str,
        reply: &serde_json::Value,
    ) -> mockito::Mock {
        srv.mock("POST", path)
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(body)
            .with_header("content-type", "application/json")
            .with_body(reply.to_string())
            .expect(1)
            .create_async()
            .await
    }
}
