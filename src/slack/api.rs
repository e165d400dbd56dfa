//! Transport and envelope definitions for the Slack Web API.

use super::error::SlackError;
use crate::config::ClientConfig;
use once_cell::sync::Lazy;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{Map, Value};
use serde_with::{serde_as, NoneAsEmptyString};
use url::Url;

/// The base URL of the Slack API.
pub const API_BASE: &str = "https://slack.com/api/";

/// [API_BASE], parsed once.
pub static API_BASE_URL: Lazy<Url> =
    Lazy::new(|| Url::parse(API_BASE).expect("API_BASE is a valid absolute URL"));

/// Every method is called with a form body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A [reqwest::Client] bound to a base URL, which holds a connection pool
/// internally.
///
/// Paths are resolved beneath the base, so `users.list` against
/// `https://slack.com/api/` is `https://slack.com/api/users.list`.
#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: reqwest::Client,
    base: Url,
    headers: HeaderMap,
}

/// Build the transport for a client. Every constructor goes through here so
/// that the base URL and default headers are only ever defined once.
pub(crate) fn http_client(config: &ClientConfig) -> Result<HttpClient, SlackError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

    let mut builder = reqwest::Client::builder().default_headers(headers.clone());
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    Ok(HttpClient {
        inner: builder.build()?,
        base: with_trailing_slash(config.base_url.clone()),
        headers,
    })
}

/// Without a trailing slash, [Url::join] would replace the last path segment
/// of the base rather than append to it.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    url
}

impl HttpClient {
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// The headers sent with every request unless overridden.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Resolve a path such as `chat.postMessage` or `/chat.postMessage`.
    pub fn url<T: AsRef<str>>(&self, path: T) -> Result<Url, SlackError> {
        Ok(self.base.join(path.as_ref().trim_start_matches('/'))?)
    }

    pub fn get<T: AsRef<str>>(&self, path: T) -> Result<reqwest::RequestBuilder, SlackError> {
        Ok(self.inner.get(self.url(path)?))
    }

    pub fn post<T: AsRef<str>>(&self, path: T) -> Result<reqwest::RequestBuilder, SlackError> {
        Ok(self.inner.post(self.url(path)?))
    }

    pub fn put<T: AsRef<str>>(&self, path: T) -> Result<reqwest::RequestBuilder, SlackError> {
        Ok(self.inner.put(self.url(path)?))
    }

    pub fn delete<T: AsRef<str>>(&self, path: T) -> Result<reqwest::RequestBuilder, SlackError> {
        Ok(self.inner.delete(self.url(path)?))
    }
}

/// A whole response object, `ok` included.
pub type Envelope = Map<String, Value>;

/// Slack's API returns a common "untagged" response, representing whether a
/// request was successful.
///
/// ```json
/// {
///     "ok": true,
///     "channels": []
/// }
/// ```
///
/// ```json
/// {
///     "ok": false,
///     "error": "invalid_auth"
/// }
/// ```
#[derive(Deserialize)]
#[serde(untagged)]
pub enum APIResult<T> {
    Ok(Success<T>),
    Err(ErrorResponse),
}

/// The universal response in case of a successful request. Everything other
/// than `ok` lands in `payload`.
#[derive(Deserialize)]
pub struct Success<T> {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
    #[serde(flatten)]
    pub payload: T,
}

/// The universal response in case of an unsuccessful request.
// Ideally we'd be able to use `ok` as a tag, rather than defining `APIResult`
// as untagged. See:
//   <https://github.com/serde-rs/serde/issues/745#issuecomment-294314786>
#[derive(Deserialize)]
pub struct ErrorResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_false")]
    ok: bool,
    pub error: String,
}

impl<T> APIResult<T> {
    pub fn into_result(self) -> Result<T, SlackError> {
        match self {
            APIResult::Ok(res) => Ok(res.payload),
            APIResult::Err(res) => Err(SlackError::APIResponseError(res.error)),
        }
    }
}

/// The metadata attached to collection responses, enabling pagination. An
/// empty cursor means there are no further pages.
#[serde_as]
#[derive(Deserialize, Default)]
pub struct PaginationMeta {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Pull the next cursor out of an optional `response_metadata`.
pub fn next_cursor(meta: Option<PaginationMeta>) -> Option<String> {
    meta.and_then(|m| m.next_cursor)
}
