use std::{error::Error, fmt};

/// Sum type representing every possible unexceptional fail state.
#[derive(Debug)]
pub enum SlackError {
    /// The request never produced a well-formed envelope: network failure,
    /// non-2xx status, or a body that isn't `{"ok": ...}` JSON.
    APIRequestFailed(reqwest::Error),
    /// Slack answered with `"ok": false`.
    APIResponseError(String),
    InvalidURL(url::ParseError),
    InvalidForm(serde_urlencoded::ser::Error),
}

impl From<reqwest::Error> for SlackError {
    fn from(e: reqwest::Error) -> Self {
        SlackError::APIRequestFailed(e)
    }
}

impl From<url::ParseError> for SlackError {
    fn from(e: url::ParseError) -> Self {
        SlackError::InvalidURL(e)
    }
}

impl From<serde_urlencoded::ser::Error> for SlackError {
    fn from(e: serde_urlencoded::ser::Error) -> Self {
        SlackError::InvalidForm(e)
    }
}

/// Slack's own error codes are printed verbatim, without any prefix, so that
/// callers can match on e.g. `invalid_auth` via `to_string()`.
impl fmt::Display for SlackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlackError::APIRequestFailed(e) => write!(f, "Slack API request failed: {}", e),
            SlackError::APIResponseError(e) => write!(f, "{}", e),
            SlackError::InvalidURL(e) => write!(f, "Invalid Slack API URL: {}", e),
            SlackError::InvalidForm(e) => write!(f, "Failed to encode form body: {}", e),
        }
    }
}

impl Error for SlackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SlackError::APIRequestFailed(e) => Some(e),
            SlackError::APIResponseError(_) => None,
            SlackError::InvalidURL(e) => Some(e),
            SlackError::InvalidForm(e) => Some(e),
        }
    }
}
