//! Look up the members of a workspace.

use super::{
    api::{next_cursor, PaginationMeta},
    client::SlackOAuthClient,
    error::SlackError,
    form::{FormValue, Params},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// Users are referred to by ID, e.g. `U023BECGF`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&UserId> for FormValue {
    fn from(x: &UserId) -> Self {
        FormValue::Str(x.0.clone())
    }
}

/// A user object, kept exactly as Slack sent it. Nothing is required of it,
/// so one unusual member can't fail a whole listing.
///
/// <https://api.slack.com/types/user>
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User(pub Map<String, Value>);

impl User {
    pub fn id(&self) -> Option<UserId> {
        self.0
            .get("id")
            .and_then(Value::as_str)
            .map(|x| UserId(x.to_owned()))
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }
}

/// One page of `users.list`.
#[derive(Debug)]
pub struct UserListPage {
    pub members: Vec<User>,
    /// Present if there are further pages.
    pub next_cursor: Option<String>,
}

/// <https://api.slack.com/methods/users.list#examples>
#[derive(Deserialize)]
struct ListResponse {
    members: Vec<User>,
    #[serde(default)]
    response_metadata: Option<PaginationMeta>,
}

/// <https://api.slack.com/methods/users.info#examples>
#[derive(Deserialize)]
struct InfoResponse {
    user: User,
}

impl SlackOAuthClient {
    /// Fetch a single page of `users.list`, starting from the beginning when
    /// `cursor` is `None`.
    pub async fn get_user_list_page(&self, cursor: Option<&str>) -> Result<UserListPage, SlackError> {
        let res: ListResponse = self
            .call_as("users.list", Params::new().set_opt("cursor", cursor))
            .await?;

        Ok(UserListPage {
            members: res.members,
            next_cursor: next_cursor(res.response_metadata),
        })
    }

    /// The members of a single page of `users.list`.
    pub async fn get_user_list(&self, cursor: Option<&str>) -> Result<Vec<User>, SlackError> {
        Ok(self.get_user_list_page(cursor).await?.members)
    }

    /// Every member of the workspace, following cursors until Slack stops
    /// returning them. Pages are fetched one after another and concatenated
    /// in order.
    ///
    /// A failure on any page fails the whole listing.
    pub async fn get_all_user_list(&self) -> Result<Vec<User>, SlackError> {
        let mut members: Vec<User> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page = 1;

        loop {
            let mut res = self.get_user_list_page(cursor.as_deref()).await?;
            debug!(page, count = res.members.len(), "Fetched users.list page");

            members.append(&mut res.members);

            cursor = res.next_cursor;
            if cursor.is_none() {
                break Ok(members);
            }

            page += 1;
        }
    }

    pub async fn get_user_info(&self, user: &UserId) -> Result<User, SlackError> {
        let res: InfoResponse = self
            .call_as("users.info", Params::new().set("user", user))
            .await?;

        Ok(res.user)
    }
}
