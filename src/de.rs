//! Deserialisation helpers for Slack's `ok` envelope flag.
//!
//! Slack's responses are distinguished only by the value of `ok`, so these
//! let an untagged enum pick the right variant.

use serde::de::{Deserialize, Deserializer, Error};

fn expect_bool<'a, D>(deserializer: D, expected: bool) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    let found = bool::deserialize(deserializer)?;

    if found == expected {
        Ok(found)
    } else {
        Err(Error::custom(format!("invalid bool: {}", found)))
    }
}

/// Accept only `true`.
pub fn only_true<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    expect_bool(deserializer, true)
}

/// Accept only `false`.
pub fn only_false<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    expect_bool(deserializer, false)
}
