//! Method arguments, encoded as `application/x-www-form-urlencoded` bodies.

use super::{auth::SlackAccessToken, error::SlackError};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

/// A scalar form value.
#[derive(Clone, Debug, PartialEq)]
pub enum FormValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Values are written the way Slack's documentation shows them, e.g. `true`
/// rather than `1`, and `1` rather than `1.0`.
impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormValue::Str(x) => write!(f, "{}", x),
            FormValue::Int(x) => write!(f, "{}", x),
            FormValue::Float(x) => fmt_float(*x, f),
            FormValue::Bool(x) => write!(f, "{}", x),
        }
    }
}

/// Number formatting as JavaScript's `String(x)` does it, which is what
/// existing integrations send: `Infinity`, `NaN`, `0` for `-0`, and an
/// exponent with an explicit sign outside `[1e-6, 1e21)`.
fn fmt_float(x: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if x.is_nan() {
        return write!(f, "NaN");
    }

    if x.is_infinite() {
        return write!(f, "{}Infinity", if x < 0.0 { "-" } else { "" });
    }

    if x == 0.0 {
        return write!(f, "0");
    }

    let abs = x.abs();
    if (1e-6..1e21).contains(&abs) {
        return write!(f, "{}", x);
    }

    // `{:e}` is already the shortest round-trip mantissa, e.g. `1.5e300`.
    let exp = format!("{:e}", x);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => write!(f, "{}e+{}", mantissa, power),
        _ => write!(f, "{}", exp),
    }
}

impl From<String> for FormValue {
    fn from(x: String) -> Self {
        FormValue::Str(x)
    }
}

impl From<&str> for FormValue {
    fn from(x: &str) -> Self {
        FormValue::Str(x.to_owned())
    }
}

impl From<&String> for FormValue {
    fn from(x: &String) -> Self {
        FormValue::Str(x.clone())
    }
}

impl From<bool> for FormValue {
    fn from(x: bool) -> Self {
        FormValue::Bool(x)
    }
}

impl From<i32> for FormValue {
    fn from(x: i32) -> Self {
        FormValue::Int(x.into())
    }
}

impl From<u32> for FormValue {
    fn from(x: u32) -> Self {
        FormValue::Int(x.into())
    }
}

impl From<i64> for FormValue {
    fn from(x: i64) -> Self {
        FormValue::Int(x)
    }
}

impl From<f64> for FormValue {
    fn from(x: f64) -> Self {
        FormValue::Float(x)
    }
}

/// Ordered method arguments.
///
/// A key holding `None` is *unset* but still sent, as `key=` with an empty
/// value. Slack treats that the same as an omitted argument, and existing
/// integrations depend on the key being on the wire.
///
/// Setting a key that's already present replaces its value in place, keeping
/// the original position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params(Vec<(String, Option<FormValue>)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value.
    pub fn insert<K: Into<String>>(&mut self, key: K, value: Option<FormValue>) {
        let key = key.into();

        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn set<K: Into<String>, V: Into<FormValue>>(mut self, key: K, value: V) -> Self {
        self.insert(key, Some(value.into()));
        self
    }

    /// `None` sets the key as unset rather than leaving it out.
    pub fn set_opt<K: Into<String>, V: Into<FormValue>>(mut self, key: K, value: Option<V>) -> Self {
        self.insert(key, value.map(Into::into));
        self
    }

    pub fn unset<K: Into<String>>(mut self, key: K) -> Self {
        self.insert(key, None);
        self
    }

    /// Merge `other` into these params, its values winning on conflicts.
    pub fn merge(mut self, other: Params) -> Self {
        for (k, v) in other.0 {
            self.insert(k, v);
        }
        self
    }

    /// Every request carries the token last, unless the caller already named
    /// a `token` key, in which case that slot is overwritten.
    pub fn with_token(self, token: &SlackAccessToken) -> Self {
        self.set("token", token.as_str())
    }

    pub fn get(&self, key: &str) -> Option<Option<&FormValue>> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_ref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&FormValue>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn encode(&self) -> Result<String, SlackError> {
        Ok(serde_urlencoded::to_string(self)?)
    }
}

impl<K: Into<String>, V: Into<FormValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Params::new(), |params, (k, v)| params.set(k, v))
    }
}

/// Serialises as a sequence of pairs, which is the shape
/// [serde_urlencoded] accepts for ordered, possibly repeated, keys.
impl Serialize for Params {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;

        for (k, v) in &self.0 {
            let value = v.as_ref().map(ToString::to_string).unwrap_or_default();
            seq.serialize_element(&(k, value))?;
        }

        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    fn token() -> SlackAccessToken {
        SlackAccessToken("xxxx-xxxxxxxxx-xxxx".into())
    }

    #[test]
    fn test_unset_is_sent_empty() {
        let body = Params::new()
            .unset("cursor")
            .with_token(&token())
            .encode()
            .unwrap();

        assert_eq!(body, "cursor=&token=xxxx-xxxxxxxxx-xxxx");
    }

    #[test]
    fn test_set_opt_none_matches_unset() {
        assert_eq!(
            Params::new().set_opt::<_, &str>("cursor", None),
            Params::new().unset("cursor")
        );
    }

    #[test]
    fn test_scalar_formatting() {
        let body = Params::new()
            .set("text", "a b&c")
            .set("as_user", true)
            .set("limit", 200)
            .set("ratio", 1.0)
            .set("half", 0.5)
            .encode()
            .unwrap();

        assert_eq!(body, "text=a+b%26c&as_user=true&limit=200&ratio=1&half=0.5");
    }

    #[test]
    fn test_float_edge_formatting() {
        let body = Params::new()
            .set("inf", f64::INFINITY)
            .set("neg_inf", f64::NEG_INFINITY)
            .set("nan", f64::NAN)
            .set("neg_zero", -0.0)
            .set("big", 1e21)
            .set("huge", -1.5e300)
            .set("below_big", 123456789012345680000.0)
            .set("tiny", 1e-7)
            .set("small", 0.000001)
            .encode()
            .unwrap();

        assert_eq!(
            body,
            "inf=Infinity&neg_inf=-Infinity&nan=NaN&neg_zero=0&big=1e%2B21&huge=-1.5e%2B300\
             &below_big=123456789012345680000&tiny=1e-7&small=0.000001"
        );
    }

    #[test]
    fn test_punctuation_escaping() {
        let body = Params::new().set("text", "a b!~'()*").encode().unwrap();

        assert_eq!(body, "text=a+b%21%7E%27%28%29*");
    }

    #[test]
    fn test_merge_keeps_position() {
        let base = Params::new().set("channel", "C1").set("text", "hi");
        let merged = base.merge(Params::new().set("as_user", true).set("channel", "C2"));

        assert_eq!(
            merged.encode().unwrap(),
            "channel=C2&text=hi&as_user=true"
        );
    }

    #[test]
    fn test_caller_token_is_overwritten() {
        let body = Params::new()
            .set("token", "spoofed")
            .set("user", "U1")
            .with_token(&token())
            .encode()
            .unwrap();

        assert_eq!(body, "token=xxxx-xxxxxxxxx-xxxx&user=U1");
    }

    #[test]
    fn test_get() {
        let params: Params = vec![("a", "1")].into_iter().collect();
        let params = params.unset("b");

        assert_eq!(params.get("a"), Some(Some(&FormValue::Str("1".into()))));
        assert_eq!(params.get("b"), Some(None));
        assert_eq!(params.get("c"), None);
        assert_eq!(params.len(), 2);
    }

    quickcheck! {
        fn test_encoding_preserves_pairs(pairs: Vec<(String, Option<String>)>) -> bool {
            let params = Params(
                pairs
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone().map(FormValue::Str)))
                    .collect(),
            );

            let decoded: Vec<(String, String)> =
                serde_urlencoded::from_str(&params.encode().unwrap()).unwrap();

            let expected: Vec<(String, String)> = pairs
                .into_iter()
                .map(|(k, v)| (k, v.unwrap_or_default()))
                .collect();

            decoded == expected
        }

        fn test_token_sent_exactly_once(keys: Vec<String>) -> bool {
            let params = keys
                .into_iter()
                .fold(Params::new(), |params, k| params.unset(k))
                .with_token(&token());

            let tokens: Vec<_> = params.iter().filter(|(k, _)| *k == "token").collect();

            tokens.len() == 1
                && tokens[0].1 == Some(&FormValue::Str("xxxx-xxxxxxxxx-xxxx".into()))
        }
    }
}
