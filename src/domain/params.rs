//! Flat parameter set carried by every request and response

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Application id issued by the gateway.
pub const FIELD_APPID: &str = "appid";
/// Merchant id.
pub const FIELD_MCH_ID: &str = "mch_id";
/// Per-request random token.
pub const FIELD_NONCE_STR: &str = "nonce_str";
/// Algorithm selector (`MD5` or `HMAC-SHA256`).
pub const FIELD_SIGN_TYPE: &str = "sign_type";
/// The signature itself. Never part of the signed content.
pub const FIELD_SIGN: &str = "sign";
/// Communication status, `SUCCESS` or `FAIL`.
pub const FIELD_RETURN_CODE: &str = "return_code";
/// Communication failure detail.
pub const FIELD_RETURN_MSG: &str = "return_msg";
/// Payment notification callback.
pub const FIELD_NOTIFY_URL: &str = "notify_url";

pub const RETURN_CODE_SUCCESS: &str = "SUCCESS";
pub const RETURN_CODE_FAIL: &str = "FAIL";

/// Mapping of field name to opaque string value.
///
/// Keys are unique and iterate in byte-wise ascending order, which is the
/// order both the canonical string and the XML encoding need.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamSet {
    fields: BTreeMap<String, String>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, returning the previous value if the key was present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(key.into(), value.into())
    }

    /// Chainable [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert only when the key is absent. Presence decides, not emptiness.
    pub fn insert_if_absent(&mut self, key: &str, value: impl FnOnce() -> String) {
        if !self.fields.contains_key(key) {
            self.fields.insert(key.to_string(), value());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.fields.remove(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn return_code(&self) -> Option<&str> {
        self.get(FIELD_RETURN_CODE)
    }

    pub fn return_msg(&self) -> Option<&str> {
        self.get(FIELD_RETURN_MSG)
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.fields
    }
}

impl From<BTreeMap<String, String>> for ParamSet {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }
}

impl From<std::collections::HashMap<String, String>> for ParamSet {
    fn from(fields: std::collections::HashMap<String, String>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ParamSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for ParamSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for ParamSet {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
