//! Flat patient record as held by the records store.
//!
//! Every value is a scalar string. A key that is absent and a key holding `""` are
//! treated the same by [`InternalRecord::get`]; [`InternalRecord::field`] additionally
//! folds empty values to `None` so callers can decide whether to emit optional entries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field names used by the records store.
pub mod keys {
    pub const TITLE: &str = "title";
    pub const FNAME: &str = "fname";
    pub const MNAME: &str = "mname";
    pub const LNAME: &str = "lname";
    pub const STREET: &str = "street";
    pub const CITY: &str = "city";
    pub const STATE: &str = "state";
    pub const POSTAL_CODE: &str = "postal_code";
    pub const PHONE_HOME: &str = "phone_home";
    pub const PHONE_BIZ: &str = "phone_biz";
    pub const PHONE_CELL: &str = "phone_cell";
    pub const EMAIL: &str = "email";
    /// Social security number.
    pub const SS: &str = "ss";
    pub const DOB: &str = "DOB";
    pub const SEX: &str = "sex";
    /// Store-assigned UUID for the record, if it has one.
    pub const UUID: &str = "uuid";
    /// Store-assigned numeric patient id.
    pub const PID: &str = "pid";
}

/// Flat key/value patient record.
///
/// Serialises as a plain object (`{"fname": "Jason", ...}`). Keys are kept sorted so the
/// record has a single canonical listing, which identifier derivation relies on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InternalRecord(BTreeMap<String, String>);

impl InternalRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, or `""` when the key is absent.
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    /// Value for `key`, or `None` when the key is absent or holds an empty string.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Sets `key` to `value`, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Iterates fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for InternalRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
