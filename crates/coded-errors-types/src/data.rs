//! The data bag attached to every coded error.
//!
//! [`ErrorData`] maps placeholder names to display strings. A value may be
//! absent (`None`), which template substitution treats the same as a missing
//! key. Values are stringified on insertion, so anything implementing
//! [`Display`] can be stored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Suffix marking a key as anonymous: usable for substitution but not exposed
/// on the constructed error.
pub const ANONYMOUS_KEY_SUFFIX: char = '_';

/// Returns true if `key` is an anonymous substitution key (ends with `_`).
pub fn is_anonymous_key(key: &str) -> bool {
    key.ends_with(ANONYMOUS_KEY_SUFFIX)
}

/// Placeholder values supplied to a single error construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorData {
    entries: BTreeMap<String, Option<String>>,
}

impl ErrorData {
    /// Create an empty data bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a present value, replacing any previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) {
        self.entries.insert(key.into(), Some(value.to_string()));
    }

    /// Insert a value that may be absent.
    pub fn insert_opt<V: Display>(&mut self, key: impl Into<String>, value: Option<V>) {
        self.entries.insert(key.into(), value.map(|v| v.to_string()));
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder form of [`insert_opt`](Self::insert_opt).
    pub fn with_opt<V: Display>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.insert_opt(key, value);
        self
    }

    /// The value for `key`, or `None` if the key is missing or its value is absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(|v| v.as_deref())
    }

    /// True if `key` was supplied, even with an absent value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Copy of this bag without anonymous keys (see [`is_anonymous_key`]).
    pub fn without_anonymous_keys(&self) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|(key, _)| !is_anonymous_key(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Self { entries }
    }
}

impl<K, V> FromIterator<(K, V)> for ErrorData
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = Self::new();
        for (key, value) in iter {
            data.insert(key, value);
        }
        data
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for ErrorData
where
    K: Into<String>,
    V: Display,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Build an [`ErrorData`] from `key => value` pairs.
///
/// ```
/// use coded_errors_types::error_data;
///
/// let data = error_data! { "file" => "foo.txt", "attempts" => 3 };
/// assert_eq!(data.get("attempts"), Some("3"));
/// ```
#[macro_export]
macro_rules! error_data {
    () => {
        $crate::ErrorData::new()
    };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {{
        let mut data = $crate::ErrorData::new();
        $( data.insert($key, $value); )+
        data
    }};
}
