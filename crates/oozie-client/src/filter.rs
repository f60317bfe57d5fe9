//! Job filters for the `filter` query parameter.
//!
//! A [`JobFilter`] is never mutated after construction. Deriving a new
//! filter (for example narrowing a coordinator filter to one application
//! name) always produces a fresh value, so the base filter can be reused
//! for later queries.

use std::collections::BTreeMap;
use std::fmt;

/// Filter key for the job name (`appName` for workflows).
pub const NAME: &str = "name";
/// Filter key for the submitting user.
pub const USER: &str = "user";
/// Filter key for the job group.
pub const GROUP: &str = "group";
/// Filter key for the job status.
pub const STATUS: &str = "status";

/// Key/value filter rendered as `k1=v1;k2=v2`.
///
/// Keys are kept sorted so encoding is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    entries: BTreeMap<String, String>,
}

impl JobFilter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this filter with every override applied.
    ///
    /// Overrides add new keys or replace existing values; when a key is
    /// repeated the last value wins. `self` is left untouched.
    pub fn extend<I, K, V>(&self, overrides: I) -> JobFilter
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries = self.entries.clone();
        for (key, value) in overrides {
            entries.insert(key.into(), value.into());
        }
        JobFilter { entries }
    }

    /// Return a copy of this filter with a single key set.
    pub fn with(&self, key: impl Into<String>, value: impl Into<String>) -> JobFilter {
        self.extend([(key.into(), value.into())])
    }

    /// Look up the value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of keys in the filter.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the filter has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as `key=value` pairs joined by `;`.
    pub fn encode(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl<K, V> FromIterator<(K, V)> for JobFilter
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        JobFilter::new().extend(iter)
    }
}

impl fmt::Display for JobFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
