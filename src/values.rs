//! Ordered multi-map for query parameters.
//!
//! [`UrlValues`] is the intermediate representation produced by a
//! [`ParamsMarshaler`](crate::ParamsMarshaler): keys sorted
//! lexicographically, each key holding one or more values in insertion
//! order. [`UrlValues::encode()`] renders the map as an
//! `application/x-www-form-urlencoded` query string.

use std::collections::BTreeMap;

/// A sorted, multi-valued map from query-parameter name to values.
///
/// Keys are ordered lexicographically; values under a key keep the order
/// they were appended in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UrlValues {
    entries: BTreeMap<String, Vec<String>>,
}

impl UrlValues {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` under `key`, preserving any existing values.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(key.into()).or_default().push(value.into());
    }

    /// Replace all values under `key` with the single `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), vec![value.into()]);
    }

    /// Returns the values under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Returns `true` if the map holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over `(key, values)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Encode the map as an `application/x-www-form-urlencoded` query
    /// string: keys in lexicographic order, repeated keys for multi-values,
    /// standard percent-encoding (space as `+`).
    ///
    /// An empty map encodes to the empty string.
    pub fn encode(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.entries {
            for value in values {
                ser.append_pair(key, value);
            }
        }
        ser.finish()
    }
}

impl Extend<(String, String)> for UrlValues {
    fn extend<T: IntoIterator<Item = (String, String)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.append(key, value);
        }
    }
}

impl FromIterator<(String, String)> for UrlValues {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut values = Self::new();
        values.extend(iter);
        values
    }
}
