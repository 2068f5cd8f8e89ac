//! Ordered header collection.
//!
//! # Design
//! Keys are stored exactly as the caller wrote them, in insertion order.
//! `insert` matches keys exactly, so a map built by hand may hold two keys
//! that differ only in case. `merge` matches ignoring case, so a per-call
//! `content-type` replaces a default `Content-Type` instead of sitting next
//! to it. Response headers are collected with `append` and may repeat.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::content::MIME_JSON;

/// Header name used for content negotiation.
pub const CONTENT_TYPE: &str = "Content-Type";

/// An ordered `name -> value` header mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset that asks for and sends JSON.
    pub fn json() -> Self {
        Self::new()
            .with("Accept", MIME_JSON)
            .with(CONTENT_TYPE, format!("{MIME_JSON}; charset=UTF-8"))
    }

    /// Insert a header, replacing the value of an entry with the exact same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Exact-key lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value whose key matches `key` ignoring ASCII case.
    pub fn get_ignore_case(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// All values whose key matches `key` ignoring ASCII case.
    pub fn values_ignore_case<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Add an entry even if the key is already present. Used for response
    /// headers, where a name may legitimately repeat.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Apply `overrides` on top of `self`. Keys are matched ignoring ASCII
    /// case; the override takes the slot of the first matching entry, keeps
    /// its own casing, and every other case variant of that key is removed.
    pub fn merge(&mut self, overrides: &Headers) {
        for (key, value) in overrides.iter() {
            match self.0.iter().position(|(k, _)| k.eq_ignore_ascii_case(key)) {
                Some(index) => {
                    self.0.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
                    self.0.insert(index, (key.to_string(), value.to_string()));
                }
                None => self.0.push((key.to_string(), value.to_string())),
            }
        }
    }

    /// Client defaults followed by per-call headers. A per-call
    /// `content-type` replaces a default `Content-Type`, so only one of them
    /// reaches the transport.
    pub fn merged(defaults: &Headers, overrides: &Headers) -> Headers {
        let mut headers = defaults.clone();
        headers.merge(overrides);
        headers
    }

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

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (key, value) in iter {
            headers.insert(key, value);
        }
        headers
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for Headers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Headers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HeadersVisitor;

        impl<'de> Visitor<'de> for HeadersVisitor {
            type Value = Headers;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of header names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Headers, A::Error> {
                let mut headers = Headers::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    headers.insert(key, value);
                }
                Ok(headers)
            }
        }

        deserializer.deserialize_map(HeadersVisitor)
    }
}
