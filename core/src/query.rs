//! URL and query-string normalization.
//!
//! # Design
//! A request URL may carry its own query string and the caller may pass an
//! explicit `Query` on top of it. Both are folded into one ordered mapping
//! (explicit keys win, `None` values are dropped) and re-encoded, so the
//! resolved URL always has a single well-formed query string. The final
//! string is handed to the `url` crate for WHATWG parsing; nothing here
//! tries to be a URL parser.

use url::form_urlencoded;
use url::Url;

use crate::error::Error;
use crate::http::Protocol;

/// Ordered query mapping. A `None` value marks a key to be dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, Option<String>)>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` string. A repeated key
    /// keeps its last value.
    pub fn parse(input: &str) -> Self {
        let input = input.strip_prefix('?').unwrap_or(input);
        form_urlencoded::parse(input.as_bytes())
            .map(|(k, v)| (k.into_owned(), Some(v.into_owned())))
            .collect()
    }

    /// Set `key`, replacing an existing entry in place.
    pub fn set(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.set(key, Some(value.to_string()));
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Mark `key` as null so it is left out of the encoded string.
    pub fn with_null(mut self, key: impl Into<String>) -> Self {
        self.set(key, None);
        self
    }

    /// `Some(None)` for a key explicitly set to null.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref())
    }

    /// Apply `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: &Query) {
        for (key, value) in &other.0 {
            self.set(key.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Percent-encode the non-null entries. Empty when nothing is left.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.0 {
            if let Some(value) = value {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for Query
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut query = Query::new();
        for (key, value) in iter {
            query.set(key, value.map(Into::into));
        }
        query
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Query
where
    K: Into<String>,
    V: ToString,
{
    fn from(pairs: [(K, V); N]) -> Self {
        let mut query = Query::new();
        for (key, value) in pairs {
            query.insert(key, value);
        }
        query
    }
}

/// Transport-facing pieces of a resolved absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    pub protocol: Protocol,
    pub hostname: String,
    /// Explicit port only; `None` means the scheme default.
    pub port: Option<u16>,
    /// Pathname plus `?query` when a query is present.
    pub path: String,
}

/// Resolve `url` against `base_url` and fold `query` into its query string.
pub fn resolve_url(base_url: Option<&str>, url: &str, query: &Query) -> Result<ResolvedUrl, Error> {
    let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);
    let (path_part, embedded) = match without_fragment.split_once('?') {
        Some((path, search)) => (path, Query::parse(search)),
        None => (without_fragment, Query::new()),
    };

    let mut merged = embedded;
    merged.merge(query);

    let mut assembled = absolute_path(base_url, path_part, url)?;
    let search = merged.encode();
    if !search.is_empty() {
        assembled.push('?');
        assembled.push_str(&search);
    }

    let parsed = Url::parse(&assembled).map_err(|e| Error::invalid_url(url, e))?;
    let protocol = Protocol::from_scheme(parsed.scheme())
        .ok_or_else(|| Error::invalid_url(url, format!("unsupported scheme `{}`", parsed.scheme())))?;
    let hostname = parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| Error::invalid_url(url, "missing host"))?
        .to_string();

    let mut path = parsed.path().to_string();
    if let Some(search) = parsed.query() {
        path.push('?');
        path.push_str(search);
    }

    Ok(ResolvedUrl {
        protocol,
        hostname,
        port: parsed.port(),
        path,
    })
}

/// An absolute path part is used as is; a relative one needs a base URL.
fn absolute_path(base_url: Option<&str>, path_part: &str, original: &str) -> Result<String, Error> {
    if Url::parse(path_part).is_ok() {
        return Ok(path_part.to_string());
    }
    match base_url {
        Some(base) => {
            let base = base.strip_suffix('/').unwrap_or(base);
            let path = path_part.strip_prefix('/').unwrap_or(path_part);
            Ok(format!("{base}/{path}"))
        }
        None => Err(Error::invalid_url(original, "relative url without a base url")),
    }
}
