//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::content::MimeTable;
use crate::headers::Headers;

/// Settings shared by every request a client sends.
///
/// Deserializes from `{"baseUrl": "...", "headers": {...}}`; `base_url` is
/// accepted as an alias so the struct also sits naturally in TOML configs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(alias = "base_url", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub headers: Headers,
    pub mime: MimeTable,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header sent with every request.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key, value);
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers.merge(&headers);
        self
    }

    pub fn with_mime_table(mut self, mime: MimeTable) -> Self {
        self.mime = mime;
        self
    }
}
