//! Request and response shapes exchanged with callers.
//!
//! # Design
//! `RequestSpec` is the caller's logical description of one request and is
//! built fresh per call. `RequestOptions` is the subset the verb shortcuts
//! accept; its `Default` stands in for "no options given".

use serde_json::Value;

use crate::content::Body;
use crate::headers::Headers;
use crate::http::{HttpMethod, HttpResponse};
use crate::query::Query;

/// Logical description of a single request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    /// Absolute, or relative to the configured base URL.
    pub url: String,
    pub query: Query,
    /// Encoded according to the negotiated content type; `None` sends no body.
    pub data: Option<Value>,
    pub headers: Headers,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.insert(key, value);
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key, value);
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub(crate) fn from_options(
        method: HttpMethod,
        url: &str,
        data: Option<Value>,
        options: RequestOptions,
    ) -> Self {
        Self {
            method,
            url: url.to_string(),
            query: options.query,
            data,
            headers: options.headers,
        }
    }
}

/// Per-call query and headers for the verb shortcuts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub query: Query,
    pub headers: Headers,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.insert(key, value);
        self
    }

    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key, value);
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }
}

/// Decoded response plus the raw transport response, untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    pub body: Body,
    pub headers: Headers,
    pub response: HttpResponse,
}

impl ResponseEnvelope {
    pub fn status(&self) -> u16 {
        self.response.status
    }
}
