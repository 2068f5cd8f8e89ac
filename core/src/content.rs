//! Content negotiation and body encoding.
//!
//! # Design
//! The merged request headers pick a `ContentKind`, and each kind has one
//! explicit rule for turning `serde_json::Value` data into a body string.
//! Response bodies are decoded as JSON only when the response declares a
//! JSON content type, and a body that fails to parse is handed back as text.
//! The MIME strings live in a `MimeTable` carried by the client config.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::headers::{Headers, CONTENT_TYPE};

pub const MIME_JSON: &str = "application/json";
pub const MIME_FORM: &str = "application/x-www-form-urlencoded";

/// MIME types recognized during content negotiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MimeTable {
    pub json: String,
    pub form: String,
}

impl Default for MimeTable {
    fn default() -> Self {
        Self {
            json: MIME_JSON.to_string(),
            form: MIME_FORM.to_string(),
        }
    }
}

impl MimeTable {
    /// True if any `content-type` header (key compared ignoring case) mentions
    /// the JSON MIME type.
    pub fn is_json_content(&self, headers: &Headers) -> bool {
        declares(headers, &self.json)
    }

    pub fn is_form_content(&self, headers: &Headers) -> bool {
        declares(headers, &self.form)
    }

    /// JSON takes precedence over form when both are declared.
    pub fn content_kind(&self, headers: &Headers) -> ContentKind {
        if self.is_json_content(headers) {
            ContentKind::Json
        } else if self.is_form_content(headers) {
            ContentKind::Form
        } else {
            ContentKind::Raw
        }
    }

    /// Decode a response body. Never fails.
    pub fn decode(&self, raw: String, headers: &Headers) -> Body {
        if !self.is_json_content(headers) {
            return Body::Text(raw);
        }
        match serde_json::from_str(&raw) {
            Ok(value) => Body::Json(value),
            Err(e) => {
                tracing::debug!("response declared json but did not parse: {e}");
                Body::Text(raw)
            }
        }
    }
}

fn declares(headers: &Headers, mime: &str) -> bool {
    let mime = mime.to_ascii_lowercase();
    headers
        .values_ignore_case(CONTENT_TYPE)
        .any(|value| value.to_ascii_lowercase().contains(&mime))
}

/// `MimeTable::is_json_content` with the default table.
pub fn is_json_content(headers: &Headers) -> bool {
    MimeTable::default().is_json_content(headers)
}

/// `MimeTable::is_form_content` with the default table.
pub fn is_form_content(headers: &Headers) -> bool {
    MimeTable::default().is_form_content(headers)
}

/// How an outbound body is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Json,
    Form,
    /// No recognized content type: strings go out untouched, anything else
    /// as JSON text.
    Raw,
}

impl ContentKind {
    pub fn encode(&self, data: &Value) -> Result<String, Error> {
        match (self, data) {
            (ContentKind::Json, _) => Ok(serde_json::to_string(data)?),
            (ContentKind::Form | ContentKind::Raw, Value::String(s)) => Ok(s.clone()),
            (ContentKind::Form, Value::Object(map)) => {
                let mut pairs: Vec<(&str, String)> = Vec::with_capacity(map.len());
                for (key, value) in map {
                    match value {
                        Value::Array(items) => {
                            for item in items {
                                if let Some(item) = form_scalar(key, item)? {
                                    pairs.push((key.as_str(), item));
                                }
                            }
                        }
                        _ => {
                            if let Some(value) = form_scalar(key, value)? {
                                pairs.push((key.as_str(), value));
                            }
                        }
                    }
                }
                Ok(serde_urlencoded::to_string(pairs)?)
            }
            (ContentKind::Form, other) => Err(Error::Serialization(format!(
                "form body must be an object or a pre-encoded string, got {}",
                kind_name(other)
            ))),
            (ContentKind::Raw, other) => Ok(other.to_string()),
        }
    }
}

fn form_scalar(key: &str, value: &Value) -> Result<Option<String>, Error> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(_) | Value::Object(_) => Err(Error::Serialization(format!(
            "form field `{key}` cannot hold a nested {}",
            kind_name(value)
        ))),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Text(String),
}

impl Body {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            Body::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(text) => Some(text),
            Body::Json(_) => None,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Body::Json(_))
    }
}
