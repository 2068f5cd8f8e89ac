//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! builds `ResolvedRequest` values and decodes `HttpResponse` values; the
//! exchange itself belongs to a `Transport`, or to a host that executes the
//! request with its own HTTP stack.
//!
//! All fields use owned types so values can be moved across threads and
//! handed to blocking transports without lifetime concerns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::headers::Headers;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive: `"post"` parses as `Post`.
impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            _ => Err(Error::InvalidMethod(s.to_string())),
        }
    }
}

/// URL scheme accepted by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "http" => Some(Protocol::Http),
            "https" => Some(Protocol::Https),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Protocol::Http => 80,
            Protocol::Https => 443,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved request, ready for a transport.
///
/// Built by `HttpClient::build_request`. `path` already carries the merged,
/// percent-encoded query string and `headers` are the client defaults merged
/// with the per-call headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub method: HttpMethod,
    pub protocol: Protocol,
    pub hostname: String,
    pub port: Option<u16>,
    pub path: String,
    pub headers: Headers,
    pub body: Option<String>,
}

impl ResolvedRequest {
    /// Port to connect to, falling back to the scheme default.
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.protocol.default_port())
    }

    /// Reassemble the absolute URL.
    pub fn url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}{}", self.protocol, self.hostname, port, self.path),
            None => format!("{}://{}{}", self.protocol, self.hostname, self.path),
        }
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a transport (or by the host) after executing a
/// `ResolvedRequest`, then passed to `HttpClient::parse_response`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("post".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert_eq!("Delete".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert_eq!("HEAD".parse::<HttpMethod>().unwrap(), HttpMethod::Head);
    }

    #[test]
    fn unknown_method_is_rejected() {
        let err = "PATCH".parse::<HttpMethod>().unwrap_err();
        assert!(matches!(err, Error::InvalidMethod(ref m) if m == "PATCH"));
    }

    #[test]
    fn method_defaults_to_get() {
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
    }

    #[test]
    fn url_includes_explicit_port_only() {
        let mut req = ResolvedRequest {
            method: HttpMethod::Get,
            protocol: Protocol::Https,
            hostname: "api.test".to_string(),
            port: None,
            path: "/a?b=1".to_string(),
            headers: Headers::new(),
            body: None,
        };
        assert_eq!(req.url(), "https://api.test/a?b=1");
        assert_eq!(req.effective_port(), 443);

        req.port = Some(8443);
        assert_eq!(req.url(), "https://api.test:8443/a?b=1");
        assert_eq!(req.effective_port(), 8443);
    }
}
