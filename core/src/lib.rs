//! Small HTTP/HTTPS request helper.
//!
//! # Overview
//! Wraps an external HTTP transport with base-URL resolution, default header
//! merging, query-string normalization and JSON/form content negotiation.
//!
//! ```no_run
//! use reqkit_core::{ClientConfig, HttpClient, RequestOptions};
//!
//! # async fn run() -> Result<(), reqkit_core::Error> {
//! let client = HttpClient::new(
//!     ClientConfig::new()
//!         .with_base_url("https://api.example.com")
//!         .with_headers(reqkit_core::Headers::json()),
//! );
//! let envelope = client
//!     .get("/search?q=rust", RequestOptions::new().query("page", 2))
//!     .await?;
//! println!("{} {:?}", envelope.status(), envelope.body);
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - `HttpClient` holds only a read-only `ClientConfig` and a `Transport`.
//! - Each call is split into `build_request` (produces a `ResolvedRequest`)
//!   and `parse_response` (consumes an `HttpResponse`), so the I/O boundary
//!   is explicit and a host may run the exchange itself.
//! - The merged headers decide how bodies are encoded and whether responses
//!   are parsed as JSON; a response that fails to parse comes back as text.
//! - `UreqTransport` (feature `ureq`, on by default) is the bundled transport.

pub mod client;
pub mod config;
pub mod content;
pub mod error;
pub mod headers;
pub mod http;
pub mod query;
pub mod transport;
pub mod types;

pub use client::HttpClient;
pub use config::ClientConfig;
pub use content::{
    is_form_content, is_json_content, Body, ContentKind, MimeTable, MIME_FORM, MIME_JSON,
};
pub use error::{BoxError, Error};
pub use headers::Headers;
pub use http::{HttpMethod, HttpResponse, Protocol, ResolvedRequest};
pub use query::{resolve_url, Query, ResolvedUrl};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{RequestOptions, RequestSpec, ResponseEnvelope};
