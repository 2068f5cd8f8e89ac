//! Request normalization, dispatch and response decoding.
//!
//! # Design
//! `HttpClient` holds a read-only `ClientConfig` and a `Transport`, and
//! carries no mutable state between calls. Every request goes through two
//! pure halves: `build_request` turns a `RequestSpec` into a
//! `ResolvedRequest`, and `parse_response` turns the transport's
//! `HttpResponse` into a `ResponseEnvelope`. `request` and the verb
//! shortcuts glue them around a single `Transport::send`. Hosts that run
//! their own HTTP stack can call the two halves directly.

use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::headers::Headers;
use crate::http::{HttpMethod, HttpResponse, ResolvedRequest};
use crate::query::resolve_url;
use crate::transport::Transport;
#[cfg(feature = "ureq")]
use crate::transport::UreqTransport;
use crate::types::{RequestOptions, RequestSpec, ResponseEnvelope};

/// HTTP client with base-URL resolution, default headers and JSON/form
/// content negotiation.
#[derive(Debug, Clone)]
pub struct HttpClient<T> {
    config: ClientConfig,
    transport: T,
}

#[cfg(feature = "ureq")]
impl HttpClient<UreqTransport> {
    /// Client over the bundled ureq transport.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T> HttpClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve URL and query, merge headers and encode the body.
    pub fn build_request(&self, spec: &RequestSpec) -> Result<ResolvedRequest, Error> {
        let headers = Headers::merged(&self.config.headers, &spec.headers);
        let url = resolve_url(self.config.base_url.as_deref(), &spec.url, &spec.query)?;
        let body = match &spec.data {
            Some(data) => Some(self.config.mime.content_kind(&headers).encode(data)?),
            None => None,
        };

        Ok(ResolvedRequest {
            method: spec.method,
            protocol: url.protocol,
            hostname: url.hostname,
            port: url.port,
            path: url.path,
            headers,
            body,
        })
    }

    /// Decode the body according to the response's content type. Never fails.
    pub fn parse_response(&self, response: HttpResponse) -> ResponseEnvelope {
        let body = self.config.mime.decode(response.body.clone(), &response.headers);
        ResponseEnvelope {
            body,
            headers: response.headers.clone(),
            response,
        }
    }
}

impl<T: Transport> HttpClient<T> {
    /// Send one request and decode its response.
    pub async fn request(&self, spec: RequestSpec) -> Result<ResponseEnvelope, Error> {
        let request = self.build_request(&spec)?;
        tracing::debug!(method = %request.method, url = %request.url(), "sending request");

        let response = self.transport.send(&request).await.map_err(|e| {
            tracing::warn!(method = %request.method, url = %request.url(), "transport failed: {e}");
            Error::Transport(e)
        })?;
        tracing::debug!(status = response.status, "received response");

        Ok(self.parse_response(response))
    }

    pub async fn get(&self, url: &str, options: RequestOptions) -> Result<ResponseEnvelope, Error> {
        self.request(RequestSpec::from_options(HttpMethod::Get, url, None, options))
            .await
    }

    pub async fn post<D>(
        &self,
        url: &str,
        data: &D,
        options: RequestOptions,
    ) -> Result<ResponseEnvelope, Error>
    where
        D: Serialize + ?Sized,
    {
        let data = serde_json::to_value(data)?;
        self.request(RequestSpec::from_options(HttpMethod::Post, url, Some(data), options))
            .await
    }

    pub async fn put<D>(
        &self,
        url: &str,
        data: &D,
        options: RequestOptions,
    ) -> Result<ResponseEnvelope, Error>
    where
        D: Serialize + ?Sized,
    {
        let data = serde_json::to_value(data)?;
        self.request(RequestSpec::from_options(HttpMethod::Put, url, Some(data), options))
            .await
    }

    /// DELETE with an optional body. Without one, name any `Serialize` type:
    /// `client.delete::<()>(url, None, options)`.
    pub async fn delete<D>(
        &self,
        url: &str,
        data: Option<&D>,
        options: RequestOptions,
    ) -> Result<ResponseEnvelope, Error>
    where
        D: Serialize + ?Sized,
    {
        let data = data.map(serde_json::to_value).transpose()?;
        self.request(RequestSpec::from_options(HttpMethod::Delete, url, data, options))
            .await
    }

    pub async fn head(&self, url: &str, options: RequestOptions) -> Result<ResponseEnvelope, Error> {
        self.request(RequestSpec::from_options(HttpMethod::Head, url, None, options))
            .await
    }
}
