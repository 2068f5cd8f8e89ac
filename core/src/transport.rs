//! The I/O seam.
//!
//! # Design
//! `HttpClient` never opens sockets. It hands a `ResolvedRequest` to a
//! `Transport` and gets a fully buffered `HttpResponse` back. Whatever error
//! the transport produces is passed to the caller untouched, boxed inside
//! `Error::Transport`.
//!
//! `UreqTransport` is the bundled implementation. ureq is blocking, so each
//! exchange runs on tokio's blocking pool and the returned future stays
//! `Send`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BoxError;
use crate::http::{HttpResponse, ResolvedRequest};

/// Executes one request/response exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the complete response. Non-2xx statuses are
    /// responses, not errors.
    async fn send(&self, request: &ResolvedRequest) -> Result<HttpResponse, BoxError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: &ResolvedRequest) -> Result<HttpResponse, BoxError> {
        (**self).send(request).await
    }
}

#[cfg(feature = "ureq")]
pub use self::ureq_transport::UreqTransport;

#[cfg(feature = "ureq")]
mod ureq_transport {
    use std::fmt;

    use async_trait::async_trait;
    use ureq::Agent;

    use super::Transport;
    use crate::error::BoxError;
    use crate::headers::Headers;
    use crate::http::{HttpMethod, HttpResponse, ResolvedRequest};

    /// `Transport` backed by a `ureq::Agent`.
    ///
    /// Must be used from within a tokio runtime.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: Agent,
    }

    impl fmt::Debug for UreqTransport {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("UreqTransport").finish_non_exhaustive()
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl UreqTransport {
        /// Agent that reports 4xx/5xx as responses rather than errors, so
        /// status interpretation stays with the caller.
        pub fn new() -> Self {
            let agent = Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self { agent }
        }

        pub fn from_agent(agent: Agent) -> Self {
            Self { agent }
        }
    }

    #[async_trait]
    impl Transport for UreqTransport {
        async fn send(&self, request: &ResolvedRequest) -> Result<HttpResponse, BoxError> {
            let agent = self.agent.clone();
            let request = request.clone();
            tokio::task::spawn_blocking(move || execute(&agent, &request))
                .await?
                .map_err(Into::into)
        }
    }

    fn apply_headers<B>(
        mut builder: ureq::RequestBuilder<B>,
        headers: &Headers,
    ) -> ureq::RequestBuilder<B> {
        for (key, value) in headers.iter() {
            builder = builder.header(key, value);
        }
        builder
    }

    fn execute(agent: &Agent, req: &ResolvedRequest) -> Result<HttpResponse, ureq::Error> {
        let url = req.url();
        let body = req.body.as_deref();

        let mut response = match (req.method, body) {
            (HttpMethod::Post, Some(body)) => {
                apply_headers(agent.post(&url), &req.headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => apply_headers(agent.post(&url), &req.headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                apply_headers(agent.put(&url), &req.headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => apply_headers(agent.put(&url), &req.headers).send_empty(),
            (HttpMethod::Get, None) => apply_headers(agent.get(&url), &req.headers).call(),
            (HttpMethod::Get, Some(body)) => apply_headers(agent.get(&url), &req.headers)
                .force_send_body()
                .send(body.as_bytes()),
            (HttpMethod::Delete, None) => apply_headers(agent.delete(&url), &req.headers).call(),
            (HttpMethod::Delete, Some(body)) => apply_headers(agent.delete(&url), &req.headers)
                .force_send_body()
                .send(body.as_bytes()),
            (HttpMethod::Head, None) => apply_headers(agent.head(&url), &req.headers).call(),
            (HttpMethod::Head, Some(body)) => apply_headers(agent.head(&url), &req.headers)
                .force_send_body()
                .send(body.as_bytes()),
        }?;

        let status = response.status().as_u16();
        // Repeated names (set-cookie, vary) each keep their own entry.
        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            headers.append(
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }
        let body = if req.method == HttpMethod::Head {
            String::new()
        } else {
            let bytes = response
                .body_mut()
                .with_config()
                .limit(u64::MAX)
                .read_to_vec()?;
            String::from_utf8_lossy(&bytes).into_owned()
        };

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
