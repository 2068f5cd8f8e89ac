use std::collections::BTreeMap;

use axum::{
    extract::Path,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::{any, get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// What the server saw for an `/echo` request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    /// Header names are lowercase, as received.
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/echo/{*rest}", any(echo))
        .route("/form", post(form))
        .route("/text", get(text))
        .route("/broken-json", get(broken_json))
        .route("/status/{code}", any(status))
        .route("/bytes/{n}", get(bytes))
        .route("/cookies", get(cookies))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("mock server listening on {addr}");
    }
    axum::serve(listener, app()).await
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Echo> {
    tracing::debug!(%method, %uri, "echo");
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    Json(Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    })
}

/// Decodes a urlencoded body and returns the pairs in arrival order.
async fn form(Form(pairs): Form<Vec<(String, String)>>) -> Json<Vec<(String, String)>> {
    Json(pairs)
}

async fn text() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], "plain text")
}

/// Declares JSON but sends something that is not.
async fn broken_json() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], "not json")
}

async fn status(Path(code): Path<u16>) -> Result<impl IntoResponse, StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, Json(serde_json::json!({ "status": code }))))
}

/// `n` bytes of `a`, as plain text.
async fn bytes(Path(n): Path<usize>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], "a".repeat(n))
}

/// Two `set-cookie` headers on one response.
async fn cookies() -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.append(header::SET_COOKIE, HeaderValue::from_static("a=1"));
    headers.append(header::SET_COOKIE, HeaderValue::from_static("b=2"));
    (headers, "ok")
}
