//! Verify request building and response decoding against the JSON test
//! vectors stored in `test-vectors/`.
//!
//! Each normalize case describes a client config and a request, plus either
//! the expected resolved request or the expected error kind. Each decode case
//! describes a response and the body it should decode to.

use std::sync::Arc;

use async_trait::async_trait;
use reqkit_core::{
    BoxError, Body, ClientConfig, Error, Headers, HttpClient, HttpMethod, HttpResponse, Query,
    RequestSpec, ResolvedRequest, Transport,
};
use serde_json::Value;

/// Never reached: vectors only exercise the pure halves of the client.
struct NoTransport;

#[async_trait]
impl Transport for NoTransport {
    async fn send(&self, _request: &ResolvedRequest) -> Result<HttpResponse, BoxError> {
        unreachable!("test vectors do not perform I/O")
    }
}

fn pairs(value: &Value) -> Vec<(String, Option<String>)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (
                arr[0].as_str().unwrap().to_string(),
                arr[1].as_str().map(str::to_string),
            )
        })
        .collect()
}

fn headers(value: &Value) -> Headers {
    pairs(value)
        .into_iter()
        .map(|(k, v)| (k, v.unwrap_or_default()))
        .collect()
}

fn build(case: &Value) -> Result<ResolvedRequest, Error> {
    let mut config = ClientConfig::new().with_headers(headers(&case["default_headers"]));
    if let Some(base) = case["base_url"].as_str() {
        config = config.with_base_url(base);
    }
    let client = HttpClient::with_transport(config, Arc::new(NoTransport));

    let method: HttpMethod = case["method"].as_str().unwrap().parse()?;
    let spec = RequestSpec {
        method,
        url: case["url"].as_str().unwrap().to_string(),
        query: pairs(&case["query"]).into_iter().collect::<Query>(),
        data: Some(case["data"].clone()).filter(|data| !data.is_null()),
        headers: headers(&case["headers"]),
    };
    client.build_request(&spec)
}

// ---------------------------------------------------------------------------
// Normalize
// ---------------------------------------------------------------------------

#[test]
fn normalize_test_vectors() {
    let raw = include_str!("../../test-vectors/normalize.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = build(case);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "InvalidUrl" => assert!(matches!(err, Error::InvalidUrl { .. }), "{name}: expected InvalidUrl"),
                "InvalidMethod" => assert!(matches!(err, Error::InvalidMethod(_)), "{name}: expected InvalidMethod"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
            continue;
        }

        let req = result.unwrap();
        let expected = &case["expected_request"];
        assert_eq!(req.method.as_str(), expected["method"].as_str().unwrap(), "{name}: method");
        assert_eq!(req.protocol.as_str(), expected["protocol"].as_str().unwrap(), "{name}: protocol");
        assert_eq!(req.hostname, expected["hostname"].as_str().unwrap(), "{name}: hostname");
        assert_eq!(
            req.port,
            expected["port"].as_u64().map(|p| p as u16),
            "{name}: port"
        );
        assert_eq!(req.path, expected["path"].as_str().unwrap(), "{name}: path");
        assert_eq!(req.headers, headers(&expected["headers"]), "{name}: headers");
        assert_eq!(req.body.as_deref(), expected["body"].as_str(), "{name}: body");
    }
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

#[test]
fn decode_test_vectors() {
    let raw = include_str!("../../test-vectors/decode.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let client = HttpClient::with_transport(ClientConfig::new(), NoTransport);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = HttpResponse {
            status: 200,
            headers: headers(&case["headers"]),
            body: case["body"].as_str().unwrap().to_string(),
        };

        let envelope = client.parse_response(response.clone());
        assert_eq!(envelope.response, response, "{name}: raw response passed through");

        if let Some(expected) = case.get("expected_json") {
            assert_eq!(envelope.body, Body::Json(expected.clone()), "{name}: json body");
        } else {
            let expected = case["expected_text"].as_str().unwrap();
            assert_eq!(envelope.body, Body::Text(expected.to_string()), "{name}: text body");
        }
    }
}
