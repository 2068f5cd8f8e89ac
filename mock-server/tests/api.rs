use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn content_type(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(http::header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
}

// --- echo ---

#[tokio::test]
async fn echo_reports_method_path_and_query() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/echo/users/1?page=2&q=a")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.path, "/echo/users/1");
    assert_eq!(echo.query.as_deref(), Some("page=2&q=a"));
    assert!(echo.body.is_empty());
}

#[tokio::test]
async fn echo_reports_headers_and_body() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/echo")
                .header(http::header::CONTENT_TYPE, "application/json")
                .header("X-Trace", "abc")
                .body(r#"{"name":"x"}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "PUT");
    assert_eq!(echo.headers["content-type"], "application/json");
    assert_eq!(echo.headers["x-trace"], "abc");
    assert_eq!(echo.body, r#"{"name":"x"}"#);
}

// --- form ---

#[tokio::test]
async fn form_returns_decoded_pairs() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/form")
                .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body("b=x+y&a=1".to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let pairs: Vec<(String, String)> = body_json(resp).await;
    assert_eq!(
        pairs,
        vec![
            ("b".to_string(), "x y".to_string()),
            ("a".to_string(), "1".to_string()),
        ]
    );
}

// --- fixed bodies ---

#[tokio::test]
async fn text_is_plain() {
    let resp = app()
        .oneshot(Request::builder().uri("/text").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(content_type(&resp).starts_with("text/plain"));
    assert_eq!(body_bytes(resp).await, "plain text");
}

#[tokio::test]
async fn broken_json_declares_json() {
    let resp = app()
        .oneshot(Request::builder().uri("/broken-json").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(content_type(&resp), "application/json");
    assert_eq!(body_bytes(resp).await, "not json");
}

#[tokio::test]
async fn bytes_returns_requested_length() {
    let resp = app()
        .oneshot(Request::builder().uri("/bytes/5").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "aaaaa");
}

#[tokio::test]
async fn cookies_sets_two_cookies() {
    let resp = app()
        .oneshot(Request::builder().uri("/cookies").body(String::new()).unwrap())
        .await
        .unwrap();

    let cookies: Vec<_> = resp
        .headers()
        .get_all(http::header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap())
        .collect();
    assert_eq!(cookies, vec!["a=1", "b=2"]);
}

// --- status ---

#[tokio::test]
async fn status_route_answers_with_requested_code() {
    let resp = app()
        .oneshot(Request::builder().uri("/status/418").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["status"], 418);
}

#[tokio::test]
async fn status_route_rejects_out_of_range_code() {
    let resp = app()
        .oneshot(Request::builder().uri("/status/42").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
