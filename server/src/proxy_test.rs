use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use tower::ServiceExt;

use super::*;
use crate::config::HostConfig;

// =============================================================================
// Header and URL helpers
// =============================================================================

#[test]
fn upstream_url_keeps_path_and_query() {
    assert_eq!(
        upstream_url("http://127.0.0.1:8080", "/api/spotify/v1/playlist/p1/tracks", Some("offset=50&limit=50")),
        "http://127.0.0.1:8080/api/spotify/v1/playlist/p1/tracks?offset=50&limit=50"
    );
    assert_eq!(upstream_url("http://b", "/api/auth/", None), "http://b/api/auth/");
    assert_eq!(upstream_url("http://b", "/api/auth/", Some("")), "http://b/api/auth/");
}

#[test]
fn request_headers_are_allow_listed() {
    let mut incoming = HeaderMap::new();
    incoming.insert(header::COOKIE, HeaderValue::from_static("sid=abc"));
    incoming.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    incoming.insert(header::HOST, HeaderValue::from_static("localhost:3000"));
    incoming.insert(header::ORIGIN, HeaderValue::from_static("http://localhost:3000"));
    incoming.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

    let out = forward_request_headers(&incoming);
    assert_eq!(out.len(), 2);
    assert_eq!(out.get(header::COOKIE), Some(&HeaderValue::from_static("sid=abc")));
    assert!(out.get(header::HOST).is_none());
    assert!(out.get(header::ORIGIN).is_none());
}

#[test]
fn response_headers_keep_every_set_cookie() {
    let mut upstream = HeaderMap::new();
    upstream.append(header::SET_COOKIE, HeaderValue::from_static("sid=abc; HttpOnly"));
    upstream.append(header::SET_COOKIE, HeaderValue::from_static("csrf=xyz"));
    upstream.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    upstream.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));

    let out = forward_response_headers(&upstream);
    assert_eq!(out.get_all(header::SET_COOKIE).iter().count(), 2);
    assert!(out.get(header::TRANSFER_ENCODING).is_none());
    assert!(out.get(header::CONTENT_TYPE).is_some());
}

#[test]
fn upstream_failure_maps_to_bad_gateway() {
    let resp = ProxyError::Upstream("connection refused".to_owned()).into_response();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let resp = ProxyError::RequestBody("too large".to_owned()).into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// End to end against a local backend
// =============================================================================

async fn spawn_backend() -> String {
    async fn details(headers: HeaderMap) -> Response {
        match headers.get(header::COOKIE) {
            Some(cookie) if cookie == "sid=abc" => {
                Json(serde_json::json!({ "id": "u1", "displayName": "Alice" })).into_response()
            }
            _ => (StatusCode::UNAUTHORIZED, Json(serde_json::json!({ "message": "no session" }))).into_response(),
        }
    }

    async fn exchange(body: String) -> Response {
        let mut resp = (StatusCode::OK, body).into_response();
        resp.headers_mut().append(header::SET_COOKIE, HeaderValue::from_static("sid=abc; Path=/; HttpOnly"));
        resp.headers_mut().append(header::SET_COOKIE, HeaderValue::from_static("remember=1; Path=/"));
        resp
    }

    async fn tracks(axum::extract::RawQuery(query): axum::extract::RawQuery) -> String {
        query.unwrap_or_default()
    }

    let app = Router::new()
        .route("/api/spotify/v1/users/details", get(details))
        .route("/api/auth/exchange", post(exchange))
        .route("/api/spotify/v1/playlist/{id}/tracks", get(tracks));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn proxy_router(backend_url: String) -> Router {
    let config = HostConfig { backend_url, port: 0, proxy_timeout_secs: 5 };
    let state = AppState::new(config).unwrap();
    Router::new().route("/api/{*path}", axum::routing::any(forward)).with_state(state)
}

async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), MAX_BODY_BYTES).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn forwards_cookie_and_relays_status() {
    let app = proxy_router(spawn_backend().await);

    let req = axum::http::Request::builder()
        .uri("/api/spotify/v1/users/details")
        .header(header::COOKIE, "sid=abc")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Alice"));

    let req = axum::http::Request::builder().uri("/api/spotify/v1/users/details").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(body_text(resp).await.contains("no session"));
}

#[tokio::test]
async fn relays_body_and_every_set_cookie() {
    let app = proxy_router(spawn_backend().await);

    let req = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/auth/exchange")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"token":"tok"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get_all(header::SET_COOKIE).iter().count(), 2);
    assert_eq!(body_text(resp).await, r#"{"token":"tok"}"#);
}

#[tokio::test]
async fn forwards_query_string() {
    let app = proxy_router(spawn_backend().await);

    let req = axum::http::Request::builder()
        .uri("/api/spotify/v1/playlist/p1/tracks?offset=50&limit=50")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(body_text(resp).await, "offset=50&limit=50");
}

#[tokio::test]
async fn unreachable_backend_is_bad_gateway_with_message() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let app = proxy_router(format!("http://{addr}"));

    let req = axum::http::Request::builder().uri("/api/auth/").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(body["message"], "Backend unavailable. Please try again later.");
}
