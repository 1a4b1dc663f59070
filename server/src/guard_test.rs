use axum::Router;
use axum::body::Body;
use axum::http::{HeaderValue, StatusCode};
use axum::routing::get;
use tower::ServiceExt;

use super::*;

#[test]
fn protected_paths() {
    assert!(is_protected("/dashboard"));
    assert!(is_protected("/playlist/37i9dQZF1DXcBWIGoYBM5M"));
    assert!(!is_protected("/"));
    assert!(!is_protected("/auth/callback"));
    assert!(!is_protected("/dashboards"));
    assert!(!is_protected("/api/spotify/v1/playlist/"));
}

#[test]
fn blank_cookie_header_is_not_a_session() {
    let mut headers = HeaderMap::new();
    assert!(!has_session_cookie(&headers));
    headers.insert(header::COOKIE, HeaderValue::from_static("  "));
    assert!(!has_session_cookie(&headers));
    headers.insert(header::COOKIE, HeaderValue::from_static("sid=abc"));
    assert!(has_session_cookie(&headers));
}

fn app() -> Router {
    Router::new()
        .route("/", get(|| async { "landing" }))
        .route("/dashboard", get(|| async { "dashboard" }))
        .route("/playlist/{id}", get(|| async { "playlist" }))
        .layer(axum::middleware::from_fn(require_session_cookie))
}

fn request(path: &str, cookie: Option<&'static str>) -> axum::http::Request<Body> {
    let mut builder = axum::http::Request::builder().uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn cookieless_protected_request_redirects_with_reason() {
    for path in ["/dashboard", "/playlist/p1"] {
        let resp = app().oneshot(request(path, None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            resp.headers().get(header::LOCATION),
            Some(&HeaderValue::from_static("/?error=authentication_required"))
        );
    }
}

#[tokio::test]
async fn request_with_cookie_is_rendered() {
    let resp = app().oneshot(request("/dashboard", Some("sid=abc"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn public_pages_skip_the_check() {
    let resp = app().oneshot(request("/", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
