//! Same-origin reverse proxy for `/api/*`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser only ever talks to this host. Proxying keeps the backend's
//! session cookie first-party: `set-cookie` headers pass through untouched
//! and the browser's `cookie` header is forwarded on each call.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};

use crate::state::AppState;

/// Request bodies are small JSON payloads; anything larger is refused.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Request headers copied to the backend. Everything else stays here.
pub const FORWARDED_REQUEST_HEADERS: [HeaderName; 4] =
    [header::COOKIE, header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION];

/// Response headers recomputed by this host rather than copied.
const HOP_BY_HOP: [HeaderName; 4] =
    [header::CONNECTION, header::TRANSFER_ENCODING, header::CONTENT_LENGTH, header::UPGRADE];

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The outbound HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// The browser's request body could not be read.
    #[error("request body unreadable: {0}")]
    RequestBody(String),

    /// The backend could not be reached or did not answer in time.
    #[error("backend unreachable: {0}")]
    Upstream(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::RequestBody(_) => StatusCode::BAD_REQUEST,
            Self::ClientBuild(_) | Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        let message = match status {
            StatusCode::BAD_GATEWAY => "Backend unavailable. Please try again later.".to_owned(),
            _ => self.to_string(),
        };
        (status, Json(serde_json::json!({ "message": message }))).into_response()
    }
}

/// Backend URL for a proxied path (`/api/...`) and optional query string.
pub fn upstream_url(backend_url: &str, path: &str, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{backend_url}{path}?{q}"),
        _ => format!("{backend_url}{path}"),
    }
}

pub fn forward_request_headers(incoming: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in &FORWARDED_REQUEST_HEADERS {
        for value in incoming.get_all(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

/// Backend response headers minus hop-by-hop ones. Repeated headers such as
/// `set-cookie` keep every value.
pub fn forward_response_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for (name, value) in upstream {
        if !HOP_BY_HOP.contains(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

/// `ANY /api/{*path}`: forward to the backend and relay its answer.
pub async fn forward(State(state): State<AppState>, req: Request) -> Result<Response, ProxyError> {
    let (parts, body) = req.into_parts();
    let url = upstream_url(&state.config.backend_url, parts.uri.path(), parts.uri.query());
    let bytes: Bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| ProxyError::RequestBody(e.to_string()))?;

    let upstream = state
        .http
        .request(parts.method.clone(), &url)
        .headers(forward_request_headers(&parts.headers))
        .body(bytes)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(method = %parts.method, %url, error = %e, "backend request failed");
            ProxyError::Upstream(e.to_string())
        })?;

    let status = upstream.status();
    let headers = forward_response_headers(upstream.headers());
    let body = upstream.bytes().await.map_err(|e| ProxyError::Upstream(e.to_string()))?;
    tracing::debug!(method = %parts.method, %url, status = status.as_u16(), "proxied");

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}
