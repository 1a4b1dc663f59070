//! Pre-render session check for protected pages.
//!
//! A request for a protected page with no `cookie` header at all cannot have
//! a session, so it is redirected before SSR runs. Anything carrying cookies
//! is rendered and left to the client-side guard to verify.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use axum::extract::Request;
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use playswap_client::util::auth::{RedirectReason, redirect_target};

pub fn is_protected(path: &str) -> bool {
    path == "/dashboard" || path.starts_with("/dashboard/") || path.starts_with("/playlist/")
}

pub fn has_session_cookie(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .any(|v| v.to_str().is_ok_and(|s| !s.trim().is_empty()))
}

pub async fn require_session_cookie(req: Request, next: Next) -> Response {
    let path = req.uri().path();
    if is_protected(path) && !has_session_cookie(req.headers()) {
        tracing::debug!(%path, "no session cookie; redirecting to landing");
        return Redirect::temporary(&redirect_target(RedirectReason::AuthenticationRequired)).into_response();
    }
    next.run(req).await
}
