//! REST API helpers for communicating with the PlaySwap backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, relative to the
//! page origin so the host server can proxy `/api/*` with the session cookie.
//! Server-side (SSR): stubs returning `ApiError::Unavailable` since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. A 401 from a data endpoint is
//! treated as an expired session: the backend session is dropped through
//! `logout`, the browser is sent back to the landing page with
//! `session_expired`, and the hook set by `on_session_expired` clears the
//! local auth store.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(any(test, feature = "hydrate"))]
use super::types::ErrorBody;
use super::types::{Playlist, PlaylistTracksPage, UserProfile};

pub const AUTH_URL_ENDPOINT: &str = "/api/auth/";
pub const EXCHANGE_ENDPOINT: &str = "/api/auth/exchange";
pub const LOGOUT_ENDPOINT: &str = "/api/auth/logout";
pub const PROFILE_ENDPOINT: &str = "/api/spotify/v1/users/details";
pub const PLAYLISTS_ENDPOINT: &str = "/api/spotify/v1/playlist/";

/// Failure of a backend call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (backend unreachable, CORS, offline).
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
    /// Called outside the browser.
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Backend-provided message when there is one, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_owned(),
        }
    }
}

/// Whether a failed response means the session cookie is no longer valid.
///
/// Auth endpoints report their own failures, and the profile endpoint is
/// how the auth store detects "signed out", so neither counts.
pub fn is_session_expiry(endpoint: &str, status: u16) -> bool {
    status == 401 && !endpoint.starts_with("/api/auth") && endpoint != PROFILE_ENDPOINT
}

thread_local! {
    static SESSION_EXPIRED_HOOK: std::cell::RefCell<Option<std::rc::Rc<dyn Fn()>>> =
        const { std::cell::RefCell::new(None) };
}

/// Install the callback run after an expired session has been logged out.
/// Replaces any earlier hook.
pub fn on_session_expired(hook: impl Fn() + 'static) {
    SESSION_EXPIRED_HOOK.with_borrow_mut(|slot| *slot = Some(std::rc::Rc::new(hook)));
}

#[cfg(any(test, feature = "hydrate"))]
fn notify_session_expired() {
    // Clone out first so the hook may reinstall itself.
    let hook = SESSION_EXPIRED_HOOK.with_borrow(Clone::clone);
    if let Some(hook) = hook {
        hook();
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn playlist_tracks_endpoint(playlist_id: &str, offset: u32, limit: u32) -> String {
    let id: String = url::form_urlencoded::byte_serialize(playlist_id.as_bytes()).collect();
    format!("/api/spotify/v1/playlist/{id}/tracks?offset={offset}&limit={limit}")
}

#[cfg(any(test, feature = "hydrate"))]
fn status_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("request failed: {status}"));
    ApiError::Status { status, message }
}

/// The authorization endpoint answers with the URL as plain text; some
/// backends JSON-encode it as a string literal.
#[cfg(any(test, feature = "hydrate"))]
fn parse_auth_url(body: &str) -> Result<String, ApiError> {
    let trimmed = body.trim();
    let unquoted = serde_json::from_str::<String>(trimmed).unwrap_or_else(|_| trimmed.to_owned());
    match url::Url::parse(&unquoted) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(unquoted),
        _ => Err(ApiError::Decode(format!("authorization url: {unquoted:?}"))),
    }
}

#[cfg(feature = "hydrate")]
fn network_error(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

#[cfg(feature = "hydrate")]
async fn ensure_ok(
    resp: gloo_net::http::Response,
    endpoint: &str,
) -> Result<gloo_net::http::Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    if is_session_expiry(endpoint, status) {
        expire_session().await;
    }
    let body = resp.text().await.unwrap_or_default();
    Err(status_error(status, &body))
}

#[cfg(feature = "hydrate")]
async fn expire_session() {
    use crate::util::auth::{RedirectReason, redirect_target};

    if let Err(e) = logout().await {
        leptos::logging::warn!("logout after expired session failed: {e}");
    }
    if let Some(window) = web_sys::window() {
        let location = window.location();
        if location.pathname().ok().as_deref() != Some("/") {
            let _ = location.set_href(&redirect_target(RedirectReason::SessionExpired));
        }
    }
    notify_session_expired();
}

#[cfg(feature = "hydrate")]
async fn get_json<T: serde::de::DeserializeOwned>(endpoint: &str) -> Result<T, ApiError> {
    let resp = gloo_net::http::Request::get(endpoint)
        .send()
        .await
        .map_err(network_error)?;
    let resp = ensure_ok(resp, endpoint).await?;
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

/// Fetch the Spotify authorization URL from `GET /api/auth/`.
///
/// # Errors
///
/// Returns an error if the backend is unreachable, answers non-2xx, or the
/// body is not an http(s) URL.
pub async fn fetch_auth_url() -> Result<String, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(AUTH_URL_ENDPOINT)
            .header("Content-Type", "text/plain")
            .send()
            .await
            .map_err(network_error)?;
        let resp = ensure_ok(resp, AUTH_URL_ENDPOINT).await?;
        let body = resp.text().await.map_err(|e| ApiError::Decode(e.to_string()))?;
        parse_auth_url(&body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

/// Trade the popup's ephemeral token for a session cookie via
/// `POST /api/auth/exchange`.
///
/// # Errors
///
/// Returns an error if the request fails or the backend rejects the token.
pub async fn exchange_token(token: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "token": token });
        let resp = gloo_net::http::Request::post(EXCHANGE_ENDPOINT)
            .json(&payload)
            .map_err(network_error)?
            .send()
            .await
            .map_err(network_error)?;
        ensure_ok(resp, EXCHANGE_ENDPOINT).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        Err(ApiError::Unavailable)
    }
}

/// Fetch the signed-in user's profile from `GET /api/spotify/v1/users/details`.
///
/// # Errors
///
/// Returns an error when there is no valid session (401) or the call fails.
pub async fn fetch_current_user() -> Result<UserProfile, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        get_json(PROFILE_ENDPOINT).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

/// End the backend session via `POST /api/auth/logout`.
///
/// # Errors
///
/// Returns an error if the request fails; callers treat logout as best-effort.
pub async fn logout() -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(LOGOUT_ENDPOINT)
            .send()
            .await
            .map_err(network_error)?;
        ensure_ok(resp, LOGOUT_ENDPOINT).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

/// Fetch the user's playlists from `GET /api/spotify/v1/playlist/`.
///
/// # Errors
///
/// Returns an error if the request fails or the session has expired.
pub async fn fetch_playlists() -> Result<Vec<Playlist>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        get_json(PLAYLISTS_ENDPOINT).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

/// Fetch one page of a playlist's tracks.
///
/// # Errors
///
/// Returns an error if the request fails or the session has expired.
pub async fn fetch_playlist_tracks(playlist_id: &str, offset: u32, limit: u32) -> Result<PlaylistTracksPage, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let endpoint = playlist_tracks_endpoint(playlist_id, offset, limit);
        get_json(&endpoint).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (playlist_id, offset, limit);
        Err(ApiError::Unavailable)
    }
}
